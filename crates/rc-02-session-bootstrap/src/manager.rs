//! # Session Manager
//!
//! Owns the visible "current session" slot. Every request starts a new
//! generation and cancels the previous run; a run publishes its status and
//! result only while its generation is still the latest.

use parking_lot::Mutex;
use rc_01_chain_resolver::ProviderHandle;
use shared_types::{Session, SessionSource};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cancellation::CancellationToken;
use crate::domain::{BootstrapError, BootstrapStatus};
use crate::service::SessionBootstrapper;

/// Snapshot of the session slot, broadcast to observers.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Generation that produced this state.
    pub generation: u64,
    /// Identity of the (provider, network) pair being served.
    pub key: Option<String>,
    /// Last status of the latest run.
    pub status: BootstrapStatus,
    /// Ready session, if any.
    pub session: Option<Arc<dyn Session>>,
    /// Failure of the latest run. Never `Aborted`.
    pub error: Option<BootstrapError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            generation: 0,
            key: None,
            status: BootstrapStatus::Idle,
            session: None,
            error: None,
        }
    }
}

struct InFlight {
    generation: u64,
    token: CancellationToken,
}

/// Restartable bootstrap driver.
pub struct SessionManager {
    bootstrapper: SessionBootstrapper,
    latest: Mutex<Option<InFlight>>,
    next_generation: Mutex<u64>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a manager with an empty slot.
    pub fn new(bootstrapper: SessionBootstrapper) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            bootstrapper,
            latest: Mutex::new(None),
            next_generation: Mutex::new(0),
            state,
        }
    }

    /// Observe slot changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Starts a fresh run for `provider`, superseding any run in flight.
    ///
    /// Returns `Ok(Some(session))` when this run delivered, `Ok(None)` when
    /// it was superseded, and `Err` when it was the latest run and failed.
    pub async fn request(
        &self,
        provider: ProviderHandle,
        key: impl Into<String>,
    ) -> Result<Option<Arc<dyn Session>>, BootstrapError> {
        let key = key.into();
        let (generation, token) = self.begin(&key);
        debug!("[rc-02] Bootstrap generation {} for {}", generation, key);

        let result = self
            .bootstrapper
            .bootstrap(&provider, &token, |status| {
                self.publish_if_latest(generation, |state| state.status = status);
            })
            .await;

        match result {
            Ok(session) => {
                let delivered = self.publish_if_latest(generation, |state| {
                    state.status = BootstrapStatus::Ready;
                    state.session = Some(session.clone());
                });
                if delivered {
                    Ok(Some(session))
                } else {
                    debug!("[rc-02] Dropping session of superseded generation {}", generation);
                    Ok(None)
                }
            }
            Err(e) if e.is_aborted() => {
                debug!("[rc-02] Generation {} aborted", generation);
                Ok(None)
            }
            Err(e) => {
                let delivered = self.publish_if_latest(generation, |state| {
                    state.error = Some(e.clone());
                });
                if delivered {
                    warn!("[rc-02] Bootstrap failed: {}", e);
                    Err(e)
                } else {
                    debug!("[rc-02] Dropping failure of superseded generation {}: {}", generation, e);
                    Ok(None)
                }
            }
        }
    }

    /// Reuses the ready session when `key` matches the served pair, and
    /// starts a new run otherwise.
    pub async fn ensure(
        &self,
        provider: ProviderHandle,
        key: impl Into<String>,
    ) -> Result<Option<Arc<dyn Session>>, BootstrapError> {
        let key = key.into();
        {
            let state = self.state.borrow();
            if state.key.as_deref() == Some(key.as_str()) && state.session.is_some() {
                return Ok(state.session.clone());
            }
        }
        self.request(provider, key).await
    }

    /// [`request`](Self::request) on a background task.
    pub fn spawn_request(
        self: &Arc<Self>,
        provider: ProviderHandle,
        key: impl Into<String>,
    ) -> JoinHandle<Result<Option<Arc<dyn Session>>, BootstrapError>> {
        let manager = self.clone();
        let key = key.into();
        tokio::spawn(async move { manager.request(provider, key).await })
    }

    /// Cancels any run in flight and empties the slot.
    pub fn reset(&self) {
        let mut latest = self.latest.lock();
        if let Some(previous) = latest.take() {
            previous.token.cancel();
        }
        let generation = self.bump_generation();
        self.state.send_replace(SessionState {
            generation,
            ..SessionState::default()
        });
        debug!("[rc-02] Session slot reset at generation {}", generation);
    }

    fn bump_generation(&self) -> u64 {
        let mut next = self.next_generation.lock();
        *next += 1;
        *next
    }

    fn begin(&self, key: &str) -> (u64, CancellationToken) {
        let mut latest = self.latest.lock();
        if let Some(previous) = latest.take() {
            previous.token.cancel();
            debug!("[rc-02] Cancelled generation {}", previous.generation);
        }

        let generation = self.bump_generation();
        let token = CancellationToken::new();
        *latest = Some(InFlight {
            generation,
            token: token.clone(),
        });
        self.state.send_replace(SessionState {
            generation,
            key: Some(key.to_string()),
            ..SessionState::default()
        });
        (generation, token)
    }

    fn publish_if_latest<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let latest = self.latest.lock();
        let is_latest = latest
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == generation);
        if is_latest {
            self.state.send_modify(update);
        }
        is_latest
    }
}

impl SessionSource for SessionManager {
    fn current_session(&self) -> Option<Arc<dyn Session>> {
        self.state.borrow().session.clone()
    }
}
