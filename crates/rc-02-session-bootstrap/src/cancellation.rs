//! Cancellation token for bootstrap runs, built on a `watch` channel.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::BootstrapError;

/// Cloneable cancellation flag. Once cancelled it stays cancelled.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Cancel every clone of this token.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves when the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// `Err(Aborted)` if cancelled.
    pub fn check(&self) -> Result<(), BootstrapError> {
        if self.is_cancelled() {
            Err(BootstrapError::Aborted)
        } else {
            Ok(())
        }
    }

    /// Runs `fut` unless the token fires first, in which case the future is
    /// dropped and `Aborted` is returned.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T, BootstrapError>
    where
        F: Future<Output = Result<T, BootstrapError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(BootstrapError::Aborted),
            result = fut => result,
        }
    }
}
