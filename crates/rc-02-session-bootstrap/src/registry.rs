//! # SDK Registry
//!
//! Process-wide home of the relayer SDK. Loading and initialization are
//! single-flight: concurrent bootstraps share one load and one init.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::domain::{BootstrapError, SdkInitOptions};
use crate::ports::{RelayerSdk, SdkLoader};

static GLOBAL: OnceLock<Arc<SdkRegistry>> = OnceLock::new();

/// Holds the loaded SDK and its initialized flag.
#[derive(Default)]
pub struct SdkRegistry {
    sdk: OnceCell<Arc<dyn RelayerSdk>>,
    initialized: AtomicBool,
    init_lock: Mutex<()>,
}

impl SdkRegistry {
    /// A private registry, for tests and embedded use.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<SdkRegistry> {
        GLOBAL.get_or_init(|| Arc::new(SdkRegistry::new())).clone()
    }

    /// Returns true once an SDK has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.sdk.initialized()
    }

    /// Returns true once the SDK init routine has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// The loaded SDK, if any.
    pub fn sdk(&self) -> Option<Arc<dyn RelayerSdk>> {
        self.sdk.get().cloned()
    }

    /// Loads the SDK unless already present.
    ///
    /// The loaded SDK must advertise every required capability; otherwise
    /// nothing is stored and `InvalidSdkShape` names the first gap.
    ///
    /// The load runs on its own task. Dropping the returned future only
    /// stops this caller's wait, so a cancelled bootstrap never leaves the
    /// load half done for the next one to repeat.
    pub async fn ensure_loaded(
        self: &Arc<Self>,
        loader: Arc<dyn SdkLoader>,
    ) -> Result<Arc<dyn RelayerSdk>, BootstrapError> {
        if let Some(sdk) = self.sdk() {
            return Ok(sdk);
        }
        let registry = self.clone();
        tokio::spawn(async move { registry.load_once(loader.as_ref()).await })
            .await
            .map_err(|e| BootstrapError::SdkLoad(e.to_string()))?
    }

    /// Runs the SDK init routine unless already initialized.
    ///
    /// A `false` init result is `InitFailed` and leaves the flag unset, so a
    /// later bootstrap retries. Like [`ensure_loaded`](Self::ensure_loaded),
    /// the routine runs detached from the caller.
    pub async fn ensure_initialized(
        self: &Arc<Self>,
        options: &SdkInitOptions,
    ) -> Result<(), BootstrapError> {
        if self.is_initialized() {
            return Ok(());
        }
        let registry = self.clone();
        let options = options.clone();
        tokio::spawn(async move { registry.init_once(&options).await })
            .await
            .map_err(|e| BootstrapError::Init(e.to_string()))?
    }

    async fn load_once(
        &self,
        loader: &dyn SdkLoader,
    ) -> Result<Arc<dyn RelayerSdk>, BootstrapError> {
        let sdk = self
            .sdk
            .get_or_try_init(|| async {
                debug!("[rc-02] Loading relayer SDK");
                let sdk = loader.load().await?;
                if let Some(missing) = sdk.capabilities().first_missing() {
                    warn!("[rc-02] Relayer SDK is missing {}", missing);
                    return Err(BootstrapError::InvalidSdkShape { missing });
                }
                info!("[rc-02] Relayer SDK loaded");
                Ok(sdk)
            })
            .await?;
        Ok(sdk.clone())
    }

    async fn init_once(&self, options: &SdkInitOptions) -> Result<(), BootstrapError> {
        let _guard = self.init_lock.lock().await;
        if self.is_initialized() {
            return Ok(());
        }

        let sdk = self.sdk().ok_or(BootstrapError::SdkNotLoaded)?;
        if !sdk.init(options).await? {
            warn!("[rc-02] Relayer SDK init returned false");
            return Err(BootstrapError::InitFailed);
        }
        self.initialized.store(true, Ordering::Release);
        info!("[rc-02] Relayer SDK initialized");
        Ok(())
    }
}
