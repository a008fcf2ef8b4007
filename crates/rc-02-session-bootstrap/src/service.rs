//! # Session Bootstrapper Service
//!
//! One bootstrap run: resolve the network, take the mock shortcut when a
//! local node advertises relayer metadata, otherwise load, init and create
//! through the SDK registry.

use rc_01_chain_resolver::{ChainResolver, NetworkResolution, ProviderHandle};
use shared_types::Session;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cancellation::CancellationToken;
use crate::config::BootstrapConfig;
use crate::domain::{BootstrapError, BootstrapStatus};
use crate::ports::{MetadataFetcher, MockSessionFactory, SdkLoader};
use crate::registry::SdkRegistry;

/// Runs the bootstrap state machine.
#[derive(Clone)]
pub struct SessionBootstrapper {
    config: BootstrapConfig,
    resolver: ChainResolver,
    registry: Arc<SdkRegistry>,
    loader: Arc<dyn SdkLoader>,
    metadata: Arc<dyn MetadataFetcher>,
    mock_factory: Arc<dyn MockSessionFactory>,
}

impl SessionBootstrapper {
    /// Create a bootstrapper.
    pub fn new(
        config: BootstrapConfig,
        resolver: ChainResolver,
        registry: Arc<SdkRegistry>,
        loader: Arc<dyn SdkLoader>,
        metadata: Arc<dyn MetadataFetcher>,
        mock_factory: Arc<dyn MockSessionFactory>,
    ) -> Self {
        Self {
            config,
            resolver,
            registry,
            loader,
            metadata,
            mock_factory,
        }
    }

    /// The registry this bootstrapper loads into.
    pub fn registry(&self) -> &Arc<SdkRegistry> {
        &self.registry
    }

    /// Runs one bootstrap.
    ///
    /// `on_status` is called on entry into each named state, always after a
    /// cancellation check. Once `token` fires the run returns `Aborted`
    /// without further callbacks.
    pub async fn bootstrap<F>(
        &self,
        provider: &ProviderHandle,
        token: &CancellationToken,
        mut on_status: F,
    ) -> Result<Arc<dyn Session>, BootstrapError>
    where
        F: FnMut(BootstrapStatus) + Send,
    {
        let mut notify = |status: BootstrapStatus| -> Result<(), BootstrapError> {
            token.check()?;
            debug!("[rc-02] Bootstrap status: {}", status);
            on_status(status);
            Ok(())
        };

        notify(BootstrapStatus::Idle)?;
        let network = token
            .guard(async {
                self.resolver
                    .resolve(provider)
                    .await
                    .map_err(BootstrapError::from)
            })
            .await?;
        token.check()?;

        if network.is_mock {
            if let Some(session) = self.try_mock_session(&network, token, &mut notify).await? {
                return Ok(session);
            }
        }
        token.check()?;

        if !self.registry.is_loaded() {
            notify(BootstrapStatus::SdkLoading)?;
            token
                .guard(self.registry.ensure_loaded(self.loader.clone()))
                .await?;
            notify(BootstrapStatus::SdkLoaded)?;
        }
        let sdk = self.registry.sdk().ok_or(BootstrapError::SdkNotLoaded)?;

        if !self.registry.is_initialized() {
            notify(BootstrapStatus::SdkInitializing)?;
            token
                .guard(self.registry.ensure_initialized(&self.config.init_options))
                .await?;
            notify(BootstrapStatus::SdkInitialized)?;
        }

        notify(BootstrapStatus::Creating)?;
        let network_config = sdk.default_config()?;
        let session = token.guard(sdk.create_instance(network_config)).await?;
        token.check()?;

        info!(
            "[rc-02] Relayer session ready on chain {}",
            session.descriptor().chain_id
        );
        Ok(session)
    }

    async fn try_mock_session<N>(
        &self,
        network: &NetworkResolution,
        token: &CancellationToken,
        notify: &mut N,
    ) -> Result<Option<Arc<dyn Session>>, BootstrapError>
    where
        N: FnMut(BootstrapStatus) -> Result<(), BootstrapError> + Send,
    {
        let Some(endpoint) = network.endpoint_url.as_deref() else {
            return Ok(None);
        };
        let metadata = token
            .guard(async {
                Ok::<_, BootstrapError>(
                    self.metadata
                        .fetch(endpoint, &self.config.metadata_path)
                        .await,
                )
            })
            .await?;
        let Some(metadata) = metadata else {
            debug!("[rc-02] No relayer metadata at {}, using SDK path", endpoint);
            return Ok(None);
        };

        notify(BootstrapStatus::Creating)?;
        let session = token
            .guard(self.mock_factory.create(endpoint, network.chain_id, metadata))
            .await?;
        token.check()?;

        info!(
            "[rc-02] Mock session ready on chain {} at {}",
            network.chain_id, endpoint
        );
        Ok(Some(session))
    }
}
