//! # Session Flows
//!
//! Bootstrap generations feeding the decrypt pipeline: only the latest run
//! may publish, a reset empties the slot, and the status sequence observers
//! see on the SDK path.

#[cfg(test)]
mod tests {
    use crate::fixtures::{contract, signer, World, OWNER_KEY};
    use async_trait::async_trait;
    use client_runtime::{ClientConfig, ClientParts, ResumeChainClient, SessionBackends};
    use parking_lot::Mutex;
    use rc_01_chain_resolver::{ChainResolver, MockChainIdSource, ProviderHandle, ResolverConfig};
    use rc_02_session_bootstrap::ports::{
        MockMetadataFetcher, MockRelayerSdk, MockSdkLoader, StubSessionFactory,
    };
    use rc_02_session_bootstrap::{
        BootstrapConfig, BootstrapError, BootstrapStatus, CancellationToken, MockSessionFactory,
        SdkRegistry, SessionBootstrapper, SessionManager,
    };
    use rc_03_decrypt_pipeline::{DecryptConfig, DecryptPipeline};
    use rc_06_continuity_store::MemoryContinuityStore;
    use rc_08_content_store::MockContentStore;
    use serde_json::{json, Value};
    use shared_types::{
        LedgerWriter, MockLedger, MockSession, Session, SessionSource, TypedDataSigner,
    };
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::time::Duration;

    /// Hands out a different session on each bootstrap.
    struct SequenceFactory(Mutex<VecDeque<Arc<MockSession>>>);

    #[async_trait]
    impl MockSessionFactory for SequenceFactory {
        async fn create(
            &self,
            _endpoint: &str,
            _chain_id: u64,
            _metadata: Value,
        ) -> Result<Arc<dyn Session>, BootstrapError> {
            let next = self.0.lock().pop_front();
            next.map(|s| s as Arc<dyn Session>)
                .ok_or_else(|| BootstrapError::CreateSession("no session left".to_string()))
        }
    }

    fn sdk_bootstrapper(sdk: Arc<MockRelayerSdk>) -> (SessionBootstrapper, Arc<MockSdkLoader>) {
        let loader = Arc::new(MockSdkLoader::new(sdk));
        let bootstrapper = SessionBootstrapper::new(
            BootstrapConfig::for_testing(),
            ChainResolver::new(&ResolverConfig::for_testing()),
            Arc::new(SdkRegistry::new()),
            loader.clone(),
            Arc::new(MockMetadataFetcher::default()),
            Arc::new(StubSessionFactory::default()),
        );
        (bootstrapper, loader)
    }

    fn chain(id: u64) -> ProviderHandle {
        ProviderHandle::Rpc(Arc::new(MockChainIdSource::new(id)))
    }

    #[tokio::test]
    async fn test_decrypt_follows_latest_session() {
        let owner = signer(OWNER_KEY).address();
        let world = World::new(owner);
        let first = Arc::new(MockSession::relayer(31337));
        let second = Arc::new(MockSession::relayer(31337));
        let factory = SequenceFactory(Mutex::new(VecDeque::from([first.clone(), second.clone()])));

        let parts = ClientParts {
            provider: ProviderHandle::Url("http://localhost:8545".to_string()),
            contract: Some(contract()),
            account: Some(owner),
            reader: world.ledger.clone(),
            writer: Some(world.ledger.clone() as Arc<dyn LedgerWriter>),
            signer: Some(Arc::new(signer(OWNER_KEY)) as Arc<dyn TypedDataSigner>),
            backends: SessionBackends {
                sdk_loader: Arc::new(client_runtime::UnavailableRelayer),
                mock_factory: Arc::new(factory),
            },
            metadata: Arc::new(MockMetadataFetcher::with_metadata(json!({}))),
            registry: Arc::new(SdkRegistry::new()),
            content: Arc::new(MockContentStore::new()),
            continuity: Arc::new(MemoryContinuityStore::new()),
        };
        let client = ResumeChainClient::from_parts(&ClientConfig::for_testing(), parts);
        client
            .writes()
            .create_resume(shared_types::Bytes32([1; 32]), false)
            .await
            .unwrap();
        let record = client.resume(1).await.unwrap();
        let handle = MockLedger::access_handle(1, &owner).canonical_hex();
        first.set_response(json!({ handle.clone(): false }));
        second.set_response(json!({ handle.clone(): true }));

        client.start_session().await.unwrap().unwrap();
        assert_eq!(client.has_access(&record).await.unwrap(), Some(false));

        client.reset_session();
        assert_eq!(client.has_access(&record).await.unwrap(), None);

        client.start_session().await.unwrap().unwrap();
        assert_eq!(client.has_access(&record).await.unwrap(), Some(true));
        assert_eq!(first.calls().len(), 1);
        assert_eq!(second.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_run_does_not_publish() {
        let mut sdk = MockRelayerSdk::new(11_155_111);
        sdk.create_delay = Duration::from_millis(50);
        let (bootstrapper, loader) = sdk_bootstrapper(Arc::new(sdk));
        let manager = Arc::new(SessionManager::new(bootstrapper));

        let stale = manager.spawn_request(chain(11_155_111), "sepolia#a");
        tokio::time::sleep(Duration::from_millis(10)).await;
        let fresh = manager.request(chain(11_155_111), "sepolia#b").await.unwrap();

        assert!(stale.await.unwrap().unwrap().is_none());
        let fresh = fresh.unwrap();
        let state = manager.state();
        assert_eq!(state.key.as_deref(), Some("sepolia#b"));
        assert_eq!(state.status, BootstrapStatus::Ready);
        assert!(Arc::ptr_eq(&manager.current_session().unwrap(), &fresh));
        assert_eq!(loader.loads(), 1);
    }

    #[tokio::test]
    async fn test_reset_empties_slot_and_disables_decrypt() {
        let sdk = Arc::new(MockRelayerSdk::new(11_155_111));
        let (bootstrapper, _) = sdk_bootstrapper(sdk);
        let manager = Arc::new(SessionManager::new(bootstrapper));
        let pipeline = DecryptPipeline::new(manager.clone(), DecryptConfig::default())
            .with_signer(Arc::new(signer(OWNER_KEY)));

        manager
            .request(chain(11_155_111), "sepolia")
            .await
            .unwrap()
            .unwrap();
        assert!(manager.current_session().is_some());

        manager.reset();
        assert!(manager.current_session().is_none());
        assert!(manager.state().key.is_none());
        let values = pipeline
            .decrypt(contract(), &[format!("0x{:064x}", 1)])
            .await
            .unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_sdk_path_reports_every_status() {
        let sdk = Arc::new(MockRelayerSdk::new(1337));
        let (bootstrapper, loader) = sdk_bootstrapper(sdk.clone());

        let mut seen = Vec::new();
        let session = bootstrapper
            .bootstrap(&chain(1337), &CancellationToken::new(), |s| seen.push(s))
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![
                BootstrapStatus::Idle,
                BootstrapStatus::SdkLoading,
                BootstrapStatus::SdkLoaded,
                BootstrapStatus::SdkInitializing,
                BootstrapStatus::SdkInitialized,
                BootstrapStatus::Creating,
            ]
        );
        assert_eq!(session.descriptor().chain_id, 1337);
        assert_eq!(loader.loads(), 1);
        assert_eq!(sdk.init_calls(), 1);

        // A second run reuses the loaded and initialized SDK.
        let mut again = Vec::new();
        bootstrapper
            .bootstrap(&chain(1337), &CancellationToken::new(), |s| again.push(s))
            .await
            .unwrap();
        assert_eq!(again, vec![BootstrapStatus::Idle, BootstrapStatus::Creating]);
        assert_eq!(loader.loads(), 1);
        assert_eq!(sdk.init_calls(), 1);
    }

    #[tokio::test]
    async fn test_identical_bootstraps_are_equivalent() {
        let (a, _) = sdk_bootstrapper(Arc::new(MockRelayerSdk::new(11_155_111)));
        let (b, _) = sdk_bootstrapper(Arc::new(MockRelayerSdk::new(11_155_111)));

        let first = a
            .bootstrap(&chain(11_155_111), &CancellationToken::new(), |_| {})
            .await
            .unwrap();
        let second = b
            .bootstrap(&chain(11_155_111), &CancellationToken::new(), |_| {})
            .await
            .unwrap();
        assert_eq!(first.descriptor(), second.descriptor());
    }
}
