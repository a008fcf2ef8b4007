//! # RPC Flows
//!
//! The ledger ports running over JSON-RPC against a simulated node: ABI
//! encoding, caller-scoped reads, receipts and their event logs.

#[cfg(test)]
mod tests {
    use crate::fixtures::{contract, signer, SimulatedNode, OWNER_KEY, SEPOLIA_CHAIN_ID, VIEWER_KEY};
    use rc_01_chain_resolver::{ChainResolver, ProviderHandle, ResolverConfig};
    use rc_04_ledger_scanner::{LedgerScanner, ScanFilter, ScannerConfig};
    use rc_05_write_facade::{WriteError, WriteFacade};
    use rc_07_ledger_rpc::{AddressBook, JsonRpcLedger, RpcConfig};
    use shared_types::{Bytes32, LedgerError, LedgerReader, LedgerWriter, MockLedger};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const LOCAL_CHAIN_ID: u64 = 31_337;

    fn ledger(node: &Arc<SimulatedNode>, key: &str) -> Arc<JsonRpcLedger> {
        Arc::new(
            JsonRpcLedger::new(node.transport(), Some(contract()), &RpcConfig::for_testing())
                .with_sender(signer(key).address()),
        )
    }

    #[tokio::test]
    async fn test_scan_skips_reverted_reads() {
        let node = SimulatedNode::new(LOCAL_CHAIN_ID);
        let owner = signer(OWNER_KEY).address();
        let other = signer(VIEWER_KEY).address();
        node.seed(1, owner, true);
        node.seed(2, owner, true);
        node.seed(3, other, true);
        node.fail_read(2);

        let scanner = LedgerScanner::new(ledger(&node, OWNER_KEY), ScannerConfig::for_testing());
        let (records, report) = scanner.scan(ScanFilter::Public, None).await.unwrap();

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(report.scanned, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.matched, 2);

        let owned = scanner.list_owned(owner, Some(owner)).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].caller_access, MockLedger::access_handle(1, &owner));
    }

    #[tokio::test]
    async fn test_reads_are_scoped_to_caller() {
        let node = SimulatedNode::new(LOCAL_CHAIN_ID);
        let owner = signer(OWNER_KEY).address();
        let viewer = signer(VIEWER_KEY).address();
        node.seed(1, owner, false);
        let rpc = ledger(&node, OWNER_KEY);

        assert!(!rpc.read(1, Some(owner)).await.unwrap().caller_access.is_null());
        assert!(rpc.read(1, Some(viewer)).await.unwrap().caller_access.is_null());
        assert!(rpc.read(1, None).await.unwrap().caller_access.is_null());
        assert!(matches!(rpc.read(9, None).await, Err(LedgerError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_create_reports_id_from_event() {
        let node = SimulatedNode::new(LOCAL_CHAIN_ID);
        node.set_next_id(7);
        let writes = WriteFacade::new(Some(ledger(&node, OWNER_KEY) as Arc<dyn LedgerWriter>));

        let outcome = writes.create_resume(Bytes32([1; 32]), true).await.unwrap();
        assert_eq!(outcome.resume_id, Some(7));
        assert_eq!(writes.last_resume_id(), Some(7));
        assert_eq!(writes.last_message().as_deref(), Some("ResumeCreated id=7"));

        let record = ledger(&node, OWNER_KEY).read(7, None).await.unwrap();
        assert_eq!(record.content_hash, Bytes32([1; 32]));
        assert_eq!(record.owner, signer(OWNER_KEY).address());
    }

    #[tokio::test]
    async fn test_create_without_event_leaves_id_unknown() {
        let node = SimulatedNode::new(LOCAL_CHAIN_ID);
        node.set_emit_events(false);
        let writes = WriteFacade::new(Some(ledger(&node, OWNER_KEY) as Arc<dyn LedgerWriter>));

        let outcome = writes.create_resume(Bytes32([2; 32]), false).await.unwrap();
        assert_eq!(outcome.resume_id, None);
        assert_eq!(writes.last_resume_id(), None);
        assert_eq!(ledger(&node, OWNER_KEY).next_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_revert_surfaces_as_write_error() {
        let node = SimulatedNode::new(LOCAL_CHAIN_ID);
        node.seed(1, signer(OWNER_KEY).address(), false);
        let writes = WriteFacade::new(Some(ledger(&node, VIEWER_KEY) as Arc<dyn LedgerWriter>));

        let err = writes
            .grant_access(1, signer(VIEWER_KEY).address())
            .await
            .unwrap_err();
        assert!(matches!(err, WriteError::Ledger(_)));
        assert!(err.to_string().contains("not owner"));
    }

    #[tokio::test]
    async fn test_address_book_selects_deployment_then_write_and_list() {
        let node = SimulatedNode::new(SEPOLIA_CHAIN_ID);
        let owner = signer(OWNER_KEY).address();
        let mut overrides = BTreeMap::new();
        overrides.insert(SEPOLIA_CHAIN_ID, contract());
        let book = AddressBook::new().with_overrides(&overrides);

        let rpc = JsonRpcLedger::for_current_chain(node.transport(), &book, &RpcConfig::for_testing())
            .await
            .unwrap()
            .with_sender(owner);
        assert_eq!(rpc.contract_address(), Some(contract()));
        let rpc = Arc::new(rpc);

        let writes = WriteFacade::new(Some(rpc.clone() as Arc<dyn LedgerWriter>));
        writes.create_resume(Bytes32([3; 32]), false).await.unwrap();
        writes.create_resume(Bytes32([4; 32]), true).await.unwrap();

        let scanner = LedgerScanner::new(rpc, ScannerConfig::default());
        let owned = scanner.list_owned(owner, Some(owner)).await.unwrap();
        assert_eq!(owned.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(scanner.list_public().await.unwrap().len(), 1);

        // No deployment on this chain: writes are refused before any request.
        let bare = JsonRpcLedger::for_current_chain(
            node.transport(),
            &AddressBook::new(),
            &RpcConfig::for_testing(),
        )
        .await
        .unwrap()
        .with_sender(owner);
        let writes = WriteFacade::new(Some(Arc::new(bare) as Arc<dyn LedgerWriter>));
        assert!(!writes.can_write());
        assert!(matches!(
            writes.create_resume(Bytes32([5; 32]), false).await,
            Err(WriteError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_resolver_classifies_live_provider() {
        let resolver = ChainResolver::new(&ResolverConfig::default());

        let sepolia = SimulatedNode::new(SEPOLIA_CHAIN_ID);
        let provider = ProviderHandle::Rpc(ledger(&sepolia, OWNER_KEY));
        let resolution = resolver.resolve(&provider).await.unwrap();
        assert_eq!(resolution.chain_id, SEPOLIA_CHAIN_ID);
        assert!(!resolution.is_mock);

        let local = SimulatedNode::new(LOCAL_CHAIN_ID);
        let provider = ProviderHandle::Rpc(ledger(&local, OWNER_KEY));
        let resolution = resolver.resolve(&provider).await.unwrap();
        assert_eq!(resolution.chain_id, LOCAL_CHAIN_ID);
        assert!(resolution.is_mock);
        assert!(resolution.endpoint_url.is_some());
    }
}
