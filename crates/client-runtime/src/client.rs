//! # ResumeChain Client
//!
//! One handle over every subsystem. Reads go through the scanner, writes
//! through the write facade, decrypts through the pipeline fed by the
//! session manager's slot. Upload flows pin documents to content storage,
//! anchor their digest on-chain and record the content ids in the
//! continuity store so the document can be found again by resume id.

use rc_01_chain_resolver::{ChainResolver, ProviderHandle};
use rc_02_session_bootstrap::{
    HttpMetadataFetcher, MetadataFetcher, MockSessionFactory, SdkLoader, SdkRegistry,
    SessionBootstrapper, SessionManager, SessionState,
};
use rc_03_decrypt_pipeline::{ClearValue, DecryptPipeline, LocalSigner};
use rc_04_ledger_scanner::LedgerScanner;
use rc_05_write_facade::{WriteError, WriteFacade};
use rc_06_continuity_store::{
    cid_by_id_key, Continuity, ContinuityStore, FileContinuityStore, LastResume,
    MemoryContinuityStore,
};
use rc_07_ledger_rpc::{HttpTransport, JsonRpcLedger, RpcTransport};
use rc_08_content_store::{hash_json_stable, ContentStore, GatewayContentStore};
use resume_telemetry::subsystem_span;
use serde::Serialize;
use serde_json::Value;
use shared_types::{
    Address, Bytes32, LedgerReader, LedgerWriter, Record, Session, TypedDataSigner, U256,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn, Instrument};

use crate::adapters::UnavailableRelayer;
use crate::config::ClientConfig;
use crate::document::{
    anchor_digest, fill_attachment, DirectoryEntry, DirectoryFilter, ResumeDraft,
};
use crate::error::ClientError;

/// Relayer backends used by session bootstrap.
#[derive(Clone)]
pub struct SessionBackends {
    /// Loads the relayer SDK for production networks.
    pub sdk_loader: Arc<dyn SdkLoader>,
    /// Builds sessions for mock networks from their relayer metadata.
    pub mock_factory: Arc<dyn MockSessionFactory>,
}

impl SessionBackends {
    /// Backends that never produce a session.
    pub fn unavailable() -> Self {
        Self {
            sdk_loader: Arc::new(UnavailableRelayer),
            mock_factory: Arc::new(UnavailableRelayer),
        }
    }
}

/// Adapters wired by [`ResumeChainClient::from_parts`].
pub struct ClientParts {
    /// Provider the session is bootstrapped against.
    pub provider: ProviderHandle,
    /// Deployment on the provider's chain, if any.
    pub contract: Option<Address>,
    /// Connected wallet account, if any.
    pub account: Option<Address>,
    /// Ledger reads.
    pub reader: Arc<dyn LedgerReader>,
    /// Ledger writes; `None` until a wallet is connected.
    pub writer: Option<Arc<dyn LedgerWriter>>,
    /// Signs decrypt authorizations.
    pub signer: Option<Arc<dyn TypedDataSigner>>,
    /// Relayer backends.
    pub backends: SessionBackends,
    /// Mock relayer metadata endpoint.
    pub metadata: Arc<dyn MetadataFetcher>,
    /// SDK registry; [`SdkRegistry::global`] outside tests.
    pub registry: Arc<SdkRegistry>,
    /// Content storage.
    pub content: Arc<dyn ContentStore>,
    /// Continuity key-value store.
    pub continuity: Arc<dyn ContinuityStore>,
}

/// Result of an upload-and-anchor flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublishedResume {
    /// Ledger transaction.
    pub tx_hash: Bytes32,
    /// Resume id, when the ledger reported it.
    pub resume_id: Option<u64>,
    /// Content id of the pinned document.
    pub json_cid: String,
    /// Digest anchored on-chain.
    pub content_hash: Bytes32,
}

/// The confidential ledger client.
pub struct ResumeChainClient {
    provider: ProviderHandle,
    contract: Option<Address>,
    account: Option<Address>,
    sessions: Arc<SessionManager>,
    decrypt: DecryptPipeline,
    scanner: LedgerScanner,
    writes: WriteFacade,
    content: Arc<dyn ContentStore>,
    continuity: Continuity,
}

impl ResumeChainClient {
    /// Wires a client from injected adapters.
    pub fn from_parts(config: &ClientConfig, parts: ClientParts) -> Self {
        let bootstrapper = SessionBootstrapper::new(
            config.bootstrap.clone(),
            ChainResolver::new(&config.resolver),
            parts.registry,
            parts.backends.sdk_loader,
            parts.metadata,
            parts.backends.mock_factory,
        );
        let sessions = Arc::new(SessionManager::new(bootstrapper));

        let decrypt = DecryptPipeline::new(sessions.clone(), config.decrypt.clone());
        decrypt.set_signer(parts.signer);

        Self {
            provider: parts.provider,
            contract: parts.contract,
            account: parts.account,
            sessions,
            decrypt,
            scanner: LedgerScanner::new(parts.reader, config.scanner.clone()),
            writes: WriteFacade::new(parts.writer),
            content: parts.content,
            continuity: Continuity::new(parts.continuity),
        }
    }

    /// Connects to the configured node with production adapters.
    ///
    /// Without a signer the client is read-only: writes report not
    /// connected and decrypts stay empty.
    pub async fn connect(
        config: &ClientConfig,
        backends: SessionBackends,
        signer: Option<LocalSigner>,
    ) -> Result<Self, ClientError> {
        config.validate()?;

        let transport: Arc<dyn RpcTransport> = Arc::new(HttpTransport::new(
            config.rpc.rpc_url.as_str(),
            config.rpc.request_timeout(),
        )?);
        let book = config.rpc.address_book()?;
        let span = subsystem_span!("connect", rpc_url = %config.rpc.rpc_url);
        let mut ledger = JsonRpcLedger::for_current_chain(transport, &book, &config.rpc)
            .instrument(span)
            .await?;

        let account = signer.as_ref().map(|s| s.address());
        if let Some(account) = account {
            ledger = ledger.with_sender(account);
        }
        let contract = ledger.contract_address();
        let ledger = Arc::new(ledger);

        let continuity: Arc<dyn ContinuityStore> = match &config.continuity_file {
            Some(path) => Arc::new(FileContinuityStore::open(path)?),
            None => Arc::new(MemoryContinuityStore::new()),
        };
        let metadata = HttpMetadataFetcher::new(Duration::from_millis(
            config.bootstrap.metadata_timeout_ms,
        ))?;
        let writer = account.map(|_| ledger.clone() as Arc<dyn LedgerWriter>);
        let signer = signer.map(|s| Arc::new(s) as Arc<dyn TypedDataSigner>);

        let parts = ClientParts {
            provider: ProviderHandle::Rpc(ledger.clone()),
            contract,
            account,
            reader: ledger,
            writer,
            signer,
            backends,
            metadata: Arc::new(metadata),
            registry: SdkRegistry::global(),
            content: Arc::new(GatewayContentStore::new(&config.content)?),
            continuity,
        };
        let client = Self::from_parts(config, parts);
        client.remember_connection()?;

        info!(
            "ResumeChain client connected to {} (contract {}, account {})",
            config.rpc.rpc_url,
            contract.map_or_else(|| "none".to_string(), |c| c.to_hex()),
            account.map_or_else(|| "none".to_string(), |a| a.to_hex()),
        );
        Ok(client)
    }

    /// Records the contract (clearing stale `last_*` keys when it changed)
    /// and the wallet connection in the continuity store.
    pub fn remember_connection(&self) -> Result<(), ClientError> {
        if let Some(contract) = &self.contract {
            if self.continuity.note_contract(contract)? {
                info!("Contract changed to {}, cleared last resume", contract);
            }
        }
        if self.account.is_some() {
            self.continuity.mark_connected()?;
        }
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Identity of the (provider, contract) pair served by the session.
    pub fn session_key(&self) -> String {
        let provider = match &self.provider {
            ProviderHandle::Url(url) => url.clone(),
            ProviderHandle::Rpc(source) => source.describe(),
        };
        let contract = self
            .contract
            .map_or_else(|| "undeployed".to_string(), |c| c.to_hex());
        format!("{provider}#{contract}")
    }

    /// Bootstraps a session, reusing a ready one for the same pair.
    ///
    /// `Ok(None)` when the run was superseded by a newer one.
    pub async fn start_session(&self) -> Result<Option<Arc<dyn Session>>, ClientError> {
        Ok(self
            .sessions
            .ensure(self.provider.clone(), self.session_key())
            .await?)
    }

    /// Cancels any bootstrap in flight and empties the session slot.
    pub fn reset_session(&self) {
        self.sessions.reset();
    }

    /// Current session slot.
    pub fn session_state(&self) -> SessionState {
        self.sessions.state()
    }

    /// Observe session slot changes.
    pub fn subscribe_session(&self) -> watch::Receiver<SessionState> {
        self.sessions.subscribe()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Records owned by the connected account; empty without one.
    pub async fn my_resumes(&self) -> Result<Vec<Record>, ClientError> {
        let Some(account) = self.account else {
            debug!("No account connected, no owned resumes");
            return Ok(Vec::new());
        };
        Ok(self.scanner.list_owned(account, Some(account)).await?)
    }

    /// Public records.
    pub async fn public_resumes(&self) -> Result<Vec<Record>, ClientError> {
        Ok(self.scanner.list_public().await?)
    }

    /// One record, read as the connected account.
    pub async fn resume(&self, id: u64) -> Result<Record, ClientError> {
        Ok(self.scanner.get(id, self.account).await?)
    }

    /// Public records with their documents, narrowed by `filter`.
    ///
    /// Documents are looked up by the content id remembered for each record;
    /// a record whose document is unknown or unreachable is kept with empty
    /// fields.
    pub async fn public_directory(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<DirectoryEntry>, ClientError> {
        let records = self.public_resumes().await?;
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let json_cid = self
                .continuity
                .store()
                .get(&cid_by_id_key(record.id))?
                .filter(|cid| !cid.is_empty());
            let doc = match &json_cid {
                Some(cid) => match self.content.fetch_json(cid).await {
                    Ok(doc) => Some(doc),
                    Err(e) => {
                        debug!("Document of resume {} unavailable: {}", record.id, e);
                        None
                    }
                },
                None => None,
            };
            let entry = DirectoryEntry::new(record, json_cid, doc.as_ref());
            if filter.matches(&entry) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Decrypts the record's access flag for the account that read it.
    ///
    /// `None` when no contract, session or signer is available, or the
    /// handle is null.
    pub async fn has_access(&self, record: &Record) -> Result<Option<bool>, ClientError> {
        let Some(contract) = self.contract else {
            return Ok(None);
        };
        Ok(self
            .decrypt
            .decrypt_bool(contract, &record.caller_access.canonical_hex())
            .await?)
    }

    /// Reads and decrypts a section's endorsement counter.
    pub async fn endorsement_count(
        &self,
        id: u64,
        section_hash: Bytes32,
    ) -> Result<Option<U256>, ClientError> {
        let Some(contract) = self.contract else {
            return Ok(None);
        };
        let handle = self
            .scanner
            .encrypted_endorsement_count(id, section_hash)
            .await?
            .canonical_hex();
        let values = self
            .decrypt
            .decrypt(contract, std::slice::from_ref(&handle))
            .await?;
        Ok(values.get(&handle).and_then(ClearValue::as_u256))
    }

    /// Fetches the document of `resume_id`, or of the latest upload.
    ///
    /// A document without attachment fields gets them from the remembered
    /// attachment id. `None` when no content id is known.
    pub async fn load_resume_document(
        &self,
        resume_id: Option<u64>,
    ) -> Result<Option<Value>, ClientError> {
        let Some(json_cid) = self.continuity.json_cid_for(resume_id)? else {
            debug!("No content id known for resume {:?}", resume_id);
            return Ok(None);
        };
        let mut doc = self.content.fetch_json(&json_cid).await?;
        if let Some(file_cid) = self.continuity.file_cid_for(resume_id)? {
            if fill_attachment(&mut doc, &file_cid) {
                debug!("Filled attachment {} into document {}", file_cid, json_cid);
            }
        }
        Ok(Some(doc))
    }

    // =========================================================================
    // Upload flows
    // =========================================================================

    /// Pins `draft`, anchors its digest in a new record and remembers where
    /// the document lives.
    pub async fn publish_resume(
        &self,
        draft: &ResumeDraft,
        is_public: bool,
    ) -> Result<PublishedResume, ClientError> {
        if !self.writes.can_write() {
            return Err(WriteError::NotConnected.into());
        }

        let pinned = self
            .content
            .pin_json(&draft.pin_name(), &draft.to_document())
            .await?;
        let json_cid = pinned.ipfs_hash;
        let file_cid = draft.file_cid.as_deref();
        self.continuity.remember_content(None, &json_cid, file_cid)?;

        let content_hash = anchor_digest(&json_cid, file_cid);
        let outcome = self.writes.create_resume(content_hash, is_public).await?;

        match outcome.resume_id {
            Some(id) => {
                self.continuity.remember_content(Some(id), &json_cid, file_cid)?;
                self.continuity.remember_created(&LastResume {
                    id,
                    name: draft.name.clone(),
                    title: draft.title.clone(),
                })?;
                info!("Published resume {} as {}", id, json_cid);
            }
            None => warn!("Published {} but the ledger reported no resume id", json_cid),
        }

        Ok(PublishedResume {
            tx_hash: outcome.tx_hash,
            resume_id: outcome.resume_id,
            json_cid,
            content_hash,
        })
    }

    /// Pins a new version of `draft` and points resume `id` at it.
    ///
    /// `Ok(None)` when no wallet is connected; nothing is pinned then.
    pub async fn republish_resume(
        &self,
        id: u64,
        draft: &ResumeDraft,
        is_public: bool,
    ) -> Result<Option<PublishedResume>, ClientError> {
        if !self.writes.can_write() {
            debug!("Not connected, skipping republish of resume {}", id);
            return Ok(None);
        }

        let pinned = self
            .content
            .pin_json(&draft.pin_name(), &draft.to_document())
            .await?;
        let json_cid = pinned.ipfs_hash;
        let file_cid = draft.file_cid.as_deref();
        let content_hash = anchor_digest(&json_cid, file_cid);

        let Some(tx_hash) = self.writes.update_resume(id, content_hash, is_public).await? else {
            return Ok(None);
        };
        self.continuity.remember_content(Some(id), &json_cid, file_cid)?;

        Ok(Some(PublishedResume {
            tx_hash,
            resume_id: Some(id),
            json_cid,
            content_hash,
        }))
    }

    /// Anchors the digest of `section` under resume `id`.
    ///
    /// Returns the section hash and the transaction, or `None` when no
    /// wallet is connected.
    pub async fn upsert_section(
        &self,
        id: u64,
        section: &Value,
    ) -> Result<Option<(Bytes32, Bytes32)>, ClientError> {
        let section_hash = hash_json_stable(section);
        let tx_hash = self.writes.upsert_section(id, section_hash).await?;
        Ok(tx_hash.map(|tx| (section_hash, tx)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Connected account.
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    /// Resolved contract.
    pub fn contract(&self) -> Option<Address> {
        self.contract
    }

    /// Direct access to the write facade (grants, endorsements, status).
    pub fn writes(&self) -> &WriteFacade {
        &self.writes
    }

    /// The ledger scanner.
    pub fn scanner(&self) -> &LedgerScanner {
        &self.scanner
    }

    /// The decrypt pipeline.
    pub fn decrypt(&self) -> &DecryptPipeline {
        &self.decrypt
    }

    /// The continuity store.
    pub fn continuity(&self) -> &Continuity {
        &self.continuity
    }

    /// The session manager.
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rc_02_session_bootstrap::ports::MockMetadataFetcher;
    use rc_02_session_bootstrap::BootstrapError;
    use rc_06_continuity_store::{CONTRACT_KEY, LAST_ID_KEY, LAST_JSON_CID_KEY};
    use rc_08_content_store::MockContentStore;
    use serde_json::json;
    use shared_types::{MockLedger, MockSession};

    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const LOCAL_NODE: &str = "http://localhost:8545";

    struct FixedSessionFactory(Arc<MockSession>);

    #[async_trait]
    impl MockSessionFactory for FixedSessionFactory {
        async fn create(
            &self,
            _endpoint: &str,
            _chain_id: u64,
            _metadata: Value,
        ) -> Result<Arc<dyn Session>, BootstrapError> {
            Ok(self.0.clone())
        }
    }

    struct Fixture {
        client: ResumeChainClient,
        ledger: Arc<MockLedger>,
        content: Arc<MockContentStore>,
        continuity: Arc<MemoryContinuityStore>,
        session: Arc<MockSession>,
        account: Address,
    }

    fn contract() -> Address {
        Address::new([0xcc; 20])
    }

    fn fixture(connected: bool) -> Fixture {
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let account = signer.address();
        let ledger = Arc::new(MockLedger::new(contract(), account));
        let content = Arc::new(MockContentStore::new());
        let continuity = Arc::new(MemoryContinuityStore::new());
        let session = Arc::new(MockSession::relayer(31337));

        let parts = ClientParts {
            provider: ProviderHandle::Url(LOCAL_NODE.to_string()),
            contract: Some(contract()),
            account: connected.then_some(account),
            reader: ledger.clone(),
            writer: connected.then(|| ledger.clone() as Arc<dyn LedgerWriter>),
            signer: connected.then(|| Arc::new(signer) as Arc<dyn TypedDataSigner>),
            backends: SessionBackends {
                sdk_loader: Arc::new(UnavailableRelayer),
                mock_factory: Arc::new(FixedSessionFactory(session.clone())),
            },
            metadata: Arc::new(MockMetadataFetcher::with_metadata(json!({"chainId": 31337}))),
            registry: Arc::new(SdkRegistry::new()),
            content: content.clone(),
            continuity: continuity.clone(),
        };
        let client = ResumeChainClient::from_parts(&ClientConfig::for_testing(), parts);
        Fixture {
            client,
            ledger,
            content,
            continuity,
            session,
            account,
        }
    }

    fn draft() -> ResumeDraft {
        ResumeDraft {
            name: "Ada".into(),
            title: "Engineer".into(),
            skills: vec!["Rust".into(), "Solidity".into()],
            location: "London".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_publish_pins_anchors_and_remembers() {
        let f = fixture(true);
        let published = f.client.publish_resume(&draft(), true).await.unwrap();

        assert_eq!(published.resume_id, Some(1));
        assert_eq!(published.content_hash, anchor_digest(&published.json_cid, None));
        assert_eq!(f.content.len(), 1);

        let record = f.client.resume(1).await.unwrap();
        assert_eq!(record.content_hash, published.content_hash);
        assert!(record.is_owned_by(&f.account));

        let store = f.continuity.as_ref();
        assert_eq!(store.get(LAST_JSON_CID_KEY).unwrap(), Some(published.json_cid.clone()));
        assert_eq!(store.get(&cid_by_id_key(1)).unwrap(), Some(published.json_cid.clone()));
        assert_eq!(store.get(LAST_ID_KEY).unwrap(), Some("1".to_string()));
        assert_eq!(f.client.writes().last_message().as_deref(), Some("ResumeCreated id=1"));
    }

    #[tokio::test]
    async fn test_publish_without_wallet_pins_nothing() {
        let f = fixture(false);
        let err = f.client.publish_resume(&draft(), true).await.unwrap_err();
        assert!(matches!(err, ClientError::Write(WriteError::NotConnected)));
        assert!(f.content.is_empty());
        assert!(f.ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_load_document_by_id_and_latest() {
        let f = fixture(true);
        let mut with_file = draft();
        with_file.file_cid = Some("bafyfile".into());
        f.client.publish_resume(&with_file, false).await.unwrap();

        let doc = f.client.load_resume_document(Some(1)).await.unwrap().unwrap();
        assert_eq!(doc["basic"]["name"], "Ada");
        assert_eq!(doc["fileCid"], "bafyfile");

        let latest = f.client.load_resume_document(None).await.unwrap().unwrap();
        assert_eq!(latest, doc);

        assert!(fixture(true)
            .client
            .load_resume_document(Some(9))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_my_resumes_requires_account() {
        let f = fixture(true);
        f.client.publish_resume(&draft(), false).await.unwrap();
        assert_eq!(f.client.my_resumes().await.unwrap().len(), 1);
        assert!(f.client.public_resumes().await.unwrap().is_empty());

        let anonymous = fixture(false);
        assert!(anonymous.client.my_resumes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_has_access_decrypts_caller_handle() {
        let f = fixture(true);
        f.client.publish_resume(&draft(), true).await.unwrap();
        let record = f.client.resume(1).await.unwrap();
        let handle = MockLedger::access_handle(1, &f.account).canonical_hex();
        assert_eq!(record.caller_access.canonical_hex(), handle);

        // No session yet.
        assert_eq!(f.client.has_access(&record).await.unwrap(), None);

        f.session.set_response(json!({ handle.clone(): true }));
        assert!(f.client.start_session().await.unwrap().is_some());
        assert_eq!(f.client.has_access(&record).await.unwrap(), Some(true));
        assert_eq!(f.session.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_start_session_reuses_ready_session() {
        let f = fixture(true);
        let first = f.client.start_session().await.unwrap().unwrap();
        let second = f.client.start_session().await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(f.client.session_state().key, Some(f.client.session_key()));

        f.client.reset_session();
        assert!(f.client.session_state().session.is_none());
    }

    #[tokio::test]
    async fn test_public_directory_filters_by_document() {
        let f = fixture(true);
        f.client.publish_resume(&draft(), true).await.unwrap();
        let mut other = draft();
        other.name = "Grace".into();
        other.location = "Paris".into();
        other.skills = vec!["COBOL".into()];
        f.client.publish_resume(&other, true).await.unwrap();

        let all = f.client.public_directory(&DirectoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let rust = DirectoryFilter {
            skill: Some("rust".into()),
            location: None,
        };
        let found = f.client.public_directory(&rust).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_upsert_section_hashes_content() {
        let f = fixture(true);
        f.client.publish_resume(&draft(), false).await.unwrap();
        let section = json!({"edu": {"school": "MIT", "major": "CS"}});
        let (section_hash, _) = f.client.upsert_section(1, &section).await.unwrap().unwrap();
        assert_eq!(section_hash, hash_json_stable(&section));
        assert_eq!(f.client.writes().last_section_hash(), Some(section_hash));

        assert!(fixture(false)
            .client
            .upsert_section(1, &section)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_republish_points_record_at_new_document() {
        let f = fixture(true);
        let first = f.client.publish_resume(&draft(), false).await.unwrap();
        let mut revised = draft();
        revised.title = "Principal Engineer".into();
        revised.about = "Leads the platform team".into();
        let second = f
            .client
            .republish_resume(1, &revised, true)
            .await
            .unwrap()
            .unwrap();

        assert_ne!(first.json_cid, second.json_cid);
        let record = f.client.resume(1).await.unwrap();
        assert_eq!(record.content_hash, second.content_hash);
        assert!(record.is_public);
        let doc = f.client.load_resume_document(Some(1)).await.unwrap().unwrap();
        assert_eq!(doc["basic"]["title"], "Principal Engineer");
        assert_eq!(doc["about"], "Leads the platform team");
    }

    #[tokio::test]
    async fn test_remember_connection_clears_on_contract_change() {
        let f = fixture(true);
        f.client.publish_resume(&draft(), false).await.unwrap();
        f.continuity
            .set(CONTRACT_KEY, "0x00000000000000000000000000000000000000ff")
            .unwrap();

        f.client.remember_connection().unwrap();
        assert!(f.client.continuity().last_resume().unwrap().is_none());
        assert!(f.client.continuity().was_connected().unwrap());
    }

    #[tokio::test]
    async fn test_file_continuity_survives_a_new_client() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("continuity.json");
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let account = signer.address();
        let ledger = Arc::new(MockLedger::new(contract(), account));
        let content = Arc::new(MockContentStore::new());

        let client_on = |store: FileContinuityStore| {
            let parts = ClientParts {
                provider: ProviderHandle::Url(LOCAL_NODE.to_string()),
                contract: Some(contract()),
                account: Some(account),
                reader: ledger.clone(),
                writer: Some(ledger.clone() as Arc<dyn LedgerWriter>),
                signer: Some(Arc::new(signer.clone()) as Arc<dyn TypedDataSigner>),
                backends: SessionBackends {
                    sdk_loader: Arc::new(UnavailableRelayer),
                    mock_factory: Arc::new(FixedSessionFactory(Arc::new(MockSession::relayer(
                        31337,
                    )))),
                },
                metadata: Arc::new(MockMetadataFetcher::default()),
                registry: Arc::new(SdkRegistry::new()),
                content: content.clone(),
                continuity: Arc::new(store),
            };
            ResumeChainClient::from_parts(&ClientConfig::for_testing(), parts)
        };

        let first = client_on(FileContinuityStore::open(&path).unwrap());
        first.remember_connection().unwrap();
        let published = first.publish_resume(&draft(), false).await.unwrap();
        drop(first);

        let reopened = client_on(FileContinuityStore::open(&path).unwrap());
        assert!(reopened.continuity().was_connected().unwrap());
        assert_eq!(reopened.continuity().last_resume().unwrap().map(|r| r.id), Some(1));
        assert_eq!(
            reopened.continuity().json_cid_for(None).unwrap(),
            Some(published.json_cid)
        );
        let doc = reopened.load_resume_document(None).await.unwrap().unwrap();
        assert_eq!(doc["basic"]["name"], "Ada");
    }
}
