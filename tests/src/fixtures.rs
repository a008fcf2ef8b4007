//! # Test Fixtures
//!
//! - `SimulatedNode`: a ResumeChain deployment answering raw JSON-RPC through
//!   `MockTransport`, so the ABI codec and receipt handling run for real.
//! - `World`: one in-memory ledger, content store and relayer session shared
//!   by several clients (owner and viewers).

use async_trait::async_trait;
use client_runtime::{ClientConfig, ClientParts, ResumeChainClient, SessionBackends};
use parking_lot::Mutex;
use rc_01_chain_resolver::ProviderHandle;
use rc_02_session_bootstrap::ports::MockMetadataFetcher;
use rc_02_session_bootstrap::{BootstrapError, MockSessionFactory, SdkRegistry};
use rc_03_decrypt_pipeline::LocalSigner;
use rc_06_continuity_store::ContinuityStore;
use rc_07_ledger_rpc::codec::{
    call_signature, hex_data, parse_hex_data, GET_RESUME_SIG, NEXT_RESUME_ID_SIG,
};
use rc_07_ledger_rpc::{MockTransport, RpcError};
use rc_08_content_store::MockContentStore;
use serde_json::{json, Value};
use shared_types::abi::{
    address_word, bool_word, selector, u64_word, word_at, word_to_address, word_to_bool,
    word_to_u64,
};
use shared_types::{
    keccak256, Address, Bytes32, Handle, LedgerCall, LedgerEvent, LedgerWriter, MockLedger,
    MockSession, Record, Session, TypedDataSigner,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Sepolia chain id.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Local development node URL.
pub const LOCAL_NODE: &str = "http://localhost:8545";

/// Development account #0.
pub const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Development account #1.
pub const VIEWER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

/// Contract address used across fixtures.
pub fn contract() -> Address {
    Address::new([0xcc; 20])
}

/// A signer from a fixture key.
pub fn signer(key: &str) -> LocalSigner {
    LocalSigner::from_hex(key).expect("fixture key is valid")
}

// =============================================================================
// Simulated node
// =============================================================================

const REVERT_CODE: i64 = 3;

fn revert(message: &str) -> RpcError {
    RpcError::JsonRpc {
        code: REVERT_CODE,
        message: format!("execution reverted: {message}"),
    }
}

struct NodeState {
    records: BTreeMap<u64, Record>,
    access: HashSet<(u64, Address)>,
    next_id: u64,
    failing: HashSet<u64>,
    emit_events: bool,
    receipts: HashMap<String, Value>,
    block: u64,
}

/// A ResumeChain deployment on one chain, spoken to over JSON-RPC.
pub struct SimulatedNode {
    chain_id: u64,
    contract: Address,
    state: Mutex<NodeState>,
}

impl SimulatedNode {
    /// An empty deployment at [`contract`] on `chain_id`.
    pub fn new(chain_id: u64) -> Arc<Self> {
        Arc::new(Self {
            chain_id,
            contract: contract(),
            state: Mutex::new(NodeState {
                records: BTreeMap::new(),
                access: HashSet::new(),
                next_id: 1,
                failing: HashSet::new(),
                emit_events: true,
                receipts: HashMap::new(),
                block: 0,
            }),
        })
    }

    /// A transport whose every request is answered by this node.
    pub fn transport(self: &Arc<Self>) -> Arc<MockTransport> {
        let node = self.clone();
        Arc::new(MockTransport::new(move |method, params| node.handle(method, params)))
    }

    /// Makes `getResume(id)` revert.
    pub fn fail_read(&self, id: u64) {
        self.state.lock().failing.insert(id);
    }

    /// Id the next created resume gets.
    pub fn set_next_id(&self, id: u64) {
        self.state.lock().next_id = id;
    }

    /// Toggles event logs in receipts.
    pub fn set_emit_events(&self, emit: bool) {
        self.state.lock().emit_events = emit;
    }

    /// Seeds a record owned by `owner`, readable by the owner.
    pub fn seed(&self, id: u64, owner: Address, is_public: bool) {
        let mut state = self.state.lock();
        state.records.insert(
            id,
            Record {
                id,
                owner,
                content_hash: keccak256(&id.to_be_bytes()),
                is_public,
                created_at: id,
                updated_at: id,
                caller_access: Handle::NULL,
            },
        );
        state.access.insert((id, owner));
        state.next_id = state.next_id.max(id + 1);
    }

    fn handle(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        match method {
            "eth_chainId" => Ok(json!(format!("0x{:x}", self.chain_id))),
            "eth_call" => self.call(params),
            "eth_sendTransaction" => self.send(params),
            "eth_getTransactionReceipt" => {
                let hash = params[0].as_str().unwrap_or_default();
                Ok(self
                    .state
                    .lock()
                    .receipts
                    .get(hash)
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            other => Err(RpcError::JsonRpc {
                code: -32601,
                message: format!("the method {other} does not exist"),
            }),
        }
    }

    fn calldata(params: &Value) -> Result<Vec<u8>, RpcError> {
        let raw = params[0]["data"]
            .as_str()
            .ok_or_else(|| RpcError::JsonRpc {
                code: -32602,
                message: "missing data".to_string(),
            })?;
        let data = parse_hex_data(raw)?;
        if data.len() < 4 {
            return Err(revert("no selector"));
        }
        Ok(data)
    }

    fn sender(params: &Value) -> Option<Address> {
        params[0]["from"].as_str().and_then(|s| s.parse().ok())
    }

    fn call(&self, params: &Value) -> Result<Value, RpcError> {
        let data = Self::calldata(params)?;
        let (sel, args) = data.split_at(4);
        let state = self.state.lock();

        if sel == selector(NEXT_RESUME_ID_SIG) {
            return Ok(json!(hex_data(&u64_word(state.next_id))));
        }
        if sel == selector(GET_RESUME_SIG) {
            let id = word_at(args, 0)
                .and_then(|w| word_to_u64(&w))
                .ok_or_else(|| revert("bad id"))?;
            if state.failing.contains(&id) {
                return Err(revert("read failed"));
            }
            let caller = Self::sender(params);
            let mut out = Vec::with_capacity(6 * 32);
            match state.records.get(&id) {
                Some(record) => {
                    let access = caller
                        .filter(|c| state.access.contains(&(id, *c)))
                        .map_or(Handle::NULL, |c| MockLedger::access_handle(id, &c));
                    out.extend_from_slice(&address_word(&record.owner));
                    out.extend_from_slice(&record.content_hash.0);
                    out.extend_from_slice(&bool_word(record.is_public));
                    out.extend_from_slice(&u64_word(record.created_at));
                    out.extend_from_slice(&u64_word(record.updated_at));
                    out.extend_from_slice(&access.0);
                }
                None => out.resize(6 * 32, 0),
            }
            return Ok(json!(hex_data(&out)));
        }
        Err(revert("unknown function"))
    }

    fn send(&self, params: &Value) -> Result<Value, RpcError> {
        let data = Self::calldata(params)?;
        let from = Self::sender(params).ok_or_else(|| revert("no sender"))?;
        let (sel, args) = data.split_at(4);
        let word = |i: usize| word_at(args, i).ok_or_else(|| revert("short calldata"));

        let mut state = self.state.lock();
        let create_sel = selector(call_signature(&LedgerCall::CreateResume {
            resume_hash: Bytes32::ZERO,
            is_public: false,
        }));
        let grant_sel = selector(call_signature(&LedgerCall::GrantAccess {
            resume_id: 0,
            viewer: Address::ZERO,
        }));

        let event = if sel == create_sel {
            let resume_hash = Bytes32(word(0)?);
            let is_public = word_to_bool(&word(1)?).ok_or_else(|| revert("bad bool"))?;
            let id = state.next_id;
            state.next_id += 1;
            state.block += 1;
            let now = state.block;
            state.records.insert(
                id,
                Record {
                    id,
                    owner: from,
                    content_hash: resume_hash,
                    is_public,
                    created_at: now,
                    updated_at: now,
                    caller_access: Handle::NULL,
                },
            );
            state.access.insert((id, from));
            LedgerEvent::ResumeCreated {
                resume_id: id,
                owner: from,
                resume_hash,
                is_public,
            }
        } else if sel == grant_sel {
            let id = word_to_u64(&word(0)?).ok_or_else(|| revert("bad id"))?;
            let viewer = word_to_address(&word(1)?).ok_or_else(|| revert("bad address"))?;
            match state.records.get(&id) {
                Some(r) if r.owner == from => {}
                _ => return Err(revert("not owner")),
            }
            state.access.insert((id, viewer));
            LedgerEvent::AccessGranted {
                resume_id: id,
                viewer,
            }
        } else {
            return Err(revert("unsupported function"));
        };

        state.block += 1;
        let tx_hash = keccak256(&state.block.to_be_bytes()).to_hex();
        let logs = if state.emit_events {
            let log = event.to_log(self.contract);
            vec![json!({
                "address": log.address.to_hex(),
                "topics": log.topics.iter().map(Bytes32::to_hex).collect::<Vec<_>>(),
                "data": hex_data(&log.data),
            })]
        } else {
            Vec::new()
        };
        let receipt = json!({
            "transactionHash": tx_hash,
            "blockNumber": format!("0x{:x}", state.block),
            "status": "0x1",
            "logs": logs,
        });
        state.receipts.insert(tx_hash.clone(), receipt);
        Ok(json!(tx_hash))
    }
}

// =============================================================================
// In-memory world
// =============================================================================

/// Mock-network session factory that always hands out the same session.
pub struct FixedSessionFactory(pub Arc<MockSession>);

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

/// Shared backends for several clients.
pub struct World {
    /// Ledger; writes are sent as the owner.
    pub ledger: Arc<MockLedger>,
    /// Content storage.
    pub content: Arc<MockContentStore>,
    /// The relayer session every client bootstraps into.
    pub session: Arc<MockSession>,
    /// Shared SDK registry.
    pub registry: Arc<SdkRegistry>,
}

impl World {
    /// A world whose ledger writes as `owner`.
    pub fn new(owner: Address) -> Self {
        Self::with_contract(contract(), owner)
    }

    /// A world with the deployment at `contract`.
    pub fn with_contract(contract: Address, owner: Address) -> Self {
        Self {
            ledger: Arc::new(MockLedger::new(contract, owner)),
            content: Arc::new(MockContentStore::new()),
            session: Arc::new(MockSession::relayer(31337)),
            registry: Arc::new(SdkRegistry::new()),
        }
    }

    /// A client on the local node as `signer`.
    ///
    /// Only the owner's client gets the writer; a viewer reads and decrypts.
    pub fn client(
        &self,
        signer: Option<LocalSigner>,
        can_write: bool,
        continuity: Arc<dyn ContinuityStore>,
    ) -> ResumeChainClient {
        let account = signer.as_ref().map(LocalSigner::address);
        let parts = ClientParts {
            provider: ProviderHandle::Url(LOCAL_NODE.to_string()),
            contract: self.ledger.contract_address(),
            account,
            reader: self.ledger.clone(),
            writer: can_write.then(|| self.ledger.clone() as Arc<dyn LedgerWriter>),
            signer: signer.map(|s| Arc::new(s) as Arc<dyn TypedDataSigner>),
            backends: SessionBackends {
                sdk_loader: Arc::new(client_runtime::UnavailableRelayer),
                mock_factory: Arc::new(FixedSessionFactory(self.session.clone())),
            },
            metadata: Arc::new(MockMetadataFetcher::with_metadata(json!({ "chainId": 31337 }))),
            registry: self.registry.clone(),
            content: self.content.clone(),
            continuity,
        };
        ResumeChainClient::from_parts(&ClientConfig::for_testing(), parts)
    }
}
