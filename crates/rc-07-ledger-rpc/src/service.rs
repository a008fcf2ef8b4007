//! # JSON-RPC Ledger
//!
//! [`LedgerReader`] and [`LedgerWriter`] over a [`RpcTransport`].

use async_trait::async_trait;
use rc_01_chain_resolver::{parse_chain_id_hex, ChainIdSource, ResolverError};
use serde_json::{json, Map, Value};
use shared_types::{Address, Bytes32, Handle, LedgerCall, LedgerError, LedgerReader, LedgerWriter, Receipt, Record};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::codec::{
    decode_handle, decode_record, decode_u64, encode_endorsement_count, encode_get_resume,
    encode_ledger_call, encode_next_id, hex_data, parse_hex_data, RpcReceipt,
};
use crate::config::RpcConfig;
use crate::domain::{AddressBook, RpcError};
use crate::ports::RpcTransport;

/// The ResumeChain contract reached through JSON-RPC.
pub struct JsonRpcLedger {
    transport: Arc<dyn RpcTransport>,
    contract: Option<Address>,
    sender: Option<Address>,
    receipt_timeout: Duration,
    poll_interval: Duration,
}

impl JsonRpcLedger {
    /// A ledger bound to `contract`; `None` means not deployed here.
    pub fn new(transport: Arc<dyn RpcTransport>, contract: Option<Address>, config: &RpcConfig) -> Self {
        Self {
            transport,
            contract,
            sender: None,
            receipt_timeout: config.receipt_timeout(),
            poll_interval: config.receipt_poll_interval(),
        }
    }

    /// Asks the node for its chain id and binds to that chain's deployment.
    pub async fn for_current_chain(
        transport: Arc<dyn RpcTransport>,
        book: &AddressBook,
        config: &RpcConfig,
    ) -> Result<Self, RpcError> {
        let chain_id = query_chain_id(transport.as_ref()).await?;
        let contract = book.lookup(chain_id);
        match contract {
            Some(address) => info!("[rc-07] ResumeChain on chain {} at {}", chain_id, address),
            None => warn!("[rc-07] ResumeChain is not deployed on chain {}", chain_id),
        }
        Ok(Self::new(transport, contract, config))
    }

    /// Sets the account transactions are sent from.
    pub fn with_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Account transactions are sent from.
    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    /// The transport.
    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    fn require_contract(&self) -> Result<Address, LedgerError> {
        self.contract
            .ok_or_else(|| LedgerError::Rpc("ResumeChain is not deployed on this network".to_string()))
    }

    async fn eth_call(&self, data: Vec<u8>, from: Option<Address>) -> Result<Vec<u8>, LedgerError> {
        let contract = self.require_contract()?;
        let mut tx = Map::new();
        tx.insert("to".to_string(), json!(contract.to_hex()));
        tx.insert("data".to_string(), json!(hex_data(&data)));
        if let Some(from) = from {
            tx.insert("from".to_string(), json!(from.to_hex()));
        }

        let result = self
            .transport
            .request("eth_call", json!([Value::Object(tx), "latest"]))
            .await?;
        let raw = result
            .as_str()
            .ok_or_else(|| LedgerError::Decode(format!("eth_call returned {result}")))?;
        Ok(parse_hex_data(raw)?)
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<Receipt, LedgerError> {
        tokio::time::timeout(self.receipt_timeout, self.poll_receipt(tx_hash))
            .await
            .map_err(|_| LedgerError::ReceiptTimeout {
                tx_hash: tx_hash.to_string(),
            })?
    }

    async fn poll_receipt(&self, tx_hash: &str) -> Result<Receipt, LedgerError> {
        loop {
            let result = self
                .transport
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;
            if result.is_null() {
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }
            let receipt: RpcReceipt = serde_json::from_value(result)
                .map_err(|e| LedgerError::Decode(format!("receipt: {e}")))?;
            if !receipt.succeeded() {
                return Err(LedgerError::TransactionFailed {
                    tx_hash: tx_hash.to_string(),
                });
            }
            return Ok(receipt.into_receipt()?);
        }
    }
}

/// One `eth_chainId` round trip.
pub async fn query_chain_id(transport: &dyn RpcTransport) -> Result<u64, RpcError> {
    let result = transport.request("eth_chainId", json!([])).await?;
    let raw = result
        .as_str()
        .ok_or_else(|| RpcError::Parse(format!("eth_chainId returned {result}")))?;
    parse_chain_id_hex(raw).map_err(|e| RpcError::Parse(e.to_string()))
}

#[async_trait]
impl LedgerReader for JsonRpcLedger {
    async fn next_id(&self) -> Result<u64, LedgerError> {
        let data = self.eth_call(encode_next_id(), self.sender).await?;
        Ok(decode_u64(&data)?)
    }

    async fn read(&self, id: u64, caller: Option<Address>) -> Result<Record, LedgerError> {
        let data = self.eth_call(encode_get_resume(id), caller).await?;
        let record = decode_record(id, &data)?;
        if record.owner == Address::ZERO {
            return Err(LedgerError::NotFound(id));
        }
        Ok(record)
    }

    async fn encrypted_endorsement_count(
        &self,
        id: u64,
        section_hash: Bytes32,
    ) -> Result<Handle, LedgerError> {
        let data = self
            .eth_call(encode_endorsement_count(id, section_hash), self.sender)
            .await?;
        Ok(decode_handle(&data)?)
    }
}

#[async_trait]
impl LedgerWriter for JsonRpcLedger {
    fn contract_address(&self) -> Option<Address> {
        self.contract
    }

    async fn submit(&self, call: LedgerCall) -> Result<Receipt, LedgerError> {
        let contract = self.require_contract()?;
        let sender = self
            .sender
            .ok_or_else(|| LedgerError::Rpc("no sending account configured".to_string()))?;

        let tx = json!({
            "from": sender.to_hex(),
            "to": contract.to_hex(),
            "data": hex_data(&encode_ledger_call(&call)),
        });
        let result = self
            .transport
            .request("eth_sendTransaction", json!([tx]))
            .await?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| LedgerError::Decode(format!("eth_sendTransaction returned {result}")))?
            .to_string();
        debug!("[rc-07] {} sent as {}", call.function_name(), tx_hash);

        let receipt = self.wait_for_receipt(&tx_hash).await?;
        info!(
            "[rc-07] {} confirmed in block {:?} ({} logs)",
            call.function_name(),
            receipt.block_number,
            receipt.logs.len()
        );
        Ok(receipt)
    }
}

#[async_trait]
impl ChainIdSource for JsonRpcLedger {
    async fn chain_id(&self) -> Result<u64, ResolverError> {
        Ok(query_chain_id(self.transport.as_ref()).await?)
    }

    fn describe(&self) -> String {
        self.transport.endpoint()
    }
}
