//! # Outbound Ports

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::RpcError;

/// One JSON-RPC endpoint - outbound port.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Performs one request. A JSON `null` result is returned as
    /// [`Value::Null`], not as an error.
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Endpoint identifier for logging.
    fn endpoint(&self) -> String;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

type Handler = Box<dyn Fn(&str, &Value) -> Result<Value, RpcError> + Send + Sync>;

/// Scripted transport for testing.
///
/// Every request is recorded and answered by the handler closure.
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    /// A transport answering with `handler(method, params)`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests made so far, as `(method, params)`.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    /// Requests made so far for `method`.
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.calls.lock().push((method.to_string(), params.clone()));
        (self.handler)(method, &params)
    }

    fn endpoint(&self) -> String {
        "mock://rpc".to_string()
    }
}
