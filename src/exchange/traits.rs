use async_trait::async_trait;
use serde_json::Value;

use crate::domain::OrderRequest;
use crate::error::Result;

/// Capability handle for one exchange session.
///
/// Two implementations exist: the signed Binance USDT-M REST adapter and the
/// simulated client the factory falls back to for dry runs, missing
/// credentials, or a compiled-out live adapter. A non-live handle tells the
/// submitter to short-circuit into the mock path before `create_order` is
/// ever reached.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Whether this handle is bound to a real exchange session.
    fn is_live(&self) -> bool;

    /// Submit one order and return the raw exchange response.
    async fn create_order(&self, request: &OrderRequest) -> Result<Value>;
}
