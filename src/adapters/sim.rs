//! Simulated exchange client: the explicit "absent session" capability.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::domain::OrderRequest;
use crate::error::Result;
use crate::exchange::ExchangeClient;

/// Null client handed out for dry runs, missing credentials, or a
/// compiled-out live adapter. The submitter short-circuits into the mock
/// path before calling `create_order`; if called anyway it answers with a
/// synthetic fill echoing the request.
#[derive(Debug, Default, Clone)]
pub struct SimulatedClient;

impl SimulatedClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExchangeClient for SimulatedClient {
    fn is_live(&self) -> bool {
        false
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<Value> {
        Ok(json!({
            "symbol": request.symbol,
            "side": request.side.to_string(),
            "type": request.order_type.as_str(),
            "origQty": request.quantity.normalize().to_string(),
            "price": request.price.map(|p| p.normalize().to_string()),
            "status": "FILLED",
            "updateTime": Utc::now().timestamp_millis(),
            "simulated": true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderSide;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn simulated_client_is_not_live_and_echoes_fills() {
        let client = SimulatedClient::new();
        assert!(!client.is_live());

        let request = OrderRequest::limit("BTCUSDT", OrderSide::Buy, dec!(0.001), dec!(56000))
            .expect("valid limit request");
        let resp = client.create_order(&request).await.expect("synthetic fill");
        assert_eq!(resp["symbol"], "BTCUSDT");
        assert_eq!(resp["status"], "FILLED");
        assert_eq!(resp["simulated"], true);
    }
}
