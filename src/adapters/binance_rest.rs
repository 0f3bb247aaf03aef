//! Binance USDT-M Futures REST adapter (native, no external SDK dependency).
//!
//! Orders go to `POST /fapi/v1/order` with the query string signed via
//! HMAC-SHA256 (lowercase hex) and the API key in `X-MBX-APIKEY`.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde_json::Value;
use sha2::Sha256;

use crate::domain::{OrderRequest, OrderType};
use crate::error::{FutctlError, Result};
use crate::exchange::ExchangeClient;

pub const PROD_REST_BASE: &str = "https://fapi.binance.com";
pub const TESTNET_REST_BASE: &str = "https://testnet.binancefuture.com";

const ORDER_PATH: &str = "/fapi/v1/order";

type HmacSha256 = Hmac<Sha256>;

/// Signed REST client for the USDT-M Futures order endpoint.
///
/// No request timeout is configured; a submit call waits until the exchange
/// answers or the transport fails. Callers wanting a bound must impose
/// their own.
pub struct BinanceFuturesClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl BinanceFuturesClient {
    pub fn new(base_url: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parameters for `POST /fapi/v1/order`, in the order they are sent
    /// and signed. Market orders carry no price and no timeInForce; the
    /// exchange fills at best available.
    fn order_params(request: &OrderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", request.symbol.clone()),
            ("side", request.side.to_string()),
            ("type", request.order_type.as_str().to_string()),
        ];
        if request.order_type == OrderType::Limit {
            params.push(("timeInForce", request.time_in_force.as_str().to_string()));
        }
        params.push(("quantity", request.quantity.normalize().to_string()));
        if let Some(price) = request.price {
            params.push(("price", price.normalize().to_string()));
        }
        params
    }

    fn sign(&self, payload: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| FutctlError::Auth(format!("invalid API secret: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn signed_query(&self, params: &[(&'static str, String)], timestamp_ms: i64) -> Result<String> {
        let mut query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        query.push_str(&format!("&timestamp={}", timestamp_ms));
        let signature = self.sign(&query)?;
        query.push_str(&format!("&signature={}", signature));
        Ok(query)
    }
}

#[async_trait]
impl ExchangeClient for BinanceFuturesClient {
    fn is_live(&self) -> bool {
        true
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<Value> {
        let params = Self::order_params(request);
        let query = self.signed_query(&params, Utc::now().timestamp_millis())?;
        let url = format!("{}{}?{}", self.base_url, ORDER_PATH, query);

        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| FutctlError::Auth(format!("invalid API key header: {}", e)))?;

        let resp = self.http.post(&url).header("X-MBX-APIKEY", api_key).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(FutctlError::ExchangeRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| FutctlError::Internal(format!("invalid exchange JSON response: {}", e)))
    }
}
