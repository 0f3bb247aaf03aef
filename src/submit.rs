//! Order submission workflows.
//!
//! Validation has already happened by the time a request lands here; this
//! module owns the attempt -> mock-or-live -> terminal-audit state machine:
//!
//! `Idle -> Attempted -> {MockPlaced | Placed | Errored}`
//!
//! Exactly one `order.attempt.<type>` entry and exactly one terminal entry
//! (`order.placed.<type>.mock`, `order.placed.<type>`, or
//! `order.error.<type>`) are written per call. There are no retries.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::audit::AuditLogger;
use crate::domain::{OrderRequest, OrderType, SubmissionResult};
use crate::exchange::ExchangeClient;

/// Submits one order per call against an injected exchange capability.
pub struct OrderSubmitter {
    client: Arc<dyn ExchangeClient>,
    audit: Arc<AuditLogger>,
}

impl OrderSubmitter {
    pub fn new(client: Arc<dyn ExchangeClient>, audit: Arc<AuditLogger>) -> Self {
        Self { client, audit }
    }

    /// Place a limit order: price and time-in-force travel with the request.
    pub async fn place_limit(&self, request: &OrderRequest, dry_run: bool) -> SubmissionResult {
        self.place(request, dry_run).await
    }

    /// Place a market order: no price, no time-in-force; the exchange fills
    /// at best available.
    pub async fn place_market(&self, request: &OrderRequest, dry_run: bool) -> SubmissionResult {
        self.place(request, dry_run).await
    }

    async fn place(&self, request: &OrderRequest, dry_run: bool) -> SubmissionResult {
        let noun = request.order_type.noun();
        let meta = request.meta();
        self.audit
            .log(&format!("order.attempt.{}", noun), Value::Object(meta.clone()));

        // Safety default: without both a live session and explicit non-dry-run
        // intent, nothing ever goes over the wire.
        if dry_run || !self.client.is_live() {
            debug!("mock {} order for {}", noun, request.symbol);
            self.audit.log(
                &format!("order.placed.{}.mock", noun),
                Value::Object(meta.clone()),
            );
            return SubmissionResult::success(format!("Mock {} order placed", noun), meta);
        }

        match self.client.create_order(request).await {
            Ok(resp) => {
                info!("{} order placed for {}", noun, request.symbol);
                self.audit.log(
                    &format!("order.placed.{}", noun),
                    json!({"symbol": request.symbol, "resp": resp}),
                );
                let mut meta = Map::new();
                meta.insert("resp".to_string(), resp);
                let message = match request.order_type {
                    OrderType::Limit => "Limit order placed",
                    OrderType::Market => "Market order placed",
                };
                SubmissionResult::success(message, meta)
            }
            Err(e) => {
                warn!("{} order failed for {}: {}", noun, request.symbol, e);
                self.audit
                    .log(&format!("order.error.{}", noun), json!({"error": e.to_string()}));
                SubmissionResult::failure(format!("Error placing {} order: {}", noun, e))
            }
        }
    }
}
