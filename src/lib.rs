pub mod adapters;
pub mod audit;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod submit;
pub mod validation;

pub use audit::AuditLogger;
pub use config::AppConfig;
pub use domain::{OrderRequest, OrderSide, OrderType, SubmissionResult, TimeInForce};
pub use error::{FutctlError, Result};
pub use exchange::{build_exchange_client, ExchangeClient};
pub use submit::OrderSubmitter;
