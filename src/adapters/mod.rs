#[cfg(feature = "live")]
pub mod binance_rest;
pub mod sim;

#[cfg(feature = "live")]
pub use binance_rest::{BinanceFuturesClient, PROD_REST_BASE, TESTNET_REST_BASE};
pub use sim::SimulatedClient;
