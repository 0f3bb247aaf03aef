use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::{FutctlError, Result};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = &'static str;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err("invalid side; expected BUY|SELL"),
        }
    }
}

pub fn parse_side(raw: &str) -> Result<OrderSide> {
    OrderSide::from_str(raw).map_err(|e| FutctlError::Validation(e.to_string()))
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    /// Wire form sent to the exchange.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
        }
    }

    /// Lowercase noun used in audit actions and result messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good Till Cancelled
    GTC,
    /// Fill Or Kill
    FOK,
    /// Immediate Or Cancel
    IOC,
}

impl Default for TimeInForce {
    fn default() -> Self {
        Self::GTC
    }
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GTC => "GTC",
            Self::FOK => "FOK",
            Self::IOC => "IOC",
        }
    }
}

/// A single validated order, constructed once per CLI invocation.
///
/// Invalid instances are never built: the constructors uppercase the symbol
/// and reject non-positive quantity or price, so anything that reaches the
/// exchange boundary is well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: TimeInForce,
}

impl OrderRequest {
    pub fn limit(symbol: &str, side: OrderSide, quantity: Decimal, price: Decimal) -> Result<Self> {
        check_positive(quantity, "quantity")?;
        check_positive(price, "price")?;
        Ok(Self {
            symbol: symbol.to_ascii_uppercase(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: TimeInForce::GTC,
        })
    }

    pub fn market(symbol: &str, side: OrderSide, quantity: Decimal) -> Result<Self> {
        check_positive(quantity, "quantity")?;
        Ok(Self {
            symbol: symbol.to_ascii_uppercase(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: TimeInForce::GTC,
        })
    }

    /// Request metadata as recorded in audit entries and mock results.
    ///
    /// Quantity is a JSON number, price a string: the price the user typed
    /// is forwarded verbatim to the exchange, so the log keeps it exact.
    /// Market orders carry no price and no tif.
    pub fn meta(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("symbol".to_string(), Value::from(self.symbol.clone()));
        meta.insert("side".to_string(), Value::from(self.side.to_string()));
        meta.insert(
            "quantity".to_string(),
            self.quantity
                .to_f64()
                .map(Value::from)
                .unwrap_or_else(|| Value::from(self.quantity.to_string())),
        );
        if let Some(price) = self.price {
            meta.insert(
                "price".to_string(),
                Value::from(price.normalize().to_string()),
            );
            meta.insert(
                "tif".to_string(),
                Value::from(self.time_in_force.as_str()),
            );
        }
        meta
    }
}

fn check_positive(value: Decimal, field: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(FutctlError::Validation(format!(
            "{} must be positive: {}",
            field, value
        )));
    }
    Ok(())
}
