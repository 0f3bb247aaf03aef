//! Input validation for CLI-supplied order parameters.
//!
//! These are pure predicates over the raw argument strings: a malformed
//! value yields `false`, never a panic or an error. The CLI layer rejects
//! the invocation before any client or audit-log interaction happens.

use rust_decimal::Decimal;
use std::str::FromStr;

/// A symbol is a non-empty ASCII-alphanumeric exchange ticker, e.g. `BTCUSDT`.
pub fn valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Side must be BUY or SELL, case-insensitive.
pub fn valid_side(side: &str) -> bool {
    matches!(side.trim().to_ascii_uppercase().as_str(), "BUY" | "SELL")
}

/// Quantity and price arrive as strings and must parse as decimals.
pub fn valid_decimal(raw: &str) -> bool {
    parse_decimal(raw).is_some()
}

/// Parse a decimal argument, accepting scientific notation (`1e-3`).
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}
