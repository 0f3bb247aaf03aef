use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::audit::AuditLogger;
use crate::config::AppConfig;
use crate::domain::{parse_side, OrderRequest, OrderType};
use crate::error::Result;
use crate::exchange::build_exchange_client;
use crate::submit::OrderSubmitter;
use crate::validation;

#[derive(Parser)]
#[command(name = "futctl")]
#[command(version = "0.1.0")]
#[command(about = "Place limit and market orders on Binance USDT-M Futures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Simulate only; no live order is sent
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Target testnet endpoints instead of production
    #[arg(long, global = true)]
    pub testnet: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Place a limit order
    Limit {
        /// Symbol, e.g. BTCUSDT
        symbol: String,
        /// BUY or SELL
        side: String,
        /// Quantity (decimal)
        quantity: String,
        /// Limit price (decimal)
        price: String,
    },
    /// Place a market order
    Market {
        /// Symbol, e.g. BTCUSDT
        symbol: String,
        /// BUY or SELL
        side: String,
        /// Quantity (decimal)
        quantity: String,
    },
}

/// Run one submission: validate, acquire a client, place, report.
///
/// Exit codes: 0 success (live or mock), 1 submission failure, 2 invalid
/// input. Validation rejects before the audit log or client factory is
/// touched.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load(&cli.config)?;

    let request = match build_request(&cli.command) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{}", message);
            return Ok(ExitCode::from(2));
        }
    };

    let audit = Arc::new(AuditLogger::with_rotation(
        &config.audit.log_path,
        config.audit.max_bytes,
        config.audit.max_backups,
    )?);
    let client = build_exchange_client(&config, cli.testnet, cli.dry_run, &audit);
    let submitter = OrderSubmitter::new(client, Arc::clone(&audit));

    let result = match request.order_type {
        OrderType::Limit => submitter.place_limit(&request, cli.dry_run).await,
        OrderType::Market => submitter.place_market(&request, cli.dry_run).await,
    };
    audit.flush()?;

    println!("{}", result.message);
    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Turn raw CLI strings into a validated request, or a user-facing message.
fn build_request(command: &Commands) -> std::result::Result<OrderRequest, String> {
    match command {
        Commands::Limit {
            symbol,
            side,
            quantity,
            price,
        } => {
            check_common(symbol, side, quantity)?;
            if !validation::valid_decimal(price) {
                return Err("Invalid price".to_string());
            }
            let side = parse_side(side).map_err(|e| e.to_string())?;
            let quantity = validation::parse_decimal(quantity).ok_or("Invalid quantity")?;
            let price = validation::parse_decimal(price).ok_or("Invalid price")?;
            OrderRequest::limit(symbol, side, quantity, price).map_err(|e| e.to_string())
        }
        Commands::Market {
            symbol,
            side,
            quantity,
        } => {
            check_common(symbol, side, quantity)?;
            let side = parse_side(side).map_err(|e| e.to_string())?;
            let quantity = validation::parse_decimal(quantity).ok_or("Invalid quantity")?;
            OrderRequest::market(symbol, side, quantity).map_err(|e| e.to_string())
        }
    }
}

fn check_common(symbol: &str, side: &str, quantity: &str) -> std::result::Result<(), String> {
    if !validation::valid_symbol(symbol) {
        return Err("Invalid symbol".to_string());
    }
    if !validation::valid_side(side) {
        return Err("Invalid side".to_string());
    }
    if !validation::valid_decimal(quantity) {
        return Err("Invalid quantity".to_string());
    }
    Ok(())
}
