use std::sync::Arc;

use serde_json::json;
#[cfg(feature = "live")]
use tracing::info;

#[cfg(feature = "live")]
use crate::adapters::BinanceFuturesClient;
use crate::adapters::SimulatedClient;
use crate::audit::AuditLogger;
use crate::config::AppConfig;

use super::ExchangeClient;

/// Build the exchange client for this invocation.
///
/// Total: every branch yields a usable client and exactly one `client.init`
/// audit entry. Missing credentials degrade to the simulated client rather
/// than failing; downstream that produces mock fills. No network traffic
/// happens here, only REST base selection.
pub fn build_exchange_client(
    app_config: &AppConfig,
    testnet: bool,
    dry_run: bool,
    audit: &AuditLogger,
) -> Arc<dyn ExchangeClient> {
    if dry_run {
        audit.log("client.init", json!({"mode": "dry-run"}));
        return Arc::new(SimulatedClient::new());
    }

    let Some((api_key, api_secret)) = app_config.exchange.credentials() else {
        audit.log("client.init", json!({"mode": "missing-keys"}));
        return Arc::new(SimulatedClient::new());
    };

    build_live_client(app_config, testnet, &api_key, &api_secret, audit)
}

#[cfg(feature = "live")]
fn build_live_client(
    app_config: &AppConfig,
    testnet: bool,
    api_key: &str,
    api_secret: &str,
    audit: &AuditLogger,
) -> Arc<dyn ExchangeClient> {
    let base_url = app_config.exchange.rest_base(testnet);
    info!("exchange client bound to {}", base_url);
    audit.log("client.init", json!({"mode": "live", "testnet": testnet}));
    Arc::new(BinanceFuturesClient::new(base_url, api_key, api_secret))
}

// Without the live adapter compiled in, credentials or not, the only thing
// we can hand out is the simulated client. The original behaved the same
// way when its exchange library was missing at runtime; callers cannot tell
// this apart from dry-run except through the audit mode.
#[cfg(not(feature = "live"))]
fn build_live_client(
    _app_config: &AppConfig,
    _testnet: bool,
    _api_key: &str,
    _api_secret: &str,
    audit: &AuditLogger,
) -> Arc<dyn ExchangeClient> {
    audit.log("client.init", json!({"mode": "lib-not-installed"}));
    Arc::new(SimulatedClient::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::Path;

    fn audit_in(dir: &Path) -> (AuditLogger, std::path::PathBuf) {
        let path = dir.join("bot.log");
        (AuditLogger::open(&path).expect("open audit log"), path)
    }

    fn last_entry(path: &Path) -> Value {
        let text = std::fs::read_to_string(path).expect("read audit log");
        let line = text.lines().last().expect("audit log non-empty");
        serde_json::from_str(line).expect("valid JSON audit line")
    }

    #[test]
    fn dry_run_yields_simulated_client() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (audit, path) = audit_in(dir.path());
        let config = AppConfig::default();

        let client = build_exchange_client(&config, false, true, &audit);
        audit.flush().expect("flush");

        assert!(!client.is_live());
        let entry = last_entry(&path);
        assert_eq!(entry["action"], "client.init");
        assert_eq!(entry["details"]["mode"], "dry-run");
    }

    #[test]
    fn missing_keys_yields_simulated_client() {
        std::env::remove_var("BINANCE_API_KEY");
        std::env::remove_var("BINANCE_API_SECRET");

        let dir = tempfile::tempdir().expect("tempdir");
        let (audit, path) = audit_in(dir.path());
        let config = AppConfig::default();

        let client = build_exchange_client(&config, false, false, &audit);
        audit.flush().expect("flush");

        assert!(!client.is_live());
        assert_eq!(last_entry(&path)["details"]["mode"], "missing-keys");
    }

    #[cfg(feature = "live")]
    #[test]
    fn credentials_yield_live_client() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (audit, path) = audit_in(dir.path());
        let mut config = AppConfig::default();
        config.exchange.api_key = Some("key".to_string());
        config.exchange.api_secret = Some("secret".to_string());

        let client = build_exchange_client(&config, true, false, &audit);
        audit.flush().expect("flush");

        assert!(client.is_live());
        let entry = last_entry(&path);
        assert_eq!(entry["details"]["mode"], "live");
        assert_eq!(entry["details"]["testnet"], true);
    }
}
