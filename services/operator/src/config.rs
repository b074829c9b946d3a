use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tracing::warn;

use crate::error::{OperatorError, Result};

pub const CONFIG_ENV: &str = "RIFAS_OPERATOR_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub rpc_url: String,
    pub program_id: String,
    /// Path to the admin keypair (Solana JSON keypair file).
    pub keypair_path: String,
    /// Endpoint returning the latest federal lottery result as JSON.
    pub lottery_api_url: String,
    pub http_timeout_secs: u64,
    /// Interval between snapshots for `watch`.
    pub poll_interval_secs: u64,
    pub max_send_retries: u32,
    /// Base backoff (ms) between send attempts, doubled per attempt.
    pub retry_backoff_ms: u64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8899".to_string(),
            program_id: rifas::ID.to_string(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            lottery_api_url: "https://servicebus2.caixa.gov.br/portaldeloterias/api/federal"
                .to_string(),
            http_timeout_secs: 10,
            poll_interval_secs: 5,
            max_send_retries: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl OperatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(OperatorError::Config("rpc_url is empty".into()));
        }
        if self.lottery_api_url.trim().is_empty() {
            return Err(OperatorError::Config("lottery_api_url is empty".into()));
        }
        if self.keypair_path.trim().is_empty() {
            return Err(OperatorError::Config("keypair_path is empty".into()));
        }
        if self.http_timeout_secs == 0 || self.poll_interval_secs == 0 {
            return Err(OperatorError::Config("timeouts and intervals must be positive".into()));
        }
        if self.max_send_retries == 0 {
            return Err(OperatorError::Config("max_send_retries must be at least 1".into()));
        }
        self.program_id()?;
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.program_id)
            .map_err(|e| OperatorError::Config(format!("program_id: {e}")))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: OperatorConfig = serde_json::from_str(contents)
            .map_err(|e| OperatorError::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config() -> Result<OperatorConfig> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_default();
    if path.is_empty() {
        warn!("{} not set, using default configuration", CONFIG_ENV);
        let config = OperatorConfig::default();
        config.validate()?;
        return Ok(config);
    }

    let expanded = expand_tilde(&path);
    let contents = std::fs::read_to_string(&expanded)
        .map_err(|e| OperatorError::Config(format!("read {}: {e}", expanded.display())))?;
    OperatorConfig::from_json(&contents)
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            let mut p = PathBuf::from(home);
            if path.len() > 2 {
                p.push(&path[2..]);
            }
            return p;
        }
    }
    PathBuf::from(path)
}
