//! # Client Configuration
//!
//! Unified configuration for every subsystem of the client.
//!
//! Defaults target a local development node; `from_env` layers environment
//! overrides on top and `validate` rejects values no subsystem can work with.

use rc_01_chain_resolver::{ResolverConfig, LOCAL_CHAIN_ID};
use rc_02_session_bootstrap::BootstrapConfig;
use rc_03_decrypt_pipeline::DecryptConfig;
use rc_04_ledger_scanner::ScannerConfig;
use rc_07_ledger_rpc::RpcConfig;
use rc_08_content_store::ContentStoreConfig;
use resume_telemetry::{TelemetryConfig, TelemetryError};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network classification.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Relayer session bootstrap.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Decrypt authorization.
    #[serde(default)]
    pub decrypt: DecryptConfig,
    /// Ledger scans.
    #[serde(default)]
    pub scanner: ScannerConfig,
    /// JSON-RPC ledger access.
    #[serde(default)]
    pub rpc: RpcConfig,
    /// IPFS gateways and pinning.
    #[serde(default)]
    pub content: ContentStoreConfig,
    /// Continuity file; in-memory continuity when unset.
    #[serde(default)]
    pub continuity_file: Option<PathBuf>,
    /// Logging.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ClientConfig {
    /// Create a config for testing (short timeouts, quiet logs).
    pub fn for_testing() -> Self {
        Self {
            resolver: ResolverConfig::for_testing(),
            bootstrap: BootstrapConfig::for_testing(),
            decrypt: DecryptConfig::for_testing(),
            scanner: ScannerConfig::for_testing(),
            rpc: RpcConfig::for_testing(),
            content: ContentStoreConfig::for_testing(),
            continuity_file: None,
            telemetry: TelemetryConfig::for_testing(),
        }
    }

    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides from an arbitrary variable lookup.
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `RC_RPC_URL` | ledger JSON-RPC endpoint |
    /// | `RC_CONTRACT_ADDRESS` | deployment override for `RC_CHAIN_ID` (default 31337) |
    /// | `RC_ADDRESS_BOOK` | deployment address book file |
    /// | `RC_MOCK_CHAINS` | extra mock networks, `id=url,id=url` |
    /// | `RC_SCAN_CONCURRENCY` | parallel record reads per scan |
    /// | `RC_DECRYPT_DAYS` | validity of a decrypt authorization |
    /// | `RC_CONTINUITY_FILE` | continuity file path |
    /// | `RC_RELAYER_API_KEY` | relayer SDK init option |
    /// | `PINATA_JWT` | pinning credential |
    /// | `RC_IPFS_GATEWAYS` | comma-separated gateway list |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(url) = lookup("RC_RPC_URL") {
            config.rpc.rpc_url = url;
        }
        if let Some(raw) = lookup("RC_CONTRACT_ADDRESS") {
            let chain_id = match lookup("RC_CHAIN_ID") {
                Some(raw) => parse_var("RC_CHAIN_ID", &raw)?,
                None => LOCAL_CHAIN_ID,
            };
            let address: Address = parse_var("RC_CONTRACT_ADDRESS", &raw)?;
            config.rpc.contract_overrides.insert(chain_id, address);
        }
        if let Some(path) = lookup("RC_ADDRESS_BOOK") {
            config.rpc.address_book_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup("RC_MOCK_CHAINS") {
            config.resolver.mock_chains = ResolverConfig::parse_mock_chains(&raw);
        }
        if let Some(raw) = lookup("RC_SCAN_CONCURRENCY") {
            config.scanner.max_concurrent_reads = parse_var("RC_SCAN_CONCURRENCY", &raw)?;
        }
        if let Some(raw) = lookup("RC_DECRYPT_DAYS") {
            config.decrypt.duration_days = parse_var("RC_DECRYPT_DAYS", &raw)?;
        }
        if let Some(path) = lookup("RC_CONTINUITY_FILE") {
            config.continuity_file = Some(PathBuf::from(path));
        }
        if let Some(key) = lookup("RC_RELAYER_API_KEY") {
            config.bootstrap.init_options.api_key = Some(key);
        }
        if let Some(jwt) = lookup("PINATA_JWT") {
            config.content.pinata_jwt = Some(jwt);
        }
        if let Some(raw) = lookup("RC_IPFS_GATEWAYS") {
            config.content.gateways = ContentStoreConfig::parse_gateways(&raw);
        }

        Ok(config)
    }

    /// Installs the global tracing subscriber for this configuration.
    pub fn init_tracing(&self) -> Result<(), TelemetryError> {
        resume_telemetry::init_tracing(&self.telemetry)
    }

    /// Rejects values no subsystem can work with.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the RPC URL, a gateway or a mock endpoint is not http(s)
    /// - no gateway is configured
    /// - scan concurrency or decrypt validity is zero
    /// - the receipt poll interval exceeds the receipt timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http("rpc.rpc_url", &self.rpc.rpc_url)?;

        if self.content.gateways.is_empty() {
            return Err(ConfigError::Invalid("at least one IPFS gateway is required".into()));
        }
        for gateway in &self.content.gateways {
            require_http("content.gateways", gateway)?;
        }
        for endpoint in self.resolver.mock_chains.values() {
            require_http("resolver.mock_chains", endpoint)?;
        }

        if self.scanner.max_concurrent_reads == 0 {
            return Err(ConfigError::Invalid(
                "scanner.max_concurrent_reads must be at least 1".into(),
            ));
        }
        if self.decrypt.duration_days == 0 {
            return Err(ConfigError::Invalid(
                "decrypt.duration_days must be at least 1".into(),
            ));
        }
        if self.rpc.receipt_poll_interval_ms > self.rpc.receipt_timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "receipt poll interval ({}ms) exceeds receipt timeout ({}ms)",
                self.rpc.receipt_poll_interval_ms, self.rpc.receipt_timeout_ms
            )));
        }
        Ok(())
    }
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidVar {
        var: var.to_string(),
        message: e.to_string(),
    })
}

fn require_http(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} is not an http(s) URL: {url:?}")))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {message}")]
    InvalidVar {
        /// Variable name.
        var: String,
        /// Parse failure.
        message: String,
    },

    /// A combination of values is unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
