use consensus_core::config::base::NetworkChoice;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::{NodeError, NodeResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chain: ChainConfig,
    pub denylist: DenylistConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Network token; main when unset
    pub network: Option<String>,
    /// Enforce checkpoints
    pub checkpoints: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenylistConfig {
    pub serials_path: Option<PathBuf>,
    pub outpoints_path: Option<PathBuf>,
    /// Fail startup when a configured file cannot be read
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { network: None, checkpoints: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> NodeResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).map_err(|source| NodeError::Io { path: path.to_path_buf(), source })?;
        Ok(toml::from_str(&content)?)
    }

    /// Override config with CLI arguments
    pub fn apply_cli_overrides(&mut self, args: &Args) {
        if let Some(network) = &args.network {
            self.chain.network = Some(network.clone());
        }

        if args.no_checkpoints {
            self.chain.checkpoints = false;
        }

        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }

        if let Some(path) = &args.serials {
            self.denylist.serials_path = Some(path.clone());
        }

        if let Some(path) = &args.outpoints {
            self.denylist.outpoints_path = Some(path.clone());
        }
    }

    /// The network selection after overrides. The `--testnet`/`--regtest`
    /// flags are resolved together with the configured network token.
    pub fn network_choice(&self, args: &Args) -> NetworkChoice {
        NetworkChoice { network: self.chain.network.clone(), testnet: args.testnet, regtest: args.regtest }
    }
}
