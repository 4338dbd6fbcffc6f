use consensus_core::config::base::{network_from_choice, BaseParams, NetworkChoice};
use consensus_core::config::checkpoints::{ChainTip, CheckpointVerifier};
use consensus_core::config::params::ChainParams;
use consensus_core::config::registry::{self, ParamsRegistry};
use consensus_core::invalid::{self, InvalidEntryStore, SerialNumber};
use consensus_core::tx::OutPoint;
use consensus_core::NetworkId;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::Config;
use crate::error::{NodeError, NodeResult};
use crate::ui;

/// The selected network together with the loaded denylist
pub struct Node {
    registry: ParamsRegistry,
    checkpoints_enabled: bool,
    denylist: InvalidEntryStore,
}

impl Node {
    pub fn new(config: &Config, choice: &NetworkChoice) -> NodeResult<Self> {
        let network = network_from_choice(choice)?;
        let mut registry = ParamsRegistry::new();
        registry.select(network);

        let denylist = load_denylist(config)?;
        if !config.chain.checkpoints {
            warn!("checkpoint enforcement is disabled");
        }
        Ok(Self { registry, checkpoints_enabled: config.chain.checkpoints, denylist })
    }

    pub fn network(&self) -> NetworkId {
        self.params().network_id
    }

    pub fn params(&self) -> &ChainParams {
        self.registry.active()
    }

    pub fn base_params(&self) -> &'static BaseParams {
        self.registry.base().active()
    }

    pub fn checkpoints(&self) -> CheckpointVerifier<'static> {
        self.params().checkpoint_verifier(self.checkpoints_enabled)
    }

    pub fn denylist(&self) -> &InvalidEntryStore {
        &self.denylist
    }

    /// Publishes the selection and the denylist process-wide
    pub fn install_globals(&self) -> NodeResult<()> {
        registry::select_params(self.network());
        invalid::install(self.denylist.clone())?;
        Ok(())
    }

    pub fn execute(&self, command: &Command) -> NodeResult<String> {
        match command {
            Command::Summary => Ok(ui::render_summary(self)),
            Command::Params => Ok(serde_json::to_string_pretty(self.params())?),
            Command::Checkpoint { height } => Ok(match self.checkpoints().data().hash_at_height(*height) {
                Some(hash) => format!("checkpoint {height}: {hash}"),
                None => format!("no checkpoint at height {height}"),
            }),
            Command::Progress { chain_tx, block_time, height, no_sigchecks, now } => {
                let tip = ChainTip { height: *height, chain_tx: *chain_tx, time: *block_time };
                let now = now.unwrap_or_else(mch_utils::time::unix_now);
                let fraction = self.checkpoints().estimated_completion_fraction(Some(&tip), now, !no_sigchecks);
                Ok(format!("estimated progress: {:.2}%", fraction * 100.0))
            }
            Command::CheckSerial { serial } => {
                let serial: SerialNumber = serial.parse()?;
                let listed = self.denylist.contains_serial(&serial);
                Ok(format!("serial {serial}: {}", if listed { "denylisted" } else { "not denylisted" }))
            }
            Command::CheckOutpoint { outpoint } => {
                let outpoint: OutPoint = outpoint.parse()?;
                let listed = self.denylist.contains_outpoint(&outpoint);
                Ok(format!("outpoint {outpoint}: {}", if listed { "denylisted" } else { "not denylisted" }))
            }
        }
    }
}

/// The embedded lists plus any configured files
fn load_denylist(config: &Config) -> NodeResult<InvalidEntryStore> {
    let mut store = InvalidEntryStore::new();
    store.load_embedded()?;

    if let Some(path) = &config.denylist.serials_path {
        if let Some(json) = read_list(path, config.denylist.required)? {
            let count = store.load_serials(&json)?;
            info!(count, path = %path.display(), "loaded invalid serials");
        }
    }
    if let Some(path) = &config.denylist.outpoints_path {
        if let Some(json) = read_list(path, config.denylist.required)? {
            let count = store.load_outpoints(&json)?;
            info!(count, path = %path.display(), "loaded invalid outpoints");
        }
    }
    Ok(store)
}

fn read_list(path: &Path, required: bool) -> NodeResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(Some(json)),
        Err(source) if required => Err(NodeError::Io { path: path.to_path_buf(), source }),
        Err(err) => {
            warn!(path = %path.display(), "skipping denylist file: {err}");
            Ok(None)
        }
    }
}
