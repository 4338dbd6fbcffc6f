//! Selection of the active network parameters.
//!
//! [`ParamsRegistry`] owns one [`ChainParams`] per network and remembers which
//! one is active. Most of the node reads parameters through the process-wide
//! registry behind [`params`]; tests that need isolation can build their own.
//!
//! The global accessors hand out `Arc` snapshots and never return a lock
//! guard, so a caller may hold parameters while selecting another network.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

use super::base::{network_from_choice, BaseParams, BaseParamsRegistry, NetworkChoice};
use super::params::ChainParams;
use crate::network::NetworkId;

pub struct ParamsRegistry {
    main: Arc<ChainParams>,
    testnet: Arc<ChainParams>,
    regtest: Arc<ChainParams>,
    unittest: Arc<ChainParams>,
    current: Option<NetworkId>,
    base: BaseParamsRegistry,
}

impl ParamsRegistry {
    /// Builds all four parameter sets. Nothing is selected yet.
    pub fn new() -> Self {
        Self {
            main: Arc::new(ChainParams::mainnet()),
            testnet: Arc::new(ChainParams::testnet()),
            regtest: Arc::new(ChainParams::regtest()),
            unittest: Arc::new(ChainParams::unittest()),
            current: None,
            base: BaseParamsRegistry::default(),
        }
    }

    /// Makes `network` the active network, for both the chain and the base parameters
    pub fn select(&mut self, network: NetworkId) {
        info!(%network, "selecting network parameters");
        self.base.select(network);
        self.current = Some(network);
    }

    pub fn selected(&self) -> Option<NetworkId> {
        self.current
    }

    /// The active parameters. Panics when no network was selected.
    pub fn active(&self) -> &ChainParams {
        match self.try_active() {
            Some(params) => params,
            None => panic!("chain parameters requested before a network was selected"),
        }
    }

    pub fn try_active(&self) -> Option<&ChainParams> {
        self.current.map(|network| self.params_for(network))
    }

    /// Parameters of any network, without changing the selection
    pub fn params_for(&self, network: NetworkId) -> &ChainParams {
        self.shared(network)
    }

    /// A snapshot that stays valid after the registry changes
    pub fn shared(&self, network: NetworkId) -> &Arc<ChainParams> {
        match network {
            NetworkId::Main => &self.main,
            NetworkId::Testnet => &self.testnet,
            NetworkId::Regtest => &self.regtest,
            NetworkId::UnitTest => &self.unittest,
        }
    }

    pub fn base(&self) -> &BaseParamsRegistry {
        &self.base
    }

    /// Setters for the unit test network. Panics unless it is the active network.
    pub fn modifiable_params(&mut self) -> ModifiableParams<'_> {
        let current = self.current;
        match self.try_modifiable_params() {
            Some(params) => params,
            None => panic!("modifiable parameters are only available for unittest (active: {current:?})"),
        }
    }

    pub fn try_modifiable_params(&mut self) -> Option<ModifiableParams<'_>> {
        match self.current {
            Some(NetworkId::UnitTest) => Some(ModifiableParams { params: Arc::make_mut(&mut self.unittest) }),
            _ => None,
        }
    }

    /// Selects the network named by command-line style options. An unknown or
    /// contradictory choice leaves the current selection untouched.
    pub fn select_from_environment(&mut self, choice: &NetworkChoice) -> Option<NetworkId> {
        match network_from_choice(choice) {
            Ok(network) => {
                self.select(network);
                Some(network)
            }
            Err(err) => {
                warn!("{err}");
                None
            }
        }
    }

    /// Clears the selection and restores the unit test parameters
    pub fn reset(&mut self) {
        self.current = None;
        self.base.reset();
        self.unittest = Arc::new(ChainParams::unittest());
    }
}

impl Default for ParamsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Write access to the few unit test parameters that tests may tune
pub struct ModifiableParams<'a> {
    params: &'a mut ChainParams,
}

impl ModifiableParams<'_> {
    pub fn set_subsidy_halving_interval(&mut self, interval: i32) {
        self.params.subsidy_halving_interval = interval;
    }

    pub fn set_default_consistency_checks(&mut self, enabled: bool) {
        self.params.default_consistency_checks = enabled;
    }

    pub fn set_allow_min_difficulty_blocks(&mut self, allowed: bool) {
        self.params.allow_min_difficulty_blocks = allowed;
    }

    pub fn set_skip_proof_of_work_check(&mut self, skip: bool) {
        self.params.skip_proof_of_work_check = skip;
    }
}

static REGISTRY: Lazy<RwLock<ParamsRegistry>> = Lazy::new(|| RwLock::new(ParamsRegistry::new()));

pub fn select_params(network: NetworkId) {
    REGISTRY.write().select(network);
}

/// The process-wide active parameters. Panics when no network was selected.
pub fn params() -> Arc<ChainParams> {
    match try_params() {
        Some(params) => params,
        None => panic!("chain parameters requested before a network was selected"),
    }
}

pub fn try_params() -> Option<Arc<ChainParams>> {
    let registry = REGISTRY.read();
    registry.selected().map(|network| registry.shared(network).clone())
}

pub fn params_for(network: NetworkId) -> Arc<ChainParams> {
    REGISTRY.read().shared(network).clone()
}

/// The process-wide active base parameters. Panics when no network was selected.
pub fn base_params() -> &'static BaseParams {
    REGISTRY.read().base().active()
}

pub fn select_params_from_environment(choice: &NetworkChoice) -> Option<NetworkId> {
    REGISTRY.write().select_from_environment(choice)
}

/// Runs `f` with the unit test setters. Panics unless unittest is active.
///
/// The setters work on a staged copy that is published when `f` returns, so
/// `params()` inside `f` still sees the previous values. No lock is held while
/// `f` runs. Changes are dropped if the selection left unittest meanwhile.
pub fn with_modifiable_params<F, T>(f: F) -> T
where
    F: FnOnce(&mut ModifiableParams<'_>) -> T,
{
    let mut staged = {
        let registry = REGISTRY.read();
        match registry.selected() {
            Some(NetworkId::UnitTest) => ChainParams::clone(registry.shared(NetworkId::UnitTest)),
            current => panic!("modifiable parameters are only available for unittest (active: {current:?})"),
        }
    };
    let out = f(&mut ModifiableParams { params: &mut staged });
    let mut registry = REGISTRY.write();
    if registry.selected() == Some(NetworkId::UnitTest) {
        registry.unittest = Arc::new(staged);
    }
    out
}

pub fn reset_params() {
    REGISTRY.write().reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_switch() {
        let mut reg = ParamsRegistry::new();
        assert!(reg.try_active().is_none());
        for network in NetworkId::iter() {
            reg.select(network);
            assert_eq!(reg.active().network_id, network);
            assert_eq!(reg.base().active().network_id, network);
        }
    }

    #[test]
    #[should_panic(expected = "before a network was selected")]
    fn active_without_selection_panics() {
        ParamsRegistry::new().active();
    }

    #[test]
    fn modifiable_only_for_unittest() {
        let mut reg = ParamsRegistry::new();
        reg.select(NetworkId::Main);
        assert!(reg.try_modifiable_params().is_none());

        reg.select(NetworkId::UnitTest);
        let mut m = reg.modifiable_params();
        m.set_subsidy_halving_interval(10);
        m.set_skip_proof_of_work_check(true);
        assert_eq!(reg.active().subsidy_halving_interval, 10);
        assert!(reg.active().skip_proof_of_work_check);
        assert_eq!(reg.params_for(NetworkId::Main).subsidy_halving_interval, 0);
        assert!(!reg.params_for(NetworkId::Main).skip_proof_of_work_check);

        reg.reset();
        assert_eq!(reg.params_for(NetworkId::UnitTest).subsidy_halving_interval, 0);
        assert!(reg.selected().is_none());
    }

    #[test]
    fn snapshots_survive_modification() {
        let mut reg = ParamsRegistry::new();
        reg.select(NetworkId::UnitTest);
        let before = reg.shared(NetworkId::UnitTest).clone();
        reg.modifiable_params().set_subsidy_halving_interval(7);
        assert_eq!(before.subsidy_halving_interval, 0);
        assert_eq!(reg.active().subsidy_halving_interval, 7);
    }

    #[test]
    #[should_panic(expected = "only available for unittest")]
    fn modifiable_on_main_panics() {
        let mut reg = ParamsRegistry::new();
        reg.select(NetworkId::Main);
        reg.modifiable_params();
    }

    #[test]
    fn environment_selection() {
        let mut reg = ParamsRegistry::new();
        assert_eq!(reg.select_from_environment(&NetworkChoice::named("regtest")), Some(NetworkId::Regtest));
        let bad = NetworkChoice { testnet: true, regtest: true, ..Default::default() };
        assert_eq!(reg.select_from_environment(&bad), None);
        assert_eq!(reg.selected(), Some(NetworkId::Regtest));
        assert_eq!(reg.select_from_environment(&NetworkChoice::named("nonet")), None);
        assert_eq!(reg.selected(), Some(NetworkId::Regtest));
    }
}
