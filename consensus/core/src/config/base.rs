//! Base parameters: the small per-network settings that tooling needs before
//! the full chain parameters are built (RPC port, data directory).

use crate::errors::ParamsError;
use crate::network::NetworkId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseParams {
    pub network_id: NetworkId,
    /// Placeholder; no RPC port has been assigned to this chain yet
    pub rpc_port: u16,
    /// Subdirectory of the data directory; empty for main. Placeholder names
    /// until the chain fixes its on-disk layout.
    pub data_dir: &'static str,
}

pub static MAIN_BASE: BaseParams = BaseParams { network_id: NetworkId::Main, rpc_port: 17224, data_dir: "" };

pub static TESTNET_BASE: BaseParams =
    BaseParams { network_id: NetworkId::Testnet, rpc_port: 31245, data_dir: "testnet4" };

pub static REGTEST_BASE: BaseParams =
    BaseParams { network_id: NetworkId::Regtest, rpc_port: 31247, data_dir: "regtest" };

pub static UNITTEST_BASE: BaseParams =
    BaseParams { network_id: NetworkId::UnitTest, rpc_port: 31249, data_dir: "unittest" };

impl BaseParams {
    pub fn for_network(network: NetworkId) -> &'static BaseParams {
        match network {
            NetworkId::Main => &MAIN_BASE,
            NetworkId::Testnet => &TESTNET_BASE,
            NetworkId::Regtest => &REGTEST_BASE,
            NetworkId::UnitTest => &UNITTEST_BASE,
        }
    }
}

/// Tracks which base parameters are active
#[derive(Debug, Default, Clone)]
pub struct BaseParamsRegistry {
    current: Option<NetworkId>,
}

impl BaseParamsRegistry {
    pub fn select(&mut self, network: NetworkId) {
        self.current = Some(network);
    }

    pub fn selected(&self) -> Option<NetworkId> {
        self.current
    }

    /// The active base parameters. Panics when no network was selected.
    pub fn active(&self) -> &'static BaseParams {
        match self.try_active() {
            Some(base) => base,
            None => panic!("base parameters requested before a network was selected"),
        }
    }

    pub fn try_active(&self) -> Option<&'static BaseParams> {
        self.current.map(BaseParams::for_network)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Network selection as given on the command line or in a config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkChoice {
    /// An explicit network token such as `main` or `regtest`
    pub network: Option<String>,
    pub testnet: bool,
    pub regtest: bool,
}

impl NetworkChoice {
    pub fn named(network: impl Into<String>) -> Self {
        Self { network: Some(network.into()), ..Default::default() }
    }
}

/// Resolves a selection to one network. Nothing selected means main; more
/// than one distinct network is a conflict.
pub fn network_from_choice(choice: &NetworkChoice) -> Result<NetworkId, ParamsError> {
    let named = choice.network.as_deref().map(str::parse::<NetworkId>).transpose()?;
    let flagged = match (choice.testnet, choice.regtest) {
        (true, true) => return Err(ParamsError::ConflictingNetworks("both --testnet and --regtest given".into())),
        (true, false) => Some(NetworkId::Testnet),
        (false, true) => Some(NetworkId::Regtest),
        (false, false) => None,
    };
    match (named, flagged) {
        (Some(a), Some(b)) if a != b => Err(ParamsError::ConflictingNetworks(format!("--network {a} contradicts the --{b} flag"))),
        (Some(a), _) => Ok(a),
        (None, Some(b)) => Ok(b),
        (None, None) => Ok(NetworkId::Main),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution() {
        assert_eq!(network_from_choice(&NetworkChoice::default()), Ok(NetworkId::Main));
        assert_eq!(network_from_choice(&NetworkChoice::named("regtest")), Ok(NetworkId::Regtest));
        let flag = NetworkChoice { testnet: true, ..Default::default() };
        assert_eq!(network_from_choice(&flag), Ok(NetworkId::Testnet));
        let agreeing = NetworkChoice { network: Some("test".into()), testnet: true, regtest: false };
        assert_eq!(network_from_choice(&agreeing), Ok(NetworkId::Testnet));
    }

    #[test]
    fn conflicts_and_unknown_tokens() {
        let both = NetworkChoice { testnet: true, regtest: true, ..Default::default() };
        assert!(matches!(network_from_choice(&both), Err(ParamsError::ConflictingNetworks(_))));
        let mixed = NetworkChoice { network: Some("main".into()), regtest: true, ..Default::default() };
        assert!(matches!(network_from_choice(&mixed), Err(ParamsError::ConflictingNetworks(_))));
        assert_eq!(
            network_from_choice(&NetworkChoice::named("devnet")),
            Err(ParamsError::UnknownNetwork("devnet".into()))
        );
    }

    #[test]
    fn registry_tracks_selection() {
        let mut reg = BaseParamsRegistry::default();
        assert!(reg.try_active().is_none());
        reg.select(NetworkId::Regtest);
        assert_eq!(reg.active().rpc_port, 31247);
        reg.reset();
        assert_eq!(reg.selected(), None);
    }

    #[test]
    #[should_panic(expected = "before a network was selected")]
    fn active_without_selection_panics() {
        BaseParamsRegistry::default().active();
    }
}
