use crate::errors::ParamsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the built-in parameter sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkId {
    /// Production network
    #[serde(rename = "main")]
    Main,
    /// Public test network
    #[serde(rename = "test")]
    Testnet,
    /// Local regression-test network; blocks are mined on demand
    #[serde(rename = "regtest")]
    Regtest,
    /// In-process network for unit tests; the only one with mutable parameters
    #[serde(rename = "unittest")]
    UnitTest,
}

impl NetworkId {
    /// The canonical network name (`strNetworkID` on the wire and in data paths)
    pub const fn name(self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Testnet => "test",
            NetworkId::Regtest => "regtest",
            NetworkId::UnitTest => "unittest",
        }
    }

    /// Returns an iterator over all NetworkId variants
    pub fn iter() -> impl Iterator<Item = NetworkId> {
        [NetworkId::Main, NetworkId::Testnet, NetworkId::Regtest, NetworkId::UnitTest].into_iter()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkId {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Testnet),
            "regtest" => Ok(NetworkId::Regtest),
            "unittest" => Ok(NetworkId::UnitTest),
            other => Err(ParamsError::UnknownNetwork(other.to_string())),
        }
    }
}
