use crate::{network::NetworkId, Hash};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unknown network '{0}' (expected main, test, regtest or unittest)")]
    UnknownNetwork(String),

    #[error("conflicting network selection: {0}")]
    ConflictingNetworks(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenesisError {
    #[error("{network} genesis hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch { network: NetworkId, expected: Hash, computed: Hash },

    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch { network: NetworkId, expected: Hash, computed: Hash },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSerialError {
    #[error("empty value")]
    Empty,

    #[error("not a hexadecimal number")]
    NotHex,

    #[error("wider than 512 bits")]
    TooWide,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseOutPointError {
    #[error("invalid outpoint '{0}': expected <txid>:<index>")]
    MissingIndex(String),

    #[error("invalid outpoint txid '{0}'")]
    InvalidTxid(String),

    #[error("invalid outpoint index '{0}'")]
    InvalidIndex(String),
}

#[derive(Error, Debug)]
pub enum DenylistError {
    #[error("malformed denylist JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index}: invalid serial '{value}': {source}")]
    InvalidSerial { index: usize, value: String, source: ParseSerialError },

    #[error("entry {index}: serial number must be non-zero")]
    ZeroSerial { index: usize },

    #[error("entry {index}: invalid txid '{value}'")]
    InvalidTxid { index: usize, value: String },

    #[error("entry {index}: txid must be non-zero")]
    ZeroTxid { index: usize },

    #[error("the process-wide denylist is already installed")]
    AlreadyInstalled,
}

pub type DenylistResult<T> = std::result::Result<T, DenylistError>;
