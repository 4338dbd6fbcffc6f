/// Number of base units in one MCH
pub const COIN: i64 = 100_000_000;

/// Service bit advertised by full nodes
pub const NODE_NETWORK: u64 = 1;

pub const ONE_DAY_SECS: i64 = 24 * 60 * 60;

pub const ONE_WEEK_SECS: i64 = 7 * ONE_DAY_SECS;

/// Relative cost of verifying a transaction's signatures versus accepting it
/// under a checkpoint. Used by the sync progress estimate.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// Transaction version used by the genesis coinbase
pub const GENESIS_TX_VERSION: i32 = 1;

/// Sequence number marking an input as final
pub const SEQUENCE_FINAL: u32 = u32::MAX;
