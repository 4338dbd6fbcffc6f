//! Hard-coded block hashes that the chain must pass through.
//!
//! A block at a checkpointed height is only acceptable with the recorded hash,
//! which caps how deep a reorganization can reach and lets initial sync skip
//! signature checks below the last checkpoint.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::{ONE_DAY_SECS, SIGCHECK_VERIFICATION_FACTOR};
use crate::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointData {
    checkpoints: BTreeMap<u32, Hash>,
    /// UNIX timestamp of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Total number of transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated number of transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

/// The part of the active chain tip that the progress estimate looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainTip {
    pub height: u32,
    /// Cumulative transaction count up to and including the tip
    pub chain_tx: u64,
    /// Timestamp of the tip block
    pub time: i64,
}

impl CheckpointData {
    pub fn new(entries: &[(u32, Hash)], last_checkpoint_time: i64, transactions_last_checkpoint: u64, transactions_per_day: f64) -> Self {
        Self {
            checkpoints: entries.iter().copied().collect(),
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        }
    }

    pub fn hash_at_height(&self, height: u32) -> Option<Hash> {
        self.checkpoints.get(&height).copied()
    }

    /// Height of the highest checkpoint, 0 for an empty table
    pub fn last_checkpoint_height(&self) -> u32 {
        self.checkpoints.keys().next_back().copied().unwrap_or(0)
    }

    /// A block at a checkpointed height must carry the recorded hash; other heights always pass.
    pub fn check_block(&self, height: u32, hash: &Hash) -> bool {
        match self.checkpoints.get(&height) {
            Some(expected) => {
                let ok = expected == hash;
                if !ok {
                    debug!(height, %hash, %expected, "block conflicts with checkpoint");
                }
                ok
            }
            None => true,
        }
    }

    /// Highest checkpoint whose block is already known to the caller
    pub fn last_checkpoint<F>(&self, is_known: F) -> Option<(u32, Hash)>
    where
        F: Fn(&Hash) -> bool,
    {
        self.checkpoints.iter().rev().find(|(_, hash)| is_known(hash)).map(|(h, hash)| (*h, *hash))
    }

    /// Checkpoints in ascending height order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, Hash)> + '_ {
        self.checkpoints.iter().map(|(h, hash)| (*h, *hash))
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Rough fraction of the initial sync that is done, in `[0, 1]`.
    ///
    /// Work is counted per transaction: one unit up to the last checkpoint and
    /// the sigcheck factor after it, where signatures are verified. Transactions
    /// not yet seen are extrapolated from `transactions_per_day`.
    pub fn estimated_completion_fraction(&self, tip: Option<&ChainTip>, now: i64, sigchecks: bool) -> f64 {
        let Some(tip) = tip else {
            return 0.0;
        };
        let factor = if sigchecks { SIGCHECK_VERIFICATION_FACTOR } else { 1.0 };
        let checkpoint_tx = self.transactions_last_checkpoint as f64;
        let chain_tx = tip.chain_tx as f64;

        let (work_before, work_after) = if tip.chain_tx <= self.transactions_last_checkpoint {
            let cheap_after = checkpoint_tx - chain_tx;
            let expensive_after = (now - self.last_checkpoint_time) as f64 / ONE_DAY_SECS as f64 * self.transactions_per_day;
            (chain_tx, cheap_after + expensive_after * factor)
        } else {
            let expensive_before = chain_tx - checkpoint_tx;
            let expensive_after = (now - tip.time) as f64 / ONE_DAY_SECS as f64 * self.transactions_per_day;
            (checkpoint_tx + expensive_before * factor, expensive_after * factor)
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }
}

/// Checkpoint lookups that can be switched off as a whole.
///
/// With checkpoints disabled every block passes, nothing counts as a known
/// checkpoint and the block-count estimate is zero.
#[derive(Debug, Clone, Copy)]
pub struct CheckpointVerifier<'a> {
    data: &'a CheckpointData,
    enabled: bool,
}

impl<'a> CheckpointVerifier<'a> {
    pub fn new(data: &'a CheckpointData, enabled: bool) -> Self {
        Self { data, enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn data(&self) -> &'a CheckpointData {
        self.data
    }

    pub fn check_block(&self, height: u32, hash: &Hash) -> bool {
        !self.enabled || self.data.check_block(height, hash)
    }

    pub fn total_blocks_estimate(&self) -> u32 {
        if self.enabled {
            self.data.last_checkpoint_height()
        } else {
            0
        }
    }

    pub fn last_checkpoint<F>(&self, is_known: F) -> Option<(u32, Hash)>
    where
        F: Fn(&Hash) -> bool,
    {
        if self.enabled {
            self.data.last_checkpoint(is_known)
        } else {
            None
        }
    }

    pub fn estimated_completion_fraction(&self, tip: Option<&ChainTip>, now: i64, sigchecks: bool) -> f64 {
        self.data.estimated_completion_fraction(tip, now, sigchecks)
    }
}

const MAIN_ENTRIES: &[(u32, Hash)] = &[
    (0, Hash::from_hex_literal("00000edb03823e6b6fb39e27b3a6dfb9a80111fb9fb02980cc0096ceb588a8e7")),
    (3692, Hash::from_hex_literal("863cb3ba5920f706fdcba4c3665c4acfea212ad7df354146814eedb07615000f")),
    (78717, Hash::from_hex_literal("9ce0e66a0df6ff7af785d0369201a5bdf6462bcf1515ee996a853fbcf095ab58")),
    (125085, Hash::from_hex_literal("0aa23deb111bfeb89097d637e681ce8fcad0336eb1c69d21c4eb9d1ab3527c41")),
    (153742, Hash::from_hex_literal("ff2ba3bd2a6cb83696e4ee08f930367ccef5266842daa3d03ab8891114064c41")),
    (171453, Hash::from_hex_literal("6447e52208f4a04c22b8a5c6d046eb5353c91f6c477d345cd9008a81d7e5a63f")),
    (182399, Hash::from_hex_literal("cb4281425144e77a46810dd1dd10f1bd404bcb995f558d63ab95425608d40424")),
    (189164, Hash::from_hex_literal("5078c639f5804fa8a47be5e8e7046ebb9c44370705464a897dcac4ee6a9457e2")),
    (193345, Hash::from_hex_literal("5d67cd2d6da00a22ea5dd822c8be13128499cb81e4bfad97f1c3366f894c9332")),
    (195929, Hash::from_hex_literal("01f594d88fd7b519b3c38025c3d8ff4cc032afa956486ad32e7acc9ef62db21b")),
    (197526, Hash::from_hex_literal("f47d52708903752b738f7a6df8aacdc1fb9d34656eb07b5ee39547777e31dca2")),
    (198513, Hash::from_hex_literal("c41c825545242e303f3c809b863388f727e631c505c32947555aa604ddf8d5ae")),
    (199123, Hash::from_hex_literal("1e65c232f3b450e8af34a2d0691c17dabc5131d52971b144f2a1b3d9e0f8a939")),
    (199500, Hash::from_hex_literal("237b9fd8fb7bb785ebf7a9f022310e302d8bbc81db4d6756b2432d5729856069")),
    (199733, Hash::from_hex_literal("91690b9c6b7801c5c0b0a010ef661384906196e0797ae42d0087843af9d78e78")),
    (199877, Hash::from_hex_literal("18f501424d66f0b0607815aa06b67dd5be429935dab5b669a350c48bfa00d1f6")),
    (199966, Hash::from_hex_literal("648d1b24f4a13185e2a5a9edb189739152f3eeb97bb2d1de1be782e0d120235d")),
    (200021, Hash::from_hex_literal("db4089e461dc18437d5528e4a3ea500e151d33cf5b077eb31f5b36df2d349f9f")),
    (200055, Hash::from_hex_literal("3ce53592ef8aad4ea079d380e9e069b20f20630a8091099fd3a7737cce7a042f")),
    (200076, Hash::from_hex_literal("5d6d65614f629bdf8041d39e12fd8f9330efc1332754ece7cdc5490794f29d47")),
    (200089, Hash::from_hex_literal("80fced71ebd01025fc44693dd59c4b96773291b60a513fc5a9d1cd1cfd57a7f5")),
    (200097, Hash::from_hex_literal("6037c7fbfc50d0801cb519d1f86cb56d5c3ba366a4837a4055da727944d68d01")),
];

pub static MAIN_CHECKPOINTS: Lazy<CheckpointData> = Lazy::new(|| CheckpointData::new(MAIN_ENTRIES, 1610161184, 0, 2000.0));

pub static TESTNET_CHECKPOINTS: Lazy<CheckpointData> =
    Lazy::new(|| CheckpointData::new(&[(0, Hash::from_hex_literal("0x001"))], 1570470324, 0, 250.0));

pub static REGTEST_CHECKPOINTS: Lazy<CheckpointData> =
    Lazy::new(|| CheckpointData::new(&[(0, Hash::from_hex_literal("0x001"))], 1570470444, 0, 100.0));
