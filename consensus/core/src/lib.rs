//! Chain parameters, checkpoints and spend denylists for the Mktcash network.
//!
//! The crate exposes one immutable [`config::params::ChainParams`] per
//! network, a registry that tracks which of them is active, per-network
//! checkpoint tables, and the [`invalid`] store of serials and outpoints that
//! must never be spent.

pub mod block;
pub mod config;
pub mod constants;
pub mod errors;
pub mod invalid;
pub mod network;
pub mod pow;
pub mod script;
pub mod serialize;
pub mod tx;

pub use mch_hashes::{Hash, ZERO_HASH};
pub use network::NetworkId;
