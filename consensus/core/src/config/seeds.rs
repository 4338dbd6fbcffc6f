//! Fixed seed tables and their conversion into candidate peer addresses.

use rand::Rng;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use thiserror::Error;
use tracing::debug;

use crate::constants::{NODE_NETWORK, ONE_WEEK_SECS};

/// One fixed seed: an IPv6 (or IPv4-mapped) address and a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedParseError {
    #[error("seed '{0}' has no usable address")]
    InvalidAddress(String),

    #[error("seed '{0}' has an invalid port")]
    InvalidPort(String),
}

impl SeedSpec6 {
    pub const fn new(addr: [u8; 16], port: u16) -> Self {
        Self { addr, port }
    }

    pub fn from_socket_addr(addr: SocketAddr) -> Self {
        let ip = match addr.ip() {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };
        Self { addr: ip.octets(), port: addr.port() }
    }

    pub fn ip(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.addr)
    }

    /// Parses `host[:port]` where host is a dotted IPv4, a bracketed IPv6 or
    /// a `0x`-prefixed little-endian IPv4 word. `default_port` applies when no
    /// port is given.
    pub fn parse(s: &str, default_port: u16) -> Result<Self, SeedParseError> {
        let s = s.trim();
        let bad_addr = || SeedParseError::InvalidAddress(s.to_string());
        let bad_port = || SeedParseError::InvalidPort(s.to_string());

        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(bad_addr)?;
            let port = match tail.strip_prefix(':') {
                Some(p) => p.parse::<u16>().map_err(|_| bad_port())?,
                None if tail.is_empty() => default_port,
                None => return Err(bad_addr()),
            };
            (host, port)
        } else if s.matches(':').count() == 1 {
            let (host, p) = s.split_once(':').ok_or_else(bad_addr)?;
            (host, p.parse::<u16>().map_err(|_| bad_port())?)
        } else {
            (s, default_port)
        };

        let ip = if let Some(word) = host.strip_prefix("0x") {
            let word = u32::from_str_radix(word, 16).map_err(|_| bad_addr())?;
            Ipv4Addr::from(word.to_le_bytes()).to_ipv6_mapped()
        } else {
            match host.parse::<IpAddr>().map_err(|_| bad_addr())? {
                IpAddr::V4(v4) => v4.to_ipv6_mapped(),
                IpAddr::V6(v6) => v6,
            }
        };
        Ok(Self { addr: ip.octets(), port })
    }
}

/// A candidate peer handed to address management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetAddress {
    pub ip: Ipv6Addr,
    pub port: u16,
    pub services: u64,
    /// Unix time the peer was last seen
    pub last_seen: i64,
}

/// Turns a fixed seed table into addresses whose `last_seen` falls in
/// `(now - 2 weeks, now - 1 week]`.
///
/// Seeds only need to bootstrap a first connection, so they are aged enough
/// that fresher gossip replaces them quickly.
pub fn convert_fixed_seeds<R: Rng + ?Sized>(data: &[SeedSpec6], now: i64, rng: &mut R) -> Vec<NetAddress> {
    let seeds: Vec<NetAddress> = data
        .iter()
        .map(|seed| NetAddress {
            ip: seed.ip(),
            port: seed.port,
            services: NODE_NETWORK,
            last_seen: now - rng.gen_range(0..ONE_WEEK_SECS) - ONE_WEEK_SECS,
        })
        .collect();
    debug!(count = seeds.len(), "converted fixed seeds");
    seeds
}

/// [`convert_fixed_seeds`] against the wall clock and the thread RNG
pub fn convert_fixed_seeds_now(data: &[SeedSpec6]) -> Vec<NetAddress> {
    convert_fixed_seeds(data, mch_utils::time::unix_now(), &mut rand::thread_rng())
}

// Generated with `generate_seeds`; no public nodes are listed yet.
pub const MAIN_FIXED_SEEDS: &[SeedSpec6] = &[];

pub const TESTNET_FIXED_SEEDS: &[SeedSpec6] = &[];
