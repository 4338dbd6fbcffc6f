//!
//! # Invalid entries
//!
//! Serial numbers and outpoints that were invalidated after the fact and must
//! never be accepted as spends again. A store is filled from JSON once and is
//! only queried afterwards.
//!

use once_cell::sync::OnceCell;
use primitive_types::U512;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::errors::{DenylistError, DenylistResult, ParseSerialError};
use crate::tx::OutPoint;
use crate::Hash;

const EMBEDDED_SERIALS: &str = include_str!("../data/invalid_serials.json");
const EMBEDDED_OUTPOINTS: &str = include_str!("../data/invalid_outpoints.json");

/// A coin serial number, up to 512 bits wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SerialNumber(pub U512);

impl SerialNumber {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for SerialNumber {
    fn from(value: u64) -> Self {
        Self(U512::from(value))
    }
}

impl FromStr for SerialNumber {
    type Err = ParseSerialError;

    /// Hex with an optional `0x` prefix, in either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if digits.is_empty() {
            return Err(ParseSerialError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSerialError::NotHex);
        }
        let significant = digits.trim_start_matches('0');
        if significant.len() > 128 {
            return Err(ParseSerialError::TooWide);
        }
        if significant.is_empty() {
            return Ok(Self(U512::zero()));
        }
        U512::from_str_radix(significant, 16).map(Self).map_err(|_| ParseSerialError::NotHex)
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SerialEntry {
    Hex(String),
    Object { s: String },
}

impl SerialEntry {
    fn text(&self) -> &str {
        match self {
            SerialEntry::Hex(s) | SerialEntry::Object { s } => s,
        }
    }
}

#[derive(Deserialize)]
struct OutPointEntry {
    txid: String,
    #[serde(alias = "n")]
    index: u32,
}

/// Denylisted serials and outpoints
#[derive(Debug, Default, Clone)]
pub struct InvalidEntryStore {
    serials: HashSet<SerialNumber>,
    outpoints: HashSet<OutPoint>,
}

impl InvalidEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the serials listed in `json`, an array of hex strings (or
    /// `{"s": "<hex>"}` objects). Returns the number of entries read. On error
    /// nothing is added.
    pub fn load_serials(&mut self, json: &str) -> DenylistResult<usize> {
        let entries: Vec<SerialEntry> = serde_json::from_str(json)?;
        let mut parsed = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let value = entry.text();
            let serial = value
                .parse::<SerialNumber>()
                .map_err(|source| DenylistError::InvalidSerial { index, value: value.to_string(), source })?;
            if serial.is_zero() {
                return Err(DenylistError::ZeroSerial { index });
            }
            parsed.push(serial);
        }
        if parsed.is_empty() {
            warn!("invalid serial list is empty");
        }
        let count = parsed.len();
        self.serials.extend(parsed);
        Ok(count)
    }

    /// Adds the outpoints listed in `json`, an array of
    /// `{"txid": "<hex>", "index": <n>}` objects (`"n"` is accepted for the
    /// index). Returns the number of entries read. On error nothing is added.
    pub fn load_outpoints(&mut self, json: &str) -> DenylistResult<usize> {
        let entries: Vec<OutPointEntry> = serde_json::from_str(json)?;
        let mut parsed = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let txid = Hash::from_str(&entry.txid)
                .map_err(|_| DenylistError::InvalidTxid { index, value: entry.txid.clone() })?;
            if txid.is_zero() {
                return Err(DenylistError::ZeroTxid { index });
            }
            parsed.push(OutPoint::new(txid, entry.index));
        }
        if parsed.is_empty() {
            warn!("invalid outpoint list is empty");
        }
        let count = parsed.len();
        self.outpoints.extend(parsed);
        Ok(count)
    }

    /// Loads the lists compiled into the binary
    pub fn load_embedded(&mut self) -> DenylistResult<(usize, usize)> {
        let serials = self.load_serials(EMBEDDED_SERIALS)?;
        let outpoints = self.load_outpoints(EMBEDDED_OUTPOINTS)?;
        Ok((serials, outpoints))
    }

    pub fn contains_serial(&self, serial: &SerialNumber) -> bool {
        self.serials.contains(serial)
    }

    pub fn contains_outpoint(&self, outpoint: &OutPoint) -> bool {
        self.outpoints.contains(outpoint)
    }

    pub fn serial_count(&self) -> usize {
        self.serials.len()
    }

    pub fn outpoint_count(&self) -> usize {
        self.outpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty() && self.outpoints.is_empty()
    }
}

static GLOBAL: OnceCell<InvalidEntryStore> = OnceCell::new();

/// Freezes `store` as the process-wide denylist. Only the first call succeeds.
pub fn install(store: InvalidEntryStore) -> DenylistResult<()> {
    let (serials, outpoints) = (store.serial_count(), store.outpoint_count());
    GLOBAL.set(store).map_err(|_| DenylistError::AlreadyInstalled)?;
    info!(serials, outpoints, "installed spend denylist");
    Ok(())
}

pub fn global() -> Option<&'static InvalidEntryStore> {
    GLOBAL.get()
}

/// Whether the process-wide denylist holds `serial`; false until one is installed
pub fn contains_serial(serial: &SerialNumber) -> bool {
    GLOBAL.get().is_some_and(|store| store.contains_serial(serial))
}

/// Whether the process-wide denylist holds `outpoint`; false until one is installed
pub fn contains_outpoint(outpoint: &OutPoint) -> bool {
    GLOBAL.get().is_some_and(|store| store.contains_outpoint(outpoint))
}
