//!
//! # Transaction
//!
//! The legacy transaction layout: version, inputs, outputs and lock time,
//! identified by the double SHA-256 of its encoding.
//!

use mch_hashes::HashWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::constants::SEQUENCE_FINAL;
use crate::errors::ParseOutPointError;
use crate::script::Script;
use crate::serialize::Encodable;
use crate::{Hash, ZERO_HASH};

/// A 32-byte transaction identifier.
pub type TransactionId = Hash;

/// Reference to one output of a previous transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: TransactionId,
    pub index: u32,
}

impl OutPoint {
    pub const fn new(txid: TransactionId, index: u32) -> Self {
        Self { txid, index }
    }

    /// The outpoint spent by coinbase inputs
    pub const fn null() -> Self {
        Self { txid: ZERO_HASH, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u32::MAX
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

impl FromStr for OutPoint {
    type Err = ParseOutPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (txid, index) =
            s.trim().rsplit_once(':').ok_or_else(|| ParseOutPointError::MissingIndex(s.to_string()))?;
        let txid = Hash::from_str(txid).map_err(|_| ParseOutPointError::InvalidTxid(txid.to_string()))?;
        let index = index.parse::<u32>().map_err(|_| ParseOutPointError::InvalidIndex(index.to_string()))?;
        Ok(OutPoint { txid, index })
    }
}

impl Encodable for OutPoint {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.txid.as_bytes())?;
        writer.write_all(&self.index.to_le_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: OutPoint,
    pub signature_script: Script,
    pub sequence: u32,
}

impl TransactionInput {
    /// A coinbase input carrying `signature_script`
    pub fn coinbase(signature_script: Script) -> Self {
        Self { previous_outpoint: OutPoint::null(), signature_script, sequence: SEQUENCE_FINAL }
    }
}

impl Encodable for TransactionInput {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.previous_outpoint.encode(writer)?;
        self.signature_script.encode(writer)?;
        writer.write_all(&self.sequence.to_le_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: i64,
    pub script_public_key: Script,
}

impl TransactionOutput {
    pub fn new(value: i64, script_public_key: Script) -> Self {
        Self { value, script_public_key }
    }
}

impl Encodable for TransactionOutput {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.value.to_le_bytes())?;
        self.script_public_key.encode(writer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }

    /// Double SHA-256 of the encoded transaction
    pub fn id(&self) -> TransactionId {
        let mut writer = HashWriter::new();
        // Writes into a hasher cannot fail.
        let _ = self.encode(&mut writer);
        writer.finalize()
    }
}

impl Encodable for Transaction {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.version.to_le_bytes())?;
        self.inputs.encode(writer)?;
        self.outputs.encode(writer)?;
        writer.write_all(&self.lock_time.to_le_bytes())
    }
}
