use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::serialize::{write_var_bytes, Encodable};

/// The opcodes needed to build standard output scripts and coinbase inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
#[allow(non_camel_case_types)]
pub enum Opcode {
    OP_0 = 0x00,
    OP_PUSHDATA1 = 0x4c,
    OP_PUSHDATA2 = 0x4d,
    OP_PUSHDATA4 = 0x4e,
    OP_1NEGATE = 0x4f,
    OP_1 = 0x51,
    OP_16 = 0x60,
    OP_DUP = 0x76,
    OP_EQUAL = 0x87,
    OP_EQUALVERIFY = 0x88,
    OP_HASH160 = 0xa9,
    OP_CHECKSIG = 0xac,
}

/// A script as raw bytes, with a builder for pushes and opcodes
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script {
    #[serde(with = "mch_utils::serde_hex")]
    bytes: Vec<u8>,
}

/// Minimal little-endian sign-magnitude encoding of a script number
pub fn script_num_bytes(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    // Keep the top bit free for the sign.
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

impl Script {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn push_opcode(mut self, op: Opcode) -> Self {
        self.bytes.push(op as u8);
        self
    }

    /// Pushes raw data with the shortest length prefix
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < Opcode::OP_PUSHDATA1 as usize {
            self.bytes.push(len as u8);
        } else if len <= 0xff {
            self.bytes.push(Opcode::OP_PUSHDATA1 as u8);
            self.bytes.push(len as u8);
        } else if len <= 0xffff {
            self.bytes.push(Opcode::OP_PUSHDATA2 as u8);
            self.bytes.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.bytes.push(Opcode::OP_PUSHDATA4 as u8);
            self.bytes.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.bytes.extend_from_slice(data);
        self
    }

    /// Pushes an integer, using the small-integer opcodes for -1 and 0..=16
    pub fn push_int(self, value: i64) -> Self {
        match value {
            0 => self.push_opcode(Opcode::OP_0),
            -1 => self.push_opcode(Opcode::OP_1NEGATE),
            1..=16 => {
                let mut s = self;
                s.bytes.push(Opcode::OP_1 as u8 + (value as u8 - 1));
                s
            }
            _ => self.push_slice(&script_num_bytes(value)),
        }
    }

    /// Pushes an integer as a data push, even where a small-integer opcode exists
    pub fn push_num(self, value: i64) -> Self {
        self.push_slice(&script_num_bytes(value))
    }

    /// `<pubkey> OP_CHECKSIG`
    pub fn pay_to_pubkey(pubkey: &[u8]) -> Self {
        Script::new().push_slice(pubkey).push_opcode(Opcode::OP_CHECKSIG)
    }
}

impl Encodable for Script {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_var_bytes(writer, &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn script_numbers() {
        assert_eq!(script_num_bytes(0), Vec::<u8>::new());
        assert_eq!(script_num_bytes(4), vec![0x04]);
        assert_eq!(script_num_bytes(-1), vec![0x81]);
        assert_eq!(script_num_bytes(0x80), vec![0x80, 0x00]);
        assert_eq!(script_num_bytes(-0x80), vec![0x80, 0x80]);
        assert_eq!(script_num_bytes(486604799), hex!("ffff001d").to_vec());
    }

    #[test]
    fn coinbase_style_pushes() {
        let script = Script::new().push_int(486604799).push_num(4).push_slice(b"Mktcash");
        assert_eq!(script.as_bytes(), &hex!("04ffff001d0104074d6b7463617368")[..]);
    }

    #[test]
    fn small_integers_use_opcodes() {
        let script = Script::new().push_int(0).push_int(1).push_int(16).push_int(-1).push_int(17);
        assert_eq!(script.as_bytes(), &[0x00, 0x51, 0x60, 0x4f, 0x01, 0x11]);
    }

    #[test]
    fn long_pushes_use_pushdata() {
        let data = vec![0xaa; 0x4c];
        let script = Script::new().push_slice(&data);
        assert_eq!(&script.as_bytes()[..2], &[0x4c, 0x4c]);
        assert_eq!(script.len(), 0x4c + 2);
        let script = Script::new().push_slice(&vec![0u8; 0x100]);
        assert_eq!(&script.as_bytes()[..3], &[0x4d, 0x00, 0x01]);
    }
}
