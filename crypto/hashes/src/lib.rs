pub mod hasher;
pub mod merkle;
pub mod quark;

pub use hasher::{double_sha256, sha256, HashWriter};
pub use merkle::merkle_root;
pub use quark::quark_hash;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

/// A 256-bit hash stored in little-endian byte order.
///
/// The raw bytes are exactly what a hasher produces and what goes on the
/// wire. The textual form is the reversed byte string, which is how block
/// hashes and transaction ids are shown to users.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; HASH_SIZE]);

pub const ZERO_HASH: Hash = Hash([0u8; HASH_SIZE]);

impl Hash {
    /// Create a hash from raw (little-endian) bytes
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns raw bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    pub const fn zeroed() -> Self {
        ZERO_HASH
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Tries to create a Hash from a slice of raw bytes
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, std::array::TryFromSliceError> {
        let array: [u8; HASH_SIZE] = slice.try_into()?;
        Ok(Self(array))
    }

    /// Builds a hash from a small integer, e.g. `Hash::from_u64(1)` prints as `00..01`.
    pub const fn from_u64(word: u64) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        let le = word.to_le_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[i] = le[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Parses a display-order hex literal at compile time.
    ///
    /// Accepts an optional `0x` prefix and fewer than 64 digits; missing
    /// high-order digits are zero, so `"0x001"` is the hash with value 1.
    /// Panics on malformed input, which in a `const` context is a build error.
    pub const fn from_hex_literal(s: &str) -> Self {
        match parse_display_hex(s.as_bytes()) {
            Ok(hash) => hash,
            Err(ParseHashError::InvalidChar) => panic!("hash literal contains a non-hex character"),
            Err(ParseHashError::TooLong) => panic!("hash literal is longer than 64 hex digits"),
            Err(ParseHashError::Empty) => panic!("hash literal is empty"),
        }
    }
}

/// Error returned when a display-order hex string cannot be parsed into a [`Hash`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseHashError {
    Empty,
    TooLong,
    InvalidChar,
}

impl fmt::Display for ParseHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseHashError::Empty => write!(f, "hash string has no hex digits"),
            ParseHashError::TooLong => write!(f, "hash string exceeds {} hex digits", HASH_SIZE * 2),
            ParseHashError::InvalidChar => write!(f, "hash string contains a non-hex character"),
        }
    }
}

impl std::error::Error for ParseHashError {}

const fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

const fn parse_display_hex(s: &[u8]) -> Result<Hash, ParseHashError> {
    let mut start = 0;
    if s.len() >= 2 && s[0] == b'0' && (s[1] == b'x' || s[1] == b'X') {
        start = 2;
    }
    let digits = s.len() - start;
    if digits == 0 {
        return Err(ParseHashError::Empty);
    }
    if digits > HASH_SIZE * 2 {
        return Err(ParseHashError::TooLong);
    }

    // The last digit is the least significant nibble of byte 0.
    let mut bytes = [0u8; HASH_SIZE];
    let mut k = 0;
    while k < digits {
        let nibble = match hex_nibble(s[s.len() - 1 - k]) {
            Some(n) => n,
            None => return Err(ParseHashError::InvalidChar),
        };
        let byte = k / 2;
        if k % 2 == 0 {
            bytes[byte] |= nibble;
        } else {
            bytes[byte] |= nibble << 4;
        }
        k += 1;
    }
    Ok(Hash(bytes))
}

impl FromStr for Hash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_display_hex(s.trim().as_bytes())
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(h: Hash) -> Self {
        h.0
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(slice)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Hash {
    type Target = [u8; HASH_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&faster_hex::hex_string(&reversed))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reverses_raw_bytes() {
        let mut raw = [0u8; 32];
        raw[0] = 0xe7;
        raw[31] = 0x00;
        raw[30] = 0x0e;
        let h = Hash::from_bytes(raw);
        let s = h.to_string();
        assert!(s.starts_with("000e"));
        assert!(s.ends_with("e7"));
    }

    #[test]
    fn short_literals_are_zero_extended() {
        let one = Hash::from_hex_literal("0x001");
        assert_eq!(one, Hash::from_u64(1));
        assert_eq!(one.to_string(), format!("{:0>64}", "1"));
        assert!(!one.is_zero());
        assert!(Hash::from_hex_literal("0").is_zero());
    }

    #[test]
    fn from_str_matches_literal_parser() {
        let text = "00000edb03823e6b6fb39e27b3a6dfb9a80111fb9fb02980cc0096ceb588a8e7";
        let parsed: Hash = text.parse().unwrap();
        assert_eq!(parsed, Hash::from_hex_literal(text));
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parsed.as_bytes()[0], 0xe7);
        assert_eq!(" 0xA8E7 ".parse::<Hash>().unwrap(), Hash::from_u64(0xa8e7));
    }

    #[test]
    fn from_str_rejects_bad_input() {
        assert_eq!("".parse::<Hash>(), Err(ParseHashError::Empty));
        assert_eq!("0x".parse::<Hash>(), Err(ParseHashError::Empty));
        assert_eq!("xyz".parse::<Hash>(), Err(ParseHashError::InvalidChar));
        assert_eq!("1".repeat(65).parse::<Hash>(), Err(ParseHashError::TooLong));
    }

    #[test]
    fn serde_uses_display_form() {
        let h = Hash::from_u64(0xabcd);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{:0>64}\"", "abcd"));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
