use mch_hashes::{merkle_root, quark_hash};
use std::io::{self, Write};

use crate::serialize::Encodable;
use crate::tx::Transaction;
use crate::Hash;

/// Size of the proof-of-work header (versions 1 through 3)
pub const HEADER_SIZE: usize = 80;

/// The 80-byte block header hashed by Quark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: i32,
    pub prev_block_hash: Hash,
    pub hash_merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.hash_merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    /// Block hash: Quark over the serialized header
    pub fn hash(&self) -> Hash {
        quark_hash(&self.serialize())
    }
}

impl Encodable for Header {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.serialize())
    }
}

/// Complete block structure including header and transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Merkle root over the ids of the block's transactions
    pub fn compute_merkle_root(&self) -> Hash {
        let ids: Vec<Hash> = self.transactions.iter().map(Transaction::id).collect();
        merkle_root(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZERO_HASH;

    #[test]
    fn header_layout() {
        let header = Header {
            version: 1,
            prev_block_hash: ZERO_HASH,
            hash_merkle_root: Hash::from_u64(0x0102),
            time: 0x11223344,
            bits: 0x1e0ffff0,
            nonce: 7,
        };
        let bytes = header.serialize();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[36..38], &[0x02, 0x01]);
        assert_eq!(&bytes[68..72], &[0x44, 0x33, 0x22, 0x11]);
        assert_eq!(&bytes[72..76], &[0xf0, 0xff, 0x0f, 0x1e]);
        assert_eq!(&bytes[76..80], &[7, 0, 0, 0]);
        assert_eq!(header.to_bytes(), bytes.to_vec());
    }

    #[test]
    fn nonce_changes_hash() {
        let mut header = Header {
            version: 1,
            prev_block_hash: ZERO_HASH,
            hash_merkle_root: ZERO_HASH,
            time: 0,
            bits: 0x207fffff,
            nonce: 0,
        };
        let first = header.hash();
        header.nonce = 1;
        assert_ne!(first, header.hash());
    }
}
