use hex_literal::hex;

use crate::block::{Block, Header};
use crate::constants::{COIN, GENESIS_TX_VERSION};
use crate::errors::GenesisError;
use crate::network::NetworkId;
use crate::script::Script;
use crate::tx::{Transaction, TransactionInput, TransactionOutput};
use crate::{Hash, ZERO_HASH};

/// Compact `bits` that every genesis coinbase script commits to
const COINBASE_BITS_PUSH: i64 = 486604799;

/// Uncompressed key paid by the genesis coinbase
pub const GENESIS_OUTPUT_PUBKEY: [u8; 65] = hex!(
    "0466f8e042492f7e1be50f8fa84bc2d39d0cea242704d219bc6d9cd7d1e20c4abc"
    "105e45b0510396978c22a7e9f35d21d6fb10005fc27febc2851ba4f051411865"
);

/// The constants from which a network's genesis block is rebuilt
#[derive(Clone, Debug)]
pub struct GenesisParams {
    pub coinbase_message: &'static str,
    pub reward: i64,
    pub output_pubkey: &'static [u8],
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    /// Checked after rebuilding, when set
    pub expected_hash: Option<Hash>,
    /// Checked after rebuilding, when set
    pub expected_merkle_root: Option<Hash>,
}

pub const MAIN_GENESIS: GenesisParams = GenesisParams {
    coinbase_message: "Mktcash",
    reward: 250 * COIN,
    output_pubkey: &GENESIS_OUTPUT_PUBKEY,
    version: 1,
    time: 1610161184,
    bits: 0x1e0ffff0,
    nonce: 1736228,
    expected_hash: Some(Hash::from_hex_literal("00000edb03823e6b6fb39e27b3a6dfb9a80111fb9fb02980cc0096ceb588a8e7")),
    expected_merkle_root: Some(Hash::from_hex_literal(
        "fa8f6966680f28a067f037116d82b62998acc7a392e0a2bf32b57b33107ffb33",
    )),
};

/// Test network genesis; its hash is recomputed and not pinned
pub const TESTNET_GENESIS: GenesisParams =
    GenesisParams { time: 1570470324, nonce: 1248594, expected_hash: None, ..MAIN_GENESIS };

pub const REGTEST_GENESIS: GenesisParams =
    GenesisParams { time: 1570470444, bits: 0x207fffff, nonce: 1, expected_hash: None, ..MAIN_GENESIS };

impl GenesisParams {
    /// Unit test networks reuse the main genesis
    pub fn for_network(network: NetworkId) -> &'static GenesisParams {
        static MAIN: GenesisParams = MAIN_GENESIS;
        static TESTNET: GenesisParams = TESTNET_GENESIS;
        static REGTEST: GenesisParams = REGTEST_GENESIS;
        match network {
            NetworkId::Main | NetworkId::UnitTest => &MAIN,
            NetworkId::Testnet => &TESTNET,
            NetworkId::Regtest => &REGTEST,
        }
    }

    pub fn coinbase_transaction(&self) -> Transaction {
        let signature_script =
            Script::new().push_int(COINBASE_BITS_PUSH).push_num(4).push_slice(self.coinbase_message.as_bytes());
        let output = TransactionOutput::new(self.reward, Script::pay_to_pubkey(self.output_pubkey));
        Transaction::new(GENESIS_TX_VERSION, vec![TransactionInput::coinbase(signature_script)], vec![output], 0)
    }

    /// Rebuilds the genesis block without checking it against the expected values
    pub fn build(&self) -> Block {
        let coinbase = self.coinbase_transaction();
        let header = Header {
            version: self.version,
            prev_block_hash: ZERO_HASH,
            hash_merkle_root: mch_hashes::merkle_root(&[coinbase.id()]),
            time: self.time,
            bits: self.bits,
            nonce: self.nonce,
        };
        Block::new(header, vec![coinbase])
    }

    /// Rebuilds the genesis block and checks the merkle root and hash when expectations are set
    pub fn build_checked(&self, network: NetworkId) -> Result<Block, GenesisError> {
        let block = self.build();
        if let Some(expected) = self.expected_merkle_root {
            let computed = block.header.hash_merkle_root;
            if computed != expected {
                return Err(GenesisError::MerkleRootMismatch { network, expected, computed });
            }
        }
        if let Some(expected) = self.expected_hash {
            let computed = block.hash();
            if computed != expected {
                return Err(GenesisError::HashMismatch { network, expected, computed });
            }
        }
        Ok(block)
    }
}
