use hex_literal::hex;
use primitive_types::U256;
use serde::Serialize;

use super::checkpoints::{CheckpointData, CheckpointVerifier, MAIN_CHECKPOINTS, REGTEST_CHECKPOINTS, TESTNET_CHECKPOINTS};
use super::genesis::GenesisParams;
use super::seeds::{convert_fixed_seeds_now, NetAddress, MAIN_FIXED_SEEDS, TESTNET_FIXED_SEEDS};
use crate::block::Block;
use crate::constants::COIN;
use crate::network::NetworkId;
use crate::Hash;

/// A DNS seed: a display name and the host queried for peer addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str) -> Self {
        Self { name: name.to_string(), host: host.to_string() }
    }
}

/// The kinds of base58 payloads that carry a network prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    ExtCoinType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub pubkey_address: Vec<u8>,
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub script_address: Vec<u8>,
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub secret_key: Vec<u8>,
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub ext_public_key: Vec<u8>,
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub ext_secret_key: Vec<u8>,
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub ext_coin_type: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
            Base58Type::ExtCoinType => &self.ext_coin_type,
        }
    }
}

/// Consensus and policy parameters of one network.
///
/// Each network starts from another network's values and overrides what
/// differs: test from main, regtest from test, unittest from main.
#[derive(Debug, Clone, Serialize)]
pub struct ChainParams {
    pub network_id: NetworkId,
    pub network_name: &'static str,

    // Protocol framing
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub message_start: [u8; 4],
    #[serde(serialize_with = "mch_utils::serde_hex::serialize")]
    pub alert_pubkey: Vec<u8>,
    pub default_port: u16,

    // Consensus
    pub pow_limit: U256,
    pub max_reorganization_depth: i32,
    pub subsidy_halving_interval: i32,
    pub miner_threads: i32,
    /// Retarget window in seconds
    pub target_timespan: i64,
    /// Target block spacing in seconds
    pub target_spacing: i64,
    pub coinbase_maturity: i32,
    pub masternode_count_drift: i32,
    pub max_money_out: i64,

    // Activation heights and times
    pub last_pow_block: i32,
    pub modifier_update_block: i32,
    pub block_enforce_serial_range: i32,
    pub block_recalculate_accumulators: i32,
    pub enforce_new_spork_key: i64,
    pub reject_old_spork_key: i64,

    pub base58_prefixes: Base58Prefixes,

    #[serde(skip)]
    pub genesis: Block,
    pub genesis_hash: Hash,

    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<NetAddress>,

    // Operational flags
    pub mining_requires_peers: bool,
    pub allow_min_difficulty_blocks: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
    pub headers_first_syncing_active: bool,

    // Masternodes, sporks and the obfuscation pool
    pub pool_max_transactions: i32,
    pub spork_key: String,
    pub spork_key_old: String,
    pub obfuscation_pool_dummy_address: String,
    pub start_masternode_payments: i64,
    pub budget_fee_confirmations: i64,

    #[serde(skip)]
    pub checkpoints: &'static CheckpointData,
}

/// Rebuilds a network's genesis block; a mismatch against the pinned values is fatal.
fn checked_genesis(network: NetworkId) -> Block {
    GenesisParams::for_network(network).build_checked(network).unwrap_or_else(|err| panic!("{err}"))
}

impl ChainParams {
    pub fn mainnet() -> Self {
        let genesis = checked_genesis(NetworkId::Main);
        let genesis_hash = genesis.hash();
        Self {
            network_id: NetworkId::Main,
            network_name: NetworkId::Main.name(),
            message_start: [0x2d, 0x22, 0x21, 0x2a],
            alert_pubkey: hex!(
                "043eb21c3fba131564544f746a9d0bd7003e63a0fee8c900bf1c63b3ac00f05134"
                "fc67c765a8f2e7ef691b645cd8fb5034eb3ca01c7b0541cd3aca8f6783a68ec5"
            )
            .to_vec(),
            default_port: 17223,
            pow_limit: U256::MAX >> 20,
            max_reorganization_depth: 100,
            subsidy_halving_interval: 0,
            miner_threads: 0,
            target_timespan: 60,
            target_spacing: 4 * 60,
            coinbase_maturity: 60,
            masternode_count_drift: 20,
            max_money_out: 21_000_000 * COIN,
            last_pow_block: 1000,
            modifier_update_block: 100,
            block_enforce_serial_range: 0,
            block_recalculate_accumulators: 0,
            enforce_new_spork_key: 1610161184,
            reject_old_spork_key: 1610161184,
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![110],
                script_address: vec![115],
                secret_key: vec![238],
                ext_public_key: vec![0x02, 0x2d, 0x25, 0x33],
                ext_secret_key: vec![0x02, 0x21, 0x31, 0x2b],
                ext_coin_type: vec![0x80, 0x00, 0x00, 0x77],
            },
            genesis,
            genesis_hash,
            dns_seeds: vec![
                DnsSeed::new("seed1", "node1.mktcash.org"),
                DnsSeed::new("seed2", "node2.mktcash.org"),
                DnsSeed::new("dns1", "dns1.mktcash.org"),
                DnsSeed::new("dns2", "dns2.mktcash.org"),
                DnsSeed::new("dns3", "dns3.mktcash.org"),
            ],
            fixed_seeds: convert_fixed_seeds_now(MAIN_FIXED_SEEDS),
            mining_requires_peers: true,
            allow_min_difficulty_blocks: false,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            skip_proof_of_work_check: false,
            testnet_to_be_deprecated_field_rpc: false,
            headers_first_syncing_active: false,
            pool_max_transactions: 3,
            spork_key: "043b13ed05f563af67811a5a1cf71b9353db587afec1c85347140d9ada637b956c\
                        56da5cfd8107eada9ca6238827fc220bd014b5a01f57375cfb85f3eb7625e6f7"
                .to_string(),
            spork_key_old: "04dd7b7c4c6a683fec9586737dc12c0a6fa9ca7006d21dd570d540440f4c9de709\
                            ecb2320185f44cd6c4c22888433eae2d8edd6897a5da15475ed20eb34c991327"
                .to_string(),
            obfuscation_pool_dummy_address: "mRffAwgPusif7NtezhsTXBQjwoS8sVreWF".to_string(),
            start_masternode_payments: 1610161184,
            budget_fee_confirmations: 0,
            checkpoints: &MAIN_CHECKPOINTS,
        }
    }

    pub fn testnet() -> Self {
        let genesis = checked_genesis(NetworkId::Testnet);
        let genesis_hash = genesis.hash();
        Self {
            network_id: NetworkId::Testnet,
            network_name: NetworkId::Testnet.name(),
            message_start: [0xd0, 0xcd, 0xa9, 0x96],
            alert_pubkey: hex!(
                "047702b6eb08ee32cfbd0cec8197e7287bc46aa3b9b855f268378a8e217eb1f723"
                "2dbca8f4e3459758ac2fd476a41266d8ce4ee19e3cacd5169802a9715bf572d1"
            )
            .to_vec(),
            default_port: 31244,
            miner_threads: 0,
            target_timespan: 60,
            target_spacing: 60,
            last_pow_block: 100,
            coinbase_maturity: 15,
            masternode_count_drift: 4,
            modifier_update_block: 101,
            max_money_out: 43_199_500 * COIN,
            block_enforce_serial_range: 1,
            block_recalculate_accumulators: 9_908_000,
            enforce_new_spork_key: 1521604800,
            reject_old_spork_key: 1522454400,
            genesis,
            genesis_hash,
            dns_seeds: Vec::new(),
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![139],
                script_address: vec![19],
                secret_key: vec![239],
                ext_public_key: vec![0x3a, 0x80, 0x61, 0xa0],
                ext_secret_key: vec![0x3a, 0x80, 0x58, 0x37],
                ext_coin_type: vec![0x80, 0x00, 0x00, 0x01],
            },
            fixed_seeds: convert_fixed_seeds_now(TESTNET_FIXED_SEEDS),
            mining_requires_peers: true,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: true,
            pool_max_transactions: 2,
            spork_key: "04A8B319388C0F8588D238B9941DC26B26D3F9465266B368A051C5C100F79306A5\
                        57780101FE2192FE170D7E6DEFDCBEE4C8D533396389C0DAFFDBC842B002243C"
                .to_string(),
            spork_key_old: "04348C2F50F90267E64FACC65BFDC9D0EB147D090872FB97ABAE92E9A36E6CA609\
                            83E28E741F8E7277B11A7479B626AC115BA31463AC48178A5075C5A9319D4A38"
                .to_string(),
            obfuscation_pool_dummy_address: "y57cqfGRkekRyDRNeJiLtYVEbvhXrNbmox".to_string(),
            start_masternode_payments: 1420837558,
            // The testnet finalization window is only a few blocks long.
            budget_fee_confirmations: 3,
            checkpoints: &TESTNET_CHECKPOINTS,
            ..Self::mainnet()
        }
    }

    pub fn regtest() -> Self {
        let genesis = checked_genesis(NetworkId::Regtest);
        let genesis_hash = genesis.hash();
        Self {
            network_id: NetworkId::Regtest,
            network_name: NetworkId::Regtest.name(),
            message_start: [0x93, 0x9f, 0xb6, 0xd8],
            subsidy_halving_interval: 150,
            miner_threads: 1,
            target_timespan: 24 * 60 * 60,
            target_spacing: 60,
            pow_limit: U256::MAX >> 1,
            genesis,
            genesis_hash,
            default_port: 31246,
            fixed_seeds: Vec::new(),
            dns_seeds: Vec::new(),
            mining_requires_peers: false,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            testnet_to_be_deprecated_field_rpc: false,
            checkpoints: &REGTEST_CHECKPOINTS,
            ..Self::testnet()
        }
    }

    /// Main's values with test-friendly flags; shares main's checkpoints
    pub fn unittest() -> Self {
        Self {
            network_id: NetworkId::UnitTest,
            network_name: NetworkId::UnitTest.name(),
            default_port: 31248,
            fixed_seeds: Vec::new(),
            dns_seeds: Vec::new(),
            mining_requires_peers: false,
            default_consistency_checks: true,
            allow_min_difficulty_blocks: false,
            mine_blocks_on_demand: true,
            ..Self::mainnet()
        }
    }

    pub fn for_network(network: NetworkId) -> Self {
        match network {
            NetworkId::Main => Self::mainnet(),
            NetworkId::Testnet => Self::testnet(),
            NetworkId::Regtest => Self::regtest(),
            NetworkId::UnitTest => Self::unittest(),
        }
    }

    /// Blocks per retarget window
    pub fn interval(&self) -> i64 {
        self.target_timespan / self.target_spacing
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    pub fn checkpoint_verifier(&self, enabled: bool) -> CheckpointVerifier<'static> {
        CheckpointVerifier::new(self.checkpoints, enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pow::check_proof_of_work;

    #[test]
    fn main_values() {
        let p = ChainParams::mainnet();
        assert_eq!(p.network_name, "main");
        assert_eq!(p.message_start, [0x2d, 0x22, 0x21, 0x2a]);
        assert_eq!(p.genesis_hash.to_string(), "00000edb03823e6b6fb39e27b3a6dfb9a80111fb9fb02980cc0096ceb588a8e7");
        assert_eq!(p.interval(), 0);
        assert_eq!(p.dns_seeds.len(), 5);
        assert_eq!(p.base58_prefix(Base58Type::PubkeyAddress), &[110]);
        assert_eq!(p.max_money_out, 2_100_000_000_000_000);
        assert!(check_proof_of_work(&p.genesis_hash, p.genesis.header.bits, &p.pow_limit));
    }

    #[test]
    fn testnet_overrides_main() {
        let main = ChainParams::mainnet();
        let test = ChainParams::testnet();
        assert_eq!(test.default_port, 31244);
        assert_eq!(test.pow_limit, main.pow_limit);
        assert_eq!(test.max_reorganization_depth, main.max_reorganization_depth);
        assert_eq!(test.genesis.header.hash_merkle_root, main.genesis.header.hash_merkle_root);
        assert_ne!(test.genesis_hash, main.genesis_hash);
        assert_eq!(test.interval(), 1);
        assert_eq!(test.budget_fee_confirmations, 3);
        assert!(test.dns_seeds.is_empty());
        assert_eq!(test.base58_prefix(Base58Type::ExtCoinType), &[0x80, 0, 0, 1]);
    }

    #[test]
    fn regtest_overrides_testnet() {
        let test = ChainParams::testnet();
        let reg = ChainParams::regtest();
        assert_eq!(reg.default_port, 31246);
        assert!(!reg.mining_requires_peers);
        assert_eq!(reg.subsidy_halving_interval, 150);
        assert_eq!(reg.interval(), 1440);
        assert_eq!(reg.max_money_out, test.max_money_out);
        assert_eq!(reg.spork_key, test.spork_key);
        assert_eq!(reg.genesis.header.bits, 0x207fffff);
        assert!(check_proof_of_work(&reg.genesis_hash, reg.genesis.header.bits, &reg.pow_limit));
    }

    #[test]
    fn unittest_shares_main_checkpoints() {
        let unit = ChainParams::unittest();
        assert_eq!(unit.default_port, 31248);
        assert!(std::ptr::eq(unit.checkpoints, ChainParams::mainnet().checkpoints));
        assert_eq!(unit.checkpoints.hash_at_height(0), Some(unit.genesis_hash));
        assert!(unit.mine_blocks_on_demand);
    }

    #[test]
    fn json_dump_uses_hex_strings() {
        let value = serde_json::to_value(ChainParams::regtest()).unwrap();
        assert_eq!(value["network_id"], "regtest");
        assert_eq!(value["message_start"], "939fb6d8");
        assert_eq!(value["base58_prefixes"]["secret_key"], "ef");
        assert!(value.get("genesis").is_none());
    }
}
