use consensus_core::config::base::NetworkChoice;
use consensus_core::NetworkId;
use mchd::cli::Command;
use mchd::{Args, Config, Node, NodeError};
use std::fs;
use tempfile::TempDir;

const TXID: &str = "1111111111111111111111111111111111111111111111111111111111111111";

fn regtest_node(config: &Config) -> Node {
    Node::new(config, &NetworkChoice::named("regtest")).unwrap()
}

#[test]
fn config_file_is_optional() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_file_and_cli_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mchd.toml");
    fs::write(&path, "[chain]\nnetwork = \"test\"\ncheckpoints = true\n\n[logging]\nlevel = \"warn\"\n").unwrap();

    let mut config = Config::load(&path).unwrap();
    assert_eq!(config.chain.network.as_deref(), Some("test"));
    assert_eq!(config.logging.level, "warn");

    let args = Args { no_checkpoints: true, ..Default::default() };
    config.apply_cli_overrides(&args);
    let node = Node::new(&config, &config.network_choice(&args)).unwrap();
    assert_eq!(node.network(), NetworkId::Testnet);
    assert!(!node.checkpoints().enabled());
}

#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mchd.toml");
    fs::write(&path, "[chain\nnetwork = ").unwrap();
    assert!(matches!(Config::load(&path), Err(NodeError::Config(_))));
}

#[test]
fn conflicting_flags_are_rejected() {
    let config = Config::default();
    let args = Args { regtest: true, testnet: true, ..Default::default() };
    assert!(matches!(Node::new(&config, &config.network_choice(&args)), Err(NodeError::Params(_))));
}

#[test]
fn regtest_commands() {
    let node = regtest_node(&Config::default());
    assert_eq!(node.params().default_port, 31246);

    let summary = node.execute(&Command::Summary).unwrap();
    assert!(summary.contains("regtest"));
    assert!(summary.contains("31246"));
    assert!(summary.contains("31247 (provisional)"));

    let json: serde_json::Value = serde_json::from_str(&node.execute(&Command::Params).unwrap()).unwrap();
    assert_eq!(json["default_port"], 31246);
    assert_eq!(json["mining_requires_peers"], false);

    let at_zero = node.execute(&Command::Checkpoint { height: 0 }).unwrap();
    assert!(at_zero.ends_with("0000000000000000000000000000000000000000000000000000000000000001"));
    assert_eq!(node.execute(&Command::Checkpoint { height: 5 }).unwrap(), "no checkpoint at height 5");
}

#[test]
fn progress_command() {
    let node = Node::new(&Config::default(), &NetworkChoice::default()).unwrap();
    let out = node
        .execute(&Command::Progress { chain_tx: 10, block_time: 1_700_000_000, height: 10, no_sigchecks: false, now: Some(1_700_000_000) })
        .unwrap();
    assert_eq!(out, "estimated progress: 100.00%");
}

#[test]
fn denylist_files_are_loaded() {
    let dir = TempDir::new().unwrap();
    let serials = dir.path().join("serials.json");
    let outpoints = dir.path().join("outpoints.json");
    fs::write(&serials, r#"["0xabc", "0xdef"]"#).unwrap();
    fs::write(&outpoints, format!(r#"[{{"txid": "{TXID}", "n": 2}}]"#)).unwrap();

    let mut config = Config::default();
    config.denylist.serials_path = Some(serials);
    config.denylist.outpoints_path = Some(outpoints);
    let node = regtest_node(&config);
    assert_eq!(node.denylist().serial_count(), 2);

    assert_eq!(node.execute(&Command::CheckSerial { serial: "0xABC".into() }).unwrap(), "serial abc: denylisted");
    assert_eq!(node.execute(&Command::CheckSerial { serial: "1".into() }).unwrap(), "serial 1: not denylisted");
    let listed = node.execute(&Command::CheckOutpoint { outpoint: format!("{TXID}:2") }).unwrap();
    assert!(listed.ends_with(": denylisted"));
    let other = node.execute(&Command::CheckOutpoint { outpoint: format!("{TXID}:3") }).unwrap();
    assert!(other.ends_with(": not denylisted"));
    assert!(matches!(node.execute(&Command::CheckSerial { serial: "xyz".into() }), Err(NodeError::Serial(_))));
    assert!(matches!(node.execute(&Command::CheckOutpoint { outpoint: "nope".into() }), Err(NodeError::OutPoint(_))));
}

#[test]
fn missing_denylist_file() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.denylist.serials_path = Some(dir.path().join("absent.json"));
    assert_eq!(regtest_node(&config).denylist().serial_count(), 0);

    config.denylist.required = true;
    assert!(matches!(Node::new(&config, &NetworkChoice::named("regtest")), Err(NodeError::Io { .. })));
}

#[test]
fn malformed_denylist_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("serials.json");
    fs::write(&path, r#"["0x0"]"#).unwrap();
    let mut config = Config::default();
    config.denylist.serials_path = Some(path);
    assert!(matches!(Node::new(&config, &NetworkChoice::default()), Err(NodeError::Denylist(_))));
}

#[test]
fn globals_follow_the_node() {
    let node = regtest_node(&Config::default());
    node.install_globals().unwrap();
    assert_eq!(consensus_core::config::registry::params().network_id, NetworkId::Regtest);
    assert_eq!(consensus_core::config::registry::base_params().rpc_port, 31247);
}
