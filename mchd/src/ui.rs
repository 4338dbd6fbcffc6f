//! Console output helpers

use mch_utils::hex::ToHex;
use std::fmt::Write;

use crate::node::Node;

/// ANSI color codes for terminal output
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
}

/// Print startup banner
pub fn print_banner(version: &str, network: &str) {
    println!();
    println!("{}╔══════════════════════════════════════════════════════════════╗{}", colors::BRIGHT_CYAN, colors::RESET);
    println!(
        "{}║{}              {}MKTCASH NODE - MCHD v{:<10}{}                     {}║{}",
        colors::BRIGHT_CYAN,
        colors::RESET,
        colors::BOLD,
        version,
        colors::RESET,
        colors::BRIGHT_CYAN,
        colors::RESET
    );
    println!(
        "{}║{}  Network: {}{:<50}{}  {}║{}",
        colors::BRIGHT_CYAN,
        colors::RESET,
        colors::BRIGHT_GREEN,
        network,
        colors::RESET,
        colors::BRIGHT_CYAN,
        colors::RESET
    );
    println!("{}╚══════════════════════════════════════════════════════════════╝{}", colors::BRIGHT_CYAN, colors::RESET);
    println!();
}

/// Status types for colored output
#[derive(Debug, Clone, Copy)]
pub enum StatusType {
    Success,
    Info,
    Warning,
    Error,
}

/// Print status line with icon and color
pub fn print_status(icon: &str, message: &str, status: StatusType) {
    let color = match status {
        StatusType::Success => colors::BRIGHT_GREEN,
        StatusType::Info => colors::BRIGHT_CYAN,
        StatusType::Warning => colors::BRIGHT_YELLOW,
        StatusType::Error => colors::BRIGHT_RED,
    };
    println!("{}[{}]{} {}{}{}", color, icon, colors::RESET, color, message, colors::RESET);
}

fn section(out: &mut String, title: &str) {
    let rule = "━".repeat(64);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}{}{}", colors::DIM, rule, colors::RESET);
    let _ = writeln!(out, "{}  {}{}{}", colors::BRIGHT_CYAN, colors::BOLD, title, colors::RESET);
    let _ = writeln!(out, "{}{}{}", colors::DIM, rule, colors::RESET);
}

fn kv(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {}{:<22}{} {}{}{}", colors::BRIGHT_WHITE, key, colors::RESET, colors::BRIGHT_CYAN, value, colors::RESET);
}

/// Human-readable overview of the selected network
pub fn render_summary(node: &Node) -> String {
    let params = node.params();
    let base = node.base_params();
    let checkpoints = node.checkpoints();
    let mut out = String::new();

    section(&mut out, "Network");
    kv(&mut out, "Network", params.network_name);
    kv(&mut out, "Magic", params.message_start.to_hex());
    kv(&mut out, "P2P Port", params.default_port);
    kv(&mut out, "RPC Port", format!("{} (provisional)", base.rpc_port));
    let data_dir = if base.data_dir.is_empty() { "(none)" } else { base.data_dir };
    kv(&mut out, "Data Subdirectory", format!("{data_dir} (provisional)"));
    kv(&mut out, "DNS Seeds", params.dns_seeds.len());
    kv(&mut out, "Fixed Seeds", params.fixed_seeds.len());

    section(&mut out, "Consensus");
    kv(&mut out, "Genesis", params.genesis_hash);
    kv(&mut out, "Merkle Root", params.genesis.header.hash_merkle_root);
    kv(&mut out, "Target Spacing", format!("{}s", params.target_spacing));
    kv(&mut out, "Maturity", params.coinbase_maturity);
    kv(&mut out, "Last PoW Block", params.last_pow_block);
    kv(&mut out, "Mining Needs Peers", params.mining_requires_peers);

    section(&mut out, "Checkpoints & Denylist");
    if checkpoints.enabled() {
        kv(&mut out, "Checkpoints", format!("{} (last at {})", checkpoints.data().len(), checkpoints.total_blocks_estimate()));
    } else {
        kv(&mut out, "Checkpoints", "Disabled");
    }
    kv(&mut out, "Invalid Serials", node.denylist().serial_count());
    kv(&mut out, "Invalid Outpoints", node.denylist().outpoint_count());
    out
}
