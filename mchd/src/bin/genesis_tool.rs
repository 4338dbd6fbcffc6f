use clap::Parser;
use consensus_core::config::genesis::GenesisParams;
use consensus_core::config::params::ChainParams;
use consensus_core::pow::check_proof_of_work;
use consensus_core::serialize::Encodable;
use consensus_core::NetworkId;
use std::process;
use std::time::Instant;

/// Rebuilds a network's genesis block, prints it, and optionally searches for a nonce.
#[derive(Parser, Debug)]
#[command(name = "genesis_tool")]
struct Opts {
    /// Network whose genesis template is used
    #[arg(long, default_value = "main")]
    network: String,

    /// Print the serialized header and coinbase as hex
    #[arg(long)]
    hex: bool,

    /// Search nonces from zero until the header meets its target
    #[arg(long)]
    mine: bool,

    /// Override bits (compact representation). Accepts decimal or 0x-prefixed hex.
    #[arg(long)]
    bits: Option<String>,

    /// Override the timestamp (seconds)
    #[arg(long)]
    time: Option<u32>,

    /// Maximum nonces to try when mining
    #[arg(long, default_value_t = 10_000_000u64)]
    max_iterations: u64,
}

fn parse_bits(s: &str) -> Option<u32> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse::<u32>().ok(),
    }
}

fn main() {
    let opts = Opts::parse();

    let network: NetworkId = match opts.network.parse() {
        Ok(network) => network,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };
    let pow_limit = ChainParams::for_network(network).pow_limit;

    let mut template = GenesisParams::for_network(network).clone();
    if let Some(bits_str) = opts.bits.as_deref() {
        match parse_bits(bits_str) {
            Some(bits) => template.bits = bits,
            None => eprintln!("Failed to parse bits '{bits_str}', ignoring"),
        }
    }
    if let Some(time) = opts.time {
        template.time = time;
    }

    let mut block = template.build();

    if opts.mine {
        println!("Searching nonces (max_iterations={})...", opts.max_iterations);
        let start = Instant::now();
        let mut header = block.header;
        let mut found = false;
        for nonce in 0..opts.max_iterations.min(u64::from(u32::MAX) + 1) {
            header.nonce = nonce as u32;
            if check_proof_of_work(&header.hash(), header.bits, &pow_limit) {
                found = true;
                break;
            }
            if nonce > 0 && nonce % 1_000_000 == 0 {
                let rate = nonce as f64 / start.elapsed().as_secs_f64().max(1e-6);
                println!("Tried {} nonces ({:.2} kH/s)", nonce, rate / 1000.0);
            }
        }
        let elapsed = start.elapsed().as_secs_f64();
        if found {
            println!("Found nonce {} in {:.2}s", header.nonce, elapsed);
            block.header = header;
        } else {
            eprintln!("No valid nonce within {} iterations ({:.2}s)", opts.max_iterations, elapsed);
        }
    }

    let hash = block.hash();
    println!("Network: {network}");
    println!("Genesis hash: {hash}");
    println!("Merkle root: {}", block.header.hash_merkle_root);
    println!("Time: {}", block.header.time);
    println!("Bits: 0x{:08x}", block.header.bits);
    println!("Nonce: {}", block.header.nonce);
    println!("Meets target: {}", check_proof_of_work(&hash, block.header.bits, &pow_limit));
    println!("Coinbase message: {}", template.coinbase_message);
    if let Some(expected) = template.expected_hash {
        println!("Matches pinned hash: {}", expected == hash);
    }

    if opts.hex {
        println!("Header (hex): {}", hex::encode(block.header.serialize()));
        for tx in &block.transactions {
            println!("Coinbase (hex): {}", hex::encode(tx.to_bytes()));
        }
    }
}
