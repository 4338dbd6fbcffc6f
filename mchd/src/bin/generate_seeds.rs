// Seed table generator
// Run with: cargo run --bin generate_seeds -- nodes_main.txt --name MAIN_FIXED_SEEDS --port 17223

use clap::Parser;
use consensus_core::config::seeds::SeedSpec6;
use std::fs;
use std::io::{self, Read};
use std::process;

/// Turns a list of `host[:port]` lines into a Rust fixed seed table.
#[derive(Parser, Debug)]
#[command(name = "generate_seeds")]
struct Opts {
    /// Node list; reads stdin when omitted
    input: Option<String>,

    /// Name of the generated constant
    #[arg(long, default_value = "MAIN_FIXED_SEEDS")]
    name: String,

    /// Port for lines that do not name one
    #[arg(long, default_value_t = 17223)]
    port: u16,
}

fn render_table(name: &str, seeds: &[SeedSpec6]) -> String {
    let mut out = format!("pub const {name}: &[SeedSpec6] = &[\n");
    for seed in seeds {
        let bytes: Vec<String> = seed.addr.iter().map(|b| format!("0x{b:02x}")).collect();
        out.push_str(&format!("    SeedSpec6::new([{}], {}),\n", bytes.join(", "), seed.port));
    }
    out.push_str("];\n");
    out
}

fn parse_lines(text: &str, default_port: u16) -> Vec<SeedSpec6> {
    let mut seeds = Vec::new();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        match SeedSpec6::parse(line, default_port) {
            Ok(seed) => seeds.push(seed),
            Err(e) => eprintln!("skipping: {e}"),
        }
    }
    seeds
}

fn main() {
    let opts = Opts::parse();

    let text = match opts.input.as_deref() {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    let text = match text {
        Ok(text) => text,
        Err(e) => {
            eprintln!("failed to read node list: {e}");
            process::exit(1);
        }
    };

    let seeds = parse_lines(&text, opts.port);
    println!("// Generated by generate_seeds from {} entries", seeds.len());
    print!("{}", render_table(&opts.name, &seeds));
}
