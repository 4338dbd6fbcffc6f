use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "mchd")]
#[command(about = "Mktcash node: chain parameters, checkpoints and spend denylists", long_about = None)]
pub struct Args {
    /// Path to configuration file (defaults are used when it does not exist)
    #[arg(short, long = "config")]
    pub config_path: Option<PathBuf>,

    /// Network (main, test, regtest, unittest)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Use the test network
    #[arg(long)]
    pub testnet: bool,

    /// Use the regression test network
    #[arg(long)]
    pub regtest: bool,

    /// Disable checkpoint enforcement
    #[arg(long)]
    pub no_checkpoints: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// JSON file with invalidated serial numbers
    #[arg(long)]
    pub serials: Option<PathBuf>,

    /// JSON file with invalidated outpoints
    #[arg(long)]
    pub outpoints: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a summary of the selected network (default)
    Summary,
    /// Dump the selected chain parameters as JSON
    Params,
    /// Show the checkpoint at a height
    Checkpoint { height: u32 },
    /// Estimate initial sync progress for a chain tip
    Progress {
        /// Transactions in the chain up to the tip
        #[arg(long)]
        chain_tx: u64,
        /// Timestamp of the tip block
        #[arg(long)]
        block_time: i64,
        /// Height of the tip
        #[arg(long, default_value_t = 0)]
        height: u32,
        /// Estimate as if signatures were not checked
        #[arg(long)]
        no_sigchecks: bool,
        /// Evaluate at this time instead of now
        #[arg(long)]
        now: Option<i64>,
    },
    /// Check whether a serial number is denylisted
    CheckSerial { serial: String },
    /// Check whether an outpoint (<txid>:<index>) is denylisted
    CheckOutpoint { outpoint: String },
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_flags() {
        let args = Args::parse_from(["mchd", "--regtest", "--no-checkpoints", "checkpoint", "0"]);
        assert!(args.regtest);
        assert!(args.no_checkpoints);
        assert_eq!(args.command, Some(Command::Checkpoint { height: 0 }));

        let args = Args::parse_from(["mchd", "-n", "test", "progress", "--chain-tx", "10", "--block-time", "5"]);
        assert_eq!(args.network.as_deref(), Some("test"));
        assert!(matches!(args.command, Some(Command::Progress { chain_tx: 10, block_time: 5, height: 0, .. })));

        let args = Args::parse_from(["mchd", "check-serial", "0xff"]);
        assert_eq!(args.command, Some(Command::CheckSerial { serial: "0xff".into() }));
    }
}
