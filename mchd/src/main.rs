use mchd::{cli, ui, Config, Node};
use std::path::Path;
use std::process;
use tracing::error;

const DEFAULT_CONFIG_PATH: &str = "mchd.toml";

fn main() {
    let args = cli::parse_args();

    let config_path = args.config_path.as_deref().unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    let mut config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            ui::print_status("✗", &format!("{e}"), ui::StatusType::Error);
            process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    init_logging(&config.logging.level);

    let node = match Node::new(&config, &config.network_choice(&args)) {
        Ok(node) => node,
        Err(e) => {
            ui::print_status("✗", &format!("Failed to initialize: {e}"), ui::StatusType::Error);
            error!("Failed to initialize: {e}");
            process::exit(1);
        }
    };

    let command = args.command.clone().unwrap_or(cli::Command::Summary);
    if command == cli::Command::Summary {
        ui::print_banner(env!("CARGO_PKG_VERSION"), node.params().network_name);
    }

    let result = node.install_globals().and_then(|()| node.execute(&command));
    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            ui::print_status("✗", &format!("{e}"), ui::StatusType::Error);
            error!("{e}");
            process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}
