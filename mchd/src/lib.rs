//! mchd - Mktcash node front end
//!
//! Selects the active network, loads the spend denylists and answers
//! questions about chain parameters and checkpoints.

pub mod cli;
pub mod config;
pub mod error;
pub mod node;
pub mod ui;

pub use cli::Args;
pub use config::Config;
pub use error::NodeError;
pub use node::Node;
