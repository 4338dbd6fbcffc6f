use consensus_core::errors::{DenylistError, ParamsError, ParseSerialError};
use consensus_core::errors::ParseOutPointError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("denylist: {0}")]
    Denylist(#[from] DenylistError),

    #[error("invalid serial: {0}")]
    Serial(#[from] ParseSerialError),

    #[error(transparent)]
    OutPoint(#[from] ParseOutPointError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type NodeResult<T> = std::result::Result<T, NodeError>;
