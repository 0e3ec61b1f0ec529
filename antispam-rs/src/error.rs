use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AntispamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read training corpus {path}: {source}")]
    Corpus {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Training error: {0}")]
    Training(String),

    #[error("Failed to persist trust list {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AntispamError>;
