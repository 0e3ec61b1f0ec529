use crate::error::{AntispamError, Result};
use crate::trust::PersistPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub data: DataConfig,
    pub filter: FilterConfig,
    pub logging: LoggingConfig,
}

/// Locations of the training data and the trust list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    pub spam_corpus: PathBuf,
    pub ham_corpus: PathBuf,
    pub exclusions: PathBuf,
    pub trust_list: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Messages shorter than this (in bytes) are never classified
    #[serde(default = "default_min_message_length")]
    pub min_message_length: usize,
    /// Clean messages needed before a sender is trusted
    #[serde(default = "default_promote_after")]
    pub promote_after: u32,
    #[serde(default)]
    pub persist_policy: PersistPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_min_message_length() -> usize {
    10
}

fn default_promote_after() -> u32 {
    5
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AntispamError::Config(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| AntispamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.filter.promote_after == 0 {
            return Err(AntispamError::Config(
                "filter.promote_after must be at least 1".to_string(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(AntispamError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }

    pub fn default() -> Self {
        Self {
            data: DataConfig {
                spam_corpus: PathBuf::from("data_text/spam_data.txt"),
                ham_corpus: PathBuf::from("data_text/ham_data.txt"),
                exclusions: PathBuf::from("data_text/exclude_data.txt"),
                trust_list: PathBuf::from("data_text/white_list.txt"),
            },
            filter: FilterConfig {
                min_message_length: default_min_message_length(),
                promote_after: default_promote_after(),
                persist_policy: PersistPolicy::default(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
