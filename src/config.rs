use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::KiraError;
use crate::ncbi::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_CONFIG_FILE: &str = "kira-chrom.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub include_unplaced: Option<bool>,
    #[serde(default)]
    pub exclude_columns: Option<ColumnList>,
}

/// `"RefSeq,GenBank"` or `["RefSeq", "GenBank"]`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ColumnList {
    Shorthand(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub include_unplaced: bool,
    pub exclude_columns: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            include_unplaced: false,
            exclude_columns: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// CLI flags win: `include_unplaced` is OR-ed, exclusions are unioned.
    pub fn merge_cli(mut self, include_unplaced: bool, exclude_columns: Vec<String>) -> Self {
        self.include_unplaced |= include_unplaced;
        for column in exclude_columns {
            if !self.exclude_columns.contains(&column) {
                self.exclude_columns.push(column);
            }
        }
        self
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, KiraError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| KiraError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| KiraError::ConfigParse(err.to_string()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, KiraError> {
        let defaults = ResolvedConfig::default();

        let api_base_url = match config.api_base_url {
            Some(url) if url.trim().is_empty() => {
                return Err(KiraError::ConfigParse(
                    "api_base_url must not be empty".to_string(),
                ));
            }
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => defaults.api_base_url,
        };

        let timeout_secs = match config.timeout_secs {
            Some(0) => {
                return Err(KiraError::ConfigParse(
                    "timeout_secs must be greater than zero".to_string(),
                ));
            }
            Some(secs) => secs,
            None => defaults.timeout_secs,
        };

        let exclude_columns = match config.exclude_columns {
            Some(ColumnList::Shorthand(value)) => crate::report::split_column_args(&[value]),
            Some(ColumnList::List(values)) => crate::report::split_column_args(&values),
            None => Vec::new(),
        };

        Ok(ResolvedConfig {
            api_base_url,
            timeout_secs,
            include_unplaced: config.include_unplaced.unwrap_or(false),
            exclude_columns,
        })
    }
}
