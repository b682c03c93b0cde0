//! Application configuration.

use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use simplelog::LevelFilter;
use thiserror::Error;
use vendor_select_lib::listing::Pagination;
use vendor_select_lib::listing::PaginationMode;
use vendor_select_lib::listing::TableState;

use crate::paths;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown log level '{0}'")]
    LogLevel(String),
    #[error("page_size must be at least 1")]
    ZeroPageSize,
}

/// Default configuration embedded in the binary.
const DEFAULT_CONFIG: &str = r#"
log_level = "debug"
page_size = 10
paginate = false
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Rows per page when paging is on, and the initial page size.
    pub page_size: usize,
    /// Whether a fresh view starts with server-side paging.
    pub paginate: bool,
    /// Overrides the platform location of the view settings database.
    #[serde(default)]
    pub settings_db: Option<PathBuf>,
    /// File this configuration was read from, `None` for the embedded default.
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// Search order:
    /// 1. `explicit`, which must exist
    /// 2. `config.toml` in the platform config directory
    /// 3. the embedded default
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => paths::config_file().filter(|path| path.exists()),
        };

        let config = match candidate {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
                Self {
                    source: Some(path),
                    ..Self::parse(&contents)?
                }
            }
            None => Self::parse(DEFAULT_CONFIG)?,
        };
        Ok(config)
    }

    /// Parse and validate a TOML document, filling gaps from the defaults.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        let overrides: toml::Table = toml::from_str(contents)?;
        table.extend(overrides);

        let config: Config = toml::Value::Table(table).try_into()?;
        config.log_level()?;
        if config.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(config)
    }

    /// File the configuration came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Configured log level.
    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Table state for a view with no stored preferences.
    pub fn initial_table_state(&self) -> TableState {
        let mode = if self.paginate {
            PaginationMode::Server
        } else {
            PaginationMode::Off
        };
        TableState::new().with_pagination(Pagination {
            mode,
            current: 1,
            page_size: self.page_size,
        })
    }

    /// Settings database location, if one can be determined.
    pub fn settings_db(&self) -> Option<PathBuf> {
        self.settings_db.clone().or_else(paths::settings_db)
    }
}
