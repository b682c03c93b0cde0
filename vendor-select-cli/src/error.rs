//! Top-level error type for the binary.

use thiserror::Error;
use vendor_select_lib::error::ListingError;

use crate::config::ConfigError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vendor file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("listing error: {0}")]
    Listing(#[from] ListingError),
    #[error("--vendors is required")]
    MissingVendors,
}
