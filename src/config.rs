use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::currency::Currency;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "RENT_TABLES_CONFIG";

/// Longest header the menu accepts.
pub const MAX_HEADER_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("header is {len} characters long; at most {max} are allowed")]
    TooLong { len: usize, max: usize },
}

// ---------------------------------------------------------------------------
// MenuHeader – validated banner shown above the menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct MenuHeader(String);

impl MenuHeader {
    pub fn new(header: impl Into<String>) -> Result<Self, HeaderError> {
        let header = header.into();
        let len = header.chars().count();
        if len > MAX_HEADER_LEN {
            return Err(HeaderError::TooLong {
                len,
                max: MAX_HEADER_LEN,
            });
        }
        Ok(MenuHeader(header))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MenuHeader {
    type Error = HeaderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        MenuHeader::new(s)
    }
}

impl fmt::Display for MenuHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// AppConfig – optional JSON configuration
// ---------------------------------------------------------------------------

/// Runtime configuration. Every field has a default, so an absent or partial
/// config file is fine.
///
/// ```json
/// {
///   "data_path": "AB_NYC_2019.csv",
///   "copyright": "copyright 2021 Example Co.",
///   "home_currency": "USD",
///   "header": "AirBNB 2021"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listing file loaded by menu option 4.
    pub data_path: PathBuf,
    pub copyright: String,
    /// When set, the start-up currency prompt is skipped.
    pub home_currency: Option<Currency>,
    /// When set, the start-up header prompt is skipped.
    pub header: Option<MenuHeader>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("AB_NYC_2019.csv"),
            copyright: "No copyright has been set".to_string(),
            home_currency: None,
            header: None,
        }
    }
}

impl AppConfig {
    /// Read a config file. Unknown fields are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config from an explicit path, then [`CONFIG_ENV`], then
    /// defaults.
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self> {
        let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                log::info!("Using config {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
