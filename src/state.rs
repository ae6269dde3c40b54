use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::MenuHeader;
use crate::currency::Currency;
use crate::data::crosstab::{CrossTable, render_grid};
use crate::data::loader;
use crate::data::model::{Category, Dataset, DatasetError, Stat};

// ---------------------------------------------------------------------------
// Session settings
// ---------------------------------------------------------------------------

/// Everything the menu needs that is fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub home_currency: Currency,
    pub header: MenuHeader,
    pub copyright: String,
    pub data_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The session state, independent of how it is presented.
pub struct AppState {
    pub settings: Settings,

    /// Listing store; empty until the user loads a file.
    pub dataset: Dataset,

    /// Why the last load failed; cleared by a successful load.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            dataset: Dataset::new(),
            status_message: None,
        }
    }

    /// Load the configured data file.
    pub fn reload(&mut self) -> Result<usize> {
        let path = self.settings.data_path.clone();
        self.load_path(&path)
    }

    /// Parse `path` completely, then swap it in. A parse failure leaves the
    /// current dataset untouched.
    pub fn load_path(&mut self, path: &Path) -> Result<usize> {
        let records = match loader::load_file(path) {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("{e:#}"));
                return Err(e);
            }
        };

        match self.dataset.load(records) {
            Ok(n) => {
                log::info!(
                    "Loaded {n} listings from {} ({} locations, {} property types)",
                    path.display(),
                    self.dataset.labels(Category::Location)?.len(),
                    self.dataset.labels(Category::PropertyType)?.len(),
                );
                self.status_message = None;
                Ok(n)
            }
            Err(e) => {
                log::warn!("{} contained no listings", path.display());
                self.status_message = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Cross table for one statistic over the current dataset.
    pub fn grid(&self, stat: Stat) -> Result<CrossTable, DatasetError> {
        render_grid(&self.dataset, stat)
    }
}
