use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors raised by dataset queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// Nothing has been loaded yet, or the last load produced no rows.
    #[error("the dataset is empty; load data first")]
    EmptyDataset,

    /// A (location, property type) pair has no records behind it.
    #[error("no listings for location '{location}' and property type '{property_type}'")]
    NoMatchingItems {
        location: String,
        property_type: String,
    },
}

// ---------------------------------------------------------------------------
// Record – one listing row
// ---------------------------------------------------------------------------

/// A single listing: where it is, what kind of place it is, and its price.
///
/// Prices are whole currency units; fractional input is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub location: String,
    pub property_type: String,
    pub price: u64,
}

impl Record {
    pub fn new(location: impl Into<String>, property_type: impl Into<String>, price: u64) -> Self {
        Record {
            location: location.into(),
            property_type: property_type.into(),
            price,
        }
    }
}

// ---------------------------------------------------------------------------
// Category / Stat – the two closed enumerations queries are keyed by
// ---------------------------------------------------------------------------

/// The two categorical dimensions of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Location,
    PropertyType,
}

/// Which summary statistic a grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Min,
    Avg,
    Max,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Min => write!(f, "Minimum"),
            Stat::Avg => write!(f, "Average"),
            Stat::Max => write!(f, "Maximum"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary – min / average / max of one cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Summary {
    /// Summarise a non-empty price list. Returns `None` when `prices` is empty.
    pub fn from_prices<I>(prices: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut count: u64 = 0;
        let mut sum: u128 = 0;
        let mut min = u64::MAX;
        let mut max = u64::MIN;

        for price in prices {
            count += 1;
            sum += u128::from(price);
            min = min.min(price);
            max = max.max(price);
        }

        if count == 0 {
            return None;
        }

        Some(Summary {
            min: min as f64,
            avg: sum as f64 / count as f64,
            max: max as f64,
        })
    }

    /// Pick one statistic out of the triple.
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Min => self.min,
            Stat::Avg => self.avg,
            Stat::Max => self.max,
        }
    }
}

// ---------------------------------------------------------------------------
// LabelSet – distinct values per category
// ---------------------------------------------------------------------------

/// Distinct locations and property types, kept sorted so that tables render
/// in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pub locations: BTreeSet<String>,
    pub property_types: BTreeSet<String>,
}

impl LabelSet {
    /// Collect labels from every record.
    pub fn from_records(records: &[Record]) -> Self {
        let mut labels = LabelSet::default();
        for rec in records {
            labels.locations.insert(rec.location.clone());
            labels.property_types.insert(rec.property_type.clone());
        }
        labels
    }

    pub fn get(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Location => &self.locations,
            Category::PropertyType => &self.property_types,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded records with their label index
// ---------------------------------------------------------------------------

/// The in-memory listing store.
///
/// Starts empty. [`Dataset::load`] is the only mutation: it swaps in a new
/// record set and rebuilds the labels from scratch.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    labels: LabelSet,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset directly from records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let labels = LabelSet::from_records(&records);
        Dataset { records, labels }
    }

    /// Replace every record and rebuild the label sets.
    ///
    /// An empty `records` still replaces the current contents, but is reported
    /// as [`DatasetError::EmptyDataset`] so the caller can tell the user.
    pub fn load(&mut self, records: Vec<Record>) -> Result<usize, DatasetError> {
        *self = Dataset::from_records(records);
        if self.records.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }
        Ok(self.records.len())
    }

    /// Distinct labels for one category.
    pub fn labels(&self, category: Category) -> Result<&BTreeSet<String>, DatasetError> {
        self.ensure_loaded()?;
        Ok(self.labels.get(category))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn ensure_loaded(&self) -> Result<(), DatasetError> {
        if self.records.is_empty() {
            Err(DatasetError::EmptyDataset)
        } else {
            Ok(())
        }
    }
}
