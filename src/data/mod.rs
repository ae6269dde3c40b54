/// Data layer: core types, loading, and cross-tabulation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  records + sorted label sets
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ crosstab  │  per-pair min/avg/max → CrossTable
///   └──────────┘
/// ```

pub mod crosstab;
pub mod loader;
pub mod model;
