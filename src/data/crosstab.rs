use super::model::{Category, Dataset, DatasetError, Stat, Summary};

// ---------------------------------------------------------------------------
// Single cell: summary statistics for one (location, property type) pair
// ---------------------------------------------------------------------------

/// Summarise the prices of every record matching both labels exactly.
///
/// Matching is case-sensitive. A pair with no records yields
/// [`DatasetError::NoMatchingItems`]; an unloaded dataset yields
/// [`DatasetError::EmptyDataset`].
pub fn cell_stats(
    dataset: &Dataset,
    location: &str,
    property_type: &str,
) -> Result<Summary, DatasetError> {
    dataset.ensure_loaded()?;

    let prices = dataset
        .records()
        .iter()
        .filter(|rec| rec.location == location && rec.property_type == property_type)
        .map(|rec| rec.price);

    Summary::from_prices(prices).ok_or_else(|| DatasetError::NoMatchingItems {
        location: location.to_string(),
        property_type: property_type.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Full grid over every label combination
// ---------------------------------------------------------------------------

/// One grid cell: a statistic, or an explicit marker that no listing exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Value(f64),
    NotAvailable,
}

/// A rendered cross table: rows are locations, columns are property types,
/// both in sorted order.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTable {
    pub stat: Stat,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[r][c]` belongs to `rows[r]` × `columns[c]`.
    pub cells: Vec<Vec<Cell>>,
}

impl CrossTable {
    /// Look up the cell for a label pair, if both labels are in the table.
    pub fn get(&self, location: &str, property_type: &str) -> Option<Cell> {
        let r = self.rows.iter().position(|l| l == location)?;
        let c = self.columns.iter().position(|p| p == property_type)?;
        Some(self.cells[r][c])
    }

    /// Iterate `(location, property_type, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Cell)> + '_ {
        self.rows.iter().zip(&self.cells).flat_map(move |(row, cells)| {
            self.columns
                .iter()
                .zip(cells)
                .map(move |(col, cell)| (row.as_str(), col.as_str(), *cell))
        })
    }
}

/// Compute `stat` for every location × property type pair.
///
/// Pairs without listings become [`Cell::NotAvailable`]; only an unloaded
/// dataset fails the whole grid.
pub fn render_grid(dataset: &Dataset, stat: Stat) -> Result<CrossTable, DatasetError> {
    let rows: Vec<String> = dataset.labels(Category::Location)?.iter().cloned().collect();
    let columns: Vec<String> = dataset
        .labels(Category::PropertyType)?
        .iter()
        .cloned()
        .collect();

    let mut cells = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut line = Vec::with_capacity(columns.len());
        for col in &columns {
            let cell = match cell_stats(dataset, row, col) {
                Ok(summary) => Cell::Value(summary.get(stat)),
                Err(DatasetError::NoMatchingItems { .. }) => {
                    log::debug!("no listings for {row} / {col}");
                    Cell::NotAvailable
                }
                Err(e) => return Err(e),
            };
            line.push(cell);
        }
        cells.push(line);
    }

    Ok(CrossTable {
        stat,
        rows,
        columns,
        cells,
    })
}
