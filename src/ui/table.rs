use std::fmt;

use crate::currency::ConversionTable;
use crate::data::crosstab::{Cell, CrossTable};

const ROW_LABEL_WIDTH: usize = 20;
const COLUMN_WIDTH: usize = 22;
const CURRENCY_WIDTH: usize = 10;

// ---------------------------------------------------------------------------
// Rent cross table
// ---------------------------------------------------------------------------

/// Fixed-width text: property types across, locations down.
impl fmt::Display for CrossTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:ROW_LABEL_WIDTH$}", "")?;
        for col in &self.columns {
            write!(f, "{col:<COLUMN_WIDTH$}")?;
        }
        writeln!(f)?;

        for (row, cells) in self.rows.iter().zip(&self.cells) {
            write!(f, "{row:<ROW_LABEL_WIDTH$}")?;
            for cell in cells {
                // "$ " plus the value fills one column.
                match cell {
                    Cell::Value(v) => write!(f, "$ {v:<w$.2}", w = COLUMN_WIDTH - 2)?,
                    Cell::NotAvailable => write!(f, "$ {:<w$}", "N/A", w = COLUMN_WIDTH - 2)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Currency reference table
// ---------------------------------------------------------------------------

/// Fixed-width text, base currency first, followed by a blank line.
impl fmt::Display for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Options for converting from {}:", self.base)?;

        write!(f, "{:<CURRENCY_WIDTH$}", self.base)?;
        for target in &self.targets {
            write!(f, "{target:<CURRENCY_WIDTH$}")?;
        }
        writeln!(f)?;

        for (amount, converted) in &self.rows {
            write!(f, "{amount:<CURRENCY_WIDTH$.2}")?;
            for value in converted {
                write!(f, "{value:<CURRENCY_WIDTH$.2}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
