use std::collections::HashSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// GridError – structural problems found while building a Grid
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} has {found} cells but the header has {expected} columns")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
    #[error("column '{0}' appears more than once in the header")]
    DuplicateColumn(String),
}

// ---------------------------------------------------------------------------
// Grid – a rectangular table of string cells with named columns
// ---------------------------------------------------------------------------

/// The core's sole input shape: every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid, rejecting duplicate column names and ragged rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, GridError> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(GridError::DuplicateColumn(col.clone()));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(GridError::Ragged {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Grid { columns, rows })
    }

    /// Convenience constructor used heavily by tests.
    pub fn from_str_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self, GridError> {
        Grid::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, ignoring whitespace around header names.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.columns.iter().position(|c| c.trim() == name)
    }

    /// Like [`Grid::column_index`] but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, GridError> {
        self.column_index(name)
            .ok_or_else(|| GridError::MissingColumn(name.to_string()))
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace empty cells in `col` with the nearest non-empty value above.
    /// Leading empty cells have nothing to inherit and stay empty.
    pub fn forward_fill(&mut self, col: usize) {
        let mut last: Option<String> = None;
        for row in &mut self.rows {
            let Some(cell) = row.get_mut(col) else {
                continue;
            };
            if cell.trim().is_empty() {
                if let Some(prev) = &last {
                    *cell = prev.clone();
                }
            } else {
                last = Some(cell.clone());
            }
        }
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, col: usize) -> Vec<&str> {
        (0..self.rows.len()).map(|r| self.cell(r, col)).collect()
    }
}
