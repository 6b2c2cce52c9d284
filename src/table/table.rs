//! Table implementation
//!
//! A table is an ordered sequence of equal-length columns plus a derived
//! name→position index. The column order is the source of truth; the index
//! is a cache that is patched on every structural edit.

use crate::data::{Column, Value};
use crate::{FrameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An ordered collection of equal-length columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Columns in left-to-right order
    columns: Vec<Column>,
    /// (row_count, col_count)
    shape: (usize, usize),
    /// Column name → position in `columns`
    name_index: HashMap<String, usize>,
}

impl Table {
    /// Create a table from equal-length columns
    ///
    /// Every column must have the same length as the first, and column names
    /// must be unique. An empty column vector yields the canonical empty
    /// table.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Ok(Self::empty());
        }

        let row_count = columns[0].len();
        for col in &columns {
            if col.len() != row_count {
                return Err(FrameError::InconsistentLength {
                    expected: row_count,
                    actual: col.len(),
                });
            }
        }

        let mut name_index = HashMap::with_capacity(columns.len());
        for (idx, col) in columns.iter().enumerate() {
            if name_index.insert(col.name().to_string(), idx).is_some() {
                return Err(FrameError::ColumnExists(col.name().to_string()));
            }
        }

        let shape = (row_count, columns.len());
        Ok(Self {
            columns,
            shape,
            name_index,
        })
    }

    /// The canonical empty table: no columns, shape (0, 0)
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            shape: (0, 0),
            name_index: HashMap::new(),
        }
    }

    /// Get (row_count, col_count)
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn row_count(&self) -> usize {
        self.shape.0
    }

    pub fn col_count(&self) -> usize {
        self.shape.1
    }

    /// Column names in left-to-right order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Borrow a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        let idx = self.column_position(name)?;
        Ok(&self.columns[idx])
    }

    fn column_position(&self, name: &str) -> Result<usize> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Append a column on the right
    ///
    /// The column's length must match the current row count. Adding to the
    /// empty table is allowed and seeds the row count.
    pub fn add_column(&mut self, col: Column) -> Result<()> {
        if !self.columns.is_empty() && col.len() != self.shape.0 {
            return Err(FrameError::InconsistentLength {
                expected: self.shape.0,
                actual: col.len(),
            });
        }
        if self.name_index.contains_key(col.name()) {
            return Err(FrameError::ColumnExists(col.name().to_string()));
        }

        self.name_index
            .insert(col.name().to_string(), self.columns.len());
        self.shape = (col.len(), self.columns.len() + 1);
        self.columns.push(col);
        Ok(())
    }

    /// Remove a column by name
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let idx = self.column_position(name)?;
        self.columns.remove(idx);
        self.name_index.remove(name);

        // Every column to the right of the removed one shifts left by one.
        for pos in self.name_index.values_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }

        if self.columns.is_empty() {
            self.shape = (0, 0);
        } else {
            self.shape.1 -= 1;
        }
        Ok(())
    }

    /// Rename a column, keeping the name index in sync
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        let idx = self.column_position(old)?;
        if old == new {
            return Ok(());
        }
        if self.name_index.contains_key(new) {
            return Err(FrameError::ColumnExists(new.to_string()));
        }

        self.columns[idx].set_name(new);
        self.name_index.remove(old);
        self.name_index.insert(new.to_string(), idx);
        Ok(())
    }

    /// Build a new table containing copies of the named columns, in order
    pub fn select_columns(&self, names: &[&str]) -> Result<Table> {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            selected.push(self.column(name)?.clone());
        }
        Table::new(selected)
    }

    /// Append one row, given one value per column in column order
    ///
    /// The whole row is validated against the column kinds before any column
    /// is touched, so a mismatch leaves the table unchanged.
    pub fn add_row(&mut self, values: Vec<Value>) -> Result<()> {
        if self.columns.is_empty() {
            return Err(FrameError::InvalidType(
                "cannot append a row to a table with no columns".to_string(),
            ));
        }
        if values.len() != self.shape.1 {
            return Err(FrameError::InconsistentLength {
                expected: self.shape.1,
                actual: values.len(),
            });
        }
        for (col, value) in self.columns.iter().zip(values.iter()) {
            if value.data_type() != col.data_type() {
                return Err(FrameError::InvalidType(format!(
                    "column '{}' holds {}, row supplies {}",
                    col.name(),
                    col.data_type(),
                    value.data_type()
                )));
            }
        }

        for (col, value) in self.columns.iter_mut().zip(values.into_iter()) {
            col.push(value)?;
        }
        self.shape.0 += 1;
        Ok(())
    }

    /// Remove one row from every column
    pub fn drop_row(&mut self, index: usize) -> Result<()> {
        if index >= self.shape.0 {
            return Err(FrameError::IndexOutOfBounds {
                index,
                len: self.shape.0,
            });
        }
        for col in &mut self.columns {
            col.erase(index)?;
        }
        self.shape.0 -= 1;
        Ok(())
    }

    /// Project rows into a new table
    ///
    /// `range = Some((begin, end))` copies the `[begin, end)` slice of every
    /// column and takes precedence over `indices`. `indices = Some(list)`
    /// gathers the listed positions after sorting them ascending, so the
    /// output row order follows ascending index order rather than the
    /// caller's order. With neither selector the canonical empty table is
    /// returned.
    pub fn select_rows(
        &self,
        range: Option<(usize, usize)>,
        indices: Option<&[usize]>,
    ) -> Result<Table> {
        if let Some((begin, end)) = range {
            if begin > end || end > self.shape.0 {
                return Err(FrameError::IndexOutOfBounds {
                    index: begin.max(end),
                    len: self.shape.0,
                });
            }
            let columns: Vec<Column> = self.columns.iter().map(|c| c.slice(begin, end)).collect();
            return Ok(Table {
                columns,
                shape: (end - begin, self.shape.1),
                // Row projection does not change column identity, so the
                // existing index carries over.
                name_index: self.name_index.clone(),
            });
        }

        if let Some(list) = indices {
            let mut sorted = list.to_vec();
            sorted.sort_unstable();
            if let Some(&last) = sorted.last() {
                if last >= self.shape.0 {
                    return Err(FrameError::IndexOutOfBounds {
                        index: last,
                        len: self.shape.0,
                    });
                }
            }
            let columns = self
                .columns
                .iter()
                .map(|c| c.take(&sorted))
                .collect::<Result<Vec<Column>>>()?;
            return Ok(Table {
                columns,
                shape: (sorted.len(), self.shape.1),
                name_index: self.name_index.clone(),
            });
        }

        Ok(Table::empty())
    }

    /// Keep the rows where `predicate` holds on the named column
    ///
    /// The surviving rows come out in ascending row order (see
    /// [`Table::select_rows`]).
    pub fn filter<P>(&self, name: &str, predicate: P) -> Result<Table>
    where
        P: Fn(&Value) -> bool,
    {
        let idx = self.column_position(name)?;
        let col = &self.columns[idx];

        let mut hits = Vec::new();
        for row in 0..col.len() {
            if let Some(value) = col.get(row) {
                if predicate(&value) {
                    hits.push(row);
                }
            }
        }
        log::debug!(
            "filter on '{}' kept {} of {} rows",
            name,
            hits.len(),
            self.shape.0
        );
        self.select_rows(None, Some(&hits))
    }

    /// Sort all rows by the named column
    ///
    /// The column's argsort permutation is computed once and applied to every
    /// column, so row identity across columns is preserved. `descending`
    /// reverses the ascending permutation (see
    /// [`Column::argsort_indices`](crate::data::Column::argsort_indices)).
    pub fn sort(&mut self, name: &str, descending: bool) -> Result<()> {
        let idx = self.column_position(name)?;
        let perm = self.columns[idx].argsort_indices(descending);
        for col in &mut self.columns {
            col.apply_permutation(&perm)?;
        }
        log::debug!(
            "sorted {} rows by '{}' ({})",
            self.shape.0,
            name,
            if descending { "descending" } else { "ascending" }
        );
        Ok(())
    }

    /// Render the table as a tab-separated grid
    ///
    /// Header row of column names, then one line per row with a leading row
    /// index. A convenience for humans, not an interchange format.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, col) in self.columns.iter().enumerate() {
            if idx > 0 {
                write!(f, "\t")?;
            }
            write!(f, "{}", col.name())?;
        }
        writeln!(f)?;
        for row in 0..self.shape.0 {
            write!(f, "{}", row)?;
            for col in &self.columns {
                if let Some(value) = col.get(row) {
                    write!(f, "\t{}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
