//! colframe — in-memory columnar table
//!
//! A small column-oriented data structure built from named, homogeneously
//! typed columns. Supports structural edits (add/drop/rename columns,
//! add/drop rows), projection, predicate filtering, stable sort-by-column,
//! and elementwise arithmetic between columns of compatible kinds.

pub mod data;
pub mod table;

// Re-export main types
pub use data::{Column, ColumnData, DataType, Value};
pub use table::Table;

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Inconsistent series length: expected {expected}, got {actual}")]
    InconsistentLength { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column already exists: {0}")]
    ColumnExists(String),

    #[error("Row index out of bounds: {index} (row count {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Column is empty: {0}")]
    EmptyColumn(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;
