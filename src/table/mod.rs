//! Table management module
//!
//! Provides the ordered collection of equal-length columns and its derived
//! name index.

mod table;

pub use table::Table;
