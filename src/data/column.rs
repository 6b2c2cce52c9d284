//! Kind-tagged column storage
//!
//! A column is a named, resizable sequence of scalars of a single kind. The
//! active storage variant is fixed at construction; only the name and the
//! sequence contents change afterwards.

use super::{DataType, Value};
use crate::{FrameError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Type-specific storage for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

/// Elementwise arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    fn apply_i64(self, a: i64, b: i64) -> i64 {
        match self {
            ArithOp::Add => a.wrapping_add(b),
            ArithOp::Sub => a.wrapping_sub(b),
            ArithOp::Mul => a.wrapping_mul(b),
            // Truncating division, native semantics
            ArithOp::Div => a / b,
        }
    }

    fn apply_f64(self, a: f64, b: f64) -> f64 {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
        }
    }
}

/// A named, single-kind column of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from pre-built storage
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create an integer column
    pub fn from_ints(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Int(values))
    }

    /// Create a float column
    pub fn from_floats(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    /// Create a boolean column
    pub fn from_bools(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(name, ColumnData::Bool(values))
    }

    /// Create a string column
    pub fn from_strs(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, ColumnData::Str(values))
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the scalar kind of this column
    pub fn data_type(&self) -> DataType {
        match &self.data {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Str(_) => DataType::Str,
        }
    }

    /// Borrow the raw storage
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a tagged view of the value at the given index
    pub fn get(&self, index: usize) -> Option<Value> {
        match &self.data {
            ColumnData::Int(v) => v.get(index).map(|x| Value::Int(*x)),
            ColumnData::Float(v) => v.get(index).map(|x| Value::Float(*x)),
            ColumnData::Bool(v) => v.get(index).map(|x| Value::Bool(*x)),
            ColumnData::Str(v) => v.get(index).map(|x| Value::Str(x.clone())),
        }
    }

    /// Borrow the integer storage, if this is an integer column
    pub fn as_ints(&self) -> Option<&[i64]> {
        match &self.data {
            ColumnData::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the float storage, if this is a float column
    pub fn as_floats(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the boolean storage, if this is a boolean column
    pub fn as_bools(&self) -> Option<&[bool]> {
        match &self.data {
            ColumnData::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the string storage, if this is a string column
    pub fn as_strs(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Append a value whose kind matches the column kind
    pub fn push(&mut self, value: Value) -> Result<()> {
        let kind = self.data_type();
        match (&mut self.data, value) {
            (ColumnData::Int(v), Value::Int(x)) => v.push(x),
            (ColumnData::Float(v), Value::Float(x)) => v.push(x),
            (ColumnData::Bool(v), Value::Bool(x)) => v.push(x),
            (ColumnData::Str(v), Value::Str(x)) => v.push(x),
            (_, value) => {
                return Err(FrameError::InvalidType(format!(
                    "column '{}' holds {}, cannot append {}",
                    self.name,
                    kind,
                    value.data_type()
                )))
            }
        }
        Ok(())
    }

    /// Remove the element at the given index
    ///
    /// The empty check happens before the bounds check, so erasing from an
    /// empty column always reports `EmptyColumn` regardless of the index.
    pub fn erase(&mut self, index: usize) -> Result<()> {
        if self.is_empty() {
            return Err(FrameError::EmptyColumn(self.name.clone()));
        }
        if index >= self.len() {
            return Err(FrameError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        match &mut self.data {
            ColumnData::Int(v) => {
                v.remove(index);
            }
            ColumnData::Float(v) => {
                v.remove(index);
            }
            ColumnData::Bool(v) => {
                v.remove(index);
            }
            ColumnData::Str(v) => {
                v.remove(index);
            }
        }
        Ok(())
    }

    /// Sort the column in place, ascending in the natural order of its kind
    pub fn sort(&mut self) {
        match &mut self.data {
            ColumnData::Int(v) => v.sort_unstable(),
            ColumnData::Float(v) => v.sort_unstable_by(|a, b| a.total_cmp(b)),
            ColumnData::Bool(v) => v.sort_unstable(),
            ColumnData::Str(v) => v.sort_unstable(),
        }
    }

    /// Compute the permutation of `0..len` that stably sorts the column
    /// ascending.
    ///
    /// With `descending` set, the ascending permutation is reversed wholesale
    /// rather than re-sorted, so ties among equal values come out in reversed
    /// original order. This matches the defined descending semantics; it is
    /// not a descending-stable sort.
    pub fn argsort_indices(&self, descending: bool) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        match &self.data {
            ColumnData::Int(v) => indices.sort_by(|&a, &b| v[a].cmp(&v[b])),
            ColumnData::Float(v) => indices.sort_by(|&a, &b| v[a].total_cmp(&v[b])),
            ColumnData::Bool(v) => indices.sort_by(|&a, &b| v[a].cmp(&v[b])),
            ColumnData::Str(v) => indices.sort_by(|&a, &b| v[a].cmp(&v[b])),
        }
        if descending {
            indices.reverse();
        }
        indices
    }

    /// Rewrite the column in place to the order given by `indices`
    ///
    /// `indices` must have the same length as the column and every entry must
    /// be in bounds. Duplicate entries are not detected; the caller is
    /// expected to pass a permutation (argsort output).
    pub fn apply_permutation(&mut self, indices: &[usize]) -> Result<()> {
        if indices.len() != self.len() {
            return Err(FrameError::InconsistentLength {
                expected: self.len(),
                actual: indices.len(),
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(FrameError::IndexOutOfBounds {
                index: bad,
                len: self.len(),
            });
        }
        match &mut self.data {
            ColumnData::Int(v) => *v = indices.iter().map(|&i| v[i]).collect(),
            ColumnData::Float(v) => *v = indices.iter().map(|&i| v[i]).collect(),
            ColumnData::Bool(v) => *v = indices.iter().map(|&i| v[i]).collect(),
            ColumnData::Str(v) => *v = indices.iter().map(|&i| v[i].clone()).collect(),
        }
        Ok(())
    }

    /// Compute the argsort permutation, apply it, and return it
    pub fn argsort(&mut self, descending: bool) -> Result<Vec<usize>> {
        let indices = self.argsort_indices(descending);
        self.apply_permutation(&indices)?;
        Ok(indices)
    }

    /// Gather the given positions into a new column, preserving their order
    pub fn take(&self, indices: &[usize]) -> Result<Column> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(FrameError::IndexOutOfBounds {
                index: bad,
                len: self.len(),
            });
        }
        let data = match &self.data {
            ColumnData::Int(v) => ColumnData::Int(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Float(v) => ColumnData::Float(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Bool(v) => ColumnData::Bool(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Str(v) => {
                ColumnData::Str(indices.iter().map(|&i| v[i].clone()).collect())
            }
        };
        Ok(Column::new(self.name.clone(), data))
    }

    /// Copy the `[start, end)` slice into a new column
    ///
    /// Panics if the range is out of bounds, like slice indexing; callers
    /// validate the range first.
    pub(crate) fn slice(&self, start: usize, end: usize) -> Column {
        let data = match &self.data {
            ColumnData::Int(v) => ColumnData::Int(v[start..end].to_vec()),
            ColumnData::Float(v) => ColumnData::Float(v[start..end].to_vec()),
            ColumnData::Bool(v) => ColumnData::Bool(v[start..end].to_vec()),
            ColumnData::Str(v) => ColumnData::Str(v[start..end].to_vec()),
        };
        Column::new(self.name.clone(), data)
    }

    /// Kind-pairwise elementwise arithmetic
    ///
    /// Int⊕Int stays Int, Float⊕Float stays Float, a mixed Int/Float pair
    /// promotes the integer side to Float, and Str + Str concatenates. Every
    /// other combination is a type error. The result takes the left operand's
    /// name.
    fn arith(&self, other: &Column, op: ArithOp) -> Result<Column> {
        if self.len() != other.len() {
            return Err(FrameError::InconsistentLength {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let data = match (&self.data, &other.data) {
            (ColumnData::Int(a), ColumnData::Int(b)) => ColumnData::Int(
                a.iter()
                    .zip(b.iter())
                    .map(|(&x, &y)| op.apply_i64(x, y))
                    .collect(),
            ),
            (ColumnData::Float(a), ColumnData::Float(b)) => ColumnData::Float(
                a.iter()
                    .zip(b.iter())
                    .map(|(&x, &y)| op.apply_f64(x, y))
                    .collect(),
            ),
            (ColumnData::Int(a), ColumnData::Float(b)) => ColumnData::Float(
                a.iter()
                    .zip(b.iter())
                    .map(|(&x, &y)| op.apply_f64(x as f64, y))
                    .collect(),
            ),
            (ColumnData::Float(a), ColumnData::Int(b)) => ColumnData::Float(
                a.iter()
                    .zip(b.iter())
                    .map(|(&x, &y)| op.apply_f64(x, y as f64))
                    .collect(),
            ),
            (ColumnData::Str(a), ColumnData::Str(b)) if op == ArithOp::Add => ColumnData::Str(
                a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| format!("{}{}", x, y))
                    .collect(),
            ),
            _ => {
                return Err(FrameError::InvalidType(format!(
                    "unsupported operand kinds: {} {} {}",
                    self.data_type(),
                    op.symbol(),
                    other.data_type()
                )))
            }
        };
        Ok(Column::new(self.name.clone(), data))
    }
}

impl Add for &Column {
    type Output = Result<Column>;

    fn add(self, rhs: Self) -> Self::Output {
        self.arith(rhs, ArithOp::Add)
    }
}

impl Sub for &Column {
    type Output = Result<Column>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.arith(rhs, ArithOp::Sub)
    }
}

impl Mul for &Column {
    type Output = Result<Column>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.arith(rhs, ArithOp::Mul)
    }
}

impl Div for &Column {
    type Output = Result<Column>;

    fn div(self, rhs: Self) -> Self::Output {
        self.arith(rhs, ArithOp::Div)
    }
}
