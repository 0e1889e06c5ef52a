//! The array container.

use crate::data::dtype::{DType, Field, Schema};
use crate::data::value::Value;
use crate::error::TableError;
use crate::Result;

/// An n-dimensional array of elements stored row-major.
///
/// Each element occupies `schema.width()` consecutive cells: one for a plain
/// schema, one per field for a structured schema. The array never changes
/// once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    schema: Schema,
    shape: Vec<usize>,
    cells: Vec<Value>,
}

impl Array {
    /// Build an array from a flat, row-major cell buffer.
    ///
    /// Fails with [`TableError::InvalidData`] when the buffer length is not
    /// `product(shape) * schema.width()`, or when a structured schema has no
    /// fields.
    pub fn new(schema: Schema, shape: Vec<usize>, cells: Vec<Value>) -> Result<Self> {
        if matches!(&schema, Schema::Structured(fields) if fields.is_empty()) {
            return Err(TableError::InvalidData(
                "a structured schema needs at least one field".to_string(),
            ));
        }
        let elements: usize = shape.iter().product();
        let expected = elements * schema.width();
        if cells.len() != expected {
            return Err(TableError::InvalidData(format!(
                "shape {:?} with {} value(s) per element needs {} cells, got {}",
                shape,
                schema.width(),
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            schema,
            shape,
            cells,
        })
    }

    /// Build a homogeneous 2D grid from rows of equal length.
    pub fn plain(dtype: impl Into<DType>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(i) = rows.iter().position(|r| r.len() != columns) {
            return Err(TableError::InvalidData(format!(
                "row {} has {} values, expected {}",
                i,
                rows[i].len(),
                columns
            )));
        }
        let shape = vec![rows.len(), columns];
        let cells = rows.into_iter().flatten().collect();
        Self::new(Schema::Plain(dtype.into()), shape, cells)
    }

    /// Build a 1D structured array, one record per row.
    pub fn structured(fields: Vec<Field>, records: Vec<Vec<Value>>) -> Result<Self> {
        if let Some(i) = records.iter().position(|r| r.len() != fields.len()) {
            return Err(TableError::InvalidData(format!(
                "record {} has {} values, expected {}",
                i,
                records[i].len(),
                fields.len()
            )));
        }
        let shape = vec![records.len()];
        let cells = records.into_iter().flatten().collect();
        Self::new(Schema::Structured(fields), shape, cells)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Length of the first dimension.
    pub fn num_rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Number of cells spanned by one row.
    pub fn row_len(&self) -> usize {
        let inner: usize = self.shape.iter().skip(1).product();
        inner * self.schema.width()
    }

    /// Cells of row `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        if index >= self.num_rows() {
            return None;
        }
        let len = self.row_len();
        self.cells.get(index * len..(index + 1) * len)
    }

    /// Iterate over the first `limit` rows in order.
    pub fn rows(&self, limit: usize) -> impl Iterator<Item = &[Value]> {
        (0..limit.min(self.num_rows())).filter_map(move |i| self.row(i))
    }
}
