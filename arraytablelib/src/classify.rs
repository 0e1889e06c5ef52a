//! Input classification.
//!
//! Pure predicates over an array's shape and element types. They never look
//! at cell values and are the only gate deciding whether an array can be
//! rendered as a table.

use std::fmt;

use crate::data::{Array, DType, Schema};

/// A non-fatal diagnostic raised while accepting an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Caller-supplied labels replace the structured field names
    CustomLabels { fields: Vec<String> },
    /// A 2D array of single-field records; should be a plain 2D array instead
    AmbiguousStructuredShape { shape: Vec<usize>, field: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CustomLabels { fields } => write!(
                f,
                "using custom labels in place of field names [{}]",
                fields.join(", ")
            ),
            Warning::AmbiguousStructuredShape { shape, field } => write!(
                f,
                "2-dimensional arrays with 1D structured elements are not acceptable \
                 (shape {:?}, field '{}'); express them as a plain 2D array of the field type",
                shape, field
            ),
        }
    }
}

/// Outcome of the 2D check, with any warnings it raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_2d: bool,
    pub warnings: Vec<Warning>,
}

/// Whether a dtype holds a scalar rather than a sub-array.
pub fn is_flat_dtype(dtype: &DType) -> bool {
    dtype.shape.is_empty()
}

/// Whether a dtype's kind is boolean, integer, float or complex.
pub fn is_numerical_dtype(dtype: &DType) -> bool {
    dtype.kind.is_numerical()
}

/// Whether the array is made of named records.
pub fn is_structured_array(array: &Array) -> bool {
    !array.schema().fields().is_empty()
}

/// Whether every value in the array is of a numerical kind.
///
/// Structured arrays are numerical only if all of their fields are.
pub fn is_numerical_array(array: &Array) -> bool {
    match array.schema() {
        Schema::Plain(dtype) => is_numerical_dtype(dtype),
        Schema::Structured(fields) => fields.iter().all(|f| is_numerical_dtype(&f.dtype)),
    }
}

/// Decide whether the array is a 2D table, logging any warning raised.
pub fn check_2d(array: &Array) -> Verdict {
    let mut warnings = Vec::new();
    let shape = array.shape();

    let is_2d = match array.schema() {
        // Sub-array dimensions add to the array's own.
        Schema::Plain(dtype) => is_flat_dtype(dtype) && shape.len() == 2,
        Schema::Structured(fields) if shape.len() == 2 && fields.len() == 1 => {
            warnings.push(Warning::AmbiguousStructuredShape {
                shape: shape.to_vec(),
                field: fields[0].name.clone(),
            });
            false
        }
        Schema::Structured(fields) => {
            shape.len() == 1 && fields.iter().all(|f| is_flat_dtype(&f.dtype))
        }
    };

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Verdict { is_2d, warnings }
}

/// Whether the array is a 2D table.
pub fn is_2d_array(array: &Array) -> bool {
    check_2d(array).is_2d
}
