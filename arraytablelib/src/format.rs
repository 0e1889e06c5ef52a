//! Per-column value formatters.
//!
//! A [`Formatter`] turns one cell into its display string. Every column of a
//! renderer owns exactly one. The defaults are [`Formatter::fixed`] for
//! numerical columns and [`Formatter::identity`] for everything else;
//! callers can inject their own with [`Formatter::new`] or
//! [`Formatter::from_fn`].

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::data::Value;

/// Default number of decimals for numerical columns.
pub const DEFAULT_PRECISION: usize = 3;

/// Failure to turn a value into a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The value has no fixed-precision representation
    #[error("cannot format '{0}' as a fixed-precision number")]
    NotNumeric(String),

    /// Raised by a caller-supplied formatter
    #[error("{0}")]
    Custom(String),
}

type FormatFn = dyn Fn(&Value) -> Result<String, FormatError> + Send + Sync;

/// A shareable `value -> string` strategy.
#[derive(Clone)]
pub struct Formatter(Arc<FormatFn>);

impl Formatter {
    /// Wrap a fallible formatting function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        Formatter(Arc::new(f))
    }

    /// Wrap a formatting function that cannot fail.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Formatter::new(move |v| Ok(f(v)))
    }

    /// Fixed-precision decimal formatter.
    pub fn fixed(precision: usize) -> Self {
        Formatter::new(move |v| format_fixed(v, precision))
    }

    /// Pass-through stringification.
    pub fn identity() -> Self {
        Formatter::from_fn(format_identity)
    }

    pub fn format(&self, value: &Value) -> Result<String, FormatError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

fn fixed_float(x: f64, precision: usize) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.*}", precision, x)
    }
}

fn fixed_integer(digits: String, precision: usize) -> String {
    if precision == 0 {
        digits
    } else {
        format!("{}.{}", digits, "0".repeat(precision))
    }
}

/// Format a numerical value with `precision` decimals.
///
/// Integers keep every digit; booleans count as 1 and 0; complex values are
/// written as `re±imj`.
pub fn format_fixed(value: &Value, precision: usize) -> Result<String, FormatError> {
    match value {
        Value::Bool(b) => Ok(fixed_integer(u8::from(*b).to_string(), precision)),
        Value::Int(v) => Ok(fixed_integer(v.to_string(), precision)),
        Value::UInt(v) => Ok(fixed_integer(v.to_string(), precision)),
        Value::Float(v) => Ok(fixed_float(*v, precision)),
        Value::Complex { re, im } => {
            let sign = if im.is_sign_negative() && !im.is_nan() {
                '-'
            } else {
                '+'
            };
            Ok(format!(
                "{}{}{}j",
                fixed_float(*re, precision),
                sign,
                fixed_float(im.abs(), precision)
            ))
        }
        Value::Text(_) | Value::Array(_) => Err(FormatError::NotNumeric(value.to_string())),
    }
}

/// Stringify a value as-is.
pub fn format_identity(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        other => other.to_string(),
    }
}
