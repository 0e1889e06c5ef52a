//! Error types for arraytablelib

use thiserror::Error;

use crate::format::FormatError;

/// Errors that can occur while building or rendering a table.
///
/// Everything except [`TableError::Format`] and [`TableError::Display`] is
/// raised during construction; a failed construction yields no renderer.
#[derive(Error, Debug)]
pub enum TableError {
    /// The array is not a 2-dimensional table
    #[error("invalid array shape: {0}")]
    InvalidShape(String),

    /// Column labels are missing or do not match the columns
    #[error("invalid column labels: {0}")]
    InvalidLabels(String),

    /// Column formatters do not match the columns
    #[error("invalid column formatters: {0}")]
    InvalidFormatters(String),

    /// A render setting is out of range
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    /// The cell buffer does not match the declared shape
    #[error("invalid array data: {0}")]
    InvalidData(String),

    /// A column formatter failed while rendering
    #[error("failed to format column '{column}': {source}")]
    Format {
        column: String,
        source: FormatError,
    },

    /// The display sink rejected the rendered output
    #[error("display error: {0}")]
    Display(#[from] std::io::Error),
}
