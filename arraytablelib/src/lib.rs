//! # arraytablelib
//!
//! Render 2-dimensional arrays as bounded, formatted text or HTML tables.
//!
//! ## Overview
//!
//! An [`Array`] is either a homogeneous 2D grid or a 1D sequence of named
//! records whose fields become columns. A [`TableRenderer`] validates the
//! array once, resolves a label and a [`Formatter`] for every column, and
//! then renders any number of times:
//!
//! - **Text**: cells joined by a separator, one line per row
//! - **HTML**: a `<table>` fragment for notebooks and web pages
//!
//! Both outputs show at most `max_rows` rows and end with a notice counting
//! the rows left out.
//!
//! ## Features
//!
//! - **Structured arrays**: field names become labels, numerical fields get
//!   fixed-precision formatting and other fields are passed through
//! - **Fail-fast construction**: shape, label and formatter problems are
//!   reported before anything is rendered
//! - **Per-call overrides**: row limit, separator, header, indentation and
//!   centring can change per render without rebuilding
//!
//! ## Example
//!
//! ```rust
//! use arraytablelib::{Array, Field, Kind, TableRenderer, TextOptions, Value};
//!
//! let array = Array::structured(
//!     vec![Field::new("name", Kind::Text), Field::new("score", Kind::Float)],
//!     vec![
//!         vec![Value::from("ann"), Value::from(0.5)],
//!         vec![Value::from("bob"), Value::from(0.25)],
//!         vec![Value::from("cid"), Value::from(0.75)],
//!     ],
//! )
//! .unwrap();
//!
//! let table = TableRenderer::builder(array).max_rows(2).build().unwrap();
//! assert_eq!(
//!     table.to_text().unwrap(),
//!     "name | score\nann | 0.500\nbob | 0.250\n... (1 rows sipped)"
//! );
//!
//! let everything = table
//!     .render_as_text(&TextOptions::new().max_rows(3).display_head(false))
//!     .unwrap();
//! assert_eq!(everything.lines().count(), 3);
//! ```

pub mod classify;
pub mod data;
pub mod display;
pub mod error;
pub mod format;
pub mod options;
pub mod output;

pub use classify::{
    check_2d, is_2d_array, is_flat_dtype, is_numerical_array, is_numerical_dtype,
    is_structured_array, Verdict, Warning,
};
pub use data::{Array, DType, Field, Kind, Schema, Value};
pub use display::{DisplaySink, WriterSink};
pub use error::TableError;
pub use format::{format_fixed, format_identity, FormatError, Formatter, DEFAULT_PRECISION};
pub use options::{HtmlOptions, RenderConfig, TextOptions};
pub use output::{Column, TableRenderer, TableRendererBuilder};

/// Result type for arraytablelib operations
pub type Result<T> = std::result::Result<T, TableError>;
