//! Output formatting: present arrays as tables.
//!
//! - **TableRenderer**: validated, immutable table built from an array
//! - **Column**: a label paired with its formatter
//!
//! Rendering is split by format: `text` for separator-joined lines and
//! `html` for a `<table>` fragment. Both only read the renderer.
//!
//! ## Example
//!
//! ```rust
//! use arraytablelib::{Array, Kind, TableRenderer, Value};
//!
//! let array = Array::plain(
//!     Kind::Signed,
//!     vec![vec![Value::from(5), Value::from(6)]],
//! )
//! .unwrap();
//! let table = TableRenderer::builder(array)
//!     .column_names(["a", "b"])
//!     .build()
//!     .unwrap();
//! assert_eq!(table.to_text().unwrap(), "a | b\n5.000 | 6.000");
//! ```

mod html;
pub mod table;
mod text;

pub use table::{Column, TableRenderer, TableRendererBuilder};
