//! Array model: element types, cell values and the array container.
//!
//! This is the input side of the renderer. An [`Array`] pairs a [`Schema`]
//! (what one element looks like) with an outer shape and a row-major cell
//! buffer. Nothing here decides whether an array is renderable; that is
//! the job of [`crate::classify`].

pub mod array;
pub mod dtype;
pub mod value;

pub use array::Array;
pub use dtype::{DType, Field, Kind, Schema};
pub use value::Value;
