//! Element type descriptors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of a scalar element.
///
/// Mirrors the single-character kind codes of numpy dtypes, which is also
/// how the kinds are spelled in array documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Unsigned,
    Signed,
    Float,
    Complex,
    Text,
    Bytes,
    Object,
    DateTime,
    TimeDelta,
}

impl Kind {
    /// Whether values of this kind get the numeric formatter by default.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            Kind::Bool | Kind::Unsigned | Kind::Signed | Kind::Float | Kind::Complex
        )
    }

    /// Single-character kind code.
    pub fn code(&self) -> char {
        match self {
            Kind::Bool => 'b',
            Kind::Unsigned => 'u',
            Kind::Signed => 'i',
            Kind::Float => 'f',
            Kind::Complex => 'c',
            Kind::Text => 'U',
            Kind::Bytes => 'S',
            Kind::Object => 'O',
            Kind::DateTime => 'M',
            Kind::TimeDelta => 'm',
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    // Codes are case-sensitive ('U' is text, 'u' is unsigned); names are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" | "?" => return Ok(Kind::Bool),
            "u" | "B" => return Ok(Kind::Unsigned),
            "i" => return Ok(Kind::Signed),
            "f" => return Ok(Kind::Float),
            "c" => return Ok(Kind::Complex),
            "U" => return Ok(Kind::Text),
            "S" => return Ok(Kind::Bytes),
            "O" => return Ok(Kind::Object),
            "M" => return Ok(Kind::DateTime),
            "m" => return Ok(Kind::TimeDelta),
            _ => {}
        }
        match s.to_lowercase().as_str() {
            "bool" | "boolean" => Ok(Kind::Bool),
            "uint" | "unsigned" => Ok(Kind::Unsigned),
            "int" | "signed" => Ok(Kind::Signed),
            "float" => Ok(Kind::Float),
            "complex" => Ok(Kind::Complex),
            "str" | "text" | "string" => Ok(Kind::Text),
            "bytes" => Ok(Kind::Bytes),
            "object" => Ok(Kind::Object),
            "datetime" => Ok(Kind::DateTime),
            "timedelta" => Ok(Kind::TimeDelta),
            _ => Err(format!("Unknown element kind: {}", s)),
        }
    }
}

/// Type of a single element: a kind plus an optional sub-array shape.
///
/// An empty `shape` means the element is a plain scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DType {
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shape: Vec<usize>,
}

impl DType {
    /// Scalar dtype of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            shape: Vec::new(),
        }
    }

    /// Sub-array dtype: every element holds an array of `shape`.
    pub fn sub_array(kind: Kind, shape: Vec<usize>) -> Self {
        Self { kind, shape }
    }
}

impl From<Kind> for DType {
    fn from(kind: Kind) -> Self {
        DType::new(kind)
    }
}

/// A named field of a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub dtype: DType,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: impl Into<DType>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
        }
    }
}

/// Layout of one array element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Every element is a single value of one dtype
    Plain(DType),
    /// Every element is a record of named, independently typed fields
    Structured(Vec<Field>),
}

impl Schema {
    /// Number of values stored per element.
    pub fn width(&self) -> usize {
        match self {
            Schema::Plain(_) => 1,
            Schema::Structured(fields) => fields.len(),
        }
    }

    /// Record fields, empty for a plain schema.
    pub fn fields(&self) -> &[Field] {
        match self {
            Schema::Plain(_) => &[],
            Schema::Structured(fields) => fields,
        }
    }
}
