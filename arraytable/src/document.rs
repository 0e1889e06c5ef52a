//! JSON array documents.
//!
//! A document describes one array:
//!
//! ```json
//! {"dtype": "i", "data": [[1, 2], [3, 4]]}
//! {"fields": [{"name": "name", "dtype": "U"}, {"name": "score", "dtype": "f"}],
//!  "data": [["ann", 0.5], {"name": "bob", "score": 0.25}]}
//! ```
//!
//! Plain documents derive their shape from the nesting of `data` unless a
//! `shape` is given. Structured documents default to one record per entry of
//! `data`; records are lists in field order or objects keyed by field name.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use arraytablelib::{Array, DType, Field, Kind, Schema, Value};
use serde::Deserialize;
use serde_json::Value as Json;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    pub dtype: String,
    #[serde(default)]
    pub shape: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayDocument {
    /// Element kind of a plain array
    pub dtype: Option<String>,
    /// Sub-array shape of every plain element
    #[serde(default)]
    pub sub_shape: Vec<usize>,
    /// Record layout of a structured array
    pub fields: Option<Vec<FieldSpec>>,
    /// Outer shape; derived from `data` when absent
    pub shape: Option<Vec<usize>>,
    pub data: Json,
}

impl ArrayDocument {
    pub fn parse(source: &str) -> anyhow::Result<Self> {
        serde_json::from_str(source).context("failed to parse array document")
    }

    /// Convert the document into an array.
    pub fn into_array(self) -> anyhow::Result<Array> {
        match (self.dtype, self.fields) {
            (Some(_), Some(_)) => bail!("a document takes either 'dtype' or 'fields', not both"),
            (None, None) => bail!("a document needs 'dtype' or 'fields'"),
            (Some(code), None) => {
                let dtype = DType::sub_array(parse_kind(&code)?, self.sub_shape);
                let shape = match self.shape {
                    Some(shape) => shape,
                    None => derive_shape(&self.data, dtype.shape.len()),
                };
                let mut elements = Vec::new();
                collect_elements(&self.data, &shape, 0, &mut elements)?;
                let cells = elements
                    .into_iter()
                    .map(|e| element_value(e, &dtype))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(Array::new(Schema::Plain(dtype), shape, cells)?)
            }
            (None, Some(specs)) => {
                if !self.sub_shape.is_empty() {
                    bail!("'sub_shape' applies to plain documents; set 'shape' per field instead");
                }
                let fields = specs
                    .into_iter()
                    .map(|spec| {
                        let kind = parse_kind(&spec.dtype)?;
                        Ok(Field::new(spec.name, DType::sub_array(kind, spec.shape)))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                let shape = match self.shape {
                    Some(shape) => shape,
                    None => vec![self.data.as_array().map(Vec::len).unwrap_or(0)],
                };
                let mut records = Vec::new();
                collect_elements(&self.data, &shape, 0, &mut records)?;
                let mut cells = Vec::with_capacity(records.len() * fields.len());
                for (i, record) in records.into_iter().enumerate() {
                    cells.extend(
                        record_values(record, &fields).with_context(|| format!("record {}", i))?,
                    );
                }
                Ok(Array::new(Schema::Structured(fields), shape, cells)?)
            }
        }
    }
}

fn parse_kind(code: &str) -> anyhow::Result<Kind> {
    Kind::from_str(code).map_err(|e| anyhow!(e))
}

/// Dimensions of the first path through nested lists, minus the trailing
/// `sub_dims` that belong to each element.
fn derive_shape(data: &Json, sub_dims: usize) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut current = data;
    while let Json::Array(items) = current {
        shape.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    shape.truncate(shape.len().saturating_sub(sub_dims));
    shape
}

/// Gather the elements found `shape.len()` list levels deep, checking every
/// level has the declared length.
fn collect_elements<'a>(
    data: &'a Json,
    shape: &[usize],
    level: usize,
    out: &mut Vec<&'a Json>,
) -> anyhow::Result<()> {
    if level == shape.len() {
        out.push(data);
        return Ok(());
    }
    let items = data
        .as_array()
        .ok_or_else(|| anyhow!("expected a list at depth {}", level))?;
    if items.len() != shape[level] {
        bail!(
            "expected {} item(s) at depth {}, found {}",
            shape[level],
            level,
            items.len()
        );
    }
    for item in items {
        collect_elements(item, shape, level + 1, out)?;
    }
    Ok(())
}

fn record_values(record: &Json, fields: &[Field]) -> anyhow::Result<Vec<Value>> {
    match record {
        Json::Array(items) => {
            if items.len() != fields.len() {
                bail!("expected {} value(s), found {}", fields.len(), items.len());
            }
            items
                .iter()
                .zip(fields)
                .map(|(item, field)| element_value(item, &field.dtype))
                .collect()
        }
        Json::Object(map) => fields
            .iter()
            .map(|field| {
                let item = map
                    .get(&field.name)
                    .ok_or_else(|| anyhow!("missing field '{}'", field.name))?;
                element_value(item, &field.dtype)
            })
            .collect(),
        other => bail!("expected a list or an object, found {}", other),
    }
}

/// Convert one element; sub-array elements become [`Value::Array`].
fn element_value(json: &Json, dtype: &DType) -> anyhow::Result<Value> {
    if dtype.shape.is_empty() {
        return scalar_value(json, dtype.kind);
    }
    let mut leaves = Vec::new();
    collect_elements(json, &dtype.shape, 0, &mut leaves)?;
    let items = leaves
        .into_iter()
        .map(|leaf| scalar_value(leaf, dtype.kind))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Value::Array(items))
}

fn scalar_value(json: &Json, kind: Kind) -> anyhow::Result<Value> {
    let value = match kind {
        Kind::Bool => json.as_bool().map(Value::Bool),
        Kind::Unsigned => json.as_u64().map(Value::UInt),
        Kind::Signed => json.as_i64().map(Value::Int),
        Kind::Float => float_value(json).map(Value::Float),
        Kind::Complex => match json {
            Json::Array(parts) if parts.len() == 2 => {
                match (float_value(&parts[0]), float_value(&parts[1])) {
                    (Some(re), Some(im)) => Some(Value::complex(re, im)),
                    _ => None,
                }
            }
            other => float_value(other).map(|re| Value::complex(re, 0.0)),
        },
        Kind::Text | Kind::Bytes | Kind::Object | Kind::DateTime | Kind::TimeDelta => {
            Some(match json {
                Json::String(s) => Value::Text(s.clone()),
                other => Value::Text(other.to_string()),
            })
        }
    };
    value.ok_or_else(|| anyhow!("{} is not a valid '{}' value", json, kind.code()))
}

/// Numbers, or strings such as "nan" and "inf" that JSON cannot express.
fn float_value(json: &Json) -> Option<f64> {
    match json {
        Json::String(s) => s.parse().ok(),
        other => other.as_f64(),
    }
}
