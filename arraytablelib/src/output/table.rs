//! Renderer construction.
//!
//! [`TableRenderer`] is built once through [`TableRendererBuilder`], which
//! runs every check up front: the array must classify as 2D, labels and
//! formatters must line up with the columns, and the render settings must
//! be usable. A successful build is frozen; rendering only reads it.
//!
//! The data flow is:
//! 1. Array (schema, shape, cells)
//! 2. Classification (2D check, numerical kind per column)
//! 3. TableRenderer (labels, formatters, clamped config)
//! 4. Text or HTML string

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::classify::{
    check_2d, is_numerical_array, is_numerical_dtype, is_structured_array, Warning,
};
use crate::data::Array;
use crate::error::TableError;
use crate::format::{Formatter, DEFAULT_PRECISION};
use crate::options::{clamp_rows, RenderConfig, TextOptions};
use crate::Result;

/// A resolved output column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Header label, unique within the table
    pub label: String,
    /// Turns this column's cells into strings
    pub formatter: Formatter,
    /// Whether the column's element kind is numerical
    pub numerical: bool,
}

/// Collects construction parameters for a [`TableRenderer`].
#[derive(Debug, Clone)]
pub struct TableRendererBuilder {
    array: Array,
    config: RenderConfig,
    column_names: Option<Vec<String>>,
    column_formatters: Option<HashMap<String, Formatter>>,
    numerical_precision: usize,
}

impl TableRendererBuilder {
    pub fn new(array: Array) -> Self {
        Self {
            array,
            config: RenderConfig::default(),
            column_names: None,
            column_formatters: None,
            numerical_precision: DEFAULT_PRECISION,
        }
    }

    /// Replace the whole render configuration.
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.config.max_rows = max_rows;
        self
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.config.indent_size = indent_size;
        self
    }

    pub fn display_head(mut self, display_head: bool) -> Self {
        self.config.display_head = display_head;
        self
    }

    pub fn text_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.text_separator = separator.into();
        self
    }

    pub fn centre(mut self, centre: bool) -> Self {
        self.config.centre = centre;
        self
    }

    /// Decimals used by the default numerical formatter.
    pub fn numerical_precision(mut self, precision: usize) -> Self {
        self.numerical_precision = precision;
        self
    }

    /// Column labels, in output order.
    ///
    /// Required for plain arrays; overrides the field names of structured
    /// arrays.
    pub fn column_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Formatters keyed by column label; must cover every column.
    pub fn column_formatters<I, S>(mut self, formatters: I) -> Self
    where
        I: IntoIterator<Item = (S, Formatter)>,
        S: Into<String>,
    {
        self.column_formatters = Some(
            formatters
                .into_iter()
                .map(|(label, f)| (label.into(), f))
                .collect(),
        );
        self
    }

    /// Add a single formatter to the formatter mapping.
    pub fn column_formatter(mut self, label: impl Into<String>, formatter: Formatter) -> Self {
        self.column_formatters
            .get_or_insert_with(HashMap::new)
            .insert(label.into(), formatter);
        self
    }

    /// Validate everything and freeze the renderer.
    pub fn build(self) -> Result<TableRenderer> {
        let TableRendererBuilder {
            array,
            mut config,
            column_names,
            column_formatters,
            numerical_precision,
        } = self;

        let verdict = check_2d(&array);
        let mut warnings = verdict.warnings;
        if !verdict.is_2d {
            let reason = match warnings.last() {
                Some(warning @ Warning::AmbiguousStructuredShape { .. }) => warning.to_string(),
                _ => format!("a 2D array is required, got shape {:?}", array.shape()),
            };
            return Err(TableError::InvalidShape(reason));
        }

        let labels = resolve_labels(&array, column_names, &mut warnings)?;
        let kinds = numerical_columns(&array, labels.len());
        let formatters =
            resolve_formatters(&labels, &kinds, column_formatters, numerical_precision)?;

        config.validate()?;
        config.max_rows = clamp_rows(config.max_rows, array.num_rows());

        let columns = labels
            .into_iter()
            .zip(formatters)
            .zip(kinds)
            .map(|((label, formatter), numerical)| Column {
                label,
                formatter,
                numerical,
            })
            .collect();

        Ok(TableRenderer {
            array,
            columns,
            config,
            warnings,
        })
    }
}

/// Work out the column labels, in output order.
fn resolve_labels(
    array: &Array,
    column_names: Option<Vec<String>>,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<String>> {
    if let Some(names) = &column_names {
        if names.is_empty() {
            return Err(TableError::InvalidLabels(
                "column names must be a non-empty list".to_string(),
            ));
        }
    }

    let labels = if is_structured_array(array) {
        let fields: Vec<String> = array
            .schema()
            .fields()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        match column_names {
            None => fields,
            Some(names) => {
                let warning = Warning::CustomLabels {
                    fields: fields.clone(),
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
                if names.len() != fields.len() {
                    return Err(TableError::InvalidLabels(format!(
                        "{} label(s) given for {} field(s)",
                        names.len(),
                        fields.len()
                    )));
                }
                names
            }
        }
    } else {
        let columns = array.shape()[1];
        match column_names {
            None => {
                return Err(TableError::InvalidLabels(
                    "column names are required for non-structured arrays".to_string(),
                ))
            }
            Some(names) if names.len() != columns => {
                return Err(TableError::InvalidLabels(format!(
                    "{} label(s) given for {} column(s)",
                    names.len(),
                    columns
                )))
            }
            Some(names) => names,
        }
    };

    if let Some(duplicate) = first_duplicate(&labels) {
        return Err(TableError::InvalidLabels(format!(
            "duplicate column label '{}'",
            duplicate
        )));
    }

    Ok(labels)
}

fn first_duplicate(labels: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    labels.iter().find(|l| !seen.insert(l.as_str())).cloned()
}

/// Numerical flag per column: per field for structured arrays, one
/// decision for the whole array otherwise.
fn numerical_columns(array: &Array, columns: usize) -> Vec<bool> {
    if is_structured_array(array) {
        array
            .schema()
            .fields()
            .iter()
            .map(|f| is_numerical_dtype(&f.dtype))
            .collect()
    } else {
        vec![is_numerical_array(array); columns]
    }
}

/// Pair every label with a formatter, building defaults when none are given.
fn resolve_formatters(
    labels: &[String],
    kinds: &[bool],
    column_formatters: Option<HashMap<String, Formatter>>,
    precision: usize,
) -> Result<Vec<Formatter>> {
    let Some(mut given) = column_formatters else {
        let numerical = Formatter::fixed(precision);
        let identity = Formatter::identity();
        return Ok(kinds
            .iter()
            .map(|&n| if n { numerical.clone() } else { identity.clone() })
            .collect());
    };

    if given.len() != labels.len() {
        return Err(TableError::InvalidFormatters(format!(
            "{} formatter(s) given for {} column(s)",
            given.len(),
            labels.len()
        )));
    }
    let mut unknown: Vec<String> = given
        .keys()
        .filter(|k| !labels.contains(k))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(TableError::InvalidFormatters(format!(
            "unknown column label(s): {}",
            unknown.join(", ")
        )));
    }

    labels
        .iter()
        .map(|label| {
            given.remove(label).ok_or_else(|| {
                TableError::InvalidFormatters(format!("no formatter for column '{}'", label))
            })
        })
        .collect()
}

/// A validated, immutable table ready to be rendered as text or HTML.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    array: Array,
    columns: Vec<Column>,
    config: RenderConfig,
    warnings: Vec<Warning>,
}

impl TableRenderer {
    /// Start building a renderer for `array`.
    pub fn builder(array: Array) -> TableRendererBuilder {
        TableRendererBuilder::new(array)
    }

    /// Build with all defaults. Only structured arrays can supply their own
    /// labels, so plain arrays need [`TableRenderer::builder`].
    pub fn new(array: Array) -> Result<Self> {
        Self::builder(array).build()
    }

    pub fn array(&self) -> &Array {
        &self.array
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn num_rows(&self) -> usize {
        self.array.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Effective row limit after clamping.
    pub fn max_rows(&self) -> usize {
        self.config.max_rows
    }

    /// Warnings raised while building.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Row limit for one render call.
    pub(crate) fn rows_to_show(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(n) => clamp_rows(n, self.num_rows()),
            None => self.config.max_rows,
        }
    }

    /// Format the first `limit` rows, column by column.
    pub(crate) fn formatted_rows(&self, limit: usize) -> Result<Vec<Vec<String>>> {
        self.array
            .rows(limit)
            .map(|row| {
                row.iter()
                    .zip(&self.columns)
                    .map(|(value, column)| {
                        column
                            .formatter
                            .format(value)
                            .map_err(|source| TableError::Format {
                                column: column.label.clone(),
                                source,
                            })
                    })
                    .collect()
            })
            .collect()
    }

    /// Notice for rows cut off by the row limit.
    pub(crate) fn omission_notice(&self, shown: usize) -> Option<String> {
        let skipped = self.num_rows().saturating_sub(shown);
        (skipped > 0).then(|| format!("... ({} rows sipped)", skipped))
    }
}

/// Default text rendering. A formatter failure is written as its error
/// message in angle brackets.
impl fmt::Display for TableRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render_as_text(&TextOptions::default()) {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DType, Field, Kind, Schema, Value};
    use crate::format::FormatError;

    fn int_grid(rows: usize, cols: usize) -> Array {
        let data = (0..rows)
            .map(|r| (0..cols).map(|c| Value::from((r * cols + c) as i64)).collect())
            .collect();
        Array::plain(Kind::Signed, data).unwrap()
    }

    fn scores(n: usize) -> Array {
        let records = (0..n)
            .map(|i| vec![Value::text(format!("p{}", i)), Value::from(i as f64 / 4.0)])
            .collect();
        Array::structured(
            vec![Field::new("name", Kind::Text), Field::new("score", Kind::Float)],
            records,
        )
        .unwrap()
    }

    #[test]
    fn test_structured_labels_from_fields() {
        let table = TableRenderer::new(scores(3)).unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["name", "score"]);
        assert!(!table.columns()[0].numerical);
        assert!(table.columns()[1].numerical);
        assert!(table.warnings().is_empty());
    }

    #[test]
    fn test_structured_custom_labels_warn() {
        let table = TableRenderer::builder(scores(3))
            .column_names(["Name", "Score"])
            .build()
            .unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Name", "Score"]);
        assert!(matches!(
            table.warnings(),
            [Warning::CustomLabels { .. }]
        ));
    }

    #[test]
    fn test_structured_custom_labels_count_mismatch() {
        let err = TableRenderer::builder(scores(3))
            .column_names(["only"])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidLabels(_)));
    }

    #[test]
    fn test_plain_requires_labels() {
        let err = TableRenderer::new(int_grid(3, 2)).unwrap_err();
        assert!(matches!(err, TableError::InvalidLabels(_)));

        let err = TableRenderer::builder(int_grid(3, 2))
            .column_names(["a", "b", "c"])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidLabels(_)));
    }

    #[test]
    fn test_empty_and_duplicate_labels_rejected() {
        let err = TableRenderer::builder(int_grid(3, 2))
            .column_names(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidLabels(_)));

        let err = TableRenderer::builder(int_grid(3, 2))
            .column_names(["a", "a"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate column label 'a'"));
    }

    #[test]
    fn test_plain_numeric_defaults() {
        let table = TableRenderer::builder(int_grid(3, 2))
            .column_names(["a", "b"])
            .build()
            .unwrap();
        assert!(table.columns().iter().all(|c| c.numerical));
        let rows = table.formatted_rows(3).unwrap();
        assert_eq!(rows[2], vec!["4.000", "5.000"]);
    }

    #[test]
    fn test_plain_text_defaults() {
        let array = Array::plain(
            Kind::Text,
            vec![vec![Value::from("x"), Value::from("y")]],
        )
        .unwrap();
        let table = TableRenderer::builder(array)
            .column_names(["a", "b"])
            .build()
            .unwrap();
        assert!(table.columns().iter().all(|c| !c.numerical));
        assert_eq!(table.formatted_rows(1).unwrap()[0], vec!["x", "y"]);
    }

    #[test]
    fn test_numerical_precision() {
        let table = TableRenderer::builder(scores(2))
            .numerical_precision(1)
            .build()
            .unwrap();
        assert_eq!(table.formatted_rows(3).unwrap()[2], vec!["p2", "0.5"]);
    }

    #[test]
    fn test_ambiguous_structured_shape() {
        let schema = Schema::Structured(vec![Field::new("x", Kind::Float)]);
        let array = Array::new(schema, vec![4, 1], vec![Value::from(1.0); 4]).unwrap();
        let err = TableRenderer::new(array).unwrap_err();
        match err {
            TableError::InvalidShape(reason) => {
                assert!(reason.contains("1D structured elements"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_2d_rejected() {
        let schema = Schema::Plain(DType::new(Kind::Float));
        let array = Array::new(schema, vec![3], vec![Value::from(1.0); 3]).unwrap();
        let err = TableRenderer::builder(array)
            .column_names(["a"])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidShape(_)));
    }

    #[test]
    fn test_plain_sub_array_elements_rejected() {
        let schema = Schema::Plain(DType::sub_array(Kind::Float, vec![2]));
        let cell = Value::Array(vec![Value::from(1.0), Value::from(2.0)]);
        let array = Array::new(schema, vec![2, 1], vec![cell; 2]).unwrap();
        let err = TableRenderer::builder(array)
            .column_names(["a"])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidShape(_)));
    }

    #[test]
    fn test_label_count_matches_columns() {
        for table in [
            TableRenderer::new(scores(3)).unwrap(),
            TableRenderer::builder(int_grid(3, 2))
                .column_names(["a", "b"])
                .build()
                .unwrap(),
        ] {
            assert_eq!(table.num_columns(), 2);
            assert_eq!(table.labels().count(), 2);
            assert_eq!(table.formatted_rows(1).unwrap()[0].len(), 2);
        }
    }

    #[test]
    fn test_custom_formatters() {
        let table = TableRenderer::builder(scores(2))
            .column_formatter("name", Formatter::from_fn(|v| v.to_string().to_uppercase()))
            .column_formatter("score", Formatter::fixed(2))
            .build()
            .unwrap();
        assert_eq!(table.formatted_rows(2).unwrap()[1], vec!["P1", "0.25"]);
    }

    #[test]
    fn test_formatter_count_mismatch() {
        let err = TableRenderer::builder(scores(2))
            .column_formatter("name", Formatter::identity())
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidFormatters(_)));
    }

    #[test]
    fn test_formatter_unknown_key() {
        let err = TableRenderer::builder(scores(2))
            .column_formatters([
                ("name", Formatter::identity()),
                ("points", Formatter::fixed(2)),
            ])
            .build()
            .unwrap_err();
        match err {
            TableError::InvalidFormatters(reason) => assert!(reason.contains("points")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_formatter_keys_follow_custom_labels() {
        let err = TableRenderer::builder(scores(2))
            .column_names(["Name", "Score"])
            .column_formatters([
                ("name", Formatter::identity()),
                ("score", Formatter::fixed(2)),
            ])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidFormatters(_)));
    }

    #[test]
    fn test_max_rows_clamped() {
        let table = TableRenderer::builder(scores(4)).max_rows(50).build().unwrap();
        assert_eq!(table.max_rows(), 4);
        assert!(table.omission_notice(table.max_rows()).is_none());

        let table = TableRenderer::builder(scores(4)).max_rows(0).build().unwrap();
        assert_eq!(table.max_rows(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let err = TableRenderer::builder(scores(2))
            .indent_size(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig(_)));

        let err = TableRenderer::builder(scores(2))
            .text_separator("")
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig(_)));
    }

    #[test]
    fn test_format_error_names_column() {
        let table = TableRenderer::builder(scores(2))
            .column_formatter("name", Formatter::identity())
            .column_formatter(
                "score",
                Formatter::new(|_| Err(FormatError::Custom("broken".to_string()))),
            )
            .build()
            .unwrap();
        let err = table.formatted_rows(1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to format column 'score': broken"
        );
    }

    #[test]
    fn test_display_writes_format_error() {
        let table = TableRenderer::builder(scores(2))
            .column_formatter("name", Formatter::identity())
            .column_formatter(
                "score",
                Formatter::new(|_| Err(FormatError::Custom("broken".to_string()))),
            )
            .build()
            .unwrap();
        assert!(table.to_text().is_err());
        assert_eq!(
            table.to_string(),
            "<failed to format column 'score': broken>"
        );
    }

    #[test]
    fn test_display_writes_mismatched_cell_error() {
        let schema = Schema::Structured(vec![Field::new("score", Kind::Float)]);
        let array = Array::new(schema, vec![1], vec![Value::from("high")]).unwrap();
        let table = TableRenderer::new(array).unwrap();
        let text = table.to_string();
        assert!(text.starts_with("<failed to format column 'score'"));
    }

    #[test]
    fn test_renderer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TableRenderer>();
    }
}
