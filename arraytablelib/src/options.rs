//! Render configuration.
//!
//! [`RenderConfig`] is fixed when a renderer is built. [`TextOptions`] and
//! [`HtmlOptions`] carry per-call overrides; any field left as `None` falls
//! back to the renderer's configuration.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::Result;

pub const DEFAULT_MAX_ROWS: usize = 10;
pub const DEFAULT_INDENT_SIZE: usize = 4;
pub const DEFAULT_TEXT_SEPARATOR: &str = " | ";

/// Construction-time render settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Rows shown before the omission notice (clamped to the row count)
    pub max_rows: usize,
    /// Spaces per HTML nesting level
    pub indent_size: usize,
    /// Include the header row
    pub display_head: bool,
    /// Joins cells in text mode
    pub text_separator: String,
    /// Centre the HTML table
    pub centre: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            indent_size: DEFAULT_INDENT_SIZE,
            display_head: true,
            text_separator: DEFAULT_TEXT_SEPARATOR.to_string(),
            centre: false,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn display_head(mut self, display_head: bool) -> Self {
        self.display_head = display_head;
        self
    }

    pub fn text_separator(mut self, separator: impl Into<String>) -> Self {
        self.text_separator = separator.into();
        self
    }

    pub fn centre(mut self, centre: bool) -> Self {
        self.centre = centre;
        self
    }

    /// Reject settings that cannot produce a table.
    pub fn validate(&self) -> Result<()> {
        if self.indent_size == 0 {
            return Err(TableError::InvalidConfig(
                "indent size must be a positive integer".to_string(),
            ));
        }
        if self.text_separator.is_empty() {
            return Err(TableError::InvalidConfig(
                "text separator must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

/// Clamp a requested row count to `[1, row_count]`.
///
/// An empty table always yields 0.
pub fn clamp_rows(requested: usize, row_count: usize) -> usize {
    requested.max(1).min(row_count)
}

/// Per-call overrides for text rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    pub max_rows: Option<usize>,
    pub text_separator: Option<String>,
    pub display_head: Option<bool>,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn text_separator(mut self, separator: impl Into<String>) -> Self {
        self.text_separator = Some(separator.into());
        self
    }

    pub fn display_head(mut self, display_head: bool) -> Self {
        self.display_head = Some(display_head);
        self
    }
}

/// Per-call overrides for HTML rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    pub max_rows: Option<usize>,
    pub indent_size: Option<usize>,
    pub display_head: Option<bool>,
    pub centre: Option<bool>,
}

impl HtmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = Some(indent_size);
        self
    }

    pub fn display_head(mut self, display_head: bool) -> Self {
        self.display_head = Some(display_head);
        self
    }

    pub fn centre(mut self, centre: bool) -> Self {
        self.centre = Some(centre);
        self
    }
}
