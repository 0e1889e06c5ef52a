//! Plain-text rendering.

use crate::options::TextOptions;
use crate::output::table::TableRenderer;
use crate::Result;

impl TableRenderer {
    /// Render the table as separator-joined lines.
    ///
    /// Overrides left as `None` fall back to the renderer's configuration.
    /// Trailing whitespace is stripped from every line and the result has no
    /// trailing newline.
    pub fn render_as_text(&self, options: &TextOptions) -> Result<String> {
        let config = self.config();
        let max_rows = self.rows_to_show(options.max_rows);
        let separator = options
            .text_separator
            .as_deref()
            .unwrap_or(&config.text_separator);
        let display_head = options.display_head.unwrap_or(config.display_head);

        let mut lines = Vec::with_capacity(max_rows + 2);
        if display_head {
            let head = self.labels().collect::<Vec<_>>().join(separator);
            lines.push(head.trim_end().to_string());
        }
        for row in self.formatted_rows(max_rows)? {
            lines.push(row.join(separator).trim_end().to_string());
        }
        if let Some(notice) = self.omission_notice(max_rows) {
            lines.push(notice);
        }

        Ok(lines.join("\n"))
    }

    /// Render as text with the renderer's own configuration.
    pub fn to_text(&self) -> Result<String> {
        self.render_as_text(&TextOptions::default())
    }
}
