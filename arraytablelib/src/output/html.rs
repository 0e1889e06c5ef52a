//! HTML rendering.
//!
//! Produces a `<table>` fragment (not a document) suited for embedding in a
//! notebook or a web page. Cell contents are written as-is so formatters can
//! emit markup of their own.

use crate::options::HtmlOptions;
use crate::output::table::TableRenderer;
use crate::Result;

const CENTRE_STYLE: &str =
    r#" style="margin-left: auto; margin-right: auto; margin-bottom: 1em;""#;

/// Lines tagged with their nesting depth, indented on output.
struct HtmlLines {
    lines: Vec<(usize, String)>,
}

impl HtmlLines {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn push(&mut self, depth: usize, text: impl Into<String>) {
        self.lines.push((depth, text.into()));
    }

    fn finish(self, indent_size: usize) -> String {
        self.lines
            .into_iter()
            .map(|(depth, text)| format!("{}{}", " ".repeat(indent_size * depth), text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TableRenderer {
    /// Render the table as an HTML fragment.
    ///
    /// Overrides left as `None` fall back to the renderer's configuration.
    /// Nesting depth is 0 for `<table>`, 1 for `<thead>`/`<tbody>`, 2 for
    /// `<tr>` and 3 for cells.
    pub fn render_as_html(&self, options: &HtmlOptions) -> Result<String> {
        let config = self.config();
        let max_rows = self.rows_to_show(options.max_rows);
        let indent_size = options.indent_size.unwrap_or(config.indent_size);
        let display_head = options.display_head.unwrap_or(config.display_head);
        let centre = options.centre.unwrap_or(config.centre);

        let mut html = HtmlLines::new();
        let style = if centre { CENTRE_STYLE } else { "" };
        html.push(0, format!(r#"<table border="1" class="dataframe"{}>"#, style));

        if display_head {
            html.push(1, "<thead>");
            html.push(2, "<tr>");
            for label in self.labels() {
                html.push(3, format!("<th>{}</th>", label));
            }
            html.push(2, "</tr>");
            html.push(1, "</thead>");
        }

        html.push(1, "<tbody>");
        for row in self.formatted_rows(max_rows)? {
            html.push(2, "<tr>");
            for cell in row {
                html.push(3, format!("<td>{}</td>", cell));
            }
            html.push(2, "</tr>");
        }
        html.push(1, "</tbody>");
        html.push(0, "</table>");

        if let Some(notice) = self.omission_notice(max_rows) {
            html.push(0, format!("<p>{}</p>", notice));
        }

        Ok(html.finish(indent_size))
    }

    /// Render as HTML with the renderer's own configuration.
    pub fn to_html(&self) -> Result<String> {
        self.render_as_html(&HtmlOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{Array, Field, Kind, Value};
    use crate::options::HtmlOptions;
    use crate::output::table::TableRenderer;

    fn scores(n: usize) -> Array {
        let records = (0..n)
            .map(|i| vec![Value::text(format!("p{}", i)), Value::from(i as f64)])
            .collect();
        Array::structured(
            vec![Field::new("name", Kind::Text), Field::new("score", Kind::Float)],
            records,
        )
        .unwrap()
    }

    #[test]
    fn test_html_layout() {
        let table = TableRenderer::new(scores(1)).unwrap();
        let expected = [
            r#"<table border="1" class="dataframe">"#,
            "    <thead>",
            "        <tr>",
            "            <th>name</th>",
            "            <th>score</th>",
            "        </tr>",
            "    </thead>",
            "    <tbody>",
            "        <tr>",
            "            <td>p0</td>",
            "            <td>0.000</td>",
            "        </tr>",
            "    </tbody>",
            "</table>",
        ]
        .join("\n");
        assert_eq!(table.to_html().unwrap(), expected);
    }

    #[test]
    fn test_html_omitted_rows() {
        let table = TableRenderer::new(scores(15)).unwrap();
        let html = table.to_html().unwrap();
        assert_eq!(html.matches("<td>p").count(), 10);
        assert_eq!(html.matches("<tr>").count(), 11);
        assert!(html.ends_with("</table>\n<p>... (5 rows sipped)</p>"));
    }

    #[test]
    fn test_html_centre_and_indent() {
        let table = TableRenderer::builder(scores(1))
            .centre(true)
            .indent_size(2)
            .build()
            .unwrap();
        let html = table.to_html().unwrap();
        assert!(html.starts_with(
            r#"<table border="1" class="dataframe" style="margin-left: auto; margin-right: auto; margin-bottom: 1em;">"#
        ));
        assert!(html.contains("\n  <thead>\n    <tr>\n      <th>name</th>"));
    }

    #[test]
    fn test_html_overrides() {
        let table = TableRenderer::new(scores(3)).unwrap();
        let html = table
            .render_as_html(
                &HtmlOptions::new()
                    .max_rows(1)
                    .indent_size(1)
                    .display_head(false)
                    .centre(false),
            )
            .unwrap();
        let expected = [
            r#"<table border="1" class="dataframe">"#,
            " <tbody>",
            "  <tr>",
            "   <td>p0</td>",
            "   <td>0.000</td>",
            "  </tr>",
            " </tbody>",
            "</table>",
            "<p>... (2 rows sipped)</p>",
        ]
        .join("\n");
        assert_eq!(html, expected);
    }

    #[test]
    fn test_html_is_idempotent() {
        let table = TableRenderer::new(scores(12)).unwrap();
        assert_eq!(table.to_html().unwrap(), table.to_html().unwrap());
    }

    #[test]
    fn test_html_column_order_matches_labels() {
        let table = TableRenderer::builder(scores(2))
            .column_names(["Who", "Points"])
            .build()
            .unwrap();
        let html = table.to_html().unwrap();
        let who = html.find("<th>Who</th>").unwrap();
        let points = html.find("<th>Points</th>").unwrap();
        assert!(who < points);
        let name = html.find("<td>p1</td>").unwrap();
        let score = html.find("<td>1.000</td>").unwrap();
        assert!(name < score);
    }
}
