//! Hand-off to a rich display front end.

use std::io::{self, Write};

use crate::options::HtmlOptions;
use crate::output::TableRenderer;
use crate::Result;

/// Something that can show an HTML fragment, e.g. a notebook front end.
pub trait DisplaySink {
    fn display_html(&mut self, html: &str) -> io::Result<()>;
}

/// Writes each fragment to an [`io::Write`], followed by a newline.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for WriterSink<W> {
    fn display_html(&mut self, html: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", html)?;
        self.writer.flush()
    }
}

/// Collects fragments in memory.
impl DisplaySink for Vec<String> {
    fn display_html(&mut self, html: &str) -> io::Result<()> {
        self.push(html.to_string());
        Ok(())
    }
}

impl TableRenderer {
    /// Render HTML and pass it unmodified to `sink`.
    pub fn show<S>(&self, sink: &mut S, options: &HtmlOptions) -> Result<()>
    where
        S: DisplaySink + ?Sized,
    {
        let html = self.render_as_html(options)?;
        sink.display_html(&html)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Array, Field, Kind, Value};
    use crate::error::TableError;

    fn table() -> TableRenderer {
        let array = Array::structured(
            vec![Field::new("name", Kind::Text)],
            vec![vec![Value::from("ann")], vec![Value::from("bob")]],
        )
        .unwrap();
        TableRenderer::new(array).unwrap()
    }

    struct BrokenSink;

    impl DisplaySink for BrokenSink {
        fn display_html(&mut self, _html: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_show_forwards_html_unmodified() {
        let table = table();
        let options = HtmlOptions::new().max_rows(1);
        let mut shown: Vec<String> = Vec::new();
        table.show(&mut shown, &options).unwrap();
        assert_eq!(shown, vec![table.render_as_html(&options).unwrap()]);
    }

    #[test]
    fn test_writer_sink() {
        let table = table();
        let mut sink = WriterSink::new(Vec::new());
        table.show(&mut sink, &HtmlOptions::default()).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, format!("{}\n", table.to_html().unwrap()));
    }

    #[test]
    fn test_sink_error_is_reported() {
        let err = table()
            .show(&mut BrokenSink, &HtmlOptions::default())
            .unwrap_err();
        assert!(matches!(err, TableError::Display(_)));
    }
}
