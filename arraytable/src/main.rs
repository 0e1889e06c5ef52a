//! # arraytable
//!
//! Print an array document as a text or HTML table.
//!
//! ## Overview
//!
//! arraytable is built on top of arraytablelib. It reads one JSON array
//! document (see [`document`]) from a file or stdin, validates it into a
//! table and writes the rendering to stdout. Warnings raised while accepting
//! the array go to stderr through the log.
//!
//! ## Usage
//!
//! ```bash
//! # Text table of a plain grid
//! echo '{"dtype": "i", "data": [[1, 2], [3, 4]]}' | arraytable --columns a,b
//!
//! # HTML fragment, first five rows, centred
//! arraytable scores.json --html --max-rows 5 --centre
//! ```

mod document;

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use arraytablelib::{HtmlOptions, TableRenderer, WriterSink};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::document::ArrayDocument;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("arraytable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a JSON array document as a text or HTML table")
        .arg(
            Arg::new("input")
                .help("Array document to read ('-' or absent for stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .action(ArgAction::SetTrue)
                .help("Render an HTML table instead of text"),
        )
        .arg(
            Arg::new("max-rows")
                .short('n')
                .long("max-rows")
                .value_parser(clap::value_parser!(usize))
                .default_value("10")
                .help("Maximum number of rows to show"),
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .value_delimiter(',')
                .help("Column labels (comma-separated); required for plain arrays"),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .value_parser(clap::value_parser!(usize))
                .default_value("3")
                .help("Decimals shown for numerical columns"),
        )
        .arg(
            Arg::new("separator")
                .short('s')
                .long("separator")
                .default_value(" | ")
                .help("Cell separator for text output"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .value_parser(clap::value_parser!(usize))
                .default_value("4")
                .help("Spaces per nesting level in HTML output"),
        )
        .arg(
            Arg::new("no-head")
                .long("no-head")
                .action(ArgAction::SetTrue)
                .help("Omit the header row"),
        )
        .arg(
            Arg::new("centre")
                .long("centre")
                .visible_alias("center")
                .action(ArgAction::SetTrue)
                .help("Centre the HTML table"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value("warn")
                .help("Log level for diagnostics on stderr"),
        )
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Read the document from a path, or stdin for "-"
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read '{}'", input))
    }
}

/// Build a renderer from the parsed arguments
fn build_renderer(matches: &ArgMatches) -> anyhow::Result<TableRenderer> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let array = ArrayDocument::parse(&read_input(input)?)?.into_array()?;

    let mut builder = TableRenderer::builder(array)
        .max_rows(matches.get_one::<usize>("max-rows").copied().unwrap_or(10))
        .numerical_precision(matches.get_one::<usize>("precision").copied().unwrap_or(3))
        .indent_size(matches.get_one::<usize>("indent").copied().unwrap_or(4))
        .display_head(!matches.get_flag("no-head"))
        .centre(matches.get_flag("centre"));

    if let Some(separator) = matches.get_one::<String>("separator") {
        builder = builder.text_separator(separator.as_str());
    }
    if let Some(columns) = matches.get_many::<String>("columns") {
        builder = builder.column_names(columns.cloned());
    }

    Ok(builder.build()?)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let table = build_renderer(matches)?;
    tracing::debug!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        max_rows = table.max_rows(),
        "table ready"
    );

    if matches.get_flag("html") {
        let mut sink = WriterSink::new(io::stdout().lock());
        table.show(&mut sink, &HtmlOptions::default())?;
    } else {
        println!("{}", table.to_text()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let level = matches
        .get_one::<String>("log-level")
        .map(|s| s.as_str())
        .unwrap_or("warn");
    setup_logging(level);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let prefix = console::style("Error:").red().bold().for_stderr();
            eprintln!("{} {:#}", prefix, e);
            ExitCode::FAILURE
        }
    }
}
