//! Implementations of the `docql` subcommands.
//!
//! Each command writes its report to the given writer so it can be driven
//! from tests as well as from `main`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;
use docql_core::{Dialect, Lexer, SqlQuery};
use tracing::{debug, error, info};

use crate::OutputFormat;

/// Outcome of checking a batch of queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Number of queries read.
    pub total: usize,
    /// Number of queries that failed to parse.
    pub failed: usize,
}

impl CheckSummary {
    /// Returns true if every query parsed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Parses `query` and prints its tree in `format`.
///
/// # Errors
///
/// Returns an error if the query does not parse or output fails.
pub fn parse(
    query: &str,
    dialect: &dyn Dialect,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let ast = docql_core::parse_with_dialect(query, dialect)
        .with_context(|| format!("failed to parse query: {query}"))?;
    debug!(dialect = dialect.name(), "parsed query");

    match format {
        OutputFormat::Text => writeln!(out, "{ast}")?,
        OutputFormat::Debug => writeln!(out, "{ast:#?}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&ast)?)?,
    }
    Ok(())
}

/// Prints the token stream of `query`, one token per line with its span.
///
/// # Errors
///
/// Returns an error if the query cannot be tokenized or output fails.
pub fn tokens(query: &str, dialect: &dyn Dialect, out: &mut impl Write) -> anyhow::Result<()> {
    for token in Lexer::with_dialect(query, dialect) {
        let token = token.with_context(|| format!("failed to tokenize query: {query}"))?;
        writeln!(out, "{}\t{}", token.span, token.kind)?;
    }
    Ok(())
}

/// Opens `path` for line reading; `None` or `-` reads standard input.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(p) if p == Path::new("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(p) => {
            let file = File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Parses one query per line, skipping blank lines and `#` comments.
///
/// A failing query is logged and checking continues with the next line.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn check(
    input: impl BufRead,
    dialect: &dyn Dialect,
    out: &mut impl Write,
) -> anyhow::Result<CheckSummary> {
    let mut summary = CheckSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let query = line.trim();
        if query.is_empty() || query.starts_with('#') {
            continue;
        }

        summary.total += 1;
        let line_no = index + 1;
        match docql_core::parse_with_dialect(query, dialect) {
            Ok(_) => debug!(line = line_no, "ok"),
            Err(err) => {
                summary.failed += 1;
                error!(line = line_no, query, "{err}");
                writeln!(out, "line {line_no}: {err}")?;
            }
        }
    }

    info!(total = summary.total, failed = summary.failed, "check finished");
    writeln!(out, "{} queries, {} failed", summary.total, summary.failed)?;
    Ok(summary)
}

/// Parses two queries and reports whether their trees are structurally
/// equal. Both renderings are printed.
///
/// # Errors
///
/// Returns an error if either query does not parse or output fails.
pub fn compare(
    left: &str,
    right: &str,
    dialect: &dyn Dialect,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let parse_side = |side: &str, query: &str| -> anyhow::Result<SqlQuery> {
        docql_core::parse_with_dialect(query, dialect)
            .with_context(|| format!("failed to parse {side} query: {query}"))
    };
    let left_ast = parse_side("left", left)?;
    let right_ast = parse_side("right", right)?;
    let equal = left_ast == right_ast;

    writeln!(out, "left:  {left_ast}")?;
    writeln!(out, "right: {right_ast}")?;
    writeln!(out, "{}", if equal { "equal" } else { "different" })?;
    Ok(equal)
}
