//! Output helpers shared by the `jast` binary.

use anyhow::Context as _;
use colored::Colorize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::ast::{Document, Value};
use crate::tokenizer::{Token, TokenKind};

// ==============================================================================
// Colorized Document Output
// ==============================================================================

/// Write a parsed document as colorized JSON to `writer`. Nothing is written
/// for an empty document. Silently returns `Ok(())` on broken pipe so that
/// piping to tools like `less` or `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_document<W: Write>(
    writer: &mut W,
    document: &Document,
    pretty: bool,
) -> anyhow::Result<()> {
    let Some(value) = &document.value else {
        return Ok(());
    };

    let result = (|| -> io::Result<()> {
        write_colored_value(writer, value, 0, pretty)?;
        writeln!(writer)?;
        Ok(())
    })();

    ignore_broken_pipe(result).context("write document to stdout")
}

/// Recursively write a value with syntax highlighting.
fn write_colored_value<W: Write>(
    writer: &mut W,
    value: &Value,
    indent: usize,
    pretty: bool,
) -> io::Result<()> {
    let next_indent = indent + 2;

    match value {
        Value::Null(_) => write!(writer, "{}", "null".red().dimmed()),
        Value::Boolean(b) => {
            write!(writer, "{}", b.token.literal.yellow().bold())
        }
        Value::Number(n) => write!(writer, "{}", n.token.literal.yellow()),
        // NOTE: the literal is written back verbatim, escapes included
        Value::String(s) => {
            write!(writer, "{}", format!("\"{}\"", s.value()).green())
        }
        Value::Array(arr) => {
            write!(writer, "[")?;
            for (i, item) in arr.elements.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write_colored_value(writer, item, next_indent, pretty)?;
                if i < arr.elements.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !arr.elements.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "]")
        }
    }
}

// ==============================================================================
// Token Listing
// ==============================================================================

/// Write one line per token: `line:column KIND literal`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_tokens<W: Write>(
    writer: &mut W,
    tokens: &[Token],
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for token in tokens {
            let location =
                format!("{}:{}", token.position.line, token.position.column);
            let kind = token.kind.to_string();
            let kind = if token.is(TokenKind::Illegal) {
                kind.red().bold()
            } else {
                kind.cyan()
            };
            if token.literal.is_empty() {
                writeln!(writer, "{} {kind}", location.dimmed())?;
            } else {
                writeln!(
                    writer,
                    "{} {kind} {}",
                    location.dimmed(),
                    token.literal
                )?;
            }
        }
        Ok(())
    })();

    ignore_broken_pipe(result).context("write tokens to stdout")
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
