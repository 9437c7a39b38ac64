pub mod amount;
pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod mapper;
pub mod transaction;

use crate::mapper::Mapper;
use anyhow::{Context, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::io::{Read, Write};

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Outcome counts for one statement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub translated: usize,
    pub rejected: usize,
}

/// Builds a CSV reader for a statement. Headers are not special and record
/// lengths may vary: a header line is just a record that fails to map, and
/// arity is checked by the [`Mapper`].
pub fn statement_reader<R: Read>(reader: R, trim: bool) -> Reader<R> {
    let trim = if trim { csv::Trim::All } else { csv::Trim::None };

    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(trim)
        .from_reader(reader)
}

/// Translates every record of a statement, in order.
///
/// Each transaction goes to `out` as one canonical line. Each record that
/// cannot be mapped goes to `diag` as one line naming the error and the line
/// the record starts on, and translation carries on. Tokenizer and I/O
/// errors stop the statement.
pub fn translate_statement<R: Read, W: Write, E: Write>(
    reader: &mut Reader<R>,
    mapper: &Mapper,
    out: &mut W,
    diag: &mut E,
) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .context("Failed to read CSV record")?
    {
        let line = record.position().map_or(0, |pos| pos.line());
        let fields: Vec<&str> = record.iter().collect();

        match mapper.transform(&fields) {
            Ok(tx) => {
                writeln!(out, "{}", tx).context("Failed to write transaction")?;
                summary.translated += 1;
            }
            Err(e) => {
                log::debug!("Rejected record on line {}: {:?}", line, e);
                writeln!(diag, "{}: {} on line {}", PROGRAM_NAME, e, line)
                    .context("Failed to write diagnostic")?;
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
