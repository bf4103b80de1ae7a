//! Where amounts come from: arguments, a CSV column, or stdin lines.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use is_terminal::IsTerminal;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{column}' not found in CSV header")]
    MissingColumn { column: String },
    #[error("no amounts given; pass them as arguments, with --input, or on stdin")]
    NoInput,
}

/// Collect raw amount strings, preferring arguments, then `--input`, then stdin.
pub fn collect_amounts(
    args: &[String],
    input: Option<&Path>,
    column: &str,
) -> Result<Vec<String>, InputError> {
    let amounts = if !args.is_empty() {
        debug!(count = args.len(), "reading amounts from arguments");
        args.to_vec()
    } else if let Some(path) = input {
        debug!(path = %path.display(), column, "reading amounts from csv");
        read_csv_column(File::open(path)?, column)?
    } else {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        debug!("reading amounts from stdin");
        read_lines(stdin.lock())?
    };

    if amounts.is_empty() {
        return Err(InputError::NoInput);
    }
    Ok(amounts)
}

/// Values of `column` from every record, trimmed. Header matching ignores case.
pub fn read_csv_column<R: Read>(reader: R, column: &str) -> Result<Vec<String>, InputError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let index = rdr
        .headers()?
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| InputError::MissingColumn {
            column: column.to_string(),
        })?;

    let mut amounts = Vec::new();
    for record in rdr.records() {
        let record = record?;
        amounts.push(record.get(index).unwrap_or("").trim().to_string());
    }
    Ok(amounts)
}

/// Non-blank lines, trimmed.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, InputError> {
    let mut amounts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            amounts.push(trimmed.to_string());
        }
    }
    Ok(amounts)
}
