//! Batch command implementation
//!
//! Reads a headerless CSV where each row is `function,arg1,arg2,...`,
//! evaluates all rows in parallel and writes one result per row in input
//! order. Blank cells and `_` take the parameter default; lines starting
//! with `#` are skipped. A failing row is reported and does not stop the
//! batch.

use std::io::{Read, Write};
use std::path::Path;

use pricer_models::batch::{BatchEvaluator, FunctionCall};
use pricer_models::functions::{FunctionError, HostValue};
use serde::Serialize;
use tracing::{info, warn};

use super::OutputFormat;
use crate::{CliError, Result};

/// One output row
#[derive(Debug, Serialize, PartialEq)]
pub struct BatchRow {
    /// 1-based input line
    pub row: usize,
    /// Function name as given
    pub function: String,
    /// Result, absent on error or non-finite value
    pub value: Option<f64>,
    /// Error message, if any
    pub error: Option<String>,
}

/// Parses batch rows from CSV text, paired with their 1-based line numbers.
///
/// Each line is one record; quoted fields cannot span lines.
pub fn read_calls(mut input: impl Read) -> Result<Vec<(usize, FunctionCall)>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut calls = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(trimmed.as_bytes());
        let Some(record) = reader.records().next().transpose()? else {
            continue;
        };

        let mut fields = record.iter();
        let function = match fields.next() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        calls.push((
            index + 1,
            FunctionCall::new(
                function,
                fields.map(HostValue::from_token).collect::<Vec<_>>(),
            ),
        ));
    }
    Ok(calls)
}

fn to_row(
    line: usize,
    call: &FunctionCall,
    result: std::result::Result<f64, FunctionError>,
) -> BatchRow {
    let (value, error) = match result {
        Ok(value) => (value.is_finite().then_some(value), None),
        Err(err) => (None, Some(err.to_string())),
    };
    BatchRow {
        row: line,
        function: call.function.clone(),
        value,
        error,
    }
}

/// Evaluates CSV input and writes the results.
pub fn evaluate(
    evaluator: &BatchEvaluator,
    input: impl Read,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Vec<BatchRow>> {
    let (lines, calls): (Vec<usize>, Vec<FunctionCall>) =
        read_calls(input)?.into_iter().unzip();
    let results = evaluator.evaluate(&calls);

    let rows: Vec<BatchRow> = lines
        .into_iter()
        .zip(&calls)
        .zip(results)
        .map(|((line, call), result)| to_row(line, call, result))
        .collect();

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        warn!(failed, total = rows.len(), "some rows failed");
    }

    match format {
        OutputFormat::Table => {
            for row in &rows {
                let cell = match (&row.value, &row.error) {
                    (_, Some(error)) => format!("error: {}", error),
                    (Some(value), None) => value.to_string(),
                    (None, None) => String::new(),
                };
                writeln!(out, "{:>5}  {:<15} {}", row.row, row.function, cell)?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(rows)
}

/// Run the batch command on a file
pub fn run(
    evaluator: &BatchEvaluator,
    input: &Path,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }
    info!(input = %input.display(), "Starting batch");

    let file = std::fs::File::open(input)?;
    let rows = evaluate(evaluator, file, format, out)?;

    info!(rows = rows.len(), "Batch complete");
    Ok(())
}
