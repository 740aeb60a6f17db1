//! Output module
//!
//! Renders API payloads to the terminal. The payload is treated as an
//! opaque JSON document; only its shape decides how a table is laid out.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::*;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Aligned columns for lists of records
    Table,
}

/// Something that can present a payload to the user
pub trait Render {
    fn render(&mut self, payload: &Value, format: OutputFormat) -> Result<()>;
}

/// Writes rendered payloads to an output stream
pub struct Printer<W: Write> {
    out: W,
}

impl Printer<io::Stdout> {
    /// Printer bound to the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json(&mut self, payload: &Value) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, payload)
            .context("Failed to write JSON output")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn write_table(&mut self, payload: &Value) -> Result<()> {
        let Some(records) = as_records(payload) else {
            return self.write_json(payload);
        };
        if records.is_empty() {
            return Ok(());
        }

        let columns = scalar_columns(&records);
        if columns.is_empty() {
            return self.write_json(payload);
        }

        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column.as_str()).map(cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        let headers: Vec<String> = columns.iter().map(|column| column.to_uppercase()).collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header = headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| format!("{:<width$}", header, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(self.out, "{}", header.trim_end().bold())?;

        for row in rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(value, width)| format!("{:<width$}", value, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(self.out, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

impl<W: Write> Render for Printer<W> {
    fn render(&mut self, payload: &Value, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => self.write_json(payload)?,
            OutputFormat::Table => self.write_table(payload)?,
        }
        self.out.flush().context("Failed to flush output")
    }
}

/// An array whose every element is an object
fn as_records(payload: &Value) -> Option<Vec<&Map<String, Value>>> {
    payload.as_array()?.iter().map(Value::as_object).collect()
}

/// Keys whose values are scalar in every record that has them, in first-seen order
fn scalar_columns(records: &[&Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut nested: Vec<&str> = Vec::new();

    for record in records {
        for (key, value) in record.iter() {
            if value.is_array() || value.is_object() {
                nested.push(key);
            } else if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    columns.retain(|column| !nested.contains(&column.as_str()));
    columns
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
