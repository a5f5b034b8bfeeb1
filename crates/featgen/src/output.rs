//! Feature matrix writers

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use ndarray::Array2;
use serde::Serialize;

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"columns": [...], "rows": [[...], ...]}`
    Json,
    /// Tab-separated values with a header row
    Tsv,
}

/// Labeled feature matrix as written to disk
#[derive(Debug, Serialize)]
pub struct FeatureTable<'a> {
    pub columns: &'a [String],
    pub rows: Vec<Vec<f64>>,
}

impl<'a> FeatureTable<'a> {
    pub fn new(columns: &'a [String], matrix: &Array2<f64>) -> Self {
        Self {
            columns,
            rows: matrix.rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// Write `table` to `writer` in the requested format
pub fn write_table<W: Write>(writer: &mut W, table: &FeatureTable<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, table)?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => {
            writeln!(writer, "{}", table.columns.join("\t"))?;
            for row in &table.rows {
                let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                writeln!(writer, "{}", line.join("\t"))?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
