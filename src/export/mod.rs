//! Flat tabular export of simulated profiles.
//!
//! The table has one `time_h` column and one concentration column per
//! patient, in the order the patients were compared.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use thiserror::Error;

use crate::simulator::{Comparison, ConcentrationSeries};

/// Errors raised while writing a table
#[derive(Error, Debug)]
pub enum ExportError {
    /// Error reported by the CSV writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A column does not have one value per time point
    #[error("Column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        found: usize,
        expected: usize,
    },

    /// Written bytes were not valid UTF-8
    #[error("Table is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Time column plus named concentration columns
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationTable {
    times: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl ConcentrationTable {
    pub fn new(times: Vec<f64>) -> Self {
        Self {
            times,
            columns: Vec::new(),
        }
    }

    /// Append a concentration column
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, ExportError> {
        let name = name.into();
        if values.len() != self.times.len() {
            return Err(ExportError::LengthMismatch {
                column: name,
                found: values.len(),
                expected: self.times.len(),
            });
        }
        self.columns.push((name, values));
        Ok(self)
    }

    /// Single-profile table
    pub fn from_series(name: impl Into<String>, series: &ConcentrationSeries) -> Self {
        Self {
            times: series.times().to_vec(),
            columns: vec![(name.into(), series.concentrations().to_vec())],
        }
    }

    /// One column per compared patient
    pub fn from_comparison(comparison: &Comparison) -> Result<Self, ExportError> {
        comparison
            .outcomes
            .iter()
            .try_fold(Self::new(comparison.times().to_vec()), |table, outcome| {
                table.with_column(
                    outcome.label.clone(),
                    outcome.series.concentrations().to_vec(),
                )
            })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.times.len()
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

        let mut header = vec!["time_h".to_string()];
        header.extend(self.columns.iter().map(|(name, _)| name.clone()));
        writer.write_record(&header)?;

        for (i, t) in self.times.iter().enumerate() {
            let mut record = Vec::with_capacity(self.columns.len() + 1);
            record.push(t.to_string());
            record.extend(self.columns.iter().map(|(_, values)| values[i].to_string()));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}
