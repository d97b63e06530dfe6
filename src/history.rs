//! Calculation history persisted as CSV.
//!
//! The history is an ordered list of `(operation, result)` records kept in
//! memory and flushed to a single file on demand. The file has the header
//! `Operation,Result` and one row per record.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One recorded calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Name of the operation that produced the result.
    #[serde(rename = "Operation")]
    pub operation: String,
    /// Numeric result.
    #[serde(rename = "Result")]
    pub result: f64,
}

/// Failures while reading or writing the history file.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed history file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Append-only record table bound to a backing file.
///
/// Constructed explicitly and passed to whoever needs it; there is no shared
/// global instance.
#[derive(Debug)]
pub struct HistoryManager {
    records: Vec<HistoryRecord>,
    path: PathBuf,
}

impl HistoryManager {
    /// Create an empty history backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            records: Vec::new(),
            path: path.into(),
        }
    }

    /// Backing file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record.
    pub fn add_record(&mut self, operation: impl Into<String>, result: f64) {
        self.records.push(HistoryRecord {
            operation: operation.into(),
            result,
        });
    }

    /// Write every record to the backing file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save_history(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let file = fs::File::create(&self.path).map_err(|source| self.io_error(source))?;
        let mut writer = csv::Writer::from_writer(file);

        if self.records.is_empty() {
            // serde only emits headers alongside the first row.
            writer
                .write_record(["Operation", "Result"])
                .map_err(|source| self.csv_error(source))?;
        }
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|source| self.csv_error(source))?;
        }
        writer.flush().map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), records = self.records.len(), "Saved history");
        Ok(())
    }

    /// Replace in-memory records with the file's contents.
    ///
    /// Leaves the current records untouched when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_history(&mut self) -> Result<(), HistoryError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No history file to load");
            return Ok(());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| self.csv_error(source))?;
        let records = reader
            .deserialize()
            .collect::<Result<Vec<HistoryRecord>, _>>()
            .map_err(|source| self.csv_error(source))?;

        debug!(path = %self.path.display(), records = records.len(), "Loaded history");
        self.records = records;
        Ok(())
    }

    /// Drop all in-memory records.
    pub fn clear_history(&mut self) {
        self.records.clear();
    }

    /// Clear the records and delete the backing file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset(&mut self) -> Result<(), HistoryError> {
        self.clear_history();
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| self.io_error(source))?;
        }
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> HistoryError {
        HistoryError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}
