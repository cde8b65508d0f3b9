//! CSV export for scraped movie records.
//!
//! Writes a header row plus one row per record to a fixed path, replacing
//! any previous export wholesale. The export is a derived, disposable
//! artifact; there is no append mode and no versioning.
//!
//! # Module structure note
//!
//! This module is intentionally a single file (`mod.rs`-only): the feature
//! scope is small enough to not warrant sub-files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument};

use crate::record::MovieRecord;

/// CSV column order. Matches the serde field order of [`MovieRecord`].
const HEADER: [&str; 4] = ["title", "year", "rating", "link"];

/// Errors produced by the CSV export stage.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error creating or flushing the output file.
    #[error("IO error writing {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// CSV-level error (open or row serialization).
    #[error("CSV error writing {path}: {source}")]
    Csv {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Writes movie records to a CSV file at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Creates an exporter targeting `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header row and one row per record, fully replacing any
    /// existing file at the path. An empty record list still produces a
    /// header-only file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the file cannot be created or a row cannot
    /// be written.
    #[instrument(skip(self, records), fields(path = %self.path.display()))]
    pub fn write(&self, records: &[MovieRecord]) -> Result<PathBuf, ExportError> {
        // The header is written explicitly so a zero-record run still
        // produces it; `has_headers(false)` keeps serialize() from emitting
        // a second one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| ExportError::csv(&self.path, e))?;

        writer
            .write_record(HEADER)
            .map_err(|e| ExportError::csv(&self.path, e))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| ExportError::csv(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| ExportError::io(&self.path, e))?;

        info!(
            path = %self.path.display(),
            records = records.len(),
            "export complete"
        );
        Ok(self.path.clone())
    }
}
