//! Ingest option models and top-level error types.

use std::fmt;
use std::path::PathBuf;

use crate::conf::PATTERN_INPUT_DEFAULT;

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for `consolidate_sales_dir`.
#[derive(Debug, Clone)]
pub struct SpecIngestOptions {
    /// Glob pattern applied to file basenames.
    pub pattern: String,
}

impl Default for SpecIngestOptions {
    fn default() -> Self {
        Self {
            pattern: PATTERN_INPUT_DEFAULT.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// "Run must halt" errors raised before any aggregation happens.
///
/// There is no partial-success mode: one malformed input file fails the whole
/// consolidation with file/row/column context.
#[derive(Debug)]
pub enum IngestError {
    /// Input directory does not exist or is not a directory.
    InputDirMissing(PathBuf),
    /// Glob pattern failed to compile.
    InvalidPattern {
        /// Offending pattern text.
        pattern: String,
        /// Compilation error text.
        message: String,
    },
    /// Directory exists but holds no file matching the pattern.
    NoFilesMatched {
        /// Scanned directory.
        dir: PathBuf,
        /// Pattern that matched nothing.
        pattern: String,
    },
    /// A file lacks one or more required columns.
    MissingColumns {
        /// Offending input file.
        path: PathBuf,
        /// Required column names absent from the header row.
        columns: Vec<String>,
    },
    /// A file could not be opened or parsed as a workbook.
    FileUnreadable {
        /// Offending input file.
        path: PathBuf,
        /// Underlying parse/IO error text.
        message: String,
    },
    /// A required cell is blank or holds a value of the wrong type/sign.
    InvalidCell {
        /// Offending input file.
        path: PathBuf,
        /// One-based data row number (header row excluded).
        row: usize,
        /// Column name.
        column: String,
        /// What was wrong with the value.
        message: String,
    },
    /// Consolidated frame construction/manipulation failed.
    Frame(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputDirMissing(path) => {
                write!(f, "Input directory does not exist: {}", path.display())
            }
            Self::InvalidPattern { pattern, message } => {
                write!(f, "Invalid input pattern {pattern:?}: {message}")
            }
            Self::NoFilesMatched { dir, pattern } => {
                write!(
                    f,
                    "No {pattern} files found in {}",
                    dir.display()
                )
            }
            Self::MissingColumns { path, columns } => {
                write!(
                    f,
                    "File {} is missing required columns: {}",
                    path.display(),
                    columns.join(", ")
                )
            }
            Self::FileUnreadable { path, message } => {
                write!(f, "Failed to read {}: {message}", path.display())
            }
            Self::InvalidCell {
                path,
                row,
                column,
                message,
            } => {
                write!(
                    f,
                    "File {}, row {row}, column {column:?}: {message}",
                    path.display()
                )
            }
            Self::Frame(message) => write!(f, "Frame error: {message}"),
        }
    }
}

impl std::error::Error for IngestError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
