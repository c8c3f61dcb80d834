// src/error.rs

//! Error type shared by the calibration and thrust-stand pipelines.
//!
//! Every library operation returns [`AnalysisResult`]. The binaries surface
//! these through `Box<dyn Error>`, so any variant reaching `main` terminates
//! the run. The two recoverable conditions of the reduction pipeline
//! (`NoValidRuns` and `RowCountMismatch`) are matched by the caller and
//! downgraded to warnings.

use std::path::PathBuf;

use thiserror::Error;

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read calibration array: {0}")]
    NpyRead(#[from] ndarray_npy::ReadNpyError),

    #[error("Failed to write calibration array: {0}")]
    NpyWrite(#[from] ndarray_npy::WriteNpyError),

    #[error("Invalid number '{input}': expected a floating-point value")]
    InvalidNumber { input: String },

    #[error("Input ended before calibration collection was complete")]
    UnexpectedEndOfInput,

    #[error("Calibration array has shape {rows}x{cols}; expected 2 rows (weights, readings)")]
    CalibrationShape { rows: usize, cols: usize },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidCell {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("'{identifier}': {tts} thrust-test file(s) but {psu} power-supply file(s)")]
    RunCountMismatch {
        identifier: String,
        tts: usize,
        psu: usize,
    },

    #[error("DShot command {0} is outside [0, 2000]")]
    CommandOutOfRange(f64),

    #[error("Power-supply table is empty; cannot align {0} thrust-test rows")]
    EmptyTable(usize),

    #[error("No valid runs to aggregate")]
    NoValidRuns,

    #[error("Run {run} has {found} rows, but the first run has {expected}; runs must share row layout")]
    RowCountMismatch {
        run: usize,
        expected: usize,
        found: usize,
    },

    #[error("Fit of order {order} needs at least {required} points, got {found}")]
    InsufficientPoints {
        order: usize,
        required: usize,
        found: usize,
    },

    #[error("Singular least-squares problem: design matrix is rank deficient")]
    SingularFit,

    #[error("Input lengths differ: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error("Savitzky-Golay polynomial order {order} must be less than window length {window}")]
    FilterOrder { order: usize, window: usize },
}
