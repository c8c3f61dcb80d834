// src/data_input/log_data.rs

use std::path::PathBuf;

/// One sample from the thrust-test-stand log.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TtsRow {
    pub timestamp: f64, // Seconds since epoch.
    pub dshot_cmd: f64, // Raw DShot code, 0..=2000.
    pub thrust: f64,    // Grams.
    pub omega: f64,     // rad/s.
}

/// One sample from the power-supply log.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PsuRow {
    pub timestamp: f64,
    pub voltage: f64,
    pub current: f64,
}

/// A parsed thrust-test-stand file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TtsTable {
    pub source: PathBuf,
    pub rows: Vec<TtsRow>,
}

/// A parsed power-supply file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PsuTable {
    pub source: PathBuf,
    pub rows: Vec<PsuRow>,
}

impl TtsTable {
    pub fn from_rows(rows: Vec<TtsRow>) -> Self {
        Self {
            source: PathBuf::new(),
            rows,
        }
    }
}

impl PsuTable {
    pub fn from_rows(rows: Vec<PsuRow>) -> Self {
        Self {
            source: PathBuf::new(),
            rows,
        }
    }

    pub fn timestamps(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.timestamp)
    }
}

// src/data_input/log_data.rs
