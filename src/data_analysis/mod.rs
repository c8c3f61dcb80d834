// src/data_analysis/mod.rs

pub mod aggregation;
pub mod alignment;
pub mod calibration;
pub mod curves;
pub mod polyfit;
pub mod savitzky_golay;

// src/data_analysis/mod.rs
