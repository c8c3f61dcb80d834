// src/data_input/mod.rs

pub mod calibration_file;
pub mod log_data;
pub mod log_parser;
pub mod run_discovery;

// src/data_input/mod.rs
