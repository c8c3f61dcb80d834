// src/lib.rs - Library interface for the calibration and reduction binaries

pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod formatting;
pub mod plot_framework;
pub mod plot_functions;
pub mod reduction;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
