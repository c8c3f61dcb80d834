// src/data_input/calibration_file.rs

use ndarray::{Array2, Axis};
use ndarray_npy::{read_npy, write_npy};
use std::fs;
use std::path::Path;

use crate::data_analysis::calibration::CalibrationSamples;
use crate::error::{AnalysisError, AnalysisResult};

/// Writes samples as a 2xN `f64` `.npy` array: row 0 weights, row 1 readings.
/// Any existing file is replaced.
pub fn save_calibration(path: &Path, samples: &CalibrationSamples) -> AnalysisResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let n = samples.len();
    let mut array = Array2::<f64>::zeros((2, n));
    for (i, (&w, &r)) in samples.weights.iter().zip(samples.readings.iter()).enumerate() {
        array[[0, i]] = w;
        array[[1, i]] = r;
    }
    write_npy(path, &array)?;
    log::info!("Saved {} calibration samples to '{}'", n, path.display());
    Ok(())
}

/// Reads a 2xN array written by [`save_calibration`].
pub fn load_calibration(path: &Path) -> AnalysisResult<CalibrationSamples> {
    let array: Array2<f64> = read_npy(path)?;
    let (rows, cols) = array.dim();
    if rows != 2 {
        return Err(AnalysisError::CalibrationShape { rows, cols });
    }
    let weights = array.index_axis(Axis(0), 0).to_vec();
    let readings = array.index_axis(Axis(0), 1).to_vec();
    log::info!("Loaded {} calibration samples from '{}'", cols, path.display());
    Ok(CalibrationSamples { weights, readings })
}

// src/data_input/calibration_file.rs
