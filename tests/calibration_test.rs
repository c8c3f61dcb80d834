// tests/calibration_test.rs

use ndarray::{array, Array2};
use ndarray_npy::write_npy;

use thruststand_csv_render::constants::CALIBRATION_PLOT_FILE;
use thruststand_csv_render::data_analysis::calibration::{collect_samples, fit_calibration, zero_readings};
use thruststand_csv_render::data_input::calibration_file::{load_calibration, save_calibration};
use thruststand_csv_render::error::AnalysisError;
use thruststand_csv_render::plot_functions::plot_calibration::plot_calibration;

#[test]
fn test_collected_samples_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datasets").join("calibration").join("calibration_data.npy");

    let input = "0.0279\n250\n0.0341\n250\n0.0403\n250\n0.0465\n250\n0.0527\n";
    let samples = collect_samples(input.as_bytes(), Vec::new()).unwrap();
    assert_eq!(samples.weights, vec![0.0, 250.0, 500.0, 750.0, 1000.0]);

    save_calibration(&path, &samples).unwrap();
    let loaded = load_calibration(&path).unwrap();
    assert_eq!(loaded, samples);

    // Saving again replaces the file.
    let mut shorter = samples.clone();
    shorter.weights.truncate(3);
    shorter.readings.truncate(3);
    save_calibration(&path, &shorter).unwrap();
    assert_eq!(load_calibration(&path).unwrap().len(), 3);
}

#[test]
fn test_loaded_calibration_is_zeroed_fitted_and_plotted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration_data.npy");
    let data: Array2<f64> = array![
        [0.0, 100.0, 200.0, 500.0, 1000.0],
        [0.0279361, 0.0304, 0.0329, 0.0403, 0.0527],
    ];
    write_npy(&path, &data).unwrap();

    let mut samples = load_calibration(&path).unwrap();
    zero_readings(&mut samples);
    assert_eq!(samples.readings[0], 0.0);

    let fit = fit_calibration(&samples).unwrap();
    assert!(fit.weight_to_reading.slope > 2.4e-5 && fit.weight_to_reading.slope < 2.5e-5);
    assert!(fit.weight_to_reading.intercept.abs() < 1e-3);
    let report = fit.report();
    assert!(report.starts_with("Weight (g) --> Load cell:\n\tf(x) = 2.4"), "{report}");
    assert!(report.contains("E-05 x + "), "{report}");
    assert!(report.contains("\nLoad cell --> Weight (g):\n\tg(x) = "), "{report}");

    let out_dir = dir.path().join("figures");
    plot_calibration(&samples, &fit, &out_dir).unwrap();
    assert!(out_dir.join(CALIBRATION_PLOT_FILE).is_file());
}

#[test]
fn test_load_rejects_wrong_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.npy");
    write_npy(&path, &Array2::<f64>::zeros((3, 4))).unwrap();
    assert!(matches!(
        load_calibration(&path),
        Err(AnalysisError::CalibrationShape { rows: 3, cols: 4 })
    ));
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_calibration(&dir.path().join("absent.npy")).is_err());
}

// tests/calibration_test.rs
