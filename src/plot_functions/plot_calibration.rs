// src/plot_functions/plot_calibration.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{
    CALIBRATION_EXTRAPOLATE_MAX_G, CALIBRATION_FIT_SAMPLES, CALIBRATION_PLOT_FILE,
    COLOR_CALIBRATION_FIT, COLOR_CALIBRATION_SAMPLES, MARKER_SIZE_CALIBRATION,
};
use crate::data_analysis::calibration::{CalibrationFit, CalibrationSamples};
use crate::data_analysis::polyfit::linspace;
use crate::plot_framework::{draw_single_chart, LineStyle, PlotConfig, PlotSeries};

/// Raw samples (dotted, `x` markers) and the weight -> reading fit (red),
/// extrapolated from the first weight out to 2000 g.
pub fn plot_calibration(
    samples: &CalibrationSamples,
    fit: &CalibrationFit,
    output_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let output_file = output_dir.join(CALIBRATION_PLOT_FILE);
    let start = samples.weights.first().copied().unwrap_or(0.0);

    let fit_points: Vec<(f64, f64)> = linspace(start, CALIBRATION_EXTRAPOLATE_MAX_G, CALIBRATION_FIT_SAMPLES)
        .into_iter()
        .map(|w| (w, fit.weight_to_reading.eval(w)))
        .collect();

    let series = vec![
        PlotSeries::line(samples.points(), "", *COLOR_CALIBRATION_SAMPLES, 1)
            .with_style(LineStyle::Dotted)
            .with_markers(MARKER_SIZE_CALIBRATION),
        PlotSeries::line(fit_points, "", *COLOR_CALIBRATION_FIT, 1),
    ];

    let mut config = PlotConfig::fitted(&fit.title(), "Weight (g)", "Load Cell Output", series, Vec::new());
    config.grid = true;
    draw_single_chart(&output_file, &config)
}

// src/plot_functions/plot_calibration.rs
