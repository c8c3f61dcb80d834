// src/plot_functions/plot_omega.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{LINE_WIDTH_PLOT, OMEGA_PLOT_FILE};
use crate::data_analysis::curves::PropellerCurves;
use crate::plot_framework::{draw_single_chart, propeller_color, PlotConfig, PlotSeries};

pub fn plot_omega(propellers: &[PropellerCurves], output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let output_file = output_dir.join(OMEGA_PLOT_FILE);

    let series = propellers
        .iter()
        .enumerate()
        .map(|(idx, prop)| {
            PlotSeries::line(prop.omega.points.clone(), &prop.identifier, propeller_color(idx), LINE_WIDTH_PLOT)
        })
        .collect();

    let config = PlotConfig::fitted(
        "Angular Velocity with RC command",
        "RC Command",
        "Omega (rad/s)",
        series,
        Vec::new(),
    );
    draw_single_chart(&output_file, &config)
}

// src/plot_functions/plot_omega.rs
