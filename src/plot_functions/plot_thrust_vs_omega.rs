// src/plot_functions/plot_thrust_vs_omega.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{LINE_WIDTH_PLOT, THRUST_OMEGA_PLOT_FILE};
use crate::data_analysis::curves::PropellerCurves;
use crate::plot_framework::{draw_single_chart, propeller_color, PlotConfig, PlotSeries};

pub fn plot_thrust_vs_omega(propellers: &[PropellerCurves], output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let output_file = output_dir.join(THRUST_OMEGA_PLOT_FILE);

    let series = propellers
        .iter()
        .enumerate()
        .map(|(idx, prop)| {
            PlotSeries::line(prop.thrust_omega.points.clone(), &prop.identifier, propeller_color(idx), LINE_WIDTH_PLOT)
        })
        .collect();

    let config = PlotConfig::fitted(
        "Thrust with Angular Velocity",
        "Omega (rad/s)",
        "Thrust (g)",
        series,
        Vec::new(),
    );
    draw_single_chart(&output_file, &config)
}

// src/plot_functions/plot_thrust_vs_omega.rs
