// src/plot_functions/plot_thrust.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{LINE_WIDTH_PLOT, MOTOR_COUNT, REFERENCE_MASS_G, THRUST_PLOT_FILE};
use crate::data_analysis::curves::PropellerCurves;
use crate::plot_framework::{draw_single_chart, propeller_color, LineStyle, PlotConfig, PlotSeries, ReferenceLine};

/// Aggregated thrust per propeller with its dash-dot polynomial fit, and the
/// per-motor hover thrust of the reference vehicle.
pub fn plot_thrust(propellers: &[PropellerCurves], output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let output_file = output_dir.join(THRUST_PLOT_FILE);

    let mut series = Vec::with_capacity(propellers.len() * 2);
    for (idx, prop) in propellers.iter().enumerate() {
        let color = propeller_color(idx);
        series.push(PlotSeries::line(prop.thrust.raw.clone(), &prop.identifier, color, LINE_WIDTH_PLOT));
        series.push(PlotSeries::line(prop.thrust.fit.points(), "", color, LINE_WIDTH_PLOT).with_style(LineStyle::DashDot));
    }
    let hover = ReferenceLine::Horizontal {
        y: REFERENCE_MASS_G / MOTOR_COUNT,
        label: "hover".to_string(),
    };

    let config = PlotConfig::fitted("Thrust with RC command", "RC Command", "Thrust (g)", series, vec![hover]);
    draw_single_chart(&output_file, &config)
}

// src/plot_functions/plot_thrust.rs
