// src/plot_functions/plot_efficiency.rs

use std::error::Error;
use std::path::Path;

use plotters::chart::SeriesLabelPosition;

use crate::constants::{EFFICIENCY_PLOT_FILE, HOVER_COMMAND, LINE_WIDTH_PLOT};
use crate::data_analysis::curves::PropellerCurves;
use crate::plot_framework::{draw_single_chart, propeller_color, PlotConfig, PlotSeries, ReferenceLine};

/// Smoothed efficiency per propeller, with the hover command marked.
pub fn plot_efficiency(propellers: &[PropellerCurves], output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let output_file = output_dir.join(EFFICIENCY_PLOT_FILE);

    let series = propellers
        .iter()
        .enumerate()
        .map(|(idx, prop)| {
            PlotSeries::line(prop.efficiency.points.clone(), &prop.identifier, propeller_color(idx), LINE_WIDTH_PLOT)
        })
        .collect();
    let hover = ReferenceLine::Vertical {
        x: HOVER_COMMAND,
        label: "hover".to_string(),
    };

    let mut config = PlotConfig::fitted(
        "Efficiency with RC command",
        "RC Command",
        "Efficiency (g/W)",
        series,
        vec![hover],
    );
    config.legend_position = SeriesLabelPosition::LowerRight;
    draw_single_chart(&output_file, &config)
}

// src/plot_functions/plot_efficiency.rs
