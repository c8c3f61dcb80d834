// src/constants.rs

use plotters::style::colors::{BLACK, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1600;
pub const PLOT_HEIGHT: u32 = 1000;

// Font sizes for plot text.
pub const FONT_SIZE_CHART_TITLE: i32 = 28;
pub const FONT_SIZE_AXIS_LABEL: i32 = 18;
pub const FONT_SIZE_LEGEND: i32 = 18;

// Line widths.
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 3;
pub const LINE_WIDTH_REFERENCE: u32 = 2;
pub const MARKER_SIZE_CALIBRATION: u32 = 4;

// --- Calibration ---

// Collection stops once the accumulated weight exceeds this value (grams).
pub const CALIBRATION_STOP_WEIGHT_G: f64 = 950.0;
// The weight -> reading fit is drawn from the first collected weight up to here.
pub const CALIBRATION_EXTRAPOLATE_MAX_G: f64 = 2000.0;
pub const CALIBRATION_FIT_SAMPLES: usize = 100;
pub const CALIBRATION_DATA_PATH: &str = "./datasets/calibration/calibration_data.npy";

pub const PROMPT_BASELINE: &str = "lc_output: ";
pub const PROMPT_WEIGHT: &str = "Input weight (g): ";

pub const COLOR_CALIBRATION_SAMPLES: &RGBColor = &BLACK;
pub const COLOR_CALIBRATION_FIT: &RGBColor = &RED;

// --- Thrust-stand reduction ---

pub const TTS_DATA_DIR: &str = "./datasets/tts";
pub const PSU_DATA_DIR: &str = "./datasets/psu";

// Shortest file-name prefix ending in "_<digits>".
pub const RUN_IDENTIFIER_PATTERN: &str = r"^(.*?_\d+)";

// A thrust-test sample needs a power-supply sample this close in time.
pub const TIMESTAMP_TOLERANCE: f64 = 1.0;

// DShot command codes are mapped linearly from this range onto [0, 1].
pub const DSHOT_CMD_MIN: f64 = 0.0;
pub const DSHOT_CMD_MAX: f64 = 2000.0;

// Reference vehicle mass (grams) and motor count for TWR and the hover line.
pub const REFERENCE_MASS_G: f64 = 710.0;
pub const MOTOR_COUNT: f64 = 4.0;
pub const HOVER_COMMAND: f64 = 0.4;

// Polynomial fits.
pub const THRUST_FIT_ORDER: usize = 3;
pub const THRUST_OMEGA_FIT_ORDER: usize = 2;
pub const EXTRAPOLATE_SAMPLES: usize = 100;
pub const THRUST_OMEGA_REFERENCE: f64 = 400.0;

// Savitzky-Golay smoothing (window length, polynomial order) per curve.
pub const SG_OMEGA_WINDOW: usize = 6;
pub const SG_OMEGA_ORDER: usize = 3;
pub const SG_EFFICIENCY_WINDOW: usize = 20;
pub const SG_EFFICIENCY_ORDER: usize = 3;
pub const SG_THRUST_OMEGA_WINDOW: usize = 11;
pub const SG_THRUST_OMEGA_ORDER: usize = 3;

// One color per propeller, shared by every figure. Cycled past eight.
pub const PROPELLER_PALETTE: [RGBColor; 8] = [
    RGBColor(0x1b, 0x9e, 0x77),
    RGBColor(0xd9, 0x5f, 0x02),
    RGBColor(0x75, 0x70, 0xb3),
    RGBColor(0xe7, 0x29, 0x8a),
    RGBColor(0x66, 0xa6, 0x1e),
    RGBColor(0xe6, 0xab, 0x02),
    RGBColor(0xa6, 0x76, 0x1d),
    RGBColor(0x66, 0x66, 0x66),
];
pub const COLOR_REFERENCE_LINE: &RGBColor = &BLACK;

// Output file names.
pub const CALIBRATION_PLOT_FILE: &str = "calibration_fit.png";
pub const THRUST_PLOT_FILE: &str = "thrust_vs_command.png";
pub const OMEGA_PLOT_FILE: &str = "omega_vs_command.png";
pub const EFFICIENCY_PLOT_FILE: &str = "efficiency_vs_command.png";
pub const THRUST_OMEGA_PLOT_FILE: &str = "thrust_vs_omega.png";

// src/constants.rs
