// src/bin/calibrate.rs

use std::env;
use std::error::Error;
use std::io;
use std::path::PathBuf;

use thruststand_csv_render::constants::CALIBRATION_DATA_PATH;
use thruststand_csv_render::data_analysis::calibration::{collect_samples, fit_calibration, zero_readings};
use thruststand_csv_render::data_input::calibration_file::{load_calibration, save_calibration};
use thruststand_csv_render::plot_functions::plot_calibration::plot_calibration;

struct Options {
    load: bool,
    data_path: PathBuf,
    output_dir: PathBuf,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [--load] [--output-dir <dir>] [<calibration.npy>]");
    eprintln!("  --load              Fit a previously saved calibration instead of collecting one");
    eprintln!("  --output-dir <dir>  Where the PNG figure is written (default: .)");
    eprintln!("  <calibration.npy>   Calibration array path (default: {CALIBRATION_DATA_PATH})");
}

fn parse_args(program: &str, args: &[String]) -> Options {
    let mut options = Options {
        load: false,
        data_path: PathBuf::from(CALIBRATION_DATA_PATH),
        output_dir: PathBuf::from("."),
    };
    let mut positional_seen = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--load" => options.load = true,
            "--output-dir" => match iter.next() {
                Some(dir) => options.output_dir = PathBuf::from(dir),
                None => {
                    eprintln!("Error: --output-dir requires a directory");
                    print_usage(program);
                    std::process::exit(1);
                }
            },
            "-h" | "--help" => {
                print_usage(program);
                std::process::exit(0);
            }
            other if other.starts_with('-') || positional_seen => {
                eprintln!("Error: unexpected argument '{other}'");
                print_usage(program);
                std::process::exit(1);
            }
            path => {
                options.data_path = PathBuf::from(path);
                positional_seen = true;
            }
        }
    }
    options
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("calibrate");
    let options = parse_args(program, args.get(1..).unwrap_or(&[]));

    println!("calibrate {}", thruststand_csv_render::crate_version());

    // Freshly collected samples are fitted as read; saved ones are zeroed first.
    let samples = if options.load {
        let mut samples = load_calibration(&options.data_path)?;
        zero_readings(&mut samples);
        samples
    } else {
        let stdin = io::stdin();
        let samples = collect_samples(stdin.lock(), io::stdout())?;
        save_calibration(&options.data_path, &samples)?;
        samples
    };

    let fit = fit_calibration(&samples)?;
    println!("{}", fit.report());

    plot_calibration(&samples, &fit, &options.output_dir)?;
    Ok(())
}

// src/bin/calibrate.rs
