// src/main.rs

use std::env;
use std::error::Error;
use std::path::PathBuf;

use thruststand_csv_render::constants::{PSU_DATA_DIR, THRUST_FIT_ORDER, TTS_DATA_DIR};
use thruststand_csv_render::data_input::run_discovery::discover_runs;
use thruststand_csv_render::plot_functions::{
    plot_efficiency::plot_efficiency, plot_omega::plot_omega, plot_thrust::plot_thrust,
    plot_thrust_vs_omega::plot_thrust_vs_omega,
};
use thruststand_csv_render::reduction::{derive_all_curves, reduce_propellers};

struct Options {
    tts_dir: PathBuf,
    psu_dir: PathBuf,
    output_dir: PathBuf,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [--tts-dir <dir>] [--psu-dir <dir>] [--output-dir <dir>]");
    eprintln!("  --tts-dir <dir>     Thrust-test-stand logs (default: {TTS_DATA_DIR})");
    eprintln!("  --psu-dir <dir>     Power-supply logs (default: {PSU_DATA_DIR})");
    eprintln!("  --output-dir <dir>  Where the PNG figures are written (default: .)");
}

fn parse_args(program: &str, args: &[String]) -> Options {
    let mut options = Options {
        tts_dir: PathBuf::from(TTS_DATA_DIR),
        psu_dir: PathBuf::from(PSU_DATA_DIR),
        output_dir: PathBuf::from("."),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let target = match arg.as_str() {
            "--tts-dir" => &mut options.tts_dir,
            "--psu-dir" => &mut options.psu_dir,
            "--output-dir" => &mut options.output_dir,
            "-h" | "--help" => {
                print_usage(program);
                std::process::exit(0);
            }
            other => {
                eprintln!("Error: unknown argument '{other}'");
                print_usage(program);
                std::process::exit(1);
            }
        };
        match iter.next() {
            Some(value) => *target = PathBuf::from(value),
            None => {
                eprintln!("Error: {arg} requires a directory");
                print_usage(program);
                std::process::exit(1);
            }
        }
    }
    options
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("thruststand_csv_render");
    let options = parse_args(program, args.get(1..).unwrap_or(&[]));

    println!("thruststand_csv_render {}", thruststand_csv_render::crate_version());

    let catalog = discover_runs(&options.tts_dir, &options.psu_dir)?;
    let reduced = reduce_propellers(&catalog)?;
    if reduced.is_empty() {
        log::warn!("No propeller has valid runs; nothing to plot.");
        return Ok(());
    }
    let curves = derive_all_curves(&reduced, THRUST_FIT_ORDER)?;

    // Report lines are grouped per figure, in propeller order.
    for prop in &curves {
        println!("{}", prop.thrust_report());
    }
    for prop in &curves {
        println!("{}", prop.efficiency_report());
    }
    for prop in &curves {
        println!("{}", prop.thrust_omega_report());
    }

    plot_thrust(&curves, &options.output_dir)?;
    plot_omega(&curves, &options.output_dir)?;
    plot_efficiency(&curves, &options.output_dir)?;
    plot_thrust_vs_omega(&curves, &options.output_dir)?;

    Ok(())
}

// src/main.rs
