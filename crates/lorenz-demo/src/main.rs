#![forbid(unsafe_code)]

//! Lorenz trail binary entry point.

use std::process;

use lorenz_demo::app::{self, AppConfig};
use lorenz_demo::{cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    let config = AppConfig::from_opts(&opts);
    if let Err(errors) = config.simulation.validate() {
        for error in &errors {
            eprintln!("Invalid configuration: {error}");
        }
        process::exit(1);
    }

    if let Err(e) = logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        process::exit(1);
    }

    match app::run(config) {
        Ok(summary) => {
            if opts.record.is_some() {
                eprintln!(
                    "Recorded {} frames ({} steps) in {:.1}s",
                    summary.frames,
                    summary.steps,
                    summary.elapsed.as_secs_f64()
                );
            }
            if let Some(signal) = summary.signal {
                process::exit(128 + signal);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "runtime error");
            eprintln!("Runtime error: {e}");
            process::exit(1);
        }
    }
}
