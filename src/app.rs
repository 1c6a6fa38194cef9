//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the search configuration
//! - runs the search pipeline
//! - prints reports/plots (stdout) and diagnostics (stderr)

use std::time::Instant;

use clap::Parser;
use serde::Serialize;

use crate::cli::{Command, ConvertArgs, DividerArgs, OutputArgs, PullupArgs, RangeArgs, ThermistorArgs};
use crate::domain::{
    AdcWindow, DividerConfig, PullupConfig, TemperatureRange, Thermistor, Topology, TopologyKind,
};
use crate::error::AppError;
use crate::search::{LinearGrid, SearchOptions};

pub mod pipeline;

/// Entry point for the `thermdiv` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Divider(args) => handle_divider(args),
        Command::Pullup(args) => handle_pullup(args),
        Command::Convert(args) => handle_convert(args),
    }
}

fn handle_divider(args: DividerArgs) -> Result<(), AppError> {
    let config = divider_config_from_args(&args);
    let output = &args.output;

    let started = Instant::now();
    let run = pipeline::run_divider(&config, output.samples)?;

    if output.verbose {
        eprint!(
            "{}",
            crate::report::format_progress(&run.search.progress, &config.adc)
        );
        eprintln!(
            "Searched {} combinations in {:.2?} ({} threads).",
            run.search.evaluated,
            started.elapsed(),
            if config.options.parallel {
                rayon::current_num_threads()
            } else {
                1
            }
        );
    }

    if output.json {
        return print_json(&run);
    }

    print!("{}", crate::report::format_divider_summary(&config, &run.search));
    if output.plot {
        println!();
        print!(
            "{}",
            crate::plot::render_response_plot(&run.response, Some(&config.adc), output.width, output.height)
        );
    }

    Ok(())
}

fn handle_pullup(args: PullupArgs) -> Result<(), AppError> {
    let config = pullup_config_from_args(&args);
    let output = &args.output;

    let started = Instant::now();
    let run = pipeline::run_pullup(&config, output.samples)?;

    if output.verbose {
        eprintln!(
            "Searched {} pull-up values in {:.2?}.",
            run.search.evaluated,
            started.elapsed()
        );
    }

    if output.json {
        return print_json(&run);
    }

    print!("{}", crate::report::format_pullup_summary(&config, &run.search));
    if output.plot {
        println!();
        print!(
            "{}",
            crate::plot::render_response_plot(&run.response, None, output.width, output.height)
        );
    }

    Ok(())
}

fn handle_convert(args: ConvertArgs) -> Result<(), AppError> {
    let thermistor = thermistor_from_args(&args.thermistor);
    let topology = topology_from_args(&args)?;
    let ratio = match (args.ratio, args.volts) {
        (Some(ratio), _) => ratio,
        (None, Some(volts)) => {
            let supply = args.supply.unwrap_or(1.0);
            if !(supply.is_finite() && supply > 0.0) {
                return Err(AppError::new(2, "--supply must be finite and > 0."));
            }
            volts / supply
        }
        (None, None) => return Err(AppError::new(2, "Provide --ratio or --volts.")),
    };

    let conversion = pipeline::run_convert(&thermistor, topology, ratio)?;
    if args.json {
        return print_json(&conversion);
    }
    print!("{}", crate::report::format_conversion(&conversion));
    Ok(())
}

pub fn divider_config_from_args(args: &DividerArgs) -> DividerConfig {
    DividerConfig {
        thermistor: thermistor_from_args(&args.thermistor),
        range: range_from_args(&args.range),
        vdd: args.vdd,
        adc: AdcWindow {
            min_volts: args.adc_min,
            max_volts: args.adc_max,
        },
        rd_grid: LinearGrid::new(args.rd_min, args.rd_max, args.rd_steps),
        ru_grid: LinearGrid::new(args.ru_min, args.ru_max, args.ru_steps),
        options: SearchOptions {
            parallel: !args.sequential,
            progress_stride: progress_stride(args.progress_every, &args.output),
        },
    }
}

pub fn pullup_config_from_args(args: &PullupArgs) -> PullupConfig {
    PullupConfig {
        thermistor: thermistor_from_args(&args.thermistor),
        range: range_from_args(&args.range),
        vref: args.vref,
        rp_min_factor: args.rp_min_factor,
        rp_max_factor: args.rp_max_factor,
        rp_points: args.rp_steps,
    }
}

fn thermistor_from_args(args: &ThermistorArgs) -> Thermistor {
    Thermistor {
        t0_celsius: args.t0,
        beta: args.beta,
        r0: args.r0,
    }
}

fn range_from_args(args: &RangeArgs) -> TemperatureRange {
    TemperatureRange {
        min_celsius: args.t_min,
        max_celsius: args.t_max,
    }
}

/// Progress samples are only worth collecting when someone will see them.
fn progress_stride(every: u64, output: &OutputArgs) -> u64 {
    if output.verbose || output.json { every } else { 0 }
}

fn topology_from_args(args: &ConvertArgs) -> Result<Topology, AppError> {
    match args.topology {
        TopologyKind::Pullup => {
            let rp = args
                .rp
                .ok_or_else(|| AppError::new(2, "--topology pullup needs --rp."))?;
            if !(rp.is_finite() && rp > 0.0) {
                return Err(AppError::new(2, format!("--rp must be finite and > 0 (got {rp}).")));
            }
            Ok(Topology::Pullup { rp })
        }
        TopologyKind::Divider => {
            let (Some(rd), Some(ru)) = (args.rd, args.ru) else {
                return Err(AppError::new(2, "--topology divider needs --rd and --ru."));
            };
            if !(rd.is_finite() && ru.is_finite() && rd >= 0.0 && ru > 0.0) {
                return Err(AppError::new(
                    2,
                    format!("--rd must be >= 0 and --ru > 0 (got rd={rd}, ru={ru})."),
                ));
            }
            Ok(Topology::Divider { rd, ru })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize JSON output: {e}")))?;
    println!("{text}");
    Ok(())
}
