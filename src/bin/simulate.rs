//! Headless balance simulator CLI.
//!
//! Plays seeded runs with the autopilot and prints survival/score stats.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 200 random runs
//!   cargo run --bin simulate -- -n 50 --seed 42   # Reproducible batch
//!   cargo run --bin simulate -- --config tuning.json --json

use laneshift::config::RunConfig;
use laneshift::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

struct Options {
    sim: SimConfig,
    config_path: Option<PathBuf>,
    json: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let mut options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("simulate: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &options.config_path {
        match RunConfig::load(path) {
            Ok(run) => options.sim.run = run,
            Err(e) => {
                eprintln!("simulate: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let config = &options.sim;
    if !options.json {
        println!("Laneshift balance simulator");
        println!("  Runs:        {}", config.num_runs);
        println!("  Time limit:  {}s", config.max_run_ms / 1000);
        if let Some(seed) = config.seed {
            println!("  Seed:        {}", seed);
        }
        println!();
    }

    let report = run_simulation(config);

    if options.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options {
        sim: SimConfig::default(),
        config_path: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                options.sim.num_runs = parse_value(&args[i], value)?;
                i += 1;
            }
            "-s" | "--seed" => {
                options.sim.seed = Some(parse_value(&args[i], value)?);
                i += 1;
            }
            "-t" | "--time-limit" => {
                let secs: u64 = parse_value(&args[i], value)?;
                options.sim.max_run_ms = secs * 1000;
                i += 1;
            }
            "-c" | "--config" => {
                let path = value.ok_or("--config needs a path")?;
                options.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--json" => options.json = true,
            "-h" | "--help" => {
                print_help();
                return Ok(None);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let raw = value.ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("{} got an invalid value '{}'", flag, raw))
}

fn print_help() {
    println!("Laneshift Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>         Number of runs (default: 200)");
    println!("    -s, --seed <S>         Base seed; run i uses S + i");
    println!("    -t, --time-limit <T>   Seconds before a run is stopped (default: 300)");
    println!("    -c, --config <PATH>    Run tuning JSON file");
    println!("    --json                 Print the report as JSON");
    println!("    -h, --help             Show this help");
}
