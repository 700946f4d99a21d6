// src/main.rs

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use telem2json::constants::{DEFAULT_THROTTLE_THRESHOLD, SETTLE_OFFSET_S};
use telem2json::crate_version;
use telem2json::data_input::stream_parser::load_log_dir;
use telem2json::extract::{extract_records, ExtractOptions};
use telem2json::json_output::{default_output_path, write_records};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS] <LOG_DIR>", program);
    eprintln!();
    eprintln!("Extract a time-synchronized subset of a flight telemetry log as JSON.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <FILE>            output JSON path (default: <LOG_DIR>.json)");
    eprintln!("      --throttle-threshold <T>   arming threshold on Throttle (default: {})", DEFAULT_THROTTLE_THRESHOLD);
    eprintln!("      --settle-offset <S>        seconds added to the window start (default: {})", SETTLE_OFFSET_S);
    eprintln!("  -h, --help                     print this help");
    eprintln!("  -V, --version                  print version");
}

struct CliArgs {
    log_dir: PathBuf,
    output: Option<PathBuf>,
    options: ExtractOptions,
}

fn parse_args(args: &[String]) -> Result<CliArgs, Box<dyn Error>> {
    let mut log_dir: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut options = ExtractOptions::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let value = iter.next().ok_or("missing value for --output")?;
                output = Some(PathBuf::from(value));
            }
            "--throttle-threshold" => {
                let value = iter.next().ok_or("missing value for --throttle-threshold")?;
                let threshold = value
                    .parse::<f64>()
                    .map_err(|_| format!("invalid throttle threshold '{}'", value))?;
                if !threshold.is_finite() {
                    return Err(format!("throttle threshold must be finite, got '{}'", value).into());
                }
                options.throttle_threshold = threshold;
            }
            "--settle-offset" => {
                let value = iter.next().ok_or("missing value for --settle-offset")?;
                let offset = value
                    .parse::<f64>()
                    .map_err(|_| format!("invalid settle offset '{}'", value))?;
                if !offset.is_finite() || offset < 0.0 {
                    return Err(format!("settle offset must be >= 0, got '{}'", value).into());
                }
                options.settle_offset_s = offset;
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{}'", other).into());
            }
            _ => {
                if log_dir.is_some() {
                    return Err("more than one log directory given".into());
                }
                log_dir = Some(PathBuf::from(arg));
            }
        }
    }

    let log_dir = log_dir.ok_or("missing <LOG_DIR> argument")?;
    Ok(CliArgs { log_dir, output, options })
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn Error>> {
    let log = load_log_dir(&cli.log_dir)?;

    println!("\nAligning streams onto the gyro timebase...");
    let records = extract_records(&log, &cli.options)?;
    println!("Length: {}", records.len());

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(&cli.log_dir)?,
    };
    println!("Outputting to {}", output_path.display());
    write_records(&output_path, &records)?;

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("telem2json");

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(program);
        return;
    }
    if args.iter().any(|a| a == "-V" || a == "--version") {
        println!("{} {}", env!("CARGO_PKG_NAME"), crate_version());
        return;
    }

    let cli = match parse_args(&args[1..]) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_log_dir_and_defaults() {
        let cli = parse_args(&strings(&["logs/flight01"])).unwrap();
        assert_eq!(cli.log_dir, PathBuf::from("logs/flight01"));
        assert!(cli.output.is_none());
        assert_eq!(cli.options.throttle_threshold, DEFAULT_THROTTLE_THRESHOLD);
        assert_eq!(cli.options.settle_offset_s, SETTLE_OFFSET_S);
    }

    #[test]
    fn parses_output_and_thresholds() {
        let cli = parse_args(&strings(&[
            "-o", "out.json",
            "--throttle-threshold", "0.05",
            "--settle-offset", "0.25",
            "flight01",
        ]))
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.options.throttle_threshold, 0.05);
        assert_eq!(cli.options.settle_offset_s, 0.25);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&strings(&[])).is_err());
        assert!(parse_args(&strings(&["--output"])).is_err());
        assert!(parse_args(&strings(&["--bogus", "flight01"])).is_err());
        assert!(parse_args(&strings(&["a", "b"])).is_err());
        assert!(parse_args(&strings(&["--settle-offset", "-1", "flight01"])).is_err());
    }

    #[test]
    fn rejects_non_finite_throttle_threshold() {
        assert!(parse_args(&strings(&["--throttle-threshold", "NaN", "flight01"])).is_err());
        assert!(parse_args(&strings(&["--throttle-threshold", "inf", "flight01"])).is_err());
        assert!(parse_args(&strings(&["--throttle-threshold", "0.05", "flight01"])).is_ok());
    }
}
