//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::units::DisplayUnit;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub unit: Option<DisplayUnit>,
    pub csv_out: Option<PathBuf>,
    pub long_csv_out: Option<PathBuf>,
    pub quiet: bool,
    pub help: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first malformed or conflicting argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parses an argument list without the program name.
///
/// # Errors
///
/// Returns a message describing the first malformed or conflicting argument.
pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--start-year" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --start-year (expected a year)")?;
                opts.start_year = Some(parse_year("--start-year", raw)?);
            }
            "--end-year" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --end-year (expected a year)")?;
                opts.end_year = Some(parse_year("--end-year", raw)?);
            }
            "--unit" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --unit (expected wh, kwh, mwh, gwh or twh)")?;
                opts.unit = Some(raw.parse()?);
            }
            "--csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                if opts.csv_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--csv-out provided more than once".to_string());
                }
            }
            "--long-csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --long-csv-out (expected a file path)")?;
                if opts.long_csv_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--long-csv-out provided more than once".to_string());
                }
            }
            "--quiet" | "-q" => opts.quiet = true,
            "--help" | "-h" => opts.help = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(port);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.scenario.is_none() && opts.preset.is_none() {
        opts.preset = Some("baseline".to_string());
    }

    Ok(opts)
}

fn parse_year(flag: &str, raw: &str) -> Result<i32, String> {
    raw.parse::<i32>()
        .map_err(|_| format!("{flag} value \"{raw}\" is not a valid year"))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("aiot-forecast: AIoT energy consumption forecaster");
    eprintln!();
    eprintln!("Usage: aiot-forecast [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, saturating, efficiency_lag, long_horizon)");
    eprintln!("  --start-year <year>      Override the first forecast year");
    eprintln!("  --end-year <year>        Override the last forecast year");
    eprintln!("  --unit <name>            Display unit: wh, kwh, mwh, gwh, twh");
    eprintln!("  --csv-out <path>         Export the full data table to CSV");
    eprintln!("  --long-csv-out <path>    Export the model comparison table to CSV");
    eprintln!("  --quiet                  Print only the summary");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the forecast");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("Set AIOT_LOG (e.g. AIOT_LOG=debug) to control log verbosity.");
}
