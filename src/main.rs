//! AIoT energy forecaster entry point: CLI wiring and config-driven forecast run.

use std::path::Path;
use std::process;

use aiot_forecast::cli::{CliOptions, parse_args, print_usage};
use aiot_forecast::config::ScenarioConfig;
use aiot_forecast::io::export::{export_csv, export_long_csv, format_value};
use aiot_forecast::logging::init_tracing;
use aiot_forecast::model::types::{Curve, ForecastResult};
use aiot_forecast::runner::{RunError, run_scenario};
use aiot_forecast::units::DisplayUnit;

/// Default API server port.
#[cfg(feature = "api")]
const DEFAULT_PORT: u16 = 3000;

fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    // --scenario takes priority, then --preset (which defaults to baseline)
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("baseline"))
    };

    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(year) = cli.start_year {
        scenario.horizon.start_year = year;
    }
    if let Some(year) = cli.end_year {
        scenario.horizon.end_year = year;
    }
    if let Some(unit) = cli.unit {
        scenario.output.unit = unit;
    }
    scenario
}

fn print_table(result: &ForecastResult, unit: DisplayUnit, decimals: usize) {
    print!("{:>6}", "Year");
    for curve in Curve::ENERGY {
        print!(" {:>14}", curve.label());
    }
    println!("   ({unit})");

    for r in result {
        print!("{:>6}", r.year);
        for curve in Curve::ENERGY {
            print!(" {:>14}", format_value(r.value(curve), unit, decimals));
        }
        println!();
    }
}

fn main() {
    init_tracing();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        print_usage();
        process::exit(0);
    }

    let scenario = load_scenario(&cli);
    let unit = scenario.output.unit;
    let decimals = scenario.output.decimals;

    let run = match run_scenario(&scenario) {
        Ok(run) => run,
        Err(RunError::Config(errors)) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if !cli.quiet {
        print_table(&run.result, unit, decimals);
    }
    println!("\n{}", run.summary);

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&run.result, unit, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
    }
    if let Some(ref path) = cli.long_csv_out {
        if let Err(e) = export_long_csv(&run.result, unit, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(aiot_forecast::api::AppState {
            parameters: run.parameters,
            result: run.result,
            summary: run.summary,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(DEFAULT_PORT)));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(aiot_forecast::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
