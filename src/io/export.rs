//! CSV export for forecast results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::types::{Curve, ForecastResult};
use crate::units::DisplayUnit;

/// Column header of the full data table for a display unit.
///
/// `Year` followed by every energy curve as `"<label> (<unit>)"`.
pub fn table_header(unit: DisplayUnit) -> Vec<String> {
    std::iter::once("Year".to_string())
        .chain(
            Curve::ENERGY
                .iter()
                .map(|c| format!("{} ({unit})", c.label())),
        )
        .collect()
}

/// Formats a unit-scaled value with `decimals` places for display.
///
/// Values that round to zero print without a sign. Non-finite values render
/// as `inf`, `-inf` or `NaN`.
pub fn format_value(wh: f64, unit: DisplayUnit, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, unit.scale(wh));
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// Formats a unit-scaled value at full precision for export.
///
/// Uses the shortest representation that parses back to the same `f64`,
/// switching to exponent notation for very small or large magnitudes.
pub fn export_value(wh: f64, unit: DisplayUnit) -> String {
    let v = unit.scale(wh);
    if v == 0.0 {
        return "0.0".to_string();
    }
    format!("{v:?}")
}

/// Exports the full data table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &ForecastResult, unit: DisplayUnit, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, unit, buf)?;
    tracing::info!(path = %path.display(), rows = result.len(), "forecast table written");
    Ok(())
}

/// Writes the full data table as CSV to any writer.
///
/// One row per year in ascending order, one column per energy curve, each
/// value divided by the unit and written at full precision.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &ForecastResult, unit: DisplayUnit, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(table_header(unit))?;

    for r in result {
        let row = std::iter::once(r.year.to_string()).chain(
            Curve::ENERGY
                .iter()
                .map(|&c| export_value(r.value(c), unit)),
        );
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the model-comparison table in long format to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_long_csv(result: &ForecastResult, unit: DisplayUnit, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_long_csv(result, unit, buf)?;
    tracing::info!(path = %path.display(), "model comparison table written");
    Ok(())
}

/// Writes `Year,Model,Energy (<unit>)` rows: all years of `BU Exp`, then
/// `BU Log`, `TD Exp` and `TD Log`.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_long_csv(
    result: &ForecastResult,
    unit: DisplayUnit,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    let energy = format!("Energy ({unit})");
    wtr.write_record(["Year", "Model", energy.as_str()])?;

    for curve in Curve::MODELS {
        for (year, wh) in result.series(curve) {
            wtr.write_record([
                year.to_string(),
                curve.model_name().to_string(),
                export_value(wh, unit),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
