//! Forecast output types: per-year records, the result table, and curve selectors.

use std::fmt;

use serde::Serialize;

/// Every forecast quantity for one year of the horizon.
///
/// Energies are in watt-hours; device counts are dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRecord {
    /// Calendar year.
    pub year: i32,
    /// Bottom-up exponential device count.
    pub n_bu_exp: f64,
    /// Bottom-up logistic device count.
    pub n_bu_log: f64,
    /// Bottom-up exponential energy (Wh).
    pub e_bu_exp: f64,
    /// Bottom-up logistic energy (Wh).
    pub e_bu_log: f64,
    /// Top-down exponential energy (Wh).
    pub e_td_exp: f64,
    /// Top-down logistic energy (Wh).
    pub e_td_log: f64,
    /// `∂E_td_exp/∂rN_td` (Wh per unit rate).
    pub de_dr_n: f64,
    /// `∂E_td_exp/∂rho` (Wh per unit rate).
    pub de_drho: f64,
    /// Lower 95 % bound of `e_td_exp` (Wh).
    pub e_td_lower: f64,
    /// Upper 95 % bound of `e_td_exp` (Wh).
    pub e_td_upper: f64,
}

impl YearRecord {
    /// Value of the given curve in this record.
    pub fn value(&self, curve: Curve) -> f64 {
        match curve {
            Curve::DevicesBuExp => self.n_bu_exp,
            Curve::DevicesBuLog => self.n_bu_log,
            Curve::BuExp => self.e_bu_exp,
            Curve::BuLog => self.e_bu_log,
            Curve::TdExp => self.e_td_exp,
            Curve::TdLog => self.e_td_log,
            Curve::TdLower => self.e_td_lower,
            Curve::TdUpper => self.e_td_upper,
            Curve::SensRn => self.de_dr_n,
            Curve::SensRho => self.de_drho,
        }
    }

    /// Returns `true` if every quantity in the record is finite.
    pub fn is_finite(&self) -> bool {
        Curve::ALL.iter().all(|&c| self.value(c).is_finite())
    }

    /// Curves whose value overflowed or became undefined in this year.
    pub fn non_finite_curves(&self) -> Vec<Curve> {
        Curve::ALL
            .iter()
            .copied()
            .filter(|&c| !self.value(c).is_finite())
            .collect()
    }
}

impl fmt::Display for YearRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | BU exp={:.3e}  log={:.3e} Wh | TD exp={:.3e}  log={:.3e} Wh \
             | CI [{:.3e}, {:.3e}] | dE/dr={:.3e}  dE/drho={:.3e}",
            self.year,
            self.e_bu_exp,
            self.e_bu_log,
            self.e_td_exp,
            self.e_td_log,
            self.e_td_lower,
            self.e_td_upper,
            self.de_dr_n,
            self.de_drho,
        )
    }
}

/// Selector for one per-year series of a [`ForecastResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Curve {
    /// Device count, compound growth.
    DevicesBuExp,
    /// Device count, logistic growth.
    DevicesBuLog,
    /// Bottom-up energy from compound device growth.
    BuExp,
    /// Bottom-up energy from logistic device growth.
    BuLog,
    /// Top-down energy, exponential net growth.
    TdExp,
    /// Top-down energy, logistic workload.
    TdLog,
    /// Lower 95 % bound on top-down exponential energy.
    TdLower,
    /// Upper 95 % bound on top-down exponential energy.
    TdUpper,
    /// Sensitivity to the workload growth rate.
    SensRn,
    /// Sensitivity to the efficiency gain.
    SensRho,
}

impl Curve {
    /// All curves in export order.
    pub const ALL: [Curve; 10] = [
        Curve::DevicesBuExp,
        Curve::DevicesBuLog,
        Curve::BuExp,
        Curve::BuLog,
        Curve::TdExp,
        Curve::TdLog,
        Curve::TdLower,
        Curve::TdUpper,
        Curve::SensRn,
        Curve::SensRho,
    ];

    /// Energy-valued curves in the column order of the data table export.
    pub const ENERGY: [Curve; 8] = [
        Curve::BuExp,
        Curve::BuLog,
        Curve::TdExp,
        Curve::TdLog,
        Curve::TdLower,
        Curve::TdUpper,
        Curve::SensRn,
        Curve::SensRho,
    ];

    /// The four model variants compared side by side.
    pub const MODELS: [Curve; 4] = [Curve::BuExp, Curve::BuLog, Curve::TdExp, Curve::TdLog];

    /// Column label used in tabular exports.
    pub fn label(self) -> &'static str {
        match self {
            Curve::DevicesBuExp => "BU_Devices_Exp",
            Curve::DevicesBuLog => "BU_Devices_Log",
            Curve::BuExp => "BU_Exp",
            Curve::BuLog => "BU_Log",
            Curve::TdExp => "TD_Exp",
            Curve::TdLog => "TD_Log",
            Curve::TdLower => "TD_Lower",
            Curve::TdUpper => "TD_Upper",
            Curve::SensRn => "Sens_rN",
            Curve::SensRho => "Sens_rho",
        }
    }

    /// Short model name used in the long-format comparison table.
    pub fn model_name(self) -> &'static str {
        match self {
            Curve::BuExp => "BU Exp",
            Curve::BuLog => "BU Log",
            Curve::TdExp => "TD Exp",
            Curve::TdLog => "TD Log",
            other => other.label(),
        }
    }

    /// Whether the series is in watt-hours (and therefore unit-scaled).
    pub fn is_energy(self) -> bool {
        !matches!(self, Curve::DevicesBuExp | Curve::DevicesBuLog)
    }
}

/// Ordered per-year forecast table.
///
/// Records are strictly ascending by year with no gaps, one per year of the
/// inclusive horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastResult {
    records: Vec<YearRecord>,
}

impl ForecastResult {
    pub(crate) fn from_records(records: Vec<YearRecord>) -> Self {
        debug_assert!(records.windows(2).all(|w| w[1].year == w[0].year + 1));
        Self { records }
    }

    /// All records in ascending year order.
    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for the start year.
    pub fn first(&self) -> Option<&YearRecord> {
        self.records.first()
    }

    /// Record for the end year.
    pub fn last(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    /// Record for a calendar year, if it lies in the horizon.
    pub fn get(&self, year: i32) -> Option<&YearRecord> {
        let start = self.first()?.year;
        let idx = usize::try_from(i64::from(year) - i64::from(start)).ok()?;
        self.records.get(idx)
    }

    /// Years of the horizon.
    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// `(year, value)` pairs for one curve.
    pub fn series(&self, curve: Curve) -> Vec<(i32, f64)> {
        self.records
            .iter()
            .map(|r| (r.year, r.value(curve)))
            .collect()
    }

    /// Records with years in `from..=to`.
    pub fn range(&self, from: i32, to: i32) -> impl Iterator<Item = &YearRecord> {
        self.records
            .iter()
            .filter(move |r| r.year >= from && r.year <= to)
    }

    /// Returns `true` if no quantity overflowed or became undefined.
    pub fn is_finite(&self) -> bool {
        self.records.iter().all(YearRecord::is_finite)
    }

    /// Years containing at least one non-finite quantity.
    pub fn non_finite_years(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter(|r| !r.is_finite())
            .map(|r| r.year)
            .collect()
    }
}

impl<'a> IntoIterator for &'a ForecastResult {
    type Item = &'a YearRecord;
    type IntoIter = std::slice::Iter<'a, YearRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
