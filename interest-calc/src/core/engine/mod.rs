//! Interest calculation engine
//!
//! This module provides the lookup tables and formulas behind every
//! calculation:
//!
//! - [`TimeUnit`] converts a duration in a given unit to fractional years
//! - [`Frequency`] maps a compounding label to compounds per year
//! - [`simple`] and [`compound`] compute interest and total amount
//!
//! Time units and frequencies deliberately differ in how they treat unknown
//! labels: an unknown time unit is read as years ([`to_years`]), while an
//! unknown compounding frequency is an error ([`CalcError::UnknownFrequency`]).

use super::CalcError;
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// Longest duration accepted when the time is given in years
pub const MAX_TIME_YEARS: f64 = 1000.0;

/// Unit in which a time period is expressed
///
/// # Example
///
/// ```
/// use interest_calc::TimeUnit;
///
/// let unit: TimeUnit = "Months".parse().unwrap();
/// assert_eq!(unit, TimeUnit::Months);
/// assert!((unit.years_factor() * 12.0 - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Years,
    Months,
    Days,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Every supported unit, in display order
    pub const ALL: [TimeUnit; 5] = [
        TimeUnit::Years,
        TimeUnit::Months,
        TimeUnit::Days,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    /// Fraction of a year represented by one of this unit
    ///
    /// Uses a 365-day year for days, minutes and seconds.
    pub fn years_factor(&self) -> f64 {
        match self {
            TimeUnit::Years => 1.0,
            TimeUnit::Months => 1.0 / 12.0,
            TimeUnit::Days => 1.0 / 365.0,
            TimeUnit::Minutes => 1.0 / 525_600.0,
            TimeUnit::Seconds => 1.0 / 31_536_000.0,
        }
    }

    /// The form label for this unit
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Years => "Years",
            TimeUnit::Months => "Months",
            TimeUnit::Days => "Days",
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Seconds => "Seconds",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a time value with a unit label into fractional years
///
/// Unknown labels fall back to a factor of 1, i.e. the value is read as years.
///
/// # Example
///
/// ```
/// use interest_calc::core::engine::to_years;
///
/// assert!((to_years(18.0, "Months") - 1.5).abs() < 1e-12);
/// assert_eq!(to_years(3.0, "Fortnights"), 3.0);
/// ```
pub fn to_years(value: f64, unit: &str) -> f64 {
    let factor = unit
        .parse::<TimeUnit>()
        .map_or(1.0, |unit| unit.years_factor());
    value * factor
}

/// How often interest is compounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    #[default]
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
}

impl Frequency {
    /// Every supported frequency, least to most frequent
    pub const ALL: [Frequency; 4] = [
        Frequency::Annually,
        Frequency::SemiAnnually,
        Frequency::Quarterly,
        Frequency::Monthly,
    ];

    /// Number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annually => 1,
            Frequency::SemiAnnually => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// The form label for this frequency
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Annually => "Annually",
            Frequency::SemiAnnually => "Semi-Annually",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == s)
            .ok_or(CalcError::UnknownFrequency)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of interest to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterestType {
    Simple,
    Compound,
}

impl InterestType {
    /// Heading used when presenting a result
    pub fn label(&self) -> &'static str {
        match self {
            InterestType::Simple => "Simple Interest",
            InterestType::Compound => "Compound Interest",
        }
    }

    /// The form value for this interest type
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Simple => "simple",
            InterestType::Compound => "compound",
        }
    }
}

impl FromStr for InterestType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(InterestType::Simple),
            "compound" => Ok(InterestType::Compound),
            _ => Err(CalcError::UnknownInterestType),
        }
    }
}

/// Interest accrued over a period together with the resulting total
///
/// `total` is always `principal + interest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    /// Interest earned over the period
    pub interest: f64,
    /// Principal plus interest
    pub total: f64,
}

impl Accrual {
    /// Whether both amounts are finite numbers
    pub fn is_finite(&self) -> bool {
        self.interest.is_finite() && self.total.is_finite()
    }
}

/// Simple interest: `principal × rate × years / 100`
///
/// # Parameters
///
/// - `principal`: Initial amount
/// - `rate`: Annual rate in percent
/// - `years`: Duration in (fractional) years
///
/// # Example
///
/// ```
/// use interest_calc::core::engine::simple;
///
/// let accrual = simple(1000.0, 5.0, 2.0);
/// assert_eq!(accrual.interest, 100.0);
/// assert_eq!(accrual.total, 1100.0);
/// ```
pub fn simple(principal: f64, rate: f64, years: f64) -> Accrual {
    let interest = principal * rate * years / 100.0;
    Accrual {
        interest,
        total: principal + interest,
    }
}

/// Compound interest for a frequency given by its form label
///
/// # Errors
///
/// - [`CalcError::UnknownFrequency`]: `frequency` is not one of the four labels
/// - [`CalcError::Overflow`]: the total is not a finite number
///
/// # Example
///
/// ```
/// use interest_calc::core::engine::compound;
///
/// let accrual = compound(1000.0, 5.0, 2.0, "Annually").unwrap();
/// assert!((accrual.total - 1102.5).abs() < 1e-9);
/// assert!(compound(1000.0, 5.0, 2.0, "Weekly").is_err());
/// ```
pub fn compound(
    principal: f64,
    rate: f64,
    years: f64,
    frequency: &str,
) -> Result<Accrual, CalcError> {
    let frequency = frequency.parse::<Frequency>()?;
    compound_with(principal, rate, years, frequency)
}

/// Compound interest: `principal × (1 + rate / (100 × n))^(n × years)`
///
/// # Errors
///
/// Returns [`CalcError::Overflow`] when the growth factor or the total leaves
/// the finite `f64` range.
pub fn compound_with(
    principal: f64,
    rate: f64,
    years: f64,
    frequency: Frequency,
) -> Result<Accrual, CalcError> {
    let n = f64::from(frequency.periods_per_year());
    let growth = (1.0 + rate / (100.0 * n)).powf(n * years);
    let total = principal * growth;

    // 0 × inf is NaN, so a zero principal with an infinite growth factor lands here too
    if !total.is_finite() {
        return Err(CalcError::Overflow);
    }

    Ok(Accrual {
        interest: total - principal,
        total,
    })
}
