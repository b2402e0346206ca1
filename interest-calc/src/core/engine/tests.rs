use super::*;

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_time_unit_factors() {
    assert_eq!(TimeUnit::Years.years_factor(), 1.0);
    assert_close(TimeUnit::Months.years_factor() * 12.0, 1.0);
    assert_close(TimeUnit::Days.years_factor() * 365.0, 1.0);
    assert_close(TimeUnit::Minutes.years_factor() * 525_600.0, 1.0);
    assert_close(TimeUnit::Seconds.years_factor() * 31_536_000.0, 1.0);
}

#[test]
fn test_twelve_months_is_one_year() {
    assert_close(to_years(12.0, "Months"), to_years(1.0, "Years"));
    assert_close(to_years(365.0, "Days"), 1.0);
    assert_close(to_years(525_600.0, "Minutes"), 1.0);
    assert_close(to_years(31_536_000.0, "Seconds"), 1.0);
}

#[test]
fn test_unknown_time_unit_reads_as_years() {
    assert_eq!(to_years(7.0, "Decades"), 7.0);
    assert_eq!(to_years(7.0, ""), 7.0);
    // Labels are case sensitive
    assert_eq!(to_years(7.0, "months"), 7.0);
}

#[test]
fn test_time_unit_labels_round_trip() {
    for unit in TimeUnit::ALL {
        assert_eq!(unit.as_str().parse::<TimeUnit>(), Ok(unit));
    }
}

#[test]
fn test_frequency_lookup() {
    assert_eq!("Annually".parse::<Frequency>(), Ok(Frequency::Annually));
    assert_eq!(
        "Semi-Annually".parse::<Frequency>(),
        Ok(Frequency::SemiAnnually)
    );
    assert_eq!("Quarterly".parse::<Frequency>(), Ok(Frequency::Quarterly));
    assert_eq!("Monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
    assert_eq!(
        "Weekly".parse::<Frequency>(),
        Err(CalcError::UnknownFrequency)
    );
    assert_eq!(Frequency::default(), Frequency::Annually);

    let periods: Vec<u32> = Frequency::ALL.iter().map(|f| f.periods_per_year()).collect();
    assert_eq!(periods, vec![1, 2, 4, 12]);
}

#[test]
fn test_interest_type_lookup() {
    assert_eq!("simple".parse::<InterestType>(), Ok(InterestType::Simple));
    assert_eq!("compound".parse::<InterestType>(), Ok(InterestType::Compound));
    assert_eq!(
        "unknown".parse::<InterestType>(),
        Err(CalcError::UnknownInterestType)
    );
    assert_eq!(InterestType::Simple.label(), "Simple Interest");
    assert_eq!(InterestType::Compound.label(), "Compound Interest");
}

#[test]
fn test_simple_interest() {
    let accrual = simple(1000.0, 5.0, 2.0);
    assert_close(accrual.interest, 100.0);
    assert_close(accrual.total, 1100.0);

    for (principal, rate, years) in [(0.0, 5.0, 1.0), (2500.0, 0.0, 3.0), (123.45, 7.5, 0.25)] {
        let accrual = simple(principal, rate, years);
        assert_close(accrual.interest, principal * rate * years / 100.0);
        assert_close(accrual.total, principal + accrual.interest);
    }
}

#[test]
fn test_compound_interest_annually() {
    let accrual = compound(1000.0, 5.0, 2.0, "Annually").unwrap();
    assert_close(accrual.total, 1102.5);
    assert_close(accrual.interest, 102.5);
}

#[test]
fn test_compound_interest_monthly() {
    let accrual = compound(1000.0, 12.0, 1.0, "Monthly").unwrap();
    assert_close(accrual.total, 1000.0 * 1.01f64.powi(12));
    assert_close(accrual.total, accrual.interest + 1000.0);
}

#[test]
fn test_compound_never_below_principal() {
    for frequency in Frequency::ALL {
        for (principal, rate, years) in [(1000.0, 0.0, 10.0), (50.0, 3.0, 0.0), (10.0, 99.0, 5.0)]
        {
            let accrual = compound_with(principal, rate, years, frequency).unwrap();
            assert!(accrual.total >= principal);
            assert!(accrual.interest >= 0.0);
        }
    }
}

#[test]
fn test_compound_approaches_simple_for_short_periods() {
    // The gap between the totals shrinks roughly in proportion to the period
    for frequency in Frequency::ALL {
        let mut previous_gap = f64::INFINITY;
        for years in [1e-2, 1e-4, 1e-6] {
            let compounded = compound_with(1000.0, 5.0, years, frequency).unwrap();
            let simple = simple(1000.0, 5.0, years);
            let gap = (compounded.total - simple.total).abs();
            assert!(
                gap < previous_gap / 50.0,
                "{frequency:?} at {years} years: {gap} vs {previous_gap}"
            );
            previous_gap = gap;
        }
        assert!(previous_gap < 1e-5, "{frequency:?}: {previous_gap}");
    }
}

#[test]
fn test_compound_unknown_frequency() {
    assert_eq!(
        compound(1000.0, 5.0, 2.0, "Weekly"),
        Err(CalcError::UnknownFrequency)
    );
}

#[test]
fn test_compound_overflow() {
    // 1000 years within the ceiling but a rate that explodes the growth factor
    assert_eq!(
        compound(1000.0, 1_000_000.0, 1000.0, "Monthly"),
        Err(CalcError::Overflow)
    );
    // Huge minute counts slip past the years-only ceiling
    let years = to_years(1e12, "Minutes");
    assert_eq!(
        compound_with(1000.0, 50.0, years, Frequency::Monthly),
        Err(CalcError::Overflow)
    );
    // Zero principal times an infinite factor must not leak a NaN
    assert_eq!(
        compound_with(0.0, 1_000_000.0, 1000.0, Frequency::Monthly),
        Err(CalcError::Overflow)
    );
}
