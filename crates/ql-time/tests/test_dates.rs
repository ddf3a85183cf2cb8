//! Tests ported from QuantLib `test-suite/dates.cpp` and `period.cpp`.
//!
//! These integration tests exercise the `Date`, `Period` and `IMM` types.

use std::collections::HashSet;

use proptest::prelude::*;
use ql_core::ScopedEvaluationDate;
use ql_time::date::{days_in_month, is_leap_year};
use ql_time::weekday::Weekday;
use ql_time::{Date, Frequency, Month, Period, TimeUnit, IMM};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// ─── IMM tests ────────────────────────────────────────────────────────────────

#[test]
fn imm_dates() {
    // Iterate over a range of dates and verify IMM invariants
    let start = date(2000, 1, 1);
    let end = date(2040, 1, 1);

    let mut counter = start;
    while counter <= end {
        let imm = IMM::next_date(counter, false).unwrap();

        assert!(imm > counter, "{imm} is not greater than {counter}");
        assert!(
            IMM::is_imm_date(imm, false),
            "{imm} is not an IMM date (calculated from {counter})"
        );
        assert!(
            imm <= IMM::next_date(counter, true).unwrap(),
            "{imm} is not less than or equal to the next main cycle IMM date"
        );

        let code = IMM::code(imm).expect("IMM date has a code");
        assert!(IMM::is_imm_code(&code, false), "{code} is not a valid IMM code");
        assert_eq!(
            IMM::date(&code, counter).unwrap(),
            imm,
            "{code} at calendar day {counter} is not the IMM date {imm}"
        );

        counter = counter + 1;
    }
}

#[test]
fn imm_specific_dates() {
    // 3rd Wednesday of March 2024 = March 20
    assert!(IMM::is_imm_date(date(2024, 3, 20), true));
    assert_eq!(IMM::code(date(2024, 3, 20)), Some("H4".to_string()));

    // 3rd Wednesday of June 2024 = June 19
    assert!(IMM::is_imm_date(date(2024, 6, 19), true));
    assert_eq!(IMM::code(date(2024, 6, 19)), Some("M4".to_string()));

    // 3rd Wednesday of Sep 2024 = Sep 18
    assert!(IMM::is_imm_date(date(2024, 9, 18), true));
    assert_eq!(IMM::code(date(2024, 9, 18)), Some("U4".to_string()));

    // 3rd Wednesday of Dec 2024 = Dec 18
    assert!(IMM::is_imm_date(date(2024, 12, 18), true));
    assert_eq!(IMM::code(date(2024, 12, 18)), Some("Z4".to_string()));

    // off-cycle
    assert!(IMM::is_imm_date(date(2024, 1, 17), false));
    assert!(!IMM::is_imm_date(date(2024, 1, 17), true));
    assert!(IMM::date("Q1", date(2024, 1, 1)).is_ok());
    assert!(IMM::date("A1", date(2024, 1, 1)).is_err());
}

// ─── Date consistency test ────────────────────────────────────────────────────

#[test]
fn test_consistency() {
    // Iterate over the entire valid date range and check every invariant.
    let min_serial = Date::MIN.serial() + 1;
    let max_serial = Date::MAX.serial();

    let prev = Date::from_serial(min_serial - 1).unwrap();
    let mut dy_old = prev.day_of_year() as i32;
    let mut d_old = prev.day_of_month() as i32;
    let mut m_old = prev.month() as i32;
    let mut y_old = prev.year() as i32;
    let mut wd_old = prev.weekday().ordinal() as i32;

    for i in min_serial..=max_serial {
        let t = Date::from_serial(i).unwrap();
        assert_eq!(t.serial(), i, "inconsistent serial for date {t}");

        let dy = t.day_of_year() as i32;
        let d = t.day_of_month() as i32;
        let m = t.month() as i32;
        let y = t.year() as i32;
        let wd = t.weekday().ordinal() as i32;

        assert!(
            (dy == dy_old + 1)
                || (dy == 1 && dy_old == 365 && !is_leap_year(y_old as u16))
                || (dy == 1 && dy_old == 366 && is_leap_year(y_old as u16)),
            "wrong day of year increment: date={t}, dy={dy}, prev={dy_old}"
        );
        dy_old = dy;

        assert!(
            (d == d_old + 1 && m == m_old && y == y_old)
                || (d == 1 && m == m_old + 1 && y == y_old)
                || (d == 1 && m == 1 && y == y_old + 1),
            "wrong day/month/year increment: date={t}, d/m/y={d}/{m}/{y}, \
             prev={d_old}/{m_old}/{y_old}"
        );
        d_old = d;
        m_old = m;
        y_old = y;

        let max_day = days_in_month(y as u16, m as u8) as i32;
        assert!(
            d >= 1 && d <= max_day,
            "invalid day of month: date={t}, day={d}, max={max_day}"
        );

        // Weekday increment wraps from Sunday (7) to Monday (1)
        assert!(
            (wd == wd_old + 1) || (wd == 1 && wd_old == 7),
            "invalid weekday increment: date={t}, wd={wd}, prev_wd={wd_old}"
        );
        wd_old = wd;

        let s = Date::from_ymd(y as u16, m as u8, d as u8).unwrap();
        assert_eq!(
            s.serial(),
            i,
            "roundtrip failed: date={t}, serial={i}, cloned serial={}",
            s.serial()
        );
    }
}

// ─── Hash test ────────────────────────────────────────────────────────────────

#[test]
fn can_hash() {
    use std::hash::{Hash, Hasher};

    fn hash_of(d: Date) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        d.hash(&mut hasher);
        hasher.finish()
    }

    let start = date(2020, 1, 1);
    for i in 0..200 {
        for j in 0..200 {
            let (lhs, rhs) = (start + i, start + j);
            if lhs == rhs {
                assert_eq!(hash_of(lhs), hash_of(rhs), "{lhs} vs {rhs}");
            } else {
                assert_ne!(hash_of(lhs), hash_of(rhs), "{lhs} vs {rhs}");
            }
        }
    }

    let mut set = HashSet::new();
    set.insert(start);
    assert!(set.contains(&start), "expected to find date in HashSet");
}

// ─── Construction and bounds ──────────────────────────────────────────────────

#[test]
fn null_date() {
    let null = Date::NULL;
    assert!(null.is_null());
    assert_eq!(null.serial(), 0);
    assert!(Date::from_serial(0).is_err());
    assert!(Date::from_serial(Date::MAX.serial() + 1).is_err());
}

#[test]
fn invalid_ymd() {
    assert!(Date::from_ymd(2023, 2, 29).is_err());
    assert!(Date::from_ymd(2024, 13, 1).is_err());
    assert!(Date::from_ymd(2024, 4, 31).is_err());
    assert!(Date::from_ymd(1800, 1, 1).is_err());
    assert_eq!(Date::new(29, Month::February, 2024).unwrap(), date(2024, 2, 29));
}

#[test]
fn display() {
    assert_eq!(date(2006, 1, 15).to_string(), "15 January 2006");
    assert_eq!(Date::NULL.to_string(), "null date");
}

#[test]
fn leap_years() {
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2004));
    assert!(!is_leap_year(2001));
    assert!(is_leap_year(2400));
    assert!(!is_leap_year(2100));
}

#[test]
fn end_of_month() {
    assert!(date(2024, 2, 29).is_end_of_month());
    assert!(!date(2024, 2, 28).is_end_of_month());
    assert!(date(2023, 2, 28).is_end_of_month());
    assert!(date(2023, 12, 31).is_end_of_month());
    assert!(!date(2023, 12, 30).is_end_of_month());
    assert_eq!(date(2023, 2, 3).end_of_month(), date(2023, 2, 28));
}

#[test]
fn nth_weekday() {
    assert_eq!(
        Date::nth_weekday(3, Weekday::Wednesday, 3, 2024).unwrap(),
        date(2024, 3, 20)
    );
    assert_eq!(
        Date::nth_weekday(5, Weekday::Friday, 3, 2024).unwrap(),
        date(2024, 3, 29)
    );
    assert!(Date::nth_weekday(5, Weekday::Monday, 2, 2023).is_err());
    assert!(Date::nth_weekday(0, Weekday::Monday, 2, 2023).is_err());
}

// ─── Date arithmetic tests ──────────────────────────────────────────────────

#[test]
fn date_arithmetic() {
    let d = date(2024, 1, 15);

    let d2 = d + 10;
    assert_eq!(d2, date(2024, 1, 25));

    let d3 = d - 15;
    assert_eq!(d3, date(2023, 12, 31));

    assert_eq!(d2 - d3, 25);

    assert_eq!(date(2024, 1, 31) + 1, date(2024, 2, 1));
    assert_eq!(date(2023, 12, 31) + 1, date(2024, 1, 1));
    assert!(Date::MAX.add_days(1).is_err());
}

#[test]
fn month_arithmetic_clamps_to_month_end() {
    assert_eq!(date(2024, 1, 31) + Period::new(1, TimeUnit::Months), date(2024, 2, 29));
    assert_eq!(date(2024, 2, 29) + Period::new(1, TimeUnit::Years), date(2025, 2, 28));
    assert_eq!(date(2024, 3, 31) - Period::new(1, TimeUnit::Months), date(2024, 2, 29));
    assert_eq!(date(2024, 1, 15) + Period::new(2, TimeUnit::Weeks), date(2024, 1, 29));
    assert_eq!(
        date(2024, 1, 31).advance(-13, TimeUnit::Months).unwrap(),
        date(2022, 12, 31)
    );
}

#[test]
fn weekday_consistency() {
    // 2024-01-01 is a Monday
    assert_eq!(date(2024, 1, 1).weekday(), Weekday::Monday);
    assert_eq!(date(2024, 1, 2).weekday(), Weekday::Tuesday);
    assert_eq!(date(2024, 1, 6).weekday(), Weekday::Saturday);
    assert_eq!(date(2024, 1, 7).weekday(), Weekday::Sunday);
}

// ─── Evaluation date ──────────────────────────────────────────────────────────

#[test]
fn evaluation_date_override() {
    let d = date(2015, 6, 30);
    {
        let _guard = ScopedEvaluationDate::new(d.serial());
        assert_eq!(Date::evaluation_date().unwrap(), d);
    }
    assert_eq!(Date::evaluation_date().unwrap(), Date::todays_date().unwrap());
}

// ─── Periods ──────────────────────────────────────────────────────────────────

#[test]
fn period_comparison() {
    assert_eq!(Period::new(12, TimeUnit::Months), Period::new(1, TimeUnit::Years));
    assert_eq!(Period::new(14, TimeUnit::Days), Period::new(2, TimeUnit::Weeks));
    assert!(Period::new(11, TimeUnit::Months) < Period::new(1, TimeUnit::Years));
    assert!(Period::new(5, TimeUnit::Weeks) > Period::new(1, TimeUnit::Months));
    // 30 days against one month cannot be decided
    assert_eq!(
        Period::new(30, TimeUnit::Days).partial_cmp(&Period::new(1, TimeUnit::Months)),
        None
    );
}

#[test]
fn period_parsing() {
    assert_eq!("6M".parse::<Period>().unwrap(), Period::new(6, TimeUnit::Months));
    assert_eq!("1Y6M".parse::<Period>().unwrap(), Period::new(18, TimeUnit::Months));
    assert_eq!("-3W".parse::<Period>().unwrap(), Period::new(-3, TimeUnit::Weeks));
    assert!("6X".parse::<Period>().is_err());
    assert!("".parse::<Period>().is_err());
    assert!("1M2D".parse::<Period>().is_err());
}

#[test]
fn period_frequencies() {
    assert_eq!(Period::new(6, TimeUnit::Months).frequency(), Frequency::Semiannual);
    assert_eq!(Period::new(12, TimeUnit::Months).frequency(), Frequency::Annual);
    assert_eq!(Period::new(0, TimeUnit::Years).frequency(), Frequency::Once);
    assert_eq!(Period::new(5, TimeUnit::Months).frequency(), Frequency::OtherFrequency);
    assert_eq!(
        Period::try_from(Frequency::Biweekly).unwrap(),
        Period::new(2, TimeUnit::Weeks)
    );
}

proptest! {
    #[test]
    fn adding_then_subtracting_days_is_identity(
        serial in 40_000i32..60_000,
        n in -5_000i32..5_000,
    ) {
        let d = Date::from_serial(serial).unwrap();
        let moved = d.add_days(n).unwrap();
        prop_assert_eq!(moved - d, n);
        prop_assert_eq!(moved.add_days(-n).unwrap(), d);
    }

    #[test]
    fn month_steps_never_overshoot(serial in 40_000i32..60_000, n in 1i32..48) {
        let d = Date::from_serial(serial).unwrap();
        let moved = d.advance(n, TimeUnit::Months).unwrap();
        let months = |x: Date| i32::from(x.year()) * 12 + i32::from(x.month());
        prop_assert_eq!(months(moved) - months(d), n);
        prop_assert!(moved.day_of_month() <= d.day_of_month());
    }
}
