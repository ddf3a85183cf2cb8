//! `Date` type (translates `ql/time/date.hpp`).
//!
//! Dates are stored as a serial number of days.
//!
//! # Serial number convention
//! * Serial 0 is the "null date" sentinel.
//! * Serial 1 = January 1, 1900 (proleptic Gregorian calendar, so 1900 is
//!   not a leap year).
//! * The valid date range is 1900-01-01 to 2199-12-31.

use crate::month::Month;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;
use chrono::Datelike;
use ql_core::errors::{Error, Result};
use ql_core::Settings;

/// A calendar date represented as a serial number.
///
/// Corresponds to `QuantLib::Date`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date(i32);

/// Offset between the serial numbering and days since 1970-01-01.
const SERIAL_OFFSET: i32 = 25_568;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2199;

impl Date {
    /// The null date sentinel (serial 0).
    pub const NULL: Date = Date(0);

    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    ///
    /// Returns an error if `serial` is not in `[MIN, MAX]`.
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "serial number {serial} outside [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&i32::from(year)) {
            return Err(Error::Date(format!(
                "year {year} out of range [{MIN_YEAR}, {MAX_YEAR}]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let last = days_in_month(year, month);
        if day == 0 || day > last {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {last}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(i32::from(year), month, day)))
    }

    /// Create a date QuantLib-style, from day, [`Month`] and year.
    pub fn new(day: u8, month: Month, year: u16) -> Result<Self> {
        Self::from_ymd(year, month.number(), day)
    }

    /// Today's date on the local system clock.
    pub fn todays_date() -> Result<Self> {
        let today = chrono::Local::now().date_naive();
        let year = u16::try_from(today.year())
            .map_err(|_| Error::Date(format!("year {} out of range", today.year())))?;
        Self::from_ymd(year, today.month() as u8, today.day() as u8)
    }

    /// The global evaluation date, or today's date when none is set.
    pub fn evaluation_date() -> Result<Self> {
        match Settings::instance().evaluation_date_serial() {
            Some(serial) => Self::from_serial(serial),
            None => Self::todays_date(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return `true` if this is the null date sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// Return the month number (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the month as a [`Month`].
    pub fn month_of_year(&self) -> Month {
        // ymd() only yields months in 1..=12.
        Month::from_number(self.month()).unwrap_or(Month::January)
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let y = i32::from(self.year());
        (self.0 - serial_from_ymd(y, 1, 1) + 1) as u16
    }

    /// Return the weekday.  January 1, 1900 was a Monday.
    pub fn weekday(&self) -> Weekday {
        let w = (self.0 - 1).rem_euclid(7) as u8 + 1;
        Weekday::from_ordinal(w).unwrap_or(Weekday::Monday)
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        self.0
            .checked_add(n)
            .filter(|s| (Self::MIN.0..=Self::MAX.0).contains(s))
            .map(Date)
            .ok_or_else(|| {
                Error::Date(format!("{self:?} + {n} days is outside the valid date range"))
            })
    }

    /// Advance by `n` units.
    ///
    /// Month and year steps keep the day of the month, clamped to the length
    /// of the target month (31 January + 1M = 28/29 February).
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => self.add_days(n.saturating_mul(7)),
            TimeUnit::Months => {
                let (y, m, d) = self.ymd();
                let total = i32::from(y) * 12 + i32::from(m) - 1 + n;
                let new_y = total.div_euclid(12);
                let new_m = (total.rem_euclid(12) + 1) as u8;
                if !(MIN_YEAR..=MAX_YEAR).contains(&new_y) {
                    return Err(Error::Date(format!(
                        "{self:?} advanced by {n} months leaves the valid date range"
                    )));
                }
                let new_d = d.min(days_in_month(new_y as u16, new_m));
                Ok(Date(serial_from_ymd(new_y, new_m, new_d)))
            }
            TimeUnit::Years => self.advance(n.saturating_mul(12), TimeUnit::Months),
        }
    }

    /// Advance by a [`Period`] (negative lengths move backward).
    pub fn add_period(self, p: Period) -> Result<Self> {
        self.advance(p.length, p.unit)
    }

    /// Move back by a [`Period`].
    pub fn sub_period(self, p: Period) -> Result<Self> {
        self.advance(-p.length, p.unit)
    }

    /// Return the number of calendar days from `self` to `other`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        Date(serial_from_ymd(i32::from(y), m, days_in_month(y, m)))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the *n*-th `weekday` of `month` in `year`.
    ///
    /// For example, `nth_weekday(3, Weekday::Wednesday, 3, 2024)` returns the
    /// third Wednesday of March 2024 (2024-03-20).
    ///
    /// # Errors
    /// Returns an error if `n` is zero, if the month has fewer than `n` such
    /// weekdays, or if the month is out of range.
    pub fn nth_weekday(n: u8, weekday: Weekday, month: u8, year: u16) -> Result<Self> {
        if !(1..=5).contains(&n) {
            return Err(Error::Date(format!("nth_weekday: n ({n}) must be in [1, 5]")));
        }
        let first = Date::from_ymd(year, month, 1)?;
        let day = 1 + first.weekday().days_until(weekday) + 7 * (n - 1);
        if day > days_in_month(year, month) {
            return Err(Error::Date(format!(
                "nth_weekday: there is no {n}-th {weekday} in {year}-{month:02}"
            )));
        }
        Ok(Date(first.0 + i32::from(day) - 1))
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────
//
// The operators panic when the result leaves the valid range, like indexing
// past the end of a slice; library code uses the checked methods above.

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Add<Period> for Date {
    type Output = Self;
    fn add(self, rhs: Period) -> Self {
        self.add_period(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<Period> for Date {
    type Output = Self;
    fn sub(self, rhs: Period) -> Self {
        self.sub_period(rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i32> for Date {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null date");
        }
        let (y, _, d) = self.ymd();
        write!(f, "{d} {} {y}", self.month_of_year())
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "Date(null)");
        }
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Calendar arithmetic helpers ───────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Days-from-civil / civil-from-days in the 400-year era form; the valid
// range only contains positive years, so plain integer division is exact.

fn serial_from_ymd(year: i32, month: u8, day: u8) -> i32 {
    let m = i32::from(month);
    let y = if m <= 2 { year - 1 } else { year };
    let era = y / 400;
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i32::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 + SERIAL_OFFSET
}

fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let z = serial - SERIAL_OFFSET + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y as u16, m, d)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
