//! `Calendar` trait and the trivial calendars.
//!
//! A calendar knows which dates are business days and can adjust and advance
//! dates according to a [`BusinessDayConvention`].  Market calendars live in
//! [`crate::calendars`].

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use ql_core::errors::Result;

/// A financial calendar.
///
/// Corresponds to `QuantLib::Calendar`.  Implementations are immutable and
/// shared between schedules through `Arc<dyn Calendar>`; two calendars are
/// considered equal when their names are equal.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"TARGET"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` falls on a weekend for this calendar.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return `true` if `date` is on or after the last business day of its
    /// month.
    fn is_end_of_month(&self, date: Date) -> bool {
        match date
            .add_days(1)
            .and_then(|next| self.adjust(next, BusinessDayConvention::Following))
        {
            Ok(next) => date.month() != next.month(),
            // Nothing follows the last representable date.
            Err(_) => true,
        }
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Result<Date> {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    ///
    /// # Errors
    /// Fails only when the search for a business day leaves the valid date
    /// range.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        use BusinessDayConvention::*;
        match convention {
            Unadjusted => Ok(date),
            Following => roll(self, date, 1),
            Preceding => roll(self, date, -1),
            ModifiedFollowing | HalfMonthModifiedFollowing => {
                let following = roll(self, date, 1)?;
                if following.month() != date.month() {
                    return roll(self, date, -1);
                }
                if convention == HalfMonthModifiedFollowing
                    && date.day_of_month() <= 15
                    && following.day_of_month() > 15
                {
                    return roll(self, date, -1);
                }
                Ok(following)
            }
            ModifiedPreceding => {
                let preceding = roll(self, date, -1)?;
                if preceding.month() != date.month() {
                    roll(self, date, 1)
                } else {
                    Ok(preceding)
                }
            }
            Nearest => {
                let (mut fwd, mut bwd) = (date, date);
                while self.is_holiday(fwd) && self.is_holiday(bwd) {
                    fwd = fwd.add_days(1)?;
                    bwd = bwd.add_days(-1)?;
                }
                Ok(if self.is_holiday(fwd) { bwd } else { fwd })
            }
        }
    }

    /// Advance `date` by `n` units and adjust the result.
    ///
    /// Day steps count business days.  Week steps move calendar weeks.
    /// Month and year steps move calendar months; when `end_of_month` is set
    /// and `date` is the last business day of its month, the result is the
    /// last business day of the target month.
    fn advance(
        &self,
        date: Date,
        n: i32,
        unit: TimeUnit,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        if n == 0 {
            return self.adjust(date, convention);
        }
        match unit {
            TimeUnit::Days => {
                let step = n.signum();
                let mut d = date;
                for _ in 0..n.unsigned_abs() {
                    d = d.add_days(step)?;
                    while self.is_holiday(d) {
                        d = d.add_days(step)?;
                    }
                }
                Ok(d)
            }
            TimeUnit::Weeks => self.adjust(date.advance(n, unit)?, convention),
            TimeUnit::Months | TimeUnit::Years => {
                let d = date.advance(n, unit)?;
                if end_of_month && self.is_end_of_month(date) {
                    self.end_of_month(d)
                } else {
                    self.adjust(d, convention)
                }
            }
        }
    }

    /// [`advance`](Self::advance) by a [`Period`].
    fn advance_by_period(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        self.advance(date, period.length, period.unit, convention, end_of_month)
    }

    /// Count the business days between `d1` (exclusive) and `d2`
    /// (inclusive).  Returns a negative number if `d2 < d1`.
    fn business_days_between(&self, d1: Date, d2: Date) -> i32 {
        let (start, end, sign) = if d2 >= d1 { (d1, d2, 1) } else { (d2, d1, -1) };
        let count = (start.serial() + 1..=end.serial())
            .filter_map(|s| Date::from_serial(s).ok())
            .filter(|&d| self.is_business_day(d))
            .count() as i32;
        sign * count
    }

    /// Holidays between `from` and `to` (both inclusive), optionally
    /// including weekends.
    fn holiday_list(&self, from: Date, to: Date, include_weekends: bool) -> Vec<Date> {
        (from.serial()..=to.serial())
            .filter_map(|s| Date::from_serial(s).ok())
            .filter(|&d| self.is_holiday(d) && (include_weekends || !self.is_weekend(d)))
            .collect()
    }
}

/// Step from `date` in direction `step` until a business day is found.
fn roll<C: Calendar + ?Sized>(cal: &C, mut date: Date, step: i32) -> Result<Date> {
    while cal.is_holiday(date) {
        date = date.add_days(step)?;
    }
    Ok(date)
}

impl PartialEq for dyn Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for dyn Calendar {}

impl std::fmt::Display for dyn Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A calendar where every day is a business day.
///
/// Equivalent to `QuantLib::NullCalendar`; schedule generation steps with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn is_weekend(&self, _date: Date) -> bool {
        false
    }
}

/// Saturdays and Sundays are the only non-business days.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "weekends only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}
