//! `Schedule`: a sequence of dates (translates `ql/time/schedule.hpp`).
//!
//! A `Schedule` holds the period boundary dates of an instrument, either
//! generated from a start date, an end date, a tenor, a calendar and a
//! [`DateGeneration`] rule (see [`Schedule::new`] and [`ScheduleBuilder`]),
//! or wrapped around an explicit list of dates.
//!
//! Once built a schedule is immutable; [`Schedule::until`] and
//! [`Schedule::after`] return truncated copies.

mod builder;
mod generator;
mod rule;
mod twentieth;

pub use builder::ScheduleBuilder;
pub use rule::DateGeneration;
pub use twentieth::{allows_end_of_month, cds_maturity, next_twentieth, previous_twentieth};

use std::sync::Arc;

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::{Calendar, NullCalendar};
use crate::date::Date;
use crate::period::Period;
use ql_core::errors::{Error, Result};
use ql_core::{ensure, fail};

/// An ordered sequence of period boundary dates.
///
/// Corresponds to `QuantLib::Schedule`.  Generated schedules always carry
/// their full metadata; schedules built from a date list only carry what the
/// caller supplied.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
    is_regular: Vec<bool>,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    termination_convention: Option<BusinessDayConvention>,
    tenor: Option<Period>,
    rule: Option<DateGeneration>,
    end_of_month: Option<bool>,
    first_date: Option<Date>,
    next_to_last_date: Option<Date>,
}

impl Schedule {
    /// Wrap an explicit list of dates, with a null calendar, unadjusted
    /// convention and no regularity information.
    pub fn from_dates(dates: Vec<Date>) -> Self {
        Self {
            dates,
            is_regular: Vec::new(),
            calendar: Arc::new(NullCalendar),
            convention: BusinessDayConvention::Unadjusted,
            termination_convention: None,
            tenor: None,
            rule: None,
            end_of_month: None,
            first_date: None,
            next_to_last_date: None,
        }
    }

    /// Wrap an explicit list of dates together with the metadata that would
    /// have generated it.
    ///
    /// The dates and flags are trusted as given.  The end-of-month flag is
    /// dropped to `false` when `tenor` does not allow it.
    ///
    /// # Errors
    /// Fails unless `is_regular` is empty or has one flag per period.
    #[allow(clippy::too_many_arguments)]
    pub fn from_dates_with_metadata(
        dates: Vec<Date>,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        termination_convention: Option<BusinessDayConvention>,
        tenor: Option<Period>,
        rule: Option<DateGeneration>,
        end_of_month: Option<bool>,
        is_regular: Vec<bool>,
    ) -> Result<Self> {
        ensure!(
            is_regular.is_empty() || is_regular.len() + 1 == dates.len(),
            "is_regular size ({}) must be zero or equal to the number of dates minus 1 ({})",
            is_regular.len(),
            dates.len().saturating_sub(1)
        );
        let end_of_month = match tenor {
            Some(t) if !allows_end_of_month(t) => Some(false),
            _ => end_of_month,
        };
        Ok(Self {
            dates,
            is_regular,
            calendar,
            convention,
            termination_convention,
            tenor,
            rule,
            end_of_month,
            first_date: None,
            next_to_last_date: None,
        })
    }

    // ── Date access ───────────────────────────────────────────────────────────

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// Return `true` if the schedule has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Return all dates in the schedule.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return the `i`-th date.
    ///
    /// # Errors
    /// Fails with [`Error::IndexOutOfRange`] when `i >= size()`.
    pub fn date(&self, i: usize) -> Result<Date> {
        self.get(i).ok_or(Error::IndexOutOfRange {
            index: i,
            lower: 0,
            upper: self.dates.len().saturating_sub(1),
        })
    }

    /// Return the `i`-th date, or `None` past the end.
    pub fn get(&self, i: usize) -> Option<Date> {
        self.dates.get(i).copied()
    }

    /// Iterate over the dates.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Date>> {
        self.dates.iter().copied()
    }

    /// Return the first date.
    pub fn start_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Return the last date.
    pub fn end_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Index of the first date not before `reference`; a null reference
    /// stands for the global evaluation date.
    pub fn lower_bound(&self, reference: Date) -> Result<usize> {
        let d = if reference.is_null() {
            Date::evaluation_date()?
        } else {
            reference
        };
        Ok(self.dates.partition_point(|&x| x < d))
    }

    /// The last date strictly before `reference`, if any.
    pub fn previous_date(&self, reference: Date) -> Result<Option<Date>> {
        let i = self.lower_bound(reference)?;
        Ok(i.checked_sub(1).map(|j| self.dates[j]))
    }

    /// The first date on or after `reference`, if any.
    pub fn next_date(&self, reference: Date) -> Result<Option<Date>> {
        let i = self.lower_bound(reference)?;
        Ok(self.get(i))
    }

    // ── Regularity ────────────────────────────────────────────────────────────

    /// `true` if the schedule carries one regularity flag per period.
    pub fn has_is_regular(&self) -> bool {
        !self.is_regular.is_empty()
    }

    /// Whether period `i` is regular, i.e. exactly one tenor long before
    /// adjustment.  Periods are numbered from 1: period `i` runs from date
    /// `i - 1` to date `i`.
    ///
    /// # Errors
    /// Fails when the schedule has no regularity flags or `i` is not in
    /// `[1, size() - 1]`.
    pub fn is_regular(&self, i: usize) -> Result<bool> {
        ensure!(self.has_is_regular(), "full interface (is_regular) not available");
        if i == 0 || i > self.is_regular.len() {
            return Err(Error::IndexOutOfRange {
                index: i,
                lower: 1,
                upper: self.is_regular.len(),
            });
        }
        Ok(self.is_regular[i - 1])
    }

    /// All regularity flags, one per period (empty if unavailable).
    pub fn is_regular_flags(&self) -> &[bool] {
        &self.is_regular
    }

    // ── Metadata ──────────────────────────────────────────────────────────────

    /// The calendar used for adjustment.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The convention used for every date but the termination date.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// The convention used for the termination date, if known.
    pub fn termination_date_business_day_convention(&self) -> Option<BusinessDayConvention> {
        self.termination_convention
    }

    /// The tenor, if known (`0Y` for zero-coupon schedules).
    pub fn tenor(&self) -> Option<Period> {
        self.tenor
    }

    /// The generation rule, if known.
    pub fn rule(&self) -> Option<DateGeneration> {
        self.rule
    }

    /// The end-of-month flag actually applied, if known.
    pub fn end_of_month(&self) -> Option<bool> {
        self.end_of_month
    }

    /// The first (stub-ending) date, if one was given.
    pub fn first_date(&self) -> Option<Date> {
        self.first_date
    }

    /// The next-to-last (stub-starting) date, if one was given.
    pub fn next_to_last_date(&self) -> Option<Date> {
        self.next_to_last_date
    }

    // ── Truncation ────────────────────────────────────────────────────────────

    /// A copy of the schedule ending on `truncation_date`.
    ///
    /// Later dates are dropped; `truncation_date` is appended as the end of
    /// an irregular period unless it is already a schedule date.
    ///
    /// # Errors
    /// Fails unless `truncation_date` is after the first date.
    pub fn until(&self, truncation_date: Date) -> Result<Schedule> {
        let Some(first) = self.start_date() else {
            fail!("cannot truncate an empty schedule");
        };
        ensure!(
            InvalidRange => truncation_date > first,
            "truncation date {truncation_date} must be later than schedule first date {first}"
        );
        let had_flags = self.has_is_regular();
        let mut result = self.clone();
        if result.dates.last().is_some_and(|&last| truncation_date < last) {
            while result.dates.last().is_some_and(|&d| d > truncation_date) {
                result.dates.pop();
                result.is_regular.pop();
            }
            if result.dates.last() != Some(&truncation_date) {
                result.dates.push(truncation_date);
                if had_flags {
                    result.is_regular.push(false);
                }
                result.termination_convention = Some(BusinessDayConvention::Unadjusted);
            } else {
                result.termination_convention = Some(result.convention);
            }
            result.next_to_last_date = result.next_to_last_date.filter(|&d| d < truncation_date);
            result.first_date = result.first_date.filter(|&d| d < truncation_date);
        }
        Ok(result)
    }

    /// A copy of the schedule starting on `truncation_date`.
    ///
    /// Earlier dates are dropped; `truncation_date` is prepended as the start
    /// of an irregular period unless it is already a schedule date.
    ///
    /// # Errors
    /// Fails unless `truncation_date` is before the last date.
    pub fn after(&self, truncation_date: Date) -> Result<Schedule> {
        let Some(last) = self.end_date() else {
            fail!("cannot truncate an empty schedule");
        };
        ensure!(
            InvalidRange => truncation_date < last,
            "truncation date {truncation_date} must be earlier than schedule last date {last}"
        );
        let had_flags = self.has_is_regular();
        let mut result = self.clone();
        if result.dates.first().is_some_and(|&first| truncation_date > first) {
            let dropped = result.dates.partition_point(|&d| d < truncation_date);
            result.dates.drain(..dropped);
            let flags = dropped.min(result.is_regular.len());
            result.is_regular.drain(..flags);
            if result.dates.first() != Some(&truncation_date) {
                result.dates.insert(0, truncation_date);
                if had_flags {
                    result.is_regular.insert(0, false);
                }
            }
            result.next_to_last_date = result.next_to_last_date.filter(|&d| d > truncation_date);
            result.first_date = result.first_date.filter(|&d| d > truncation_date);
        }
        Ok(result)
    }
}

impl std::ops::Index<usize> for Schedule {
    type Output = Date;

    fn index(&self, i: usize) -> &Date {
        &self.dates[i]
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = Date;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Date>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::Target;
    use crate::time_unit::TimeUnit;
    use ql_core::ScopedEvaluationDate;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn annual() -> Schedule {
        Schedule::from_dates_with_metadata(
            vec![date(2020, 1, 15), date(2021, 1, 15), date(2022, 1, 17)],
            Arc::new(Target),
            BusinessDayConvention::Following,
            Some(BusinessDayConvention::Following),
            Some(Period::new(1, TimeUnit::Years)),
            Some(DateGeneration::Backward),
            Some(false),
            vec![true, true],
        )
        .unwrap()
    }

    #[test]
    fn lookups() {
        let s = annual();
        assert_eq!(s.previous_date(date(2021, 1, 15)).unwrap(), Some(date(2020, 1, 15)));
        assert_eq!(s.next_date(date(2021, 1, 15)).unwrap(), Some(date(2021, 1, 15)));
        assert_eq!(s.next_date(date(2021, 1, 16)).unwrap(), Some(date(2022, 1, 17)));
        assert_eq!(s.previous_date(date(2020, 1, 15)).unwrap(), None);
        assert_eq!(s.next_date(date(2022, 1, 18)).unwrap(), None);
        assert_eq!(s[2], date(2022, 1, 17));
        assert!(matches!(s.date(3), Err(Error::IndexOutOfRange { index: 3, .. })));
        assert_eq!(s.iter().count(), 3);
    }

    #[test]
    fn null_reference_uses_evaluation_date() {
        let s = annual();
        let _guard = ScopedEvaluationDate::new(date(2021, 6, 1).serial());
        assert_eq!(s.next_date(Date::NULL).unwrap(), Some(date(2022, 1, 17)));
        assert_eq!(s.previous_date(Date::NULL).unwrap(), Some(date(2021, 1, 15)));
    }

    #[test]
    fn regularity_is_one_based() {
        let s = annual();
        assert!(s.is_regular(1).unwrap());
        assert!(s.is_regular(2).unwrap());
        assert!(s.is_regular(0).is_err());
        assert!(s.is_regular(3).is_err());
        assert!(Schedule::from_dates(vec![date(2020, 1, 15)]).is_regular(1).is_err());
    }

    #[test]
    fn metadata_validation() {
        let bad = Schedule::from_dates_with_metadata(
            vec![date(2020, 1, 15), date(2021, 1, 15)],
            Arc::new(NullCalendar),
            BusinessDayConvention::Unadjusted,
            None,
            Some(Period::new(2, TimeUnit::Weeks)),
            None,
            Some(true),
            vec![true, false],
        );
        assert!(bad.is_err());
        let weekly = Schedule::from_dates_with_metadata(
            vec![date(2020, 1, 15), date(2020, 1, 29)],
            Arc::new(NullCalendar),
            BusinessDayConvention::Unadjusted,
            None,
            Some(Period::new(2, TimeUnit::Weeks)),
            None,
            Some(true),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(weekly.end_of_month(), Some(false));
    }

    #[test]
    fn truncation_without_flags() {
        let s = Schedule::from_dates(vec![date(2020, 1, 15), date(2021, 1, 15), date(2022, 1, 15)]);
        let t = s.until(date(2021, 6, 1)).unwrap();
        assert_eq!(t.dates(), [date(2020, 1, 15), date(2021, 1, 15), date(2021, 6, 1)]);
        assert!(!t.has_is_regular());
        assert_eq!(
            t.termination_date_business_day_convention(),
            Some(BusinessDayConvention::Unadjusted)
        );
        let a = s.after(date(2021, 1, 15)).unwrap();
        assert_eq!(a.dates(), [date(2021, 1, 15), date(2022, 1, 15)]);
        assert!(s.until(date(2020, 1, 15)).is_err());
        assert!(s.after(date(2022, 1, 15)).is_err());
        // truncating outside the schedule keeps it whole
        assert_eq!(s.until(date(2023, 1, 1)).unwrap().dates(), s.dates());
    }

    #[test]
    fn truncation_within_one_period_keeps_flags() {
        let s = annual();
        let t = s.until(date(2020, 6, 1)).unwrap();
        assert_eq!(t.dates(), [date(2020, 1, 15), date(2020, 6, 1)]);
        assert_eq!(t.is_regular_flags(), [false]);
        assert!(!t.is_regular(1).unwrap());

        let a = s.after(date(2021, 6, 1)).unwrap();
        assert_eq!(a.dates(), [date(2021, 6, 1), date(2022, 1, 17)]);
        assert_eq!(a.is_regular_flags(), [false]);
        assert!(!a.is_regular(1).unwrap());
    }
}
