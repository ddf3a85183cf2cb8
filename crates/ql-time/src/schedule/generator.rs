//! Rule-based generation of schedule dates.
//!
//! Generation runs in four passes:
//!
//! 1. validate the inputs and resolve the effective rule, tenor and
//!    end-of-month flag;
//! 2. lay out the raw, unadjusted dates for the rule (backward from the
//!    termination date, forward from the effective date, or just the two
//!    ends for `Zero`);
//! 3. apply the third-Wednesday move and the business-day / end-of-month
//!    adjustment;
//! 4. merge boundary dates that adjustment pushed onto (or past) their
//!    neighbours.

use std::sync::Arc;

use tracing::{debug, trace};

use super::rule::DateGeneration;
use super::twentieth::{allows_end_of_month, cds2015_termination, next_twentieth, previous_twentieth};
use super::Schedule;
use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::{Calendar, NullCalendar};
use crate::date::Date;
use crate::imm::IMM;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;
use ql_core::errors::Result;
use ql_core::{ensure, ensure_post, fail};

/// Minimum length, in calendar days, of the initial stub under `OldCDS`.
const OLD_CDS_STUB_DAYS: i32 = 30;

impl Schedule {
    /// Generate a schedule from `effective_date` to `termination_date`.
    ///
    /// Dates are laid out `tenor` apart according to `rule`, then adjusted
    /// on `calendar`: the termination date with
    /// `termination_date_convention`, every other date with `convention`.
    /// `first_date` and `next_to_last_date` fix the ends of an initial or
    /// final stub period.
    ///
    /// A null `effective_date` is accepted for backward generation without a
    /// first date; it is replaced by the termination date (or next-to-last
    /// date) moved back by whole years until it precedes the evaluation
    /// date.
    ///
    /// # Errors
    /// * [`InvalidRange`](ql_core::Error::InvalidRange): the effective date is
    ///   not before the termination date, or a stub date is out of range;
    /// * [`InvalidTenor`](ql_core::Error::InvalidTenor): negative tenor, or a
    ///   tenor shorter than a month under the third-Wednesday rules;
    /// * [`InvalidRuleCombination`](ql_core::Error::InvalidRuleCombination):
    ///   stub dates or the end-of-month flag used with a rule that does not
    ///   support them, or a `CDS2015` tenor that is not whole years or a
    ///   multiple of 3 months;
    /// * [`Postcondition`](ql_core::Error::Postcondition): adjustment
    ///   collapsed the schedule to a single date.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        termination_date_convention: BusinessDayConvention,
        rule: DateGeneration,
        end_of_month: bool,
        first_date: Option<Date>,
        next_to_last_date: Option<Date>,
    ) -> Result<Schedule> {
        ensure!(!termination_date.is_null(), "null termination date");

        let first_date = first_date.filter(|&d| !d.is_null() && d != effective_date);
        let next_to_last_date = next_to_last_date.filter(|&d| !d.is_null() && d != termination_date);

        let effective_date = if effective_date.is_null() {
            if first_date.is_some() || rule != DateGeneration::Backward {
                fail!("null effective date");
            }
            placeholder_effective_date(next_to_last_date.unwrap_or(termination_date), termination_date)?
        } else {
            effective_date
        };
        ensure!(
            InvalidRange => effective_date < termination_date,
            "effective date ({effective_date}) later than or equal to termination date ({termination_date})"
        );

        let (rule, tenor) = if tenor.length == 0 {
            (DateGeneration::Zero, Period::new(0, TimeUnit::Years))
        } else {
            ensure!(InvalidTenor => tenor.length > 0, "non positive tenor ({tenor}) not allowed");
            (rule, tenor)
        };
        if matches!(rule, DateGeneration::ThirdWednesday | DateGeneration::ThirdWednesdayInclusive) {
            ensure!(
                InvalidTenor => matches!(tenor.unit, TimeUnit::Months | TimeUnit::Years),
                "{rule} date generation rule expects a tenor of whole months or years, got {tenor}"
            );
        }

        if let Some(first) = first_date {
            match rule {
                DateGeneration::Backward | DateGeneration::Forward => ensure!(
                    InvalidRange => first > effective_date && first <= termination_date,
                    "first date ({first}) out of effective-termination date range ({effective_date}, {termination_date}]"
                ),
                DateGeneration::ThirdWednesday | DateGeneration::ThirdWednesdayInclusive => ensure!(
                    IMM::is_imm_date(first, false),
                    "first date ({first}) is not an IMM date"
                ),
                _ => fail!(InvalidRuleCombination => "first date incompatible with {rule} date generation rule"),
            }
        }
        if let Some(ntl) = next_to_last_date {
            match rule {
                DateGeneration::Backward | DateGeneration::Forward => ensure!(
                    InvalidRange => ntl >= effective_date && ntl < termination_date,
                    "next to last date ({ntl}) out of effective-termination date range [{effective_date}, {termination_date})"
                ),
                DateGeneration::ThirdWednesday | DateGeneration::ThirdWednesdayInclusive => ensure!(
                    IMM::is_imm_date(ntl, false),
                    "next-to-last date ({ntl}) is not an IMM date"
                ),
                _ => fail!(InvalidRuleCombination => "next to last date incompatible with {rule} date generation rule"),
            }
        }

        let end_of_month = end_of_month && allows_end_of_month(tenor);
        if end_of_month && rule.forbids_end_of_month() {
            fail!(InvalidRuleCombination => "end of month convention incompatible with {rule} date generation rule");
        }

        let termination_date = if rule == DateGeneration::CDS2015 {
            ensure!(
                InvalidRuleCombination => tenor.unit == TimeUnit::Years
                    || (tenor.unit == TimeUnit::Months && tenor.length % 3 == 0),
                "CDS2015 rule expects a tenor that is a multiple of 3 months, got {tenor}"
            );
            let resolved = cds2015_termination(termination_date)?;
            ensure!(
                InvalidRange => effective_date < resolved,
                "CDS2015 termination date ({resolved}) not after effective date ({effective_date})"
            );
            resolved
        } else {
            termination_date
        };

        let generator = Generator {
            effective_date,
            termination_date,
            tenor,
            calendar: &*calendar,
            convention,
            termination_convention: termination_date_convention,
            rule,
            end_of_month,
            first_date,
            next_to_last_date,
        };
        let RawDates {
            mut dates,
            mut is_regular,
            seed,
        } = match rule {
            DateGeneration::Zero => RawDates {
                dates: vec![effective_date, termination_date],
                is_regular: vec![true],
                seed: effective_date,
            },
            DateGeneration::Backward => generator.backward()?,
            _ => generator.forward()?,
        };

        if dates.len() < 2 {
            fail!(
                Postcondition => "degenerate single date ({}) schedule: effective date {effective_date}, termination date {termination_date}, rule {rule}",
                dates.first().copied().unwrap_or(Date::NULL)
            );
        }

        generator.third_wednesday(&mut dates)?;
        generator.adjust(&mut dates, seed)?;
        merge_boundaries(&mut dates, &mut is_regular);

        ensure_post!(
            dates.len() > 1,
            "degenerate single date ({}) schedule: seed date {seed}, effective date {effective_date}, termination date {termination_date}, rule {rule}, end of month {end_of_month}",
            dates[0]
        );

        debug!(
            rule = %rule,
            tenor = %tenor,
            calendar = calendar.name(),
            size = dates.len(),
            start = %dates[0],
            end = %dates[dates.len() - 1],
            "schedule generated"
        );

        Ok(Schedule {
            dates,
            is_regular,
            calendar,
            convention,
            termination_convention: Some(termination_date_convention),
            tenor: Some(tenor),
            rule: Some(rule),
            end_of_month: Some(end_of_month),
            first_date,
            next_to_last_date,
        })
    }
}

/// Effective date used when none is given: `anchor` moved back by enough
/// whole years to precede the evaluation date.
fn placeholder_effective_date(anchor: Date, termination_date: Date) -> Result<Date> {
    let evaluation_date = Date::evaluation_date()?;
    ensure!(
        evaluation_date < termination_date,
        "null effective date: evaluation date ({evaluation_date}) not before termination date ({termination_date})"
    );
    let years = (anchor - evaluation_date) / 366 + 1;
    let effective_date = anchor.advance(-years, TimeUnit::Years)?;
    trace!(%effective_date, %anchor, years, "placeholder effective date");
    Ok(effective_date)
}

/// Raw dates with one regularity flag per period, and the date the regular
/// periods were counted from.
struct RawDates {
    dates: Vec<Date>,
    is_regular: Vec<bool>,
    seed: Date,
}

/// Validated generation inputs.
struct Generator<'a> {
    effective_date: Date,
    termination_date: Date,
    tenor: Period,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
    first_date: Option<Date>,
    next_to_last_date: Option<Date>,
}

impl Generator<'_> {
    /// `seed` moved by `periods` tenors, without holiday adjustment.
    fn step(&self, seed: Date, periods: i32) -> Result<Date> {
        NullCalendar.advance_by_period(seed, self.tenor * periods, self.convention, self.end_of_month)
    }

    /// `true` if `a` and `b` adjust to the same business day.
    fn same_adjusted(&self, a: Date, b: Date, convention: BusinessDayConvention) -> Result<bool> {
        Ok(self.calendar.adjust(a, convention)? == self.calendar.adjust(b, convention)?)
    }

    fn backward(&self) -> Result<RawDates> {
        // built from the termination date down, reversed at the end
        let mut dates = vec![self.termination_date];
        let mut is_regular = Vec::new();
        let mut seed = self.termination_date;

        if let Some(ntl) = self.next_to_last_date {
            dates.push(ntl);
            is_regular.push(self.step(seed, -1)? == ntl);
            seed = ntl;
        }

        let exit_date = self.first_date.unwrap_or(self.effective_date);
        let mut periods = 1;
        loop {
            let temp = self.step(seed, -periods)?;
            let front = dates[dates.len() - 1];
            if temp < exit_date {
                if let Some(first) = self.first_date {
                    if !self.same_adjusted(front, first, self.convention)? {
                        dates.push(first);
                        is_regular.push(false);
                    }
                }
                break;
            }
            if self.same_adjusted(front, temp, self.convention)? {
                trace!(date = %temp, "skipping date that adjusts onto its neighbour");
            } else {
                dates.push(temp);
                is_regular.push(true);
            }
            periods += 1;
        }

        if !self.same_adjusted(dates[dates.len() - 1], self.effective_date, self.convention)? {
            dates.push(self.effective_date);
            is_regular.push(false);
        }

        dates.reverse();
        is_regular.reverse();
        Ok(RawDates {
            dates,
            is_regular,
            seed,
        })
    }

    fn forward(&self) -> Result<RawDates> {
        let mut dates = Vec::new();
        let mut is_regular = Vec::new();

        if self.rule.is_cds() {
            let prev = previous_twentieth(self.effective_date, self.rule)?;
            if self.calendar.adjust(prev, self.convention)? > self.effective_date {
                dates.push(prev.advance(-3, TimeUnit::Months)?);
                is_regular.push(true);
            }
            dates.push(prev);
        } else {
            dates.push(self.effective_date);
        }
        let mut seed = dates[dates.len() - 1];

        if let Some(first) = self.first_date {
            dates.push(first);
            is_regular.push(self.step(seed, 1)? == first);
            seed = first;
        } else if self.rule.is_twentieth() {
            let mut next = next_twentieth(self.effective_date, self.rule)?;
            if self.rule == DateGeneration::OldCDS && next - self.effective_date < OLD_CDS_STUB_DAYS {
                next = next_twentieth(next.add_days(1)?, self.rule)?;
            }
            if next != self.effective_date {
                dates.push(next);
                is_regular.push(self.rule.is_cds());
                seed = next;
            }
        }

        let exit_date = self.next_to_last_date.unwrap_or(self.termination_date);
        let mut periods = 1;
        loop {
            let temp = self.step(seed, periods)?;
            let back = dates[dates.len() - 1];
            if temp > exit_date {
                if let Some(ntl) = self.next_to_last_date {
                    if !self.same_adjusted(back, ntl, self.convention)? {
                        dates.push(ntl);
                        is_regular.push(false);
                    }
                }
                break;
            }
            if self.same_adjusted(back, temp, self.convention)? {
                trace!(date = %temp, "skipping date that adjusts onto its neighbour");
            } else {
                dates.push(temp);
                is_regular.push(true);
            }
            periods += 1;
        }

        let back = dates[dates.len() - 1];
        if !self.same_adjusted(back, self.termination_date, self.termination_convention)? {
            if self.rule.is_twentieth() {
                dates.push(next_twentieth(self.termination_date, self.rule)?);
                is_regular.push(true);
            } else {
                dates.push(self.termination_date);
                is_regular.push(false);
            }
        }

        Ok(RawDates {
            dates,
            is_regular,
            seed,
        })
    }

    /// Move dates onto the third Wednesday of their month: the interior
    /// ones for `ThirdWednesday`, all of them for `ThirdWednesdayInclusive`.
    fn third_wednesday(&self, dates: &mut [Date]) -> Result<()> {
        let n = dates.len();
        let range = match self.rule {
            DateGeneration::ThirdWednesday => 1..n - 1,
            DateGeneration::ThirdWednesdayInclusive => 0..n,
            _ => return Ok(()),
        };
        for d in &mut dates[range] {
            *d = Date::nth_weekday(3, Weekday::Wednesday, d.month(), d.year())?;
        }
        Ok(())
    }

    /// Business-day and end-of-month adjustment of the raw dates.
    fn adjust(&self, dates: &mut [Date], seed: Date) -> Result<()> {
        let n = dates.len();
        let cal = self.calendar;

        if self.end_of_month && cal.is_end_of_month(seed) {
            for d in &mut dates[1..n - 1] {
                *d = if self.convention == BusinessDayConvention::Unadjusted {
                    d.end_of_month()
                } else {
                    cal.end_of_month(*d)?
                };
            }
            let (mut d1, mut d2) = (dates[0], dates[n - 1]);
            if self.termination_convention != BusinessDayConvention::Unadjusted {
                d1 = cal.end_of_month(d1)?;
                d2 = cal.end_of_month(d2)?;
            } else if self.rule == DateGeneration::Backward {
                d2 = d2.end_of_month();
            } else {
                d1 = d1.end_of_month();
            }
            // moving both ends onto the same date would collapse a short schedule
            if d1 != d2 {
                dates[0] = d1;
                dates[n - 1] = d2;
            } else {
                trace!(date = %d1, "end-of-month adjustment of the boundaries skipped");
            }
        } else {
            if self.rule != DateGeneration::OldCDS {
                dates[0] = cal.adjust(dates[0], self.convention)?;
            }
            for d in &mut dates[1..n - 1] {
                *d = cal.adjust(*d, self.convention)?;
            }
            if self.termination_convention != BusinessDayConvention::Unadjusted && !self.rule.is_cds() {
                dates[n - 1] = cal.adjust(dates[n - 1], self.termination_convention)?;
            }
        }
        Ok(())
    }
}

/// Drop dates adjusted onto or past the last date, and dates adjusted onto
/// or before the first one, until the schedule is strictly increasing at
/// both ends.
fn merge_boundaries(dates: &mut Vec<Date>, is_regular: &mut Vec<bool>) {
    while dates.len() >= 2 && dates[dates.len() - 2] >= dates[dates.len() - 1] {
        let n = dates.len();
        let k = is_regular.len();
        if k >= 2 {
            is_regular[k - 2] = dates[n - 2] == dates[n - 1];
        }
        trace!(date = %dates[n - 2], "merging next-to-last date into termination date");
        dates[n - 2] = dates[n - 1];
        dates.pop();
        is_regular.pop();
    }

    while dates.len() >= 2 && dates[1] <= dates[0] {
        if is_regular.len() >= 2 {
            is_regular[1] = dates[1] == dates[0];
        }
        trace!(date = %dates[1], "merging second date into effective date");
        dates[1] = dates[0];
        dates.remove(0);
        if !is_regular.is_empty() {
            is_regular.remove(0);
        }
    }
}
