//! Fluent schedule construction (translates `QuantLib::MakeSchedule`).

use std::sync::Arc;

use super::rule::DateGeneration;
use super::Schedule;
use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::{Calendar, NullCalendar};
use crate::date::Date;
use crate::frequency::Frequency;
use crate::period::Period;
use ql_core::errors::{Error, Result};

/// Builder for [`Schedule`].
///
/// Only the effective date, the termination date and the tenor (or
/// frequency) are required.  Unless set explicitly:
///
/// * the calendar is [`NullCalendar`];
/// * the convention is `Following` when a calendar was given, `Unadjusted`
///   otherwise;
/// * the termination convention is the convention;
/// * the rule is `Backward` and end-of-month is off.
///
/// ```ignore
/// let schedule = ScheduleBuilder::new()
///     .from(start)
///     .to(end)
///     .with_frequency(Frequency::Semiannual)
///     .with_calendar(Arc::new(Target))
///     .with_convention(BusinessDayConvention::ModifiedFollowing)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    effective_date: Option<Date>,
    termination_date: Option<Date>,
    tenor: Option<std::result::Result<Period, Error>>,
    calendar: Option<Arc<dyn Calendar>>,
    convention: Option<BusinessDayConvention>,
    termination_convention: Option<BusinessDayConvention>,
    rule: Option<DateGeneration>,
    end_of_month: bool,
    first_date: Option<Date>,
    next_to_last_date: Option<Date>,
}

impl ScheduleBuilder {
    /// Begin building a schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the effective date.
    pub fn from(mut self, effective_date: Date) -> Self {
        self.effective_date = Some(effective_date);
        self
    }

    /// Set the termination date.
    pub fn to(mut self, termination_date: Date) -> Self {
        self.termination_date = Some(termination_date);
        self
    }

    /// Set the tenor.
    pub fn with_tenor(mut self, tenor: Period) -> Self {
        self.tenor = Some(Ok(tenor));
        self
    }

    /// Set the tenor from a frequency.  Frequencies without a tenor
    /// (e.g. `OtherFrequency`) make [`build`](Self::build) fail.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.tenor = Some(Period::from_frequency(frequency));
        self
    }

    /// Calendar used for adjustment.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Convention for every date but the termination date.
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = Some(convention);
        self
    }

    /// Convention for the termination date.
    pub fn with_termination_date_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.termination_convention = Some(convention);
        self
    }

    /// Date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Shorthand for `with_rule(DateGeneration::Forward)`.
    pub fn forwards(self) -> Self {
        self.with_rule(DateGeneration::Forward)
    }

    /// Shorthand for `with_rule(DateGeneration::Backward)`.
    pub fn backwards(self) -> Self {
        self.with_rule(DateGeneration::Backward)
    }

    /// Whether to keep dates on the end of the month.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    /// End of an initial stub period.
    pub fn with_first_date(mut self, date: Date) -> Self {
        self.first_date = Some(date);
        self
    }

    /// Start of a final stub period.
    pub fn with_next_to_last_date(mut self, date: Date) -> Self {
        self.next_to_last_date = Some(date);
        self
    }

    /// Generate the schedule.
    ///
    /// # Errors
    /// Fails if the effective date, termination date or tenor is missing,
    /// if the frequency has no tenor, and for any error of [`Schedule::new`].
    pub fn build(self) -> Result<Schedule> {
        let effective_date = self
            .effective_date
            .ok_or_else(|| Error::Precondition("effective date not provided".into()))?;
        let termination_date = self
            .termination_date
            .ok_or_else(|| Error::Precondition("termination date not provided".into()))?;
        let tenor = self
            .tenor
            .ok_or_else(|| Error::Precondition("tenor/frequency not provided".into()))??;

        let convention = self.convention.unwrap_or(if self.calendar.is_some() {
            BusinessDayConvention::Following
        } else {
            BusinessDayConvention::Unadjusted
        });
        let termination_convention = self.termination_convention.unwrap_or(convention);
        let calendar = self
            .calendar
            .unwrap_or_else(|| Arc::new(NullCalendar) as Arc<dyn Calendar>);

        Schedule::new(
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention,
            termination_convention,
            self.rule.unwrap_or(DateGeneration::Backward),
            self.end_of_month,
            self.first_date,
            self.next_to_last_date,
        )
    }
}
