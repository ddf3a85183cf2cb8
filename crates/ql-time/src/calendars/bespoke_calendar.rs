//! Bespoke calendar: a calendar with user-defined weekends and holidays.
//!
//! Corresponds to `QuantLib::BespokeCalendar`.

use std::collections::BTreeSet;

use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;

/// A calendar whose weekends and holidays are set at run time.
///
/// A freshly created bespoke calendar has no weekends and no holidays.
/// The name identifies the calendar, so two bespoke calendars with the same
/// name compare equal through `dyn Calendar`.
#[derive(Debug, Clone)]
pub struct BespokeCalendar {
    name: String,
    weekends: BTreeSet<Weekday>,
    holidays: BTreeSet<Date>,
}

impl BespokeCalendar {
    /// Create an empty calendar with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weekends: BTreeSet::new(),
            holidays: BTreeSet::new(),
        }
    }

    /// Mark every `weekday` as a weekend day.
    pub fn add_weekend(&mut self, weekday: Weekday) {
        self.weekends.insert(weekday);
    }

    /// Add a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Remove a previously added holiday.
    pub fn remove_holiday(&mut self, date: Date) {
        self.holidays.remove(&date);
    }

    /// The explicitly added holidays, in ascending order.
    pub fn added_holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.holidays.iter().copied()
    }
}

impl Calendar for BespokeCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_weekend(&self, date: Date) -> bool {
        self.weekends.contains(&date.weekday())
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(&date)
    }
}
