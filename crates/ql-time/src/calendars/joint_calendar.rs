//! Joint calendar: combines two or more calendars.
//!
//! Corresponds to `QuantLib::JointCalendar`.

use std::sync::Arc;

use crate::calendar::Calendar;
use crate::date::Date;
use ql_core::ensure;
use ql_core::errors::Result;

/// Rule for combining the constituent calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointCalendarRule {
    /// A date is a holiday if it is a holiday for any of the calendars.
    #[default]
    JoinHolidays,
    /// A date is a business day if it is a business day for any of the
    /// calendars.
    JoinBusinessDays,
}

/// A calendar combining several calendars according to a
/// [`JointCalendarRule`].
#[derive(Debug, Clone)]
pub struct JointCalendar {
    calendars: Vec<Arc<dyn Calendar>>,
    rule: JointCalendarRule,
    name: String,
}

impl JointCalendar {
    /// Combine `calendars` with `rule`.
    ///
    /// # Errors
    /// Fails when `calendars` is empty.
    pub fn new(calendars: Vec<Arc<dyn Calendar>>, rule: JointCalendarRule) -> Result<Self> {
        ensure!(!calendars.is_empty(), "no calendars given to join");
        let names: Vec<&str> = calendars.iter().map(|c| c.name()).collect();
        let name = match rule {
            JointCalendarRule::JoinHolidays => format!("JoinHolidays({})", names.join(", ")),
            JointCalendarRule::JoinBusinessDays => {
                format!("JoinBusinessDays({})", names.join(", "))
            }
        };
        Ok(Self {
            calendars,
            rule,
            name,
        })
    }

    /// The combination rule.
    pub fn rule(&self) -> JointCalendarRule {
        self.rule
    }
}

impl Calendar for JointCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        match self.rule {
            JointCalendarRule::JoinHolidays => self.calendars.iter().all(|c| c.is_business_day(date)),
            JointCalendarRule::JoinBusinessDays => {
                self.calendars.iter().any(|c| c.is_business_day(date))
            }
        }
    }

    fn is_weekend(&self, date: Date) -> bool {
        match self.rule {
            JointCalendarRule::JoinHolidays => self.calendars.iter().any(|c| c.is_weekend(date)),
            JointCalendarRule::JoinBusinessDays => self.calendars.iter().all(|c| c.is_weekend(date)),
        }
    }
}
