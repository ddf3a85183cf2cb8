//! # ql-time
//!
//! Date, period, calendar, IMM and schedule types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and built-in implementations.
pub mod calendar;

/// Concrete calendar implementations (market / exchange specific).
pub mod calendars;

/// `Date` type.
pub mod date;

/// Payment / event frequency.
pub mod frequency;

/// IMM dates and codes.
pub mod imm;

/// `Month`: month of the year.
pub mod month;

/// `Period`: a time span in a `TimeUnit`.
pub mod period;

/// `Schedule`: an ordered sequence of dates.
pub mod schedule;

/// `TimeUnit`: days, weeks, months, years.
pub mod time_unit;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use calendars::{
    BespokeCalendar, Japan, JointCalendar, JointCalendarRule, Target, UnitedStates, UsMarket,
};
pub use date::Date;
pub use frequency::Frequency;
pub use imm::IMM;
pub use month::Month;
pub use period::Period;
pub use schedule::{
    allows_end_of_month, cds_maturity, next_twentieth, previous_twentieth, DateGeneration,
    Schedule, ScheduleBuilder,
};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
