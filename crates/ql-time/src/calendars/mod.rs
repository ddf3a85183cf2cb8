//! Market calendars.
//!
//! Each calendar is a unit-like value implementing [`Calendar`]; wrap it in
//! an `Arc<dyn Calendar>` to share it between schedules.
//!
//! [`Calendar`]: crate::calendar::Calendar

pub mod bespoke_calendar;
pub mod japan;
pub mod joint_calendar;
pub mod target;
pub mod united_states;

pub use bespoke_calendar::BespokeCalendar;
pub use japan::Japan;
pub use joint_calendar::{JointCalendar, JointCalendarRule};
pub use target::Target;
pub use united_states::{UnitedStates, UsMarket};

use crate::date::is_leap_year;

/// Day of the year (1-based) of Western Easter Monday in `year`.
///
/// Anonymous Gregorian computus; Easter Sunday always falls in March or
/// April.
pub(crate) fn easter_monday(year: u16) -> u16 {
    let y = i32::from(year);
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31 + 1) as u16;

    let february = if is_leap_year(year) { 29 } else { 28 };
    let sunday = if month == 3 {
        31 + february + day
    } else {
        31 + february + 31 + day
    };
    sunday + 1
}
