//! TARGET (Trans-European Automated Real-time Gross Settlement) calendar.
//!
//! Translates `ql/time/calendars/target.hpp` / `.cpp`.

use super::easter_monday;
use crate::calendar::Calendar;
use crate::date::Date;

/// TARGET calendar (the ECB's settlement system).
///
/// Weekends and the following holidays are observed:
/// * New Year's Day (Jan 1)
/// * Good Friday and Easter Monday (since 2000)
/// * Labour Day (May 1, since 2000)
/// * Christmas Day and the day after (Dec 25–26)
/// * December 31 in 1998, 1999 and 2001
#[derive(Debug, Clone, Copy, Default)]
pub struct Target;

impl Calendar for Target {
    fn name(&self) -> &str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if self.is_weekend(date) {
            return false;
        }
        let (y, m, d) = date.ymd();
        let dd = date.day_of_year();
        let em = easter_monday(y);

        let holiday = (d == 1 && m == 1)
            || ((dd == em - 3 || dd == em) && y >= 2000)
            || (d == 1 && m == 5 && y >= 2000)
            || ((d == 25 || d == 26) && m == 12)
            || (d == 31 && m == 12 && matches!(y, 1998 | 1999 | 2001));
        !holiday
    }
}
