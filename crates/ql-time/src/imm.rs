//! IMM (International Monetary Market) date utilities
//! (translates `ql/time/imm.hpp`).
//!
//! IMM dates are third Wednesdays; the main cycle only uses March, June,
//! September and December.

use crate::date::Date;
use crate::month::Month;
use crate::weekday::Weekday;
use ql_core::errors::{Error, Result};

/// IMM futures month letters, January to December.
const MONTH_CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];

/// IMM date utilities.
pub struct IMM;

impl IMM {
    /// `true` if `date` is the third Wednesday of its month, restricted to
    /// the quarterly months when `main_cycle` is set.
    pub fn is_imm_date(date: Date, main_cycle: bool) -> bool {
        let d = date.day_of_month();
        date.weekday() == Weekday::Wednesday
            && (15..=21).contains(&d)
            && (!main_cycle || date.month_of_year().is_quarter_end())
    }

    /// `true` if `code` is a valid IMM code such as `"H4"`.
    pub fn is_imm_code(code: &str, main_cycle: bool) -> bool {
        let mut chars = code.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return false;
        };
        let Some(index) = MONTH_CODES
            .iter()
            .position(|&c| c == letter.to_ascii_uppercase())
        else {
            return false;
        };
        digit.is_ascii_digit() && (!main_cycle || (index + 1) % 3 == 0)
    }

    /// The IMM code of `date` (e.g. `"H4"` for 20 March 2024), or `None` if
    /// `date` is not an IMM date.
    pub fn code(date: Date) -> Option<String> {
        if !Self::is_imm_date(date, false) {
            return None;
        }
        let letter = MONTH_CODES[usize::from(date.month()) - 1];
        Some(format!("{letter}{}", date.year() % 10))
    }

    /// The IMM date for `code`, taken in the decade of `reference` and moved
    /// ten years ahead if it would fall before `reference`.
    pub fn date(code: &str, reference: Date) -> Result<Date> {
        if !Self::is_imm_code(code, false) {
            return Err(Error::InvalidArgument(format!("{code} is not a valid IMM code")));
        }
        let mut chars = code.chars();
        let letter = chars.next().map(|c| c.to_ascii_uppercase());
        let month = MONTH_CODES
            .iter()
            .position(|&c| Some(c) == letter)
            .and_then(|i| Month::from_number(i as u8 + 1))
            .ok_or_else(|| Error::InvalidArgument(format!("{code} is not a valid IMM code")))?;
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| Error::InvalidArgument(format!("{code} is not a valid IMM code")))?;
        let decade = reference.year() - reference.year() % 10;
        let year = decade + digit as u16;
        let result = Date::nth_weekday(3, Weekday::Wednesday, month.number(), year)?;
        if result < reference {
            return Date::nth_weekday(3, Weekday::Wednesday, month.number(), year + 10);
        }
        Ok(result)
    }

    /// The first IMM date strictly after `date`.
    pub fn next_date(date: Date, main_cycle: bool) -> Result<Date> {
        let mut y = date.year();
        let mut m = date.month();
        let offset = if main_cycle { 3 } else { 1 };
        let skip = offset - m % offset;
        if skip != offset || date.day_of_month() > 21 {
            m += skip;
            if m > 12 {
                m -= 12;
                y += 1;
            }
        }
        let result = Date::nth_weekday(3, Weekday::Wednesday, m, y)?;
        if result <= date {
            return Self::next_date(Date::from_ymd(y, m, 22)?, main_cycle);
        }
        Ok(result)
    }
}
