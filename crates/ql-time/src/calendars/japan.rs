//! Japan calendar.
//!
//! Translates `ql/time/calendars/japan.hpp` / `.cpp`.

use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;

/// Japan calendar.
///
/// Weekends and the following holidays are observed:
/// * New Year's Day and the bank holidays of January 2nd and 3rd
/// * Coming of Age Day (2nd Monday in January; January 15th before 2000)
/// * National Foundation Day (February 11th)
/// * Emperor's Birthday (February 23rd from 2020, December 23rd 1989–2018)
/// * Vernal Equinox and Autumnal Equinox
/// * Greenery Day (April 29th)
/// * Constitution Memorial Day, Holiday for a Nation, Children's Day
///   (May 3rd–5th)
/// * Marine Day (3rd Monday in July)
/// * Mountain Day (August 11th, from 2016)
/// * Respect for the Aged Day (3rd Monday in September)
/// * Health and Sports Day (2nd Monday in October)
/// * National Culture Day (November 3rd)
/// * Labor Thanksgiving Day (November 23rd)
/// * Bank holiday on December 31st
///
/// Holidays falling on a Sunday are observed on the following Monday.
#[derive(Debug, Clone, Copy, Default)]
pub struct Japan;

const EXACT_VERNAL_EQUINOX_TIME: f64 = 20.69115;
const EXACT_AUTUMNAL_EQUINOX_TIME: f64 = 23.09;
const DIFF_PER_YEAR: f64 = 0.242194;

/// Day of the month of the vernal (March) and autumnal (September) equinox.
fn equinoxes(year: u16) -> (u8, u8) {
    let y = i32::from(year) - 2000;
    let moving_amount = f64::from(y) * DIFF_PER_YEAR;
    let leap_years = f64::from(y / 4 + y / 100 - y / 400);
    let ve = (EXACT_VERNAL_EQUINOX_TIME + moving_amount - leap_years) as u8;
    let ae = (EXACT_AUTUMNAL_EQUINOX_TIME + moving_amount - leap_years) as u8;
    (ve, ae)
}

impl Calendar for Japan {
    fn name(&self) -> &str {
        "Japan"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if self.is_weekend(date) {
            return false;
        }
        let w = date.weekday();
        let (y, m, d) = date.ymd();
        let (ve, ae) = equinoxes(y);
        let monday = w == Weekday::Monday;
        // A fixed-date holiday, moved to Monday when it falls on a Sunday.
        let fixed = |month: u8, day: u8| m == month && (d == day || (d == day + 1 && monday));
        let nth_monday = |month: u8, first: u8| m == month && monday && (first..first + 7).contains(&d);

        let holiday = (m == 1 && d <= 3)
            // Coming of Age Day
            || (nth_monday(1, 8) && y >= 2000)
            || (fixed(1, 15) && y < 2000)
            // National Foundation Day
            || fixed(2, 11)
            // Emperor's Birthday (Naruhito)
            || (fixed(2, 23) && y >= 2020)
            || fixed(3, ve)
            // Greenery Day
            || fixed(4, 29)
            || (m == 5 && (3..=5).contains(&d))
            // any of the three above observed later if on a weekend
            || (m == 5 && d == 6 && matches!(w, Weekday::Monday | Weekday::Tuesday | Weekday::Wednesday))
            // Marine Day, moved for the Olympic games in 2020 and 2021
            || (nth_monday(7, 15) && ((2003..2020).contains(&y) || y >= 2022))
            || (fixed(7, 20) && (1996..2003).contains(&y))
            || (m == 7 && d == 23 && y == 2020)
            || (m == 7 && d == 22 && y == 2021)
            // Mountain Day
            || (fixed(8, 11) && ((2016..2020).contains(&y) || y >= 2022))
            || (m == 8 && d == 10 && y == 2020)
            || (m == 8 && d == 9 && y == 2021)
            // Respect for the Aged Day
            || (nth_monday(9, 15) && y >= 2003)
            || (fixed(9, 15) && y < 2003)
            // a single day between Respect for the Aged Day and the equinox
            || (w == Weekday::Tuesday && m == 9 && d + 1 == ae && (16..=22).contains(&d) && y >= 2003)
            || fixed(9, ae)
            // Health and Sports Day
            || (nth_monday(10, 8) && y >= 2000 && y != 2020 && y != 2021)
            || (fixed(10, 10) && y < 2000)
            || (m == 7 && d == 24 && y == 2020)
            || (m == 7 && d == 23 && y == 2021)
            // National Culture Day
            || fixed(11, 3)
            // Labor Thanksgiving Day
            || fixed(11, 23)
            // Emperor's Birthday (Akihito)
            || (fixed(12, 23) && (1989..2019).contains(&y))
            || (m == 12 && d == 31)
            || is_one_shot_holiday(y, m, d);
        !holiday
    }
}

fn is_one_shot_holiday(y: u16, m: u8, d: u8) -> bool {
    matches!(
        (y, m, d),
        // Marriage of Prince Akihito
        (1959, 4, 10)
            // Rites of Imperial Funeral
            | (1989, 2, 24)
            // Enthronement Ceremony (Akihito)
            | (1990, 11, 12)
            // Marriage of Prince Naruhito
            | (1993, 6, 9)
            // Enthronement of Naruhito and surrounding bank holidays
            | (2019, 4, 30)
            | (2019, 5, 1)
            | (2019, 5, 2)
            | (2019, 10, 22)
    )
}
