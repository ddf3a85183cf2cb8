//! United States calendars (translates `ql/time/calendars/unitedstates.hpp`).

use super::easter_monday;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;

/// The US market whose holidays a [`UnitedStates`] calendar follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsMarket {
    /// Generic settlement calendar (federal holidays).
    #[default]
    Settlement,
    /// New York Stock Exchange.
    Nyse,
    /// Government bond market (SIFMA recommendations).
    GovernmentBond,
}

/// United States calendars.
///
/// All markets observe weekends, New Year's Day, Martin Luther King's
/// birthday (from 1983, from 1998 for the NYSE), Washington's birthday,
/// Memorial Day, Juneteenth (from 2022), Independence Day, Labor Day,
/// Thanksgiving and Christmas.  Settlement and government bonds also
/// observe Columbus Day and Veterans' Day; the NYSE and government bonds
/// observe Good Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitedStates {
    market: UsMarket,
}

impl UnitedStates {
    /// Calendar for the given market.
    pub fn new(market: UsMarket) -> Self {
        Self { market }
    }

    /// The market this calendar follows.
    pub fn market(&self) -> UsMarket {
        self.market
    }
}

impl Calendar for UnitedStates {
    fn name(&self) -> &str {
        match self.market {
            UsMarket::Settlement => "US settlement",
            UsMarket::Nyse => "New York stock exchange",
            UsMarket::GovernmentBond => "US government bond market",
        }
    }

    fn is_business_day(&self, date: Date) -> bool {
        if self.is_weekend(date) {
            return false;
        }
        let h = Holiday {
            y: date.year(),
            m: date.month(),
            d: date.day_of_month(),
            w: date.weekday(),
        };
        let holiday = match self.market {
            UsMarket::Settlement => h.is_settlement_holiday(),
            UsMarket::Nyse => {
                h.is_nyse_holiday() || date.day_of_year() + 3 == easter_monday(h.y)
            }
            UsMarket::GovernmentBond => {
                h.is_government_bond_holiday()
                    || (date.day_of_year() + 3 == easter_monday(h.y)
                        && !matches!(h.y, 2015 | 2021 | 2023))
            }
        };
        !holiday
    }
}

/// A weekday broken into its parts, with one predicate per holiday.
struct Holiday {
    y: u16,
    m: u8,
    d: u8,
    w: Weekday,
}

impl Holiday {
    fn monday(&self) -> bool {
        self.w == Weekday::Monday
    }

    /// `day` of `month`, moved to Monday from a Sunday and, when
    /// `to_friday`, to Friday from a Saturday.
    fn observed(&self, month: u8, day: u8, to_friday: bool) -> bool {
        self.m == month
            && (self.d == day
                || (self.d == day + 1 && self.monday())
                || (to_friday && self.d + 1 == day && self.w == Weekday::Friday))
    }

    /// The Monday falling in the week that starts on `first` of `month`.
    fn monday_from(&self, month: u8, first: u8) -> bool {
        self.m == month && self.monday() && (first..first + 7).contains(&self.d)
    }

    fn new_year(&self, to_friday: bool) -> bool {
        self.observed(1, 1, false)
            || (to_friday && self.m == 12 && self.d == 31 && self.w == Weekday::Friday)
    }

    fn martin_luther_king(&self, since: u16) -> bool {
        self.y >= since && self.monday_from(1, 15)
    }

    fn washington_birthday(&self) -> bool {
        if self.y >= 1971 {
            self.monday_from(2, 15)
        } else {
            self.observed(2, 22, true)
        }
    }

    fn memorial_day(&self) -> bool {
        if self.y >= 1971 {
            self.monday_from(5, 25)
        } else {
            self.observed(5, 30, true)
        }
    }

    fn juneteenth(&self, to_friday: bool) -> bool {
        self.y >= 2022 && self.observed(6, 19, to_friday)
    }

    fn independence_day(&self) -> bool {
        self.observed(7, 4, true)
    }

    fn labor_day(&self) -> bool {
        self.monday_from(9, 1)
    }

    fn columbus_day(&self) -> bool {
        self.y >= 1971 && self.monday_from(10, 8)
    }

    fn veterans_day(&self, to_friday: bool) -> bool {
        if self.y <= 1970 || self.y >= 1978 {
            self.observed(11, 11, to_friday)
        } else {
            self.monday_from(10, 22)
        }
    }

    fn thanksgiving(&self) -> bool {
        self.m == 11 && self.w == Weekday::Thursday && (22..=28).contains(&self.d)
    }

    fn christmas(&self) -> bool {
        self.observed(12, 25, true)
    }

    fn is_settlement_holiday(&self) -> bool {
        self.new_year(true)
            || self.martin_luther_king(1983)
            || self.washington_birthday()
            || self.memorial_day()
            || self.juneteenth(true)
            || self.independence_day()
            || self.labor_day()
            || self.columbus_day()
            || self.veterans_day(true)
            || self.thanksgiving()
            || self.christmas()
    }

    fn is_nyse_holiday(&self) -> bool {
        self.new_year(false)
            || self.martin_luther_king(1998)
            || self.washington_birthday()
            || self.memorial_day()
            || self.juneteenth(true)
            || self.independence_day()
            || self.labor_day()
            || self.thanksgiving()
            || self.christmas()
            || matches!(
                (self.y, self.m, self.d),
                // Nixon's funeral
                (1994, 4, 27)
                    // September 11th
                    | (2001, 9, 11..=14)
                    // Reagan's funeral
                    | (2004, 6, 11)
                    // Ford's funeral
                    | (2007, 1, 2)
                    // Hurricane Sandy
                    | (2012, 10, 29..=30)
                    // George H.W. Bush's funeral
                    | (2018, 12, 5)
                    // Carter's funeral
                    | (2025, 1, 9)
            )
    }

    fn is_government_bond_holiday(&self) -> bool {
        self.new_year(false)
            || self.martin_luther_king(1983)
            || self.washington_birthday()
            || self.memorial_day()
            || self.juneteenth(true)
            || self.independence_day()
            || self.labor_day()
            || self.columbus_day()
            || self.veterans_day(false)
            || self.thanksgiving()
            || self.christmas()
            || matches!(
                (self.y, self.m, self.d),
                (2001, 9, 11..=12) | (2004, 6, 11) | (2012, 10, 30) | (2018, 12, 5)
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn settlement_2023() {
        let cal = UnitedStates::new(UsMarket::Settlement);
        assert!(!cal.is_business_day(date(2023, 1, 2))); // New Year moved to Monday
        assert!(!cal.is_business_day(date(2023, 1, 16))); // MLK
        assert!(!cal.is_business_day(date(2023, 6, 19))); // Juneteenth
        assert!(!cal.is_business_day(date(2023, 7, 4)));
        assert!(!cal.is_business_day(date(2023, 10, 9))); // Columbus Day
        assert!(!cal.is_business_day(date(2023, 11, 10))); // Veterans' Day moved to Friday
        assert!(!cal.is_business_day(date(2023, 11, 23))); // Thanksgiving
        assert!(cal.is_business_day(date(2023, 4, 7))); // Good Friday
    }

    #[test]
    fn nyse_observes_good_friday_but_not_columbus_day() {
        let cal = UnitedStates::new(UsMarket::Nyse);
        assert!(!cal.is_business_day(date(2023, 4, 7)));
        assert!(cal.is_business_day(date(2023, 10, 9)));
        assert!(!cal.is_business_day(date(2012, 10, 29)));
    }

    #[test]
    fn government_bond_1996_1997() {
        let cal = UnitedStates::new(UsMarket::GovernmentBond);
        assert!(!cal.is_business_day(date(1997, 9, 1))); // Labor Day
        assert!(!cal.is_business_day(date(1997, 3, 28))); // Good Friday
        assert!(cal.is_business_day(date(1996, 8, 30)));
        assert!(cal.is_business_day(date(1997, 2, 28)));
        assert!(cal.is_end_of_month(date(1997, 8, 29)));
        assert!(cal.is_end_of_month(date(1997, 8, 31)));
        assert!(cal.is_business_day(date(2023, 11, 10)));
    }

    #[test]
    fn names_differ_by_market() {
        assert_ne!(
            UnitedStates::new(UsMarket::Nyse).name(),
            UnitedStates::new(UsMarket::GovernmentBond).name()
        );
        assert_eq!(UnitedStates::default().market(), UsMarket::Settlement);
    }
}
