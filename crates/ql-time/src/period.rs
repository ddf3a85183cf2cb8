//! `Period`: a time span expressed in a [`TimeUnit`] (translates
//! `ql/time/period.hpp`).

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;
use ql_core::errors::{Error, Result};

/// A time span made up of an integer length and a [`TimeUnit`].
///
/// Equality and ordering follow QuantLib: `12M == 1Y`, `7D == 1W`, and
/// `1M` vs `30D` is not comparable (`partial_cmp` returns `None`).
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Construct a `Period` from a [`Frequency`].
    ///
    /// # Errors
    /// Returns an error for `NoFrequency` and `OtherFrequency`.
    pub fn from_frequency(freq: Frequency) -> Result<Self> {
        let (length, unit) = match freq {
            Frequency::NoFrequency | Frequency::OtherFrequency => {
                return Err(Error::InvalidArgument(format!(
                    "cannot convert {freq} frequency to a period"
                )))
            }
            Frequency::Once => (0, TimeUnit::Years),
            Frequency::Annual => (1, TimeUnit::Years),
            Frequency::Semiannual => (6, TimeUnit::Months),
            Frequency::EveryFourthMonth => (4, TimeUnit::Months),
            Frequency::Quarterly => (3, TimeUnit::Months),
            Frequency::Bimonthly => (2, TimeUnit::Months),
            Frequency::Monthly => (1, TimeUnit::Months),
            Frequency::EveryFourthWeek => (4, TimeUnit::Weeks),
            Frequency::Biweekly => (2, TimeUnit::Weeks),
            Frequency::Weekly => (1, TimeUnit::Weeks),
            Frequency::Daily => (1, TimeUnit::Days),
        };
        Ok(Period::new(length, unit))
    }

    /// The frequency with which a period of this length recurs.
    pub fn frequency(&self) -> Frequency {
        let length = self.length.unsigned_abs();
        if length == 0 {
            return if self.unit == TimeUnit::Years {
                Frequency::Once
            } else {
                Frequency::NoFrequency
            };
        }
        match (self.unit, length) {
            (TimeUnit::Years, 1) => Frequency::Annual,
            (TimeUnit::Months, l) if l <= 12 && 12 % l == 0 => {
                Frequency::from_periods_per_year(12 / l).unwrap_or(Frequency::OtherFrequency)
            }
            (TimeUnit::Weeks, 1) => Frequency::Weekly,
            (TimeUnit::Weeks, 2) => Frequency::Biweekly,
            (TimeUnit::Weeks, 4) => Frequency::EveryFourthWeek,
            (TimeUnit::Days, 1) => Frequency::Daily,
            _ => Frequency::OtherFrequency,
        }
    }

    /// Negate the period (reverse direction).
    pub fn negated(self) -> Self {
        Self {
            length: -self.length,
            unit: self.unit,
        }
    }

    /// Normalise the period: weeks become days and whole numbers of years
    /// expressed in months become years.
    pub fn normalized(self) -> Self {
        match self.unit {
            TimeUnit::Weeks => Period::new(self.length * 7, TimeUnit::Days),
            TimeUnit::Months if self.length % 12 == 0 => {
                Period::new(self.length / 12, TimeUnit::Years)
            }
            _ => self,
        }
    }

    /// Sum of two periods.
    ///
    /// # Errors
    /// Fails when the units cannot be combined exactly (e.g. months and days).
    pub fn checked_add(self, other: Period) -> Result<Period> {
        use TimeUnit::*;
        if self.length == 0 {
            return Ok(other);
        }
        if other.length == 0 || self.unit == other.unit {
            return Ok(Period::new(self.length + other.length, self.unit));
        }
        let (length, unit) = match (self.unit, other.unit) {
            (Years, Months) => (self.length * 12 + other.length, Months),
            (Months, Years) => (self.length + other.length * 12, Months),
            (Weeks, Days) => (self.length * 7 + other.length, Days),
            (Days, Weeks) => (self.length + other.length * 7, Days),
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "impossible addition between {self} and {other}"
                )))
            }
        };
        Ok(Period::new(length, unit))
    }

    /// Lower and upper bound of the period length in days.
    fn days_min_max(&self) -> (i64, i64) {
        let n = i64::from(self.length);
        match self.unit {
            TimeUnit::Days => (n, n),
            TimeUnit::Weeks => (7 * n, 7 * n),
            TimeUnit::Months => (28 * n, 31 * n),
            TimeUnit::Years => (365 * n, 366 * n),
        }
    }

    /// `Some(self < other)`, or `None` when the comparison is undecidable.
    fn less_than(&self, other: &Period) -> Option<bool> {
        use TimeUnit::*;
        let (a, b) = (i64::from(self.length), i64::from(other.length));
        if a == 0 {
            return Some(b > 0);
        }
        if b == 0 {
            return Some(a < 0);
        }
        match (self.unit, other.unit) {
            (x, y) if x == y => Some(a < b),
            (Months, Years) => Some(a < 12 * b),
            (Years, Months) => Some(12 * a < b),
            (Days, Weeks) => Some(a < 7 * b),
            (Weeks, Days) => Some(7 * a < b),
            _ => {
                let (min_a, max_a) = self.days_min_max();
                let (min_b, max_b) = other.days_min_max();
                if max_a < min_b {
                    Some(true)
                } else if min_a > max_b {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.less_than(other)? {
            Some(Ordering::Less)
        } else if other.less_than(self)? {
            Some(Ordering::Greater)
        } else {
            Some(Ordering::Equal)
        }
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Eq for Period {}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalized();
        if n.length == 0 {
            0i32.hash(state);
        } else {
            n.length.hash(state);
            n.unit.hash(state);
        }
    }
}

impl TryFrom<Frequency> for Period {
    type Error = Error;
    fn try_from(freq: Frequency) -> Result<Self> {
        Period::from_frequency(freq)
    }
}

impl std::str::FromStr for Period {
    type Err = Error;

    /// Parse strings such as `"6M"`, `"1Y"`, `"-2W"` or `"1Y6M"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument(format!("cannot parse period \"{s}\""));
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err(invalid());
        }
        let mut total: Option<Period> = None;
        while !rest.is_empty() {
            let split = rest
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
                .map(|(i, _)| i)
                .ok_or_else(invalid)?;
            let length: i32 = rest[..split].parse().map_err(|_| invalid())?;
            let mut chars = rest[split..].chars();
            let unit = chars
                .next()
                .and_then(TimeUnit::from_abbreviation)
                .ok_or_else(invalid)?;
            rest = chars.as_str();
            let p = Period::new(length, unit);
            total = Some(match total {
                Some(t) => t.checked_add(p)?,
                None => p,
            });
        }
        total.ok_or_else(invalid)
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        self.negated()
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period::new(self.length * rhs, self.unit)
    }
}

impl std::ops::Mul<Period> for i32 {
    type Output = Period;
    fn mul(self, rhs: Period) -> Period {
        rhs * self
    }
}

/// `6 * TimeUnit::Months` builds a six-month period, as in QuantLib.
impl std::ops::Mul<TimeUnit> for i32 {
    type Output = Period;
    fn mul(self, rhs: TimeUnit) -> Period {
        Period::new(self, rhs)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.unit.abbreviation())
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}
