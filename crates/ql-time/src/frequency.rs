//! `Frequency`: how often events recur (translates `ql/time/frequency.hpp`).

/// Coupon / schedule frequency.
///
/// The discriminant is the number of periods per year, as in
/// `QuantLib::Frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Null frequency.
    NoFrequency = -1,
    /// Only at maturity.
    Once = 0,
    /// Once a year.
    Annual = 1,
    /// Twice a year.
    Semiannual = 2,
    /// Every fourth month.
    EveryFourthMonth = 3,
    /// Every third month.
    Quarterly = 4,
    /// Every second month.
    Bimonthly = 6,
    /// Once a month.
    Monthly = 12,
    /// Every fourth week.
    EveryFourthWeek = 13,
    /// Every second week.
    Biweekly = 26,
    /// Once a week.
    Weekly = 52,
    /// Once a day.
    Daily = 365,
    /// Anything that is not one of the above.
    OtherFrequency = 999,
}

impl Frequency {
    /// Number of periods per year.  Returns `None` for `NoFrequency` and
    /// `OtherFrequency`.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Frequency::NoFrequency | Frequency::OtherFrequency => None,
            f => Some(*f as u32),
        }
    }

    /// Inverse of [`periods_per_year`](Self::periods_per_year).
    pub fn from_periods_per_year(n: u32) -> Option<Self> {
        Some(match n {
            0 => Frequency::Once,
            1 => Frequency::Annual,
            2 => Frequency::Semiannual,
            3 => Frequency::EveryFourthMonth,
            4 => Frequency::Quarterly,
            6 => Frequency::Bimonthly,
            12 => Frequency::Monthly,
            13 => Frequency::EveryFourthWeek,
            26 => Frequency::Biweekly,
            52 => Frequency::Weekly,
            365 => Frequency::Daily,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::NoFrequency => "No-Frequency",
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::EveryFourthMonth => "Every-Fourth-Month",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::EveryFourthWeek => "Every-Fourth-Week",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::OtherFrequency => "Other-Frequency",
        };
        f.write_str(s)
    }
}
