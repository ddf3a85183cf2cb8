//! Business-day convention (translates `ql/time/businessdayconvention.hpp`).

/// How to roll a date that falls on a non-business day.
///
/// Corresponds to `QuantLib::BusinessDayConvention`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// First business day after the holiday.
    Following,
    /// First business day after the holiday unless it belongs to a different
    /// month, in which case the first business day before.
    ModifiedFollowing,
    /// First business day before the holiday.
    Preceding,
    /// First business day before the holiday unless it belongs to a different
    /// month, in which case the first business day after.
    ModifiedPreceding,
    /// Do not adjust.
    Unadjusted,
    /// Like `ModifiedFollowing`, but the 15th of the month also acts as a
    /// border: a date in the first half never rolls into the second half.
    HalfMonthModifiedFollowing,
    /// Nearest business day; ties go to the following one.
    Nearest,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::HalfMonthModifiedFollowing => {
                "Half-Month Modified Following"
            }
            BusinessDayConvention::Nearest => "Nearest",
        };
        f.write_str(s)
    }
}
