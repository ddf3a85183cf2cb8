//! Date-generation rules (translates `ql/time/dategenerationrule.hpp`).

/// How the raw schedule dates are produced between the effective and the
/// termination date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateGeneration {
    /// Backward from the termination date to the effective date.
    Backward,
    /// Forward from the effective date to the termination date.
    Forward,
    /// No intermediate dates between effective and termination date.
    Zero,
    /// All dates but the effective and termination date are taken to be on
    /// the third Wednesday of their month (with forward calculation).
    ThirdWednesday,
    /// All dates, including the effective and termination date, are taken to
    /// be on the third Wednesday of their month (with forward calculation).
    ThirdWednesdayInclusive,
    /// All dates but the effective date are taken to be the twentieth of
    /// their month (used for CDS schedules in emerging markets).  The
    /// termination date is also modified.
    Twentieth,
    /// All dates but the effective date are taken to be the twentieth of an
    /// IMM month (used for CDS schedules).  The termination date is also
    /// modified.
    TwentiethIMM,
    /// Same as `TwentiethIMM` with unrestricted date ends and long/short stub
    /// coupon period (old CDS convention).
    OldCDS,
    /// Credit derivatives standard rule since 'Big Bang' changes in 2009.
    CDS,
    /// Credit derivatives standard rule since December 20th, 2015.
    CDS2015,
}

impl DateGeneration {
    /// Rules whose dates are rolled onto the twentieth of a month.
    pub fn is_twentieth(&self) -> bool {
        matches!(
            self,
            DateGeneration::Twentieth
                | DateGeneration::TwentiethIMM
                | DateGeneration::OldCDS
                | DateGeneration::CDS
                | DateGeneration::CDS2015
        )
    }

    /// Twentieth rules restricted to March, June, September and December.
    pub fn is_twentieth_imm(&self) -> bool {
        self.is_twentieth() && *self != DateGeneration::Twentieth
    }

    /// The two standard CDS rules, whose schedules start on the previous
    /// roll date and keep their termination date unadjusted.
    pub fn is_cds(&self) -> bool {
        matches!(self, DateGeneration::CDS | DateGeneration::CDS2015)
    }

    /// Rules that cannot be combined with the end-of-month convention.
    pub(crate) fn forbids_end_of_month(&self) -> bool {
        self.is_twentieth()
            || matches!(
                self,
                DateGeneration::ThirdWednesday | DateGeneration::ThirdWednesdayInclusive
            )
    }
}

impl std::fmt::Display for DateGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DateGeneration::Backward => "Backward",
            DateGeneration::Forward => "Forward",
            DateGeneration::Zero => "Zero",
            DateGeneration::ThirdWednesday => "ThirdWednesday",
            DateGeneration::ThirdWednesdayInclusive => "ThirdWednesdayInclusive",
            DateGeneration::Twentieth => "Twentieth",
            DateGeneration::TwentiethIMM => "TwentiethIMM",
            DateGeneration::OldCDS => "OldCDS",
            DateGeneration::CDS => "CDS",
            DateGeneration::CDS2015 => "CDS2015",
        };
        f.write_str(s)
    }
}
