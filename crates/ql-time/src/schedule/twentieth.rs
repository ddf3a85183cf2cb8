//! Roll-date arithmetic for the twentieth-of-month rules and the CDS
//! maturity helper.

use super::rule::DateGeneration;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use ql_core::errors::Result;
use ql_core::{ensure, ensure_post, fail};

/// The first twentieth of a month on or after `date`; for the IMM-style
/// rules the first one in March, June, September or December.
pub fn next_twentieth(date: Date, rule: DateGeneration) -> Result<Date> {
    let mut result = Date::from_ymd(date.year(), date.month(), 20)?;
    if result < date {
        result = result.advance(1, TimeUnit::Months)?;
    }
    if rule.is_twentieth_imm() {
        let m = result.month();
        if m % 3 != 0 {
            result = result.advance(i32::from(3 - m % 3), TimeUnit::Months)?;
        }
    }
    Ok(result)
}

/// The last twentieth of a month on or before `date`; for the IMM-style
/// rules the last one in March, June, September or December.
pub fn previous_twentieth(date: Date, rule: DateGeneration) -> Result<Date> {
    let mut result = Date::from_ymd(date.year(), date.month(), 20)?;
    if result > date {
        result = result.advance(-1, TimeUnit::Months)?;
    }
    if rule.is_twentieth_imm() {
        let m = result.month();
        if m % 3 != 0 {
            result = result.advance(-i32::from(m % 3), TimeUnit::Months)?;
        }
    }
    Ok(result)
}

/// `true` if the end-of-month convention can apply to `tenor`: at least one
/// month, expressed in months or years.
pub fn allows_end_of_month(tenor: Period) -> bool {
    matches!(tenor.unit, TimeUnit::Months | TimeUnit::Years) && tenor.length >= 1
}

/// The semi-annual CDS roll date that a `CDS2015` schedule ending on `date`
/// terminates on: the quarterly twentieth on or before `date`, moved to
/// June or December.
pub(crate) fn cds2015_termination(date: Date) -> Result<Date> {
    let roll = previous_twentieth(date, DateGeneration::CDS2015)?;
    if matches!(roll.month(), 3 | 9) {
        roll.advance(3, TimeUnit::Months)
    } else {
        Ok(roll)
    }
}

/// Maturity of a standard CDS traded on `trade_date` with the given tenor.
///
/// Under `CDS2015` the maturity rolls semi-annually: trades from 20 March to
/// 19 September mature in June, trades from 20 September to 19 March in
/// December.  Returns `None` for a 0M `CDS2015` trade on a June or December
/// roll date, which has no protection period left.
///
/// # Errors
/// Fails for rules other than `CDS2015`, `CDS` and `OldCDS`, for tenors that
/// are not whole years or a multiple of three months, and for a 0M `OldCDS`
/// tenor.
pub fn cds_maturity(trade_date: Date, tenor: Period, rule: DateGeneration) -> Result<Option<Date>> {
    if !matches!(
        rule,
        DateGeneration::CDS2015 | DateGeneration::CDS | DateGeneration::OldCDS
    ) {
        fail!(InvalidRuleCombination => "cds_maturity should only be used with date generation rule CDS2015, CDS or OldCDS, not {rule}");
    }
    ensure!(
        InvalidTenor => tenor.unit == TimeUnit::Years
            || (tenor.unit == TimeUnit::Months && tenor.length % 3 == 0),
        "cds_maturity expects a tenor that is a multiple of 3 months, got {tenor}"
    );
    if rule == DateGeneration::OldCDS {
        ensure!(InvalidTenor => tenor.length != 0, "a tenor of 0M is not supported for OldCDS");
    }

    let mut anchor = previous_twentieth(trade_date, rule)?;
    if rule == DateGeneration::CDS2015 && matches!(anchor.month(), 6 | 12) {
        if tenor.length == 0 {
            return Ok(None);
        }
        anchor = anchor.advance(-3, TimeUnit::Months)?;
    }
    let maturity = anchor.add_period(tenor)?.advance(3, TimeUnit::Months)?;
    ensure_post!(
        maturity > trade_date,
        "CDS maturity {maturity} for tenor {tenor} is not after the trade date {trade_date}"
    );
    Ok(Some(maturity))
}
