//! # ql-schedule
//!
//! Dates, business-day calendars and coupon schedule generation in the
//! style of [QuantLib](https://www.quantlib.org/).
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ql-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use ql_schedule::time::{
//!     BusinessDayConvention, Date, Frequency, ScheduleBuilder, Target,
//! };
//!
//! let schedule = ScheduleBuilder::new()
//!     .from(Date::from_ymd(2024, 1, 15)?)
//!     .to(Date::from_ymd(2026, 1, 15)?)
//!     .with_frequency(Frequency::Semiannual)
//!     .with_calendar(Arc::new(Target))
//!     .with_convention(BusinessDayConvention::ModifiedFollowing)
//!     .build()?;
//! assert_eq!(schedule.size(), 5);
//! # Ok::<(), ql_schedule::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and global settings.
pub use ql_core as core;

/// Date, period, calendar and schedule types.
pub use ql_time as time;
