//! Global library settings (translates `ql/settings.hpp`).
//!
//! [`Settings`] holds the **evaluation date**: the reference date used when a
//! caller leaves a date unspecified (for instance a null effective date on a
//! backward schedule, or a null reference date passed to a schedule lookup).
//! It is a process-wide singleton accessed via a `std::sync::OnceLock`.
//!
//! The date is stored as a serial number so that this crate stays independent
//! of the date types defined downstream.
//!
//! Thread safety: the evaluation date lives behind a `Mutex` so that it can be
//! changed from any thread.  Tests that change it should go through
//! [`ScopedEvaluationDate`], which restores the previous value on drop.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Process-wide settings.
pub struct Settings {
    evaluation_date: Mutex<Option<i32>>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            evaluation_date: Mutex::new(None),
        })
    }

    fn slot(&self) -> MutexGuard<'_, Option<i32>> {
        // A poisoned lock still holds a plain integer; recover it.
        self.evaluation_date
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the evaluation date serial number, or `None` if unset.
    pub fn evaluation_date_serial(&self) -> Option<i32> {
        *self.slot()
    }

    /// Set the evaluation date as a serial number.
    pub fn set_evaluation_date_serial(&self, serial: i32) {
        tracing::debug!(serial, "evaluation date set");
        *self.slot() = Some(serial);
    }

    /// Clear the evaluation date.
    pub fn reset_evaluation_date(&self) {
        *self.slot() = None;
    }
}

/// RAII guard that sets the evaluation date and restores the previous value
/// when dropped.
///
/// ```
/// use ql_core::{ScopedEvaluationDate, Settings};
///
/// {
///     let _guard = ScopedEvaluationDate::new(40_000);
///     assert_eq!(Settings::instance().evaluation_date_serial(), Some(40_000));
/// }
/// ```
#[must_use = "the previous evaluation date is restored as soon as the guard is dropped"]
pub struct ScopedEvaluationDate {
    previous: Option<i32>,
}

impl ScopedEvaluationDate {
    /// Set the evaluation date to `serial` until the guard goes out of scope.
    pub fn new(serial: i32) -> Self {
        let settings = Settings::instance();
        let previous = settings.evaluation_date_serial();
        settings.set_evaluation_date_serial(serial);
        Self { previous }
    }
}

impl Drop for ScopedEvaluationDate {
    fn drop(&mut self) {
        let settings = Settings::instance();
        match self.previous {
            Some(serial) => settings.set_evaluation_date_serial(serial),
            None => settings.reset_evaluation_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_date_is_restored() {
        let settings = Settings::instance();
        let before = settings.evaluation_date_serial();
        {
            let _outer = ScopedEvaluationDate::new(41_000);
            {
                let _inner = ScopedEvaluationDate::new(42_000);
                assert_eq!(settings.evaluation_date_serial(), Some(42_000));
            }
            assert_eq!(settings.evaluation_date_serial(), Some(41_000));
        }
        assert_eq!(settings.evaluation_date_serial(), before);
    }
}
