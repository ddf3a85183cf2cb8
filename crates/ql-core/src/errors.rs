//! Error types for the schedule library.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single `thiserror`-derived [`Error`] enum below.  The C++
//! macros `QL_REQUIRE`, `QL_ENSURE`, and `QL_FAIL` map to the `ensure!`,
//! `ensure_post!` and `fail!` macros defined here.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// General runtime error (maps to `QL_FAIL`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (maps to `QL_REQUIRE`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated (maps to `QL_ENSURE`).
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Date-related error (out-of-range serials, impossible days, ...).
    #[error("date error: {0}")]
    Date(String),

    /// The requested date range is empty or inverted, or an optional stub
    /// date lies outside it.
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    /// The tenor is negative or cannot be used with the requested rule.
    #[error("invalid tenor: {0}")]
    InvalidTenor(String),

    /// Two generation parameters that cannot be used together.
    #[error("invalid rule combination: {0}")]
    InvalidRuleCombination(String),

    /// Index out of range.
    #[error("index ({index}) out of range [{lower}, {upper}]")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// Smallest valid index.
        lower: usize,
        /// Largest valid index.
        upper: usize,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Equivalent to C++ `QL_REQUIRE(condition, message)`.
///
/// Returns `Err(Error::Precondition(...))` if `$cond` is false.  A leading
/// `Variant =>` selects a more specific [`Error`] variant instead:
///
/// ```
/// use ql_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ql_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// fn ordered(a: i32, b: i32) -> ql_core::errors::Result<()> {
///     ensure!(InvalidRange => a < b, "{a} is not before {b}");
///     Ok(())
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// assert!(matches!(ordered(2, 1), Err(Error::InvalidRange(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($variant:ident => $cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::$variant(format!($($msg)*)));
        }
    };
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Equivalent to C++ `QL_ENSURE(condition, message)`.
///
/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ql_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> ql_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Equivalent to C++ `QL_FAIL(message)`.
///
/// Returns `Err(Error::Runtime(...))` immediately, or the named variant when
/// the message is prefixed with `Variant =>`.
///
/// # Example
/// ```
/// use ql_core::{fail, errors::Error};
/// fn always_err() -> ql_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// fn bad_combo() -> ql_core::errors::Result<()> {
///     fail!(InvalidRuleCombination => "no first date with {}", "CDS");
/// }
/// assert!(always_err().is_err());
/// assert!(matches!(bad_combo(), Err(Error::InvalidRuleCombination(_))));
/// ```
#[macro_export]
macro_rules! fail {
    ($variant:ident => $($msg:tt)*) => {
        return Err($crate::errors::Error::$variant(format!($($msg)*)))
    };
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
