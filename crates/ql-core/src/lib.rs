//! # ql-core
//!
//! Core error definitions and global settings shared by the schedule
//! workspace.
//!
//! This crate provides the foundational building blocks used by `ql-time`:
//! the error hierarchy with its `ensure!` / `fail!` macros, and `Settings`
//! with the process-wide evaluation date.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

/// Global library settings (evaluation date).
pub mod settings;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{ScopedEvaluationDate, Settings};
