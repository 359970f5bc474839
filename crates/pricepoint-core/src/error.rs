//! # Error Types
//!
//! The calculator itself never fails: malformed numbers coerce to zero
//! and degenerate arithmetic substitutes zero results. The one typed
//! error in this crate covers the seam where a front end maps free text
//! onto a [`crate::Field`].

use thiserror::Error;

/// Failure to resolve a field name given by a front end.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The name does not match any input field.
    #[error("unknown field '{0}' (expected cost, rate, freight, margin, or tax)")]
    Unknown(String),
}
