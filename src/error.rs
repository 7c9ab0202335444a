//! Crate Error Type
//!
//! Errors here cover configuration-level misuse only. In-game edge cases
//! (invalid drags, short funds, overlapping towers, bad card indices) are
//! deliberately silent no-ops inside the engines, never errors.

use thiserror::Error;

/// Errors returned by engine constructors and configuration parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A difficulty string was not one of `easy`, `medium`, `hard`.
    #[error("unrecognized difficulty: {0}")]
    UnknownDifficulty(String),

    /// A tower-defense configuration failed validation.
    #[error("invalid defense config: {0}")]
    InvalidConfig(&'static str),
}
