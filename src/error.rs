//! Error types for filter construction and mutation.

use thiserror::Error;

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by filters, code assignment and filter banks.
///
/// All of these are deterministic logical errors: retrying the same call
/// yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity, hash count, set count or salt range was zero.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A negative element id reached the hashing boundary.
    #[error("invalid element id {0}: ids must be non-negative")]
    InvalidElement(i64),

    /// A remove would drive the counter at `index` below zero.
    #[error("counter underflow at index {index}")]
    CounterUnderflow {
        /// Slot whose counter is already exhausted.
        index: usize,
    },

    /// An add would push the counter at `index` past its maximum.
    #[error("counter overflow at index {index}")]
    CounterOverflow {
        /// Slot whose counter is full.
        index: usize,
    },

    /// The set count needs a code length other than the number of filters.
    #[error(
        "{num_sets} sets need codes of length {required}, but {available} filters are configured"
    )]
    CodeAssignmentOverflow {
        /// Number of logical sets requested.
        num_sets: usize,
        /// Code length the set count requires.
        required: usize,
        /// Code length the caller supplied.
        available: usize,
    },

    /// A set code was malformed or is the reserved all-zero code.
    #[error("invalid set code: {0}")]
    InvalidCode(String),
}

impl Error {
    /// Creates a new invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    /// Creates a new invalid code error.
    pub fn invalid_code(msg: impl Into<String>) -> Self {
        Error::InvalidCode(msg.into())
    }
}
