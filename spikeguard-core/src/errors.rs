//! Error Types for the History Layer
//!
//! ## Design Philosophy
//!
//! Spikeguard's error system is designed with embedded systems in mind:
//!
//! 1. **Small Size**: Each variant carries at most two machine words so
//!    errors are cheap to return from hot paths.
//!
//! 2. **No Heap Allocation**: All error data is inline - no String. This
//!    ensures deterministic memory usage.
//!
//! 3. **Copy Semantics**: Errors implement Copy for efficient return from
//!    functions without move semantics complications.
//!
//! 4. **Explicit Rejection**: Configurations that would previously have
//!    produced silent nonsense (a zero-capacity window, an oversized frame)
//!    are rejected up front with an actionable variant.

use thiserror_no_std::Error;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// History errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// A window that can hold nothing cannot buffer anything
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    /// Requested capacity exceeds the compile-time slot budget
    #[error("capacity {requested} exceeds maximum {max}")]
    CapacityExceeded {
        /// Capacity the caller asked for
        requested: usize,
        /// Largest capacity the slot storage supports
        max: usize,
    },

    /// Frame shape exceeds the compile-time channel budget
    #[error("frame has {requested} channels, maximum is {max}")]
    TooManyChannels {
        /// Channel count the caller asked for
        requested: usize,
        /// Largest channel count the inline storage supports
        max: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for HistoryError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroCapacity =>
                defmt::write!(fmt, "capacity must be at least 1"),
            Self::CapacityExceeded { requested, max } =>
                defmt::write!(fmt, "capacity {} exceeds maximum {}", requested, max),
            Self::TooManyChannels { requested, max } =>
                defmt::write!(fmt, "{} channels exceeds maximum {}", requested, max),
        }
    }
}
