//! Fixed-window history layer for Spikeguard
//!
//! Keeps the most recent N sampled intervals of a group of synchronized
//! sensor channels in a ring buffer, ready for window-based outlier
//! detection.
//!
//! Key constraints:
//! - Fixed memory: capacities bounded at compile time, no heap allocation
//! - O(1) insertion, O(N) chronological readout
//! - Runs on no_std targets (the `std` feature adds logging)
//!
//! ```
//! use spikeguard_core::{Frame, History};
//!
//! let mut history = History::new(4).unwrap();
//! history.insert(Frame::new(&[1.23, 1.22, 1.21, 1.22]).unwrap());
//!
//! // The window reports when a full readout is meaningful
//! assert!(!history.is_full());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod errors;
pub mod frame;

// Public API
pub use buffer::{History, MAX_WINDOW_FRAMES};
pub use errors::{HistoryError, HistoryResult};
pub use frame::{Frame, MAX_CHANNELS};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
