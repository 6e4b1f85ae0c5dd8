//! Fixed-Window History Buffer for Sensor Frames
//!
//! ## Overview
//!
//! This module provides the ring buffer that holds the N most recent sample
//! frames of a synchronized sensor group. Window-based outlier detection
//! only ever cares about the latest N intervals, so the buffer continuously
//! overwrites the oldest frame with the newest one:
//!
//! - O(1) insertion (overwrites the oldest slot when full)
//! - O(N) chronological readout
//! - Zero heap allocations, capacity bounded at compile time
//!
//! ## Design Rationale
//!
//! ### Why overwrite in place?
//!
//! A bounded real-time window never needs reallocation: once the slot
//! budget is fixed, inserting a frame is a single array write plus a modulo
//! cursor advance. Recent data is more valuable than old data, so when the
//! window is full the right response to a new frame is to discard the
//! oldest, not to fail.
//!
//! ### Why an indexed ring and not linked nodes?
//!
//! The same structure is often built as a cycle of linked nodes. An indexed
//! array with a modulo cursor gives identical semantics with no pointer
//! maintenance and no use-after-free class of bugs, and the slot layout is
//! a single contiguous allocation-free block:
//!
//! ```text
//! Physical slots:  [F5, F6, F3, F4]   (write_pos = 2)
//!                   0   1   2   3
//!
//! Readout order:   [F3, F4, F5, F6]   (oldest to newest)
//! Mapping: logical[i] = physical[(write_pos + i) % capacity]
//! ```
//!
//! ### Readout before the window is full
//!
//! Slots start as zero frames, and a readout is answered at any time: a
//! not-yet-full window yields its untouched zero frames first, then the
//! inserted frames in chronological order, newest last. The readout warns
//! (non-fatally) so callers know the result is zero-padded.
//!
//! ## Usage Example
//!
//! ```
//! use spikeguard_core::{Frame, History};
//!
//! let mut history = History::new(4).unwrap();
//!
//! for reading in [12.0, 15.0, 16.0, 17.0] {
//!     history.insert(Frame::new(&[reading]).unwrap());
//! }
//! assert!(history.is_full());
//!
//! // Fifth insert overwrites the oldest interval
//! history.insert(Frame::new(&[18.0]).unwrap());
//! let window = history.snapshot();
//! assert_eq!(window[0].get(0), Some(15.0));
//! assert_eq!(window[3].get(0), Some(18.0));
//! ```

use core::fmt;

use heapless::Vec;

use crate::errors::{HistoryError, HistoryResult};
use crate::frame::Frame;

/// Maximum number of frames a history window can hold
pub const MAX_WINDOW_FRAMES: usize = 16;

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{}};
}

/// Ring buffer of the N most recent sample frames
///
/// The capacity is chosen at construction (up to [`MAX_WINDOW_FRAMES`])
/// and never changes afterwards. Slots hold zero frames until overwritten.
///
/// ## Internal Invariants
///
/// - `slots.len()` equals the constructed capacity, always
/// - `write_pos < slots.len()` (next write position is always valid)
/// - readout starts at `write_pos` and walks all slots, so frames come out
///   oldest first and the most recent insert comes out last
///
/// ## Thread Safety
///
/// Not thread-safe; one window belongs to one detection session.
#[derive(Debug, Clone)]
pub struct History {
    /// Slot storage; exactly `capacity` entries after construction
    slots: Vec<Frame, MAX_WINDOW_FRAMES>,

    /// Index where the next insert will overwrite
    write_pos: usize,

    /// Frames inserted over the session; saturates, never wraps
    fill: u32,
}

impl History {
    /// Create a history window of `capacity` zeroed slots
    ///
    /// Fails with `ZeroCapacity` for an empty window and `CapacityExceeded`
    /// past [`MAX_WINDOW_FRAMES`].
    pub fn new(capacity: usize) -> HistoryResult<Self> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        if capacity > MAX_WINDOW_FRAMES {
            return Err(HistoryError::CapacityExceeded {
                requested: capacity,
                max: MAX_WINDOW_FRAMES,
            });
        }

        let mut slots = Vec::new();
        for _ in 0..capacity {
            // Placeholder shape: a single zero reading per untouched slot
            let _ = slots.push(Frame::zeroed(1)?);
        }

        Ok(Self {
            slots,
            write_pos: 0,
            fill: 0,
        })
    }

    /// Insert a frame, overwriting the oldest slot
    ///
    /// O(1): one slot write and a cursor advance. Any frame shape is
    /// accepted; keeping shapes consistent across a window is up to the
    /// caller.
    pub fn insert(&mut self, frame: Frame) {
        self.slots[self.write_pos] = frame;
        self.write_pos = (self.write_pos + 1) % self.slots.len();
        self.fill = self.fill.saturating_add(1);
    }

    /// True once as many frames were inserted as the window holds
    pub fn is_full(&self) -> bool {
        self.fill as usize >= self.slots.len()
    }

    /// Number of slots in the window
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Frames inserted since construction (saturating; diagnostic only)
    pub fn fill(&self) -> u32 {
        self.fill
    }

    /// All slots in chronological order, oldest first
    ///
    /// Always returns exactly `capacity` frames. When the window is not
    /// full yet, the leading entries are the untouched zero frames; a
    /// non-fatal warning is emitted and the readout is still returned.
    pub fn snapshot(&self) -> Vec<Frame, MAX_WINDOW_FRAMES> {
        if !self.is_full() {
            log_warn!(
                "history window not full: {} of {} frames, readout is zero-padded",
                self.fill,
                self.slots.len()
            );
        }

        let capacity = self.slots.len();
        let mut frames = Vec::new();
        for i in 0..capacity {
            // Oldest slot is the one the next insert would overwrite
            let _ = frames.push(self.slots[(self.write_pos + i) % capacity]);
        }
        frames
    }
}

impl fmt::Display for History {
    /// Diagnostic rendering: each frame in chronological order plus the
    /// validity flag
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capacity = self.slots.len();
        for i in 0..capacity {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", self.slots[(self.write_pos + i) % capacity])?;
        }
        write!(f, "\nStructure is valid: {}", self.is_full())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: f32) -> Frame {
        Frame::new(&[value]).unwrap()
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(History::new(0).unwrap_err(), HistoryError::ZeroCapacity);
    }

    #[test]
    fn rejects_oversized_capacity() {
        let err = History::new(MAX_WINDOW_FRAMES + 1).unwrap_err();
        assert_eq!(
            err,
            HistoryError::CapacityExceeded {
                requested: MAX_WINDOW_FRAMES + 1,
                max: MAX_WINDOW_FRAMES,
            }
        );
    }

    #[test]
    fn fills_up_then_stays_full() {
        let mut history = History::new(3).unwrap();

        assert!(!history.is_full());
        history.insert(frame(1.0));
        history.insert(frame(2.0));
        assert!(!history.is_full());

        history.insert(frame(3.0));
        assert!(history.is_full());

        history.insert(frame(4.0));
        assert!(history.is_full());
        assert_eq!(history.fill(), 4);
    }

    #[test]
    fn ring_overwrite_keeps_newest_four() {
        let mut history = History::new(4).unwrap();

        for i in 1..=6 {
            history.insert(frame(i as f32));
        }

        let window = history.snapshot();
        let values: std::vec::Vec<f32> =
            window.iter().map(|f| f.get(0).unwrap()).collect();
        assert_eq!(values, vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn snapshot_before_full_is_zero_padded() {
        let mut history = History::new(3).unwrap();
        history.insert(frame(7.0));

        let window = history.snapshot();
        assert_eq!(window.len(), 3);

        // Untouched zero slots first, the single insert last
        assert_eq!(window[0].as_slice(), &[0.0]);
        assert_eq!(window[1].as_slice(), &[0.0]);
        assert_eq!(window[2].get(0), Some(7.0));
    }

    #[test]
    fn snapshot_is_chronological_with_newest_last() {
        let mut history = History::new(4).unwrap();
        for i in 0..9 {
            history.insert(frame(i as f32));
            let window = history.snapshot();
            assert_eq!(window.len(), 4);
            assert_eq!(window[3].get(0), Some(i as f32));
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_reports_validity() {
        let mut history = History::new(2).unwrap();
        history.insert(frame(1.0));

        let rendered = history.to_string();
        assert!(rendered.contains(" -> "));
        assert!(rendered.contains("Structure is valid: false"));

        history.insert(frame(2.0));
        assert!(history.to_string().contains("Structure is valid: true"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fullness_and_readout(
                capacity in 1usize..=MAX_WINDOW_FRAMES,
                inserts in 0usize..=40,
            ) {
                let mut history = History::new(capacity).unwrap();
                for i in 0..inserts {
                    history.insert(Frame::new(&[i as f32]).unwrap());
                    prop_assert_eq!(history.is_full(), i + 1 >= capacity);
                }
                prop_assert_eq!(history.is_full(), inserts >= capacity);

                let window = history.snapshot();
                prop_assert_eq!(window.len(), capacity);
                if inserts > 0 {
                    // Most recent insert always comes out last
                    prop_assert_eq!(
                        window[capacity - 1].get(0),
                        Some((inserts - 1) as f32)
                    );
                }
            }
        }
    }
}
