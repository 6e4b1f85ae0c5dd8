//! Sample Frames - One Interval Across All Channels
//!
//! A `Frame` is the unit stored in the history ring: the readings of every
//! monitored channel, captured at the same instant. Storage is inline
//! (`[f32; MAX_CHANNELS]` plus a count), so frames are `Copy`, never touch
//! the heap, and have a fixed memory footprint regardless of how many
//! channels are actually in use.
//!
//! Frames are immutable once built. Shape consistency across the frames of
//! a window is the caller's responsibility - the history layer accepts any
//! shape and the classifier rejects inconsistent windows when it flattens
//! them.

use core::fmt;

use crate::errors::{HistoryError, HistoryResult};

/// Maximum number of channels a frame can carry
///
/// Sized for small synchronized sensor groups (e.g. a set of redundant
/// inertial measurement channels sampled together).
pub const MAX_CHANNELS: usize = 8;

/// One sampled interval's readings across all monitored channels
///
/// ## Example
///
/// ```
/// use spikeguard_core::Frame;
///
/// let frame = Frame::new(&[1.23, 1.22, 1.21, 1.22]).unwrap();
/// assert_eq!(frame.channel_count(), 4);
/// assert_eq!(frame.get(0), Some(1.23));
/// assert_eq!(frame.get(4), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Inline reading storage; slots past `channel_count` stay zero
    readings: [f32; MAX_CHANNELS],

    /// Number of valid readings
    channel_count: usize,
}

impl Frame {
    /// Build a frame from a slice of channel readings
    ///
    /// Fails with `TooManyChannels` when the slice exceeds [`MAX_CHANNELS`].
    pub fn new(readings: &[f32]) -> HistoryResult<Self> {
        if readings.len() > MAX_CHANNELS {
            return Err(HistoryError::TooManyChannels {
                requested: readings.len(),
                max: MAX_CHANNELS,
            });
        }

        let mut storage = [0.0; MAX_CHANNELS];
        storage[..readings.len()].copy_from_slice(readings);

        Ok(Self {
            readings: storage,
            channel_count: readings.len(),
        })
    }

    /// Frame of `channel_count` zero readings
    ///
    /// This is the placeholder shape history slots hold before they are
    /// overwritten by real data.
    pub fn zeroed(channel_count: usize) -> HistoryResult<Self> {
        if channel_count > MAX_CHANNELS {
            return Err(HistoryError::TooManyChannels {
                requested: channel_count,
                max: MAX_CHANNELS,
            });
        }

        Ok(Self {
            readings: [0.0; MAX_CHANNELS],
            channel_count,
        })
    }

    /// Reading of one channel, `None` when out of range
    pub fn get(&self, channel: usize) -> Option<f32> {
        if channel < self.channel_count {
            Some(self.readings[channel])
        } else {
            None
        }
    }

    /// Number of valid readings in this frame
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Valid readings as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.readings[..self.channel_count]
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
