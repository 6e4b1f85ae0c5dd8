//! Window flattening - frames to observations
//!
//! Converts the chronological frame readout of a history window into the
//! flat observation collection the classifier operates on. The horizontal
//! axis of classification is time: each observation keeps only the index of
//! its source interval, and channel identity is discarded once flattened.
//!
//! Observations stay grouped in contiguous per-interval blocks, which is
//! what both the density rule (same-interval support) and the trend
//! correction (per-block candidate scan) key on.

use core::ops::Range;

use heapless::Vec;
use spikeguard_core::Frame;

use crate::point::Observation;
use crate::{DetectionError, DetectionResult, MAX_OBSERVATIONS};

/// Flattened observation window
///
/// Built once from a chronological frame sequence; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Window {
    observations: Vec<Observation, MAX_OBSERVATIONS>,
    channels_per_frame: usize,
}

impl Window {
    /// Flatten `frames` in chronological order
    ///
    /// Iterates intervals in order and, within each interval, channels in
    /// their given order; each observation's interval index is its source
    /// frame's position in the sequence.
    ///
    /// Fails with `EmptyWindow` when there are no frames, no channels per
    /// frame, or no readings at all; with `InvalidConfiguration` when
    /// `channels_per_frame` does not evenly divide the flattened length;
    /// with `BufferFull` past [`MAX_OBSERVATIONS`].
    pub fn from_frames(
        frames: &[Frame],
        channels_per_frame: usize,
    ) -> DetectionResult<Self> {
        if channels_per_frame == 0 || frames.is_empty() {
            return Err(DetectionError::EmptyWindow);
        }

        let mut observations: Vec<Observation, MAX_OBSERVATIONS> = Vec::new();
        for (interval, frame) in frames.iter().enumerate() {
            for channel in 0..frame.channel_count() {
                if let Some(value) = frame.get(channel) {
                    let index = observations.len() as u16;
                    observations
                        .push(Observation {
                            index,
                            value,
                            interval: interval as u16,
                        })
                        .map_err(|_| DetectionError::BufferFull)?;
                }
            }
        }

        if observations.is_empty() {
            return Err(DetectionError::EmptyWindow);
        }
        if observations.len() % channels_per_frame != 0 {
            return Err(DetectionError::InvalidConfiguration {
                reason: "channels_per_frame must evenly divide the flattened window",
            });
        }

        Ok(Self {
            observations,
            channels_per_frame,
        })
    }

    /// Number of observations in the window
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when the window holds no observations (cannot happen after a
    /// successful construction)
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations in flattening order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Observation at a window position
    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    /// Readings per interval
    pub fn channels_per_frame(&self) -> usize {
        self.channels_per_frame
    }

    /// Number of per-interval blocks
    pub fn block_count(&self) -> usize {
        self.observations.len() / self.channels_per_frame
    }

    /// Window positions of one contiguous per-interval block
    pub fn block_range(&self, block: usize) -> Range<usize> {
        let start = block * self.channels_per_frame;
        start..start + self.channels_per_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattening_tags_interval_indices() {
        let frames = [
            Frame::new(&[1.0, 2.0]).unwrap(),
            Frame::new(&[3.0, 4.0]).unwrap(),
            Frame::new(&[5.0, 6.0]).unwrap(),
        ];

        let window = Window::from_frames(&frames, 2).unwrap();
        assert_eq!(window.len(), 6);

        let intervals: std::vec::Vec<u16> =
            window.observations().iter().map(|o| o.interval).collect();
        assert_eq!(intervals, vec![0, 0, 1, 1, 2, 2]);

        let values: std::vec::Vec<f32> =
            window.observations().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        // Indices are the flattening order
        for (i, observation) in window.observations().iter().enumerate() {
            assert_eq!(observation.index as usize, i);
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            Window::from_frames(&[], 2).unwrap_err(),
            DetectionError::EmptyWindow
        );

        let frames = [Frame::new(&[1.0]).unwrap()];
        assert_eq!(
            Window::from_frames(&frames, 0).unwrap_err(),
            DetectionError::EmptyWindow
        );

        let empty_frames = [Frame::new(&[]).unwrap()];
        assert_eq!(
            Window::from_frames(&empty_frames, 1).unwrap_err(),
            DetectionError::EmptyWindow
        );
    }

    #[test]
    fn rejects_non_dividing_channel_count() {
        let frames = [Frame::new(&[1.0, 2.0, 3.0]).unwrap()];

        assert!(matches!(
            Window::from_frames(&frames, 2),
            Err(DetectionError::InvalidConfiguration { .. })
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn flattening_preserves_shape(
                frame_count in 1usize..=8,
                channels in 1usize..=8,
            ) {
                let mut frames = std::vec::Vec::new();
                for i in 0..frame_count {
                    let readings: std::vec::Vec<f32> =
                        (0..channels).map(|c| (i * channels + c) as f32).collect();
                    frames.push(Frame::new(&readings).unwrap());
                }

                let window = Window::from_frames(&frames, channels).unwrap();
                prop_assert_eq!(window.len(), frame_count * channels);
                prop_assert_eq!(window.block_count(), frame_count);

                for (i, observation) in window.observations().iter().enumerate() {
                    prop_assert_eq!(observation.index as usize, i);
                    prop_assert_eq!(observation.interval as usize, i / channels);
                }
            }
        }
    }

    #[test]
    fn block_ranges_partition_the_window() {
        let frames = [
            Frame::new(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            Frame::new(&[5.0, 6.0, 7.0, 8.0]).unwrap(),
        ];

        let window = Window::from_frames(&frames, 4).unwrap();
        assert_eq!(window.block_count(), 2);
        assert_eq!(window.block_range(0), 0..4);
        assert_eq!(window.block_range(1), 4..8);
    }
}
