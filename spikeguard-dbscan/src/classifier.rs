//! Modified DBSCAN classifier with trend correction
//!
//! Runs the full density-classification pipeline over one window:
//! randomized visits label every observation Core, Border or Noise, and a
//! statistical correction pass after each epoch re-examines noise calls
//! that had measured neighbors - the borderline density decisions - against
//! the window's linear trend.
//!
//! The pipeline is repeated once per observation in the window, each round
//! with a fresh visit order. Points settle into Core and are skipped on
//! later rounds; everything else is re-evaluated, so the correction pass
//! gets amplified across rounds. That repetition is part of the observable
//! labeling behavior and is kept as-is.

use core::ops::Range;

use heapless::{FnvIndexSet, Vec};
use spikeguard_core::Frame;

use crate::neighbors::{has_same_interval_neighbor, neighbors_within};
use crate::point::{Label, Observation};
use crate::trend::{closest_in_block, correlation_coefficient, predicted_value};
use crate::window::Window;
use crate::{
    DetectionError, DetectionResult, PermutationSource, XorShiftPermutation,
    MAX_OBSERVATIONS,
};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{}};
}

/// Membership set keyed by window position
pub type MemberSet = FnvIndexSet<u16, MAX_OBSERVATIONS>;

/// Configuration for the density classifier
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifierConfig {
    /// Epsilon radius in (value, interval) space
    pub epsilon: f32,
    /// Minimum neighborhood size for a core point
    pub min_points: usize,
    /// Readings per interval; must evenly divide the flattened window
    pub channels_per_frame: usize,
    /// Seed for the visit-order shuffle
    pub seed: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.5,          // Covers typical same-instant sensor spread
            min_points: 2,
            channels_per_frame: 4, // Redundant inertial group size
            seed: 42,
        }
    }
}

/// Density classifier over one observation window
///
/// Construction runs the whole classify-and-correct pipeline synchronously;
/// afterwards the classifier is a read-only view of the labels, the
/// recorded neighbor relations and the three membership sets. Repeated
/// accessor calls return identical results.
pub struct Classifier<P: PermutationSource = XorShiftPermutation> {
    config: ClassifierConfig,
    window: Window,

    /// Label side table, keyed by window position
    labels: Vec<Label, MAX_OBSERVATIONS>,

    /// Recorded epsilon-neighbors per observation
    ///
    /// Populated incrementally as points are visited, and only into the
    /// visited point's own set - the relation is not recorded reciprocally
    /// on the neighbor.
    neighbor_sets: Vec<MemberSet, MAX_OBSERVATIONS>,

    core: MemberSet,
    border: MemberSet,
    outliers: MemberSet,

    visits: P,
}

impl Classifier<XorShiftPermutation> {
    /// Classify `frames` with the default seeded visit-order shuffle
    pub fn new(config: ClassifierConfig, frames: &[Frame]) -> DetectionResult<Self> {
        let seed = config.seed;
        Self::with_permutation(config, frames, XorShiftPermutation::new(seed))
    }
}

impl<P: PermutationSource> Classifier<P> {
    /// Classify with an injected visit-order source
    pub fn with_permutation(
        config: ClassifierConfig,
        frames: &[Frame],
        visits: P,
    ) -> DetectionResult<Self> {
        if !config.epsilon.is_finite() || config.epsilon <= 0.0 {
            return Err(DetectionError::InvalidConfiguration {
                reason: "epsilon must be a positive number",
            });
        }
        if config.min_points == 0 {
            return Err(DetectionError::InvalidConfiguration {
                reason: "min_points must be at least 1",
            });
        }

        let window = Window::from_frames(frames, config.channels_per_frame)?;

        let mut labels = Vec::new();
        let mut neighbor_sets = Vec::new();
        for _ in 0..window.len() {
            labels
                .push(Label::Unknown)
                .map_err(|_| DetectionError::BufferFull)?;
            neighbor_sets
                .push(MemberSet::new())
                .map_err(|_| DetectionError::BufferFull)?;
        }

        let mut classifier = Self {
            config,
            window,
            labels,
            neighbor_sets,
            core: MemberSet::new(),
            border: MemberSet::new(),
            outliers: MemberSet::new(),
            visits,
        };
        classifier.run()?;
        Ok(classifier)
    }

    /// Epoch driver: one randomized pass plus correction, repeated once per
    /// observation in the window
    fn run(&mut self) -> DetectionResult<()> {
        let len = self.window.len();
        let mut order: Vec<u16, MAX_OBSERVATIONS> = Vec::new();
        for i in 0..len {
            order
                .push(i as u16)
                .map_err(|_| DetectionError::BufferFull)?;
        }

        for _ in 0..len {
            // Fresh identity order each round, then shuffle
            for (i, slot) in order.iter_mut().enumerate() {
                *slot = i as u16;
            }
            self.visits.permute(&mut order);

            for k in 0..len {
                let index = order[k];
                // Core is terminal: settled points are skipped
                if self.labels[usize::from(index)] == Label::Core {
                    continue;
                }
                self.classify(index)?;
            }

            self.verify_trend()?;
        }
        Ok(())
    }

    /// Label one observation from its epsilon-neighborhood
    fn classify(&mut self, index: u16) -> DetectionResult<()> {
        let point = self.window.observations()[usize::from(index)];
        let neighbors =
            neighbors_within(&point, self.window.observations(), self.config.epsilon);

        // Record into the visited point's set only
        for &neighbor in neighbors.iter() {
            self.neighbor_sets[usize::from(index)]
                .insert(neighbor)
                .map_err(|_| DetectionError::BufferFull)?;
        }

        if !has_same_interval_neighbor(&point, &neighbors, self.window.observations()) {
            // No corroboration from the same interval: isolated reading
            self.labels[usize::from(index)] = Label::Noise;
            self.outliers
                .insert(index)
                .map_err(|_| DetectionError::BufferFull)?;
            return Ok(());
        }

        if neighbors.len() >= self.config.min_points {
            self.labels[usize::from(index)] = Label::Core;
            self.core
                .insert(index)
                .map_err(|_| DetectionError::BufferFull)?;
            return Ok(());
        }

        // Sparse neighborhood. A core neighbor marks the point Border, but
        // the label this visit finally records is Noise either way; the
        // border membership stays behind.
        for &neighbor in neighbors.iter() {
            if self.labels[usize::from(neighbor)] == Label::Core {
                self.labels[usize::from(index)] = Label::Border;
                self.border
                    .insert(index)
                    .map_err(|_| DetectionError::BufferFull)?;
            }
        }
        self.labels[usize::from(index)] = Label::Noise;
        self.outliers
            .insert(index)
            .map_err(|_| DetectionError::BufferFull)?;
        Ok(())
    }

    /// Trend correction pass
    ///
    /// Fits the window's linear trend over the non-noise observations, then
    /// walks each interval block: a noise observation that recorded
    /// neighbors is a borderline call, and the block observation closest to
    /// the trend prediction - when itself noise - is promoted to core along
    /// with its recorded in-block neighbors.
    fn verify_trend(&mut self) -> DetectionResult<()> {
        let mut clean_x: Vec<f32, MAX_OBSERVATIONS> = Vec::new();
        let mut clean_y: Vec<f32, MAX_OBSERVATIONS> = Vec::new();
        for observation in self.window.observations() {
            if self.labels[usize::from(observation.index)] != Label::Noise {
                clean_x
                    .push(observation.interval as f32)
                    .map_err(|_| DetectionError::BufferFull)?;
                clean_y
                    .push(observation.value)
                    .map_err(|_| DetectionError::BufferFull)?;
            }
        }

        // Degenerate trend (too few clean points, or zero spread): skip
        // replacement for this round instead of propagating a NaN
        let r = match correlation_coefficient(&clean_x, &clean_y) {
            Some(r) => r,
            None => {
                log_debug!("degenerate trend, skipping replacement for this round");
                return Ok(());
            }
        };

        let anchor = self.window.observations()[0].value;

        for block in 0..self.window.block_count() {
            let range = self.window.block_range(block);
            for slot in range.clone() {
                if self.labels[slot] != Label::Noise
                    || self.neighbor_sets[slot].is_empty()
                {
                    continue;
                }

                // Noise despite measured neighbors: check against the trend
                let interval = self.window.observations()[slot].interval;
                let prediction = predicted_value(r, interval, anchor);
                let closest =
                    closest_in_block(self.window.observations(), range.clone(), prediction);

                if self.labels[usize::from(closest)] == Label::Noise {
                    self.promote_with_neighbors(closest, range.clone())?;
                }
            }
        }
        Ok(())
    }

    /// Promote one observation and its recorded in-block neighbors to core
    fn promote_with_neighbors(
        &mut self,
        index: u16,
        block: Range<usize>,
    ) -> DetectionResult<()> {
        let mut promoted: Vec<u16, MAX_OBSERVATIONS> = Vec::new();
        promoted
            .push(index)
            .map_err(|_| DetectionError::BufferFull)?;
        for &neighbor in self.neighbor_sets[usize::from(index)].iter() {
            if block.contains(&usize::from(neighbor)) {
                promoted
                    .push(neighbor)
                    .map_err(|_| DetectionError::BufferFull)?;
            }
        }

        for &point in promoted.iter() {
            self.labels[usize::from(point)] = Label::Core;
            self.outliers.remove(&point);
            self.core
                .insert(point)
                .map_err(|_| DetectionError::BufferFull)?;
        }
        Ok(())
    }

    /// The outlier membership set after all epochs and corrections
    pub fn outlier_set(&self) -> &MemberSet {
        &self.outliers
    }

    /// The core membership set
    pub fn core_set(&self) -> &MemberSet {
        &self.core
    }

    /// The border membership set
    ///
    /// Entries stay once added, even when the point's final label moved on
    /// to Noise or Core.
    pub fn border_set(&self) -> &MemberSet {
        &self.border
    }

    /// Outlier observations
    pub fn outliers(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.outliers
            .iter()
            .map(|&i| &self.window.observations()[usize::from(i)])
    }

    /// Core observations
    pub fn core_points(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.core
            .iter()
            .map(|&i| &self.window.observations()[usize::from(i)])
    }

    /// Border observations
    pub fn border_points(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.border
            .iter()
            .map(|&i| &self.window.observations()[usize::from(i)])
    }

    /// Observation at a window position
    pub fn observation(&self, index: u16) -> Option<&Observation> {
        self.window.get(usize::from(index))
    }

    /// Final label of a window position
    pub fn label_of(&self, index: u16) -> Option<Label> {
        self.labels.get(usize::from(index)).copied()
    }

    /// Recorded neighbors of a window position
    pub fn neighbors_of(&self, index: u16) -> Option<&MemberSet> {
        self.neighbor_sets.get(usize::from(index))
    }

    /// Number of observations in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True when the window holds no observations (cannot happen after a
    /// successful construction)
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The configuration this classifier ran with
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The flattened window
    pub fn window(&self) -> &Window {
        &self.window
    }
}
