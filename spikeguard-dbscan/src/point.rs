//! Observation model for the density classifier
//!
//! An observation is one scalar reading in the flattened window. Its
//! identity is its window position, never its value: two channels reporting
//! the same number at the same instant are still two observations. Density
//! labels live in the classifier's side table, keyed by that position, so
//! nothing stored in a set is ever mutated afterwards.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use libm::sqrtf;

/// Density label assigned to an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Label {
    /// Not visited yet
    Unknown = 0,
    /// Insufficient density support - an outlier
    Noise = 1,
    /// Sparse neighborhood adjacent to a dense point
    Border = 2,
    /// Dense neighborhood
    Core = 3,
}

impl Label {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Label::Unknown => "unknown",
            Label::Noise => "noise",
            Label::Border => "border",
            Label::Core => "core",
        }
    }
}

/// One scalar reading in the flattened window
///
/// Carries the value, the index of its source interval, and its own
/// position in the window (`index`), which is the identity used by every
/// set and neighbor relation.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Position in the flattened window - the identity key
    pub index: u16,
    /// The scalar reading
    pub value: f32,
    /// Index of the source interval within the window
    pub interval: u16,
}

impl Observation {
    /// Euclidean distance in (value, interval) space
    ///
    /// The interval index participates on equal footing with the value, so
    /// nearness depends on reading similarity and temporal proximity at
    /// once.
    pub fn distance_to(&self, other: &Observation) -> f32 {
        let dv = self.value - other.value;
        let di = self.interval as f32 - other.interval as f32;
        sqrtf(dv * dv + di * di)
    }
}

// Identity, equality and ordering are the window position only. Values can
// coincide across observations without collapsing set entries.

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Observation {}

impl PartialOrd for Observation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Observation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl Hash for Observation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_combines_value_and_interval() {
        let a = Observation { index: 0, value: 0.0, interval: 0 };
        let b = Observation { index: 1, value: 3.0, interval: 4 };

        // 3-4-5 triangle across the two axes
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn same_interval_distance_is_value_difference() {
        let a = Observation { index: 0, value: 1.2, interval: 2 };
        let b = Observation { index: 1, value: 1.5, interval: 2 };

        assert!((a.distance_to(&b) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn identity_is_window_position() {
        let a = Observation { index: 3, value: 1.0, interval: 0 };
        let same_slot = Observation { index: 3, value: 9.9, interval: 1 };
        let other_slot = Observation { index: 4, value: 1.0, interval: 0 };

        assert_eq!(a, same_slot);
        assert_ne!(a, other_slot);
        assert!(a < other_slot);
    }

    #[test]
    fn label_names() {
        assert_eq!(Label::Unknown.name(), "unknown");
        assert_eq!(Label::Noise.name(), "noise");
        assert_eq!(Label::Border.name(), "border");
        assert_eq!(Label::Core.name(), "core");
    }
}
