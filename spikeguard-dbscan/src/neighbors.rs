//! Epsilon-neighborhood search in (value, interval) space
//!
//! The neighborhood engine answers two questions for the classifier: which
//! observations lie within the epsilon radius of a point, and whether any
//! of them come from the point's own interval (its "vertical" neighbors -
//! cross-channel agreement at the same instant).

use heapless::Vec;

use crate::point::Observation;
use crate::MAX_OBSERVATIONS;

/// All other observations within `epsilon` of `point`
///
/// Comparison is by identity: a point is never its own neighbor, but a
/// different observation with an identical value at distance zero is.
pub fn neighbors_within(
    point: &Observation,
    observations: &[Observation],
    epsilon: f32,
) -> Vec<u16, MAX_OBSERVATIONS> {
    let mut found = Vec::new();
    for other in observations {
        if other.index == point.index {
            continue;
        }
        if point.distance_to(other) <= epsilon {
            let _ = found.push(other.index);
        }
    }
    found
}

/// True when at least one neighbor shares `point`'s interval
///
/// The vertical-neighbor test: checks for density support from the same
/// time interval, independent of the epsilon search's temporal spread.
pub fn has_same_interval_neighbor(
    point: &Observation,
    neighbors: &[u16],
    observations: &[Observation],
) -> bool {
    neighbors
        .iter()
        .any(|&i| observations[usize::from(i)].interval == point.interval)
}
