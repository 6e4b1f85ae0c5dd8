//! End-to-end detection tests: history buffer through classifier
//!
//! Drives the same path the demo driver takes - frames into the ring
//! buffer, chronological snapshot out, full classification over the
//! flattened window - and pins the observable results.

use spikeguard_core::{Frame, History};
use spikeguard_dbscan::{Classifier, ClassifierConfig, Label};

fn imu_frames() -> [Frame; 4] {
    [
        Frame::new(&[1.23, 1.22, 1.21, 1.22]).unwrap(),
        Frame::new(&[1.33, 1.32, 1.31, 1.32]).unwrap(),
        Frame::new(&[3.4, 1.42, 1.41, 1.42]).unwrap(),
        Frame::new(&[1.33, 1.32, 1.31, 1.32]).unwrap(),
    ]
}

#[test]
fn lone_spike_ends_in_outlier_set() {
    let mut history = History::new(4).unwrap();
    for frame in imu_frames() {
        history.insert(frame);
    }
    assert!(history.is_full());

    let window = history.snapshot();
    let classifier =
        Classifier::new(ClassifierConfig::default(), &window).unwrap();

    // The 3.4 reading is the first channel of interval 2: window index 8.
    // It is far from its same-interval peers and from every value-range
    // peer in neighboring intervals.
    assert_eq!(classifier.outlier_set().len(), 1);
    assert!(classifier.outlier_set().contains(&8));
    assert_eq!(classifier.observation(8).unwrap().value, 3.4);
    assert_eq!(classifier.observation(8).unwrap().interval, 2);

    // Every other reading clusters within epsilon of its peers
    for index in 0..classifier.len() as u16 {
        if index == 8 {
            assert_eq!(classifier.label_of(index), Some(Label::Noise));
        } else {
            assert_eq!(classifier.label_of(index), Some(Label::Core));
            assert!(!classifier.outlier_set().contains(&index));
        }
    }
}

#[test]
fn outlier_accessor_is_idempotent() {
    let classifier =
        Classifier::new(ClassifierConfig::default(), &imu_frames()).unwrap();

    let first: Vec<u16> = classifier.outlier_set().iter().copied().collect();
    let second: Vec<u16> = classifier.outlier_set().iter().copied().collect();
    assert_eq!(first, second);
}

#[test]
fn ring_overwrite_feeds_the_classifier_the_newest_window() {
    let mut history = History::new(4).unwrap();

    // Two early frames that will be overwritten, spike included
    history.insert(Frame::new(&[9.0, 9.1, 9.0, 9.1]).unwrap());
    history.insert(Frame::new(&[42.0, 9.1, 9.0, 9.1]).unwrap());
    for frame in imu_frames() {
        history.insert(frame);
    }

    let window = history.snapshot();
    assert_eq!(window[0].get(0), Some(1.23));

    let classifier =
        Classifier::new(ClassifierConfig::default(), &window).unwrap();

    // Only the spike of the surviving window remains
    let values: Vec<f32> = classifier.outliers().map(|o| o.value).collect();
    assert_eq!(values, vec![3.4]);
}

#[test]
fn snapshot_before_full_still_classifies() {
    let mut history = History::new(4).unwrap();
    history.insert(Frame::new(&[1.0]).unwrap());

    // Zero-padded readout: three placeholder frames plus the insert, all
    // single-channel, so the window flattens with one channel per frame
    let window = history.snapshot();
    let config = ClassifierConfig {
        channels_per_frame: 1,
        ..ClassifierConfig::default()
    };
    let classifier = Classifier::new(config, &window).unwrap();
    assert_eq!(classifier.len(), 4);
}
