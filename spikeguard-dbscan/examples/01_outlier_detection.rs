//! Basic Outlier Detection Example
//!
//! Feeds four intervals of a four-channel inertial sensor group into the
//! history buffer and runs the density classifier over the full window.
//! One channel misreads (3.4 against a ~1.4 consensus) and ends up in the
//! outlier set.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_outlier_detection
//! ```

use spikeguard_core::{Frame, History};
use spikeguard_dbscan::{Classifier, ClassifierConfig};

fn main() {
    println!("Spikeguard Outlier Detection Example");
    println!("====================================\n");

    let config = ClassifierConfig {
        epsilon: 0.5,
        min_points: 2,
        channels_per_frame: 4,
        seed: 42,
    };

    // Buffer of the previous 4 sample frames
    let mut buffer = History::new(4).expect("capacity within slot budget");
    let samples = [
        [1.23, 1.22, 1.21, 1.22],
        [1.33, 1.32, 1.31, 1.32],
        [3.4, 1.42, 1.41, 1.42], // first channel misreads here
        [1.33, 1.32, 1.31, 1.32],
    ];
    for readings in &samples {
        buffer.insert(Frame::new(readings).expect("frame within channel budget"));
    }

    println!("Window contents:");
    println!("{}\n", buffer);

    let window = buffer.snapshot();
    let classifier =
        Classifier::new(config, &window).expect("well-formed window");

    let core: Vec<f32> = classifier.core_points().map(|o| o.value).collect();
    let border: Vec<f32> = classifier.border_points().map(|o| o.value).collect();
    let outliers: Vec<f32> = classifier.outliers().map(|o| o.value).collect();

    println!("Core: {:?}", core);
    println!("Border: {:?}", border);
    println!("Outliers: {:?}", outliers);

    for observation in classifier.outliers() {
        println!(
            "\nFlagged reading {} in interval {} (window position {})",
            observation.value, observation.interval, observation.index
        );
    }
}
