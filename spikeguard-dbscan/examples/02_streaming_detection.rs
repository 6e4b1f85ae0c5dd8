//! Streaming Detection Example
//!
//! Simulates a continuously sampled four-channel sensor group: each tick
//! pushes one frame into the history window and, once the window is full,
//! classifies the whole window. A spike injected into a single channel
//! shows up in the outlier set for as long as its interval stays inside
//! the window, then ages out.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_streaming_detection
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

use spikeguard_core::{Frame, History};
use spikeguard_dbscan::{Classifier, ClassifierConfig};

const CHANNELS: usize = 4;
const WINDOW: usize = 4;
const TICKS: usize = 12;
const SPIKE_TICK: usize = 5;

fn main() {
    println!("Spikeguard Streaming Detection Example");
    println!("======================================\n");

    let config = ClassifierConfig {
        epsilon: 0.5,
        min_points: 2,
        channels_per_frame: CHANNELS,
        seed: 42,
    };

    let mut rng = StdRng::seed_from_u64(7);
    let mut history = History::new(WINDOW).expect("capacity within slot budget");

    for tick in 0..TICKS {
        // Consensus value drifts slowly; channels disagree only by noise
        let consensus = 1.2 + tick as f32 * 0.01;
        let mut readings = [0.0f32; CHANNELS];
        for reading in readings.iter_mut() {
            *reading = consensus + rng.gen_range(-0.02..0.02);
        }
        if tick == SPIKE_TICK {
            readings[0] = consensus + 2.0; // one channel misreads
        }

        history.insert(Frame::new(&readings).expect("frame within channel budget"));

        if !history.is_full() {
            println!("tick {:2}: window filling ({}/{})", tick, history.fill(), WINDOW);
            continue;
        }

        let window = history.snapshot();
        let classifier =
            Classifier::new(config, &window).expect("well-formed window");
        let outliers: Vec<f32> =
            classifier.outliers().map(|o| o.value).collect();

        if outliers.is_empty() {
            println!("tick {:2}: clean window", tick);
        } else {
            println!("tick {:2}: outliers {:?}", tick, outliers);
        }
    }
}
