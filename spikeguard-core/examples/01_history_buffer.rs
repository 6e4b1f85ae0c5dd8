//! History Buffer Walkthrough
//!
//! Demonstrates the fixed-window history buffer: inserting sample frames,
//! overwriting the oldest interval once the window is full, and reading
//! the window back in chronological order.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_history_buffer
//! ```

use spikeguard_core::{Frame, History};

fn main() {
    println!("Spikeguard History Buffer Example");
    println!("=================================\n");

    // Buffer of the previous 4 sample frames
    let mut buffer = History::new(4).expect("capacity within slot budget");

    let early_frames = [
        [3.0, 6.0, 8.0, 1.0],
        [1.0, 2.0, 2.0, 3.0],
        [2.0, 1.0, 1.0, 1.0],
    ];
    for readings in &early_frames {
        buffer.insert(Frame::new(readings).expect("frame within channel budget"));
    }

    // Three of four slots written: readout still works but is zero-padded
    println!("After 3 of 4 inserts:");
    println!("{}\n", buffer);

    let late_frames = [
        [12.0, 11.0, 11.0, 11.0],
        [22.0, 22.0, 21.0, 21.0],
        [33.0, 33.0, 31.0, 31.0],
    ];
    for readings in &late_frames {
        buffer.insert(Frame::new(readings).expect("frame within channel budget"));
    }

    // Six inserts into four slots: the first two intervals are gone
    println!("After 6 inserts (oldest two overwritten):");
    println!("{}\n", buffer);

    println!("Chronological readout:");
    for (i, frame) in buffer.snapshot().iter().enumerate() {
        println!("  interval {}: {}", i, frame);
    }
}
