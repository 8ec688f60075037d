//! Onset demo: fast followers against a plucked-note signal.
//!
//! Prints the staircase, smoothed, and RMS envelopes of three decaying
//! notes, and flags onsets where the staircase jumps above the smoothed
//! envelope.
//!
//! Run with: cargo run -p contour-core --example onset_demo

use core::time::Duration;

use contour_core::{
    FastEnvelopeFollower, FastRmsEnvelopeFollowerDb, PeakEnvelopeFollower,
    SmoothedFastEnvelopeFollower,
};

const SAMPLE_RATE: f32 = 48000.0;

/// Three exponentially decaying notes, 250 ms apart.
fn plucked_notes() -> Vec<f32> {
    let notes = [(110.0, 0.9), (165.0, 0.5), (220.0, 0.7)];
    let note_len = (SAMPLE_RATE * 0.25) as usize;
    let mut out = Vec::with_capacity(note_len * notes.len());
    for &(freq, amplitude) in &notes {
        for n in 0..note_len {
            let t = n as f32 / SAMPLE_RATE;
            let decay = libm::expf(-t * 12.0);
            out.push(amplitude * decay * libm::sinf(core::f32::consts::TAU * freq * t));
        }
    }
    out
}

fn main() {
    // Lowest note 110 Hz: period 9.1 ms, hold >= period / 2
    let hold = Duration::from_millis(5);
    let mut staircase = FastEnvelopeFollower::new(hold, SAMPLE_RATE);
    let mut smoothed = SmoothedFastEnvelopeFollower::new(hold, SAMPLE_RATE);
    let mut rms = FastRmsEnvelopeFollowerDb::new(hold, SAMPLE_RATE);
    let mut peak = PeakEnvelopeFollower::new(Duration::from_millis(100), SAMPLE_RATE);

    println!("=== Envelopes every 10 ms (hold {} samples) ===\n", staircase.hold_samples());
    println!(
        "{:>6} {:>10} {:>10} {:>10} {:>10}",
        "ms", "staircase", "smoothed", "peak", "rms dB"
    );
    println!("{:->6} {:->10} {:->10} {:->10} {:->10}", "", "", "", "", "");

    let report_every = (SAMPLE_RATE * 0.01) as usize;
    let mut armed = true;
    for (n, sample) in plucked_notes().into_iter().enumerate() {
        let step = staircase.process(sample);
        let smooth = smoothed.process(sample);
        let level = rms.process(sample);
        let held = peak.process(sample.abs());

        // Rising edge of the staircase well above its smoothed version
        let onset = armed && step > smooth * 1.5 + 0.05;
        if onset {
            println!("{:>6.1} onset at sample {n}", n as f32 / SAMPLE_RATE * 1000.0);
            armed = false;
        } else if step <= smooth * 1.1 + 0.01 {
            armed = true;
        }

        if n % report_every == 0 {
            println!(
                "{:>6.0} {:>10.4} {:>10.4} {:>10.4} {:>10.2}",
                n as f32 / SAMPLE_RATE * 1000.0,
                step,
                smooth,
                held,
                level.value()
            );
        }
    }
}
