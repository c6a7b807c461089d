//! Tone synthesis.
//!
//! A tone is stored as a single sine cycle of unsigned 8-bit samples centred
//! on 128. Tables are built once per tone kind and then copied into the output
//! as many times as needed.

use crate::format::ToneSpec;
use smallvec::SmallVec;
use std::f64::consts::PI;

/// One cycle of a tone. Supercharger tones are at most a few dozen samples
/// long, so tables stay inline.
pub type Waveform = SmallVec<[u8; 64]>;

/// Builds a one-cycle sine table of `cycle_length` samples.
///
/// Sample `i` is `round((sin(2πi / cycle_length) · volume + 1) · 128)`,
/// saturated to the `u8` range.
pub fn synthesize(cycle_length: usize, volume: f64) -> Waveform {
    let step = 2.0 * PI / cycle_length as f64;
    (0..cycle_length)
        .map(|i| {
            let y = ((step * i as f64).sin() * volume + 1.0) * 128.0;
            y.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

impl ToneSpec {
    /// Synthesizes the table for this tone.
    pub fn synthesize(&self) -> Waveform {
        synthesize(self.cycle_length, self.volume)
    }
}
