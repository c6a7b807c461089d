//! Bit Encoder
//!
//! Turns bytes into tones. Every bit becomes one full cycle of either the zero
//! or the one tone, most significant bit first, so a byte costs between
//! `8 × zero_len` and `8 × one_len` samples.
//!
//! # Timing
//! Fixed-duration runs (calibration, trailer) are measured in bytes rather
//! than samples, using `bytes_per_second = rate / (zero_len + one_len) / 4`.
//! The divisor is empirical and matches what tape decks capture reliably.

use crate::format::TapeFormat;
use crate::sink::SampleSink;
use crate::tone::Waveform;
use bitvec::prelude::*;

/// Writes bytes as zero/one tone cycles into a [`SampleSink`].
#[derive(Debug)]
pub struct BitEncoder<S> {
    sink: S,
    zero_bit: Waveform,
    one_bit: Waveform,
    bytes_per_second: u32,
}

impl<S: SampleSink> BitEncoder<S> {
    /// Creates an encoder from precomputed tone tables.
    ///
    /// # Panics
    /// Panics if both tables are empty, as no byte rate can be derived.
    pub fn new(sample_rate: u32, zero_bit: Waveform, one_bit: Waveform, sink: S) -> Self {
        let cycle_pair = (zero_bit.len() + one_bit.len()) as u32;
        assert!(cycle_pair > 0, "tone tables must not both be empty");
        Self {
            sink,
            zero_bit,
            one_bit,
            bytes_per_second: sample_rate / cycle_pair / 4,
        }
    }

    /// Creates an encoder with the zero/one tones of `format`.
    pub fn from_format(format: &TapeFormat, sink: S) -> Self {
        Self::new(
            format.sample_rate,
            format.zero_tone.synthesize(),
            format.one_tone.synthesize(),
            sink,
        )
    }

    pub fn bytes_per_second(&self) -> u32 {
        self.bytes_per_second
    }

    /// Writes the 8 bits of `byte`, most significant first.
    pub fn write_byte(&mut self, byte: u8) {
        for bit in byte.view_bits::<Msb0>().iter().by_vals() {
            let cycle = if bit { &self.one_bit } else { &self.zero_bit };
            self.sink.write_samples(cycle);
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Repeats `byte` for `seconds` of tape time and returns how many bytes
    /// were written. The count is truncated, so short durations may write
    /// nothing.
    pub fn write_byte_duration(&mut self, byte: u8, seconds: f64) -> usize {
        let count = (seconds * self.bytes_per_second as f64).floor().max(0.0) as usize;
        for _ in 0..count {
            self.write_byte(byte);
        }
        count
    }

    /// Number of samples a single byte occupies.
    pub fn samples_for_byte(&self, byte: u8) -> usize {
        let ones = byte.count_ones() as usize;
        ones * self.one_bit.len() + (8 - ones) * self.zero_bit.len()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}
