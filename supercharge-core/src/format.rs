//! Tape Format Parameters
//!
//! Every timing, tone and header constant used while encoding lives in an
//! immutable [`TapeFormat`] value that is handed to the encoder. The only
//! preset shipped is [`TapeFormat::SUPERCHARGER`], which matches the values used
//! by Bob Colbert's `makewav`.

use crate::error::{Result, SuperchargeError};
use serde::Serialize;

/// Longest fixed-duration run (start tone, calibration, trailer) accepted.
pub const MAX_RUN_SECONDS: f64 = 60.0;

/// A single tone: the length of one sine cycle in samples and its amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneSpec {
    /// Samples per cycle.
    pub cycle_length: usize,
    /// Amplitude in `[0, 1]`.
    pub volume: f64,
}

impl ToneSpec {
    pub const fn new(cycle_length: usize, volume: f64) -> Self {
        Self { cycle_length, volume }
    }
}

/// Encoding parameters for one tape format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TapeFormat {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Deck run-up tone, not bit-significant.
    pub start_tone: ToneSpec,
    /// Tone representing a `0` bit.
    pub zero_tone: ToneSpec,
    /// Tone representing a `1` bit.
    pub one_tone: ToneSpec,

    pub start_tone_seconds: f64,
    pub header_tone_seconds: f64,
    pub end_tone_seconds: f64,

    /// Byte repeated during calibration so the loader can learn bit widths.
    pub calibration_byte: u8,
    /// Byte marking the end of calibration.
    pub sync_byte: u8,
    /// Byte repeated after the last block.
    pub trailer_byte: u8,

    /// Bank switching configuration written to the header.
    pub bank_config: u8,
    /// Multiload index; 0 for single-load games.
    pub multiload: u8,
    /// Progress bar speed written to the header (little-endian on tape).
    pub progress_speed: u16,
}

impl TapeFormat {
    /// The 4K single-load Supercharger preset.
    pub const SUPERCHARGER: TapeFormat = TapeFormat {
        sample_rate: 44100,
        start_tone: ToneSpec::new(51, 0.98),
        zero_tone: ToneSpec::new(6, 0.98),
        one_tone: ToneSpec::new(10, 0.98),
        start_tone_seconds: 0.1,
        header_tone_seconds: 0.5,
        end_tone_seconds: 0.5,
        calibration_byte: 0x55,
        sync_byte: 0x54,
        trailer_byte: 0x00,
        bank_config: 0x1d,
        multiload: 0x00,
        progress_speed: 0x01c3,
    };

    /// Encoded bytes per second: `rate / (zero + one) / 4`, in integer steps.
    pub fn bytes_per_second(&self) -> u32 {
        let cycle_pair = (self.zero_tone.cycle_length + self.one_tone.cycle_length) as u32;
        self.sample_rate / cycle_pair / 4
    }

    /// Checks that every parameter is in range, so encoding terminates and
    /// every tone has at least one sample per cycle.
    ///
    /// # Errors
    /// [`SuperchargeError::InvalidFormat`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| Err(SuperchargeError::InvalidFormat(reason));

        if self.sample_rate == 0 {
            return invalid("sample rate is zero");
        }
        for tone in [&self.start_tone, &self.zero_tone, &self.one_tone] {
            if tone.cycle_length == 0 {
                return invalid("tone cycle length is zero");
            }
            if tone.cycle_length > self.sample_rate as usize {
                return invalid("tone cycle longer than one second");
            }
            if !(0.0..=1.0).contains(&tone.volume) {
                return invalid("tone volume outside 0..=1");
            }
        }
        for seconds in [
            self.start_tone_seconds,
            self.header_tone_seconds,
            self.end_tone_seconds,
        ] {
            if !(0.0..=MAX_RUN_SECONDS).contains(&seconds) {
                return invalid("run duration outside 0..=60 s");
            }
        }
        Ok(())
    }

    /// Number of whole start tone cycles making up the run-up.
    pub fn start_tone_cycles(&self) -> usize {
        if self.start_tone.cycle_length == 0 {
            return 0;
        }
        (self.start_tone_seconds * self.sample_rate as f64 / self.start_tone.cycle_length as f64)
            .round() as usize
    }
}

impl Default for TapeFormat {
    fn default() -> Self {
        Self::SUPERCHARGER
    }
}
