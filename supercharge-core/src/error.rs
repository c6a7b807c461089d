//! Error Handling
//!
//! Error types for the tape encoder using `thiserror`.
//!
//! Encoding fails when a ROM image of the wrong size is handed in, when a
//! custom [`TapeFormat`](crate::TapeFormat) is out of range, or when the
//! caller-supplied output sink fails. Container parsing (used to inspect
//! finished WAV files) adds `InvalidContainer`.

use thiserror::Error;

/// Encoder error types.
#[derive(Error, Debug)]
pub enum SuperchargeError {
    /// ROM size not supported by the Supercharger.
    ///
    /// Only 4K images load in a single pass; anything else is rejected before
    /// encoding starts.
    #[error("unsupported size ({0})")]
    UnsupportedSize(usize),

    /// Tape parameters that cannot produce a finite, loadable tape.
    #[error("invalid tape format: {0}")]
    InvalidFormat(&'static str),

    /// A byte stream that is not a PCM WAV container this crate can read.
    #[error("invalid container: {0}")]
    InvalidContainer(&'static str),

    /// Failure reported by the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuperchargeError {
    /// Returns `true` when the error rejects a ROM by its size.
    pub fn is_unsupported_size(&self) -> bool {
        matches!(self, Self::UnsupportedSize(..))
    }
}

pub type Result<T> = std::result::Result<T, SuperchargeError>;
