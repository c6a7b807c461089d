//! Supercharger tape encoder.
//!
//! Converts 4K Atari 2600 ROM images into 8-bit PCM WAV audio that the
//! Starpath Supercharger can load from a cassette deck or any audio output.
//!
//! ```no_run
//! use supercharge_core::{convert, Rom};
//!
//! let rom = Rom::new(std::fs::read("game.bin")?)?;
//! let conversion = convert(&rom);
//! for line in conversion.report.lines() {
//!     println!("{}", line);
//! }
//! std::fs::write("game.wav", &conversion.wav)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod convert;
pub mod encoder;
pub mod error;
pub mod format;
pub mod frame;
pub mod report;
pub mod rom;
pub mod sink;
pub mod tone;
pub mod wav;

pub use convert::{convert, convert_into, convert_with, Conversion};
pub use error::{Result, SuperchargeError};
pub use format::{TapeFormat, ToneSpec};
pub use report::{TapeEvent, TapeReport};
pub use rom::{Rom, BLOCK_SIZE, ROM_SIZE};
