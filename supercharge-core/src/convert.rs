//! ROM to WAV conversion.
//!
//! Glues the frame builder to the WAV container. Each call owns its buffers,
//! so independent conversions can run on separate threads without any
//! coordination.

use crate::error::Result;
use crate::format::TapeFormat;
use crate::frame::TapeFrameBuilder;
use crate::report::TapeReport;
use crate::rom::Rom;
use crate::wav::WavWriter;
use std::io::Write;

/// A finished conversion: the WAV file and the diagnostics gathered while
/// encoding it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub wav: Vec<u8>,
    pub report: TapeReport,
}

/// Converts `rom` with the Supercharger preset.
pub fn convert(rom: &Rom) -> Conversion {
    let (wav, report) = encode(rom, &TapeFrameBuilder::supercharger());
    Conversion {
        wav: wav.to_bytes(),
        report,
    }
}

/// Converts `rom` with an explicit format.
///
/// # Errors
/// [`SuperchargeError::InvalidFormat`](crate::SuperchargeError::InvalidFormat)
/// if `format` is out of range.
pub fn convert_with(rom: &Rom, format: &TapeFormat) -> Result<Conversion> {
    let (wav, report) = encode(rom, &TapeFrameBuilder::new(format)?);
    Ok(Conversion {
        wav: wav.to_bytes(),
        report,
    })
}

/// Converts `rom` and writes the WAV file to `w`.
///
/// # Errors
/// Rejects an out-of-range `format` before anything is written, and
/// propagates any I/O error from `w`.
pub fn convert_into<W: Write>(rom: &Rom, format: &TapeFormat, w: W) -> Result<TapeReport> {
    let (wav, report) = encode(rom, &TapeFrameBuilder::new(format)?);
    wav.write_to(w)?;
    Ok(report)
}

fn encode(rom: &Rom, builder: &TapeFrameBuilder<'_>) -> (WavWriter, TapeReport) {
    let format = builder.format();
    log::debug!("encoding {} blocks at {} Hz", rom.block_count(), format.sample_rate);
    let mut wav = WavWriter::mono(format.sample_rate);
    let report = builder.build(rom, &mut wav);
    log::debug!(
        "encoded {} samples ({:.2} s)",
        report.sample_count,
        report.sample_count as f64 / format.sample_rate as f64
    );
    (wav, report)
}
