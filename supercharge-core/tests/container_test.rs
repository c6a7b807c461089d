//! WAV container checks on complete conversions.
//!
//! Output is read back with `hound` as an independent decoder; `WavSpec` is
//! only used for the fields `hound` does not expose.

use std::io::{self, Cursor, Write};
use supercharge_core::frame::TapeFrameBuilder;
use supercharge_core::wav::{WavSpec, WavWriter, FORMAT_PCM, HEADER_LEN};
use supercharge_core::{convert, convert_into, Rom, SuperchargeError, TapeFormat, ROM_SIZE};

#[test]
fn fmt_chunk_is_independent_of_rom() {
    for fill in [0x00u8, 0x55, 0xff] {
        let rom = Rom::new(vec![fill; ROM_SIZE]).unwrap();
        let wav = convert(&rom).wav;

        let reader = hound::WavReader::new(Cursor::new(&wav)).unwrap();
        assert_eq!(
            reader.spec(),
            hound::WavSpec {
                channels: 1,
                sample_rate: 44100,
                bits_per_sample: 8,
                sample_format: hound::SampleFormat::Int,
            }
        );

        let spec = WavSpec::parse(&wav).unwrap();
        assert_eq!(spec.format, FORMAT_PCM);
        assert_eq!(spec.block_align, 1);
        assert_eq!(spec.byte_rate, 44100);
    }
}

#[test]
fn independent_reader_accepts_output() {
    let rom = Rom::new((0..ROM_SIZE).map(|i| (i * 31) as u8).collect()).unwrap();
    let conversion = convert(&rom);

    let mut reader = hound::WavReader::new(Cursor::new(&conversion.wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 8);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.len() as usize, conversion.report.sample_count);

    // 8-bit PCM is unsigned on disk and decoded around zero
    let samples: Vec<i8> = reader.samples::<i8>().map(|s| s.unwrap()).collect();
    let expected: Vec<i8> = conversion.wav[HEADER_LEN..]
        .iter()
        .map(|&b| b.wrapping_sub(128) as i8)
        .collect();
    assert_eq!(samples, expected);
}

#[test]
fn independent_reader_accepts_stereo() {
    let mut stereo = WavWriter::new(2, 44100);
    let rom = Rom::new(vec![0x0f; ROM_SIZE]).unwrap();
    let report = TapeFrameBuilder::supercharger().build(&rom, &mut stereo);

    let bytes = stereo.to_bytes();
    let reader = hound::WavReader::new(Cursor::new(&bytes)).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.duration() as usize, report.sample_count);
    assert_eq!(reader.len() as usize, 2 * report.sample_count);
}

#[test]
fn file_length_is_header_plus_samples() {
    let rom = Rom::new((0..ROM_SIZE).map(|i| (i >> 4) as u8).collect()).unwrap();
    let conversion = convert(&rom);
    assert_eq!(conversion.wav.len(), HEADER_LEN + conversion.report.sample_count);

    let riff_len = u32::from_le_bytes(conversion.wav[4..8].try_into().unwrap()) as usize;
    assert_eq!(riff_len, conversion.wav.len() - 8);
}

#[test]
fn stereo_writer_duplicates_tape() {
    let rom = Rom::new(vec![0x3c; ROM_SIZE]).unwrap();
    let format = TapeFormat::SUPERCHARGER;

    let mut stereo = WavWriter::new(2, format.sample_rate);
    let report = TapeFrameBuilder::new(&format)
        .unwrap()
        .build(&rom, &mut stereo);
    let mono = convert(&rom);

    assert_eq!(stereo.frames(), report.sample_count);
    let left: Vec<u8> = stereo.data().iter().step_by(2).copied().collect();
    assert_eq!(left, &mono.wav[HEADER_LEN..]);
    let spec = WavSpec::parse(&stereo.to_bytes()).unwrap();
    assert_eq!(spec.block_align, 2);
    assert_eq!(spec.byte_rate, 2 * 44100);
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_propagate() {
    let rom = Rom::new(vec![0; ROM_SIZE]).unwrap();
    let err = convert_into(&rom, &TapeFormat::SUPERCHARGER, FailingWriter).unwrap_err();
    assert!(matches!(err, SuperchargeError::Io(_)));
}
