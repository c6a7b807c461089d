//! WAV Container
//!
//! Buffers 8-bit PCM samples and serializes them as a canonical RIFF/WAVE
//! file. Mono samples fed through [`SampleSink`] are duplicated into every
//! configured channel.
//!
//! # Layout
//! ```text
//! "RIFF" <u32 size of everything after this field> "WAVE"
//! "fmt " <u32 16> <u16 format> <u16 channels> <u32 sample rate>
//!        <u32 byte rate> <u16 block align> <u16 bits per sample>
//! "data" <u32 data length> <samples...>
//! ```
//! All integers are little-endian.

use crate::error::{Result, SuperchargeError};
use crate::sink::SampleSink;
use std::io::Write;

/// WAVE format code for uncompressed PCM.
pub const FORMAT_PCM: u16 = 1;

/// Bytes preceding the sample data in a file written by [`WavWriter`].
pub const HEADER_LEN: usize = 44;

const FMT_CHUNK_LEN: u32 = 16;

/// Format of a WAV file, as found in its `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Length of the `data` chunk in bytes.
    pub data_len: u32,
}

impl WavSpec {
    /// Reads the header of a WAV file.
    ///
    /// Chunks other than `fmt ` and `data` are skipped. Parsing stops at the
    /// `data` chunk header.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(SuperchargeError::InvalidContainer("missing RIFF/WAVE header"));
        }

        let mut fmt: Option<&[u8]> = None;
        let mut pos = 12usize;
        while pos + 8 <= bytes.len() {
            let id = &bytes[pos..pos + 4];
            let len = read_u32(&bytes[pos + 4..pos + 8]) as usize;
            let body = pos + 8;
            if id == b"data" {
                let fmt = fmt.ok_or(SuperchargeError::InvalidContainer("data before fmt chunk"))?;
                return Ok(Self {
                    format: read_u16(&fmt[0..2]),
                    channels: read_u16(&fmt[2..4]),
                    sample_rate: read_u32(&fmt[4..8]),
                    byte_rate: read_u32(&fmt[8..12]),
                    block_align: read_u16(&fmt[12..14]),
                    bits_per_sample: read_u16(&fmt[14..16]),
                    data_len: len as u32,
                });
            }
            if id == b"fmt " {
                if len < FMT_CHUNK_LEN as usize || body + len > bytes.len() {
                    return Err(SuperchargeError::InvalidContainer("truncated fmt chunk"));
                }
                fmt = Some(&bytes[body..body + len]);
            }
            // chunks are padded to even lengths
            pos = body.saturating_add(len + (len & 1));
        }
        Err(SuperchargeError::InvalidContainer("no data chunk"))
    }
}

/// Accumulates PCM samples and writes them out as a WAV file.
#[derive(Debug, Clone)]
pub struct WavWriter {
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data: Vec<u8>,
}

impl WavWriter {
    /// 8-bit PCM writer with `channels` interleaved channels.
    ///
    /// # Panics
    /// Panics if `channels` is zero.
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        assert!(channels > 0, "a WAV file needs at least one channel");
        Self {
            channels,
            sample_rate,
            bits_per_sample: 8,
            data: Vec::new(),
        }
    }

    pub fn mono(sample_rate: u32) -> Self {
        Self::new(1, sample_rate)
    }

    /// Reserves room for `samples` more mono samples.
    pub fn reserve(&mut self, samples: usize) {
        self.data.reserve(samples * self.channels as usize);
    }

    pub fn spec(&self) -> WavSpec {
        // byte rate is rate × block align; for mono 8-bit both equal the sample rate
        let block_align = self.channels * (self.bits_per_sample / 8);
        WavSpec {
            format: FORMAT_PCM,
            channels: self.channels,
            sample_rate: self.sample_rate,
            byte_rate: self.sample_rate * block_align as u32,
            block_align,
            bits_per_sample: self.bits_per_sample,
            data_len: self.data.len() as u32,
        }
    }

    /// Interleaved sample data written so far.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of frames (one sample per channel) written so far.
    pub fn frames(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    /// Size of the serialized file.
    pub fn file_len(&self) -> usize {
        HEADER_LEN + self.data.len()
    }

    /// The 44 byte RIFF/`fmt `/`data` header for the samples written so far.
    pub fn header(&self) -> [u8; HEADER_LEN] {
        let spec = self.spec();
        let riff_len = (HEADER_LEN as u32 - 8) + spec.data_len;

        let mut header = [0u8; HEADER_LEN];
        header[0..4].copy_from_slice(b"RIFF");
        header[4..8].copy_from_slice(&riff_len.to_le_bytes());
        header[8..12].copy_from_slice(b"WAVE");

        header[12..16].copy_from_slice(b"fmt ");
        header[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        header[20..22].copy_from_slice(&spec.format.to_le_bytes());
        header[22..24].copy_from_slice(&spec.channels.to_le_bytes());
        header[24..28].copy_from_slice(&spec.sample_rate.to_le_bytes());
        header[28..32].copy_from_slice(&spec.byte_rate.to_le_bytes());
        header[32..34].copy_from_slice(&spec.block_align.to_le_bytes());
        header[34..36].copy_from_slice(&spec.bits_per_sample.to_le_bytes());

        header[36..40].copy_from_slice(b"data");
        header[40..44].copy_from_slice(&spec.data_len.to_le_bytes());
        header
    }

    /// Writes the complete file to `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        w.write_all(&self.header())?;
        w.write_all(&self.data)?;
        w.flush()?;
        Ok(())
    }

    /// Serializes the complete file into memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.file_len());
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&self.data);
        out
    }
}

impl SampleSink for WavWriter {
    fn write_samples(&mut self, samples: &[u8]) {
        if self.channels == 1 {
            self.data.extend_from_slice(samples);
            return;
        }
        for &s in samples {
            for _ in 0..self.channels {
                self.data.push(s);
            }
        }
    }
}

fn read_u16(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

fn read_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}
