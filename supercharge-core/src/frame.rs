//! Tape Frame Builder
//!
//! Lays out a complete Supercharger tape:
//!
//! 1. **Start tone**: a low run-up tone the decoder ignores
//! 2. **Calibration**: a run of `0x55` for bit width detection, then sync byte `0x54`
//! 3. **Header**: 8 bytes describing the load (see [`HeaderRecord`])
//! 4. **Data blocks**: page number, checksum and 256 bytes per block
//! 5. **Trailer**: a run of `0x00` protecting the last block
//!
//! Checksums are 8-bit and wrap; a checksummed packet always sums to `0x55`.
//! See `docs/TAPE_FORMAT.md` for the full layout.

use crate::encoder::BitEncoder;
use crate::error::Result;
use crate::format::TapeFormat;
use crate::report::{TapeEvent, TapeReport};
use crate::rom::{Rom, BLOCK_SIZE};
use crate::sink::SampleSink;
use crate::tone::Waveform;

/// Target sum of every checksummed packet.
pub const CHECKSUM_SEED: u8 = 0x55;

/// Returns the byte that brings the sum of `bytes` to [`CHECKSUM_SEED`],
/// ignoring carries.
pub fn checksum<'a>(bytes: impl IntoIterator<Item = &'a u8>) -> u8 {
    bytes
        .into_iter()
        .fold(CHECKSUM_SEED, |sum, &b| sum.wrapping_sub(b))
}

/// Page number of block `block`: the address page times four plus the bank.
///
/// The wrap subtracts `0x1f` only once, which covers the 16 blocks of a 4K
/// image.
pub fn page_number(block: u8) -> u8 {
    let page = block.wrapping_mul(4).wrapping_add(1);
    if page > 0x1f {
        page - 0x1f
    } else {
        page
    }
}

/// Checksum of a data block together with its page number.
pub fn block_checksum(page: u8, data: &[u8]) -> u8 {
    checksum(data).wrapping_sub(page)
}

/// The 8 byte control header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRecord {
    pub address_low: u8,
    pub address_high: u8,
    pub bank_config: u8,
    pub block_count: u8,
    pub checksum: u8,
    pub multiload: u8,
    pub progress_speed_low: u8,
    pub progress_speed_high: u8,
}

impl HeaderRecord {
    pub const LEN: usize = 8;

    pub fn new(rom: &Rom, format: &TapeFormat) -> Self {
        let [address_low, address_high] = rom.start_address().to_le_bytes();
        let [progress_speed_low, progress_speed_high] = format.progress_speed.to_le_bytes();
        let mut header = Self {
            address_low,
            address_high,
            bank_config: format.bank_config,
            block_count: rom.block_count() as u8,
            checksum: 0,
            multiload: format.multiload,
            progress_speed_low,
            progress_speed_high,
        };
        header.checksum = checksum(&header.to_bytes());
        header
    }

    /// Header bytes in tape order.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        [
            self.address_low,
            self.address_high,
            self.bank_config,
            self.block_count,
            self.checksum,
            self.multiload,
            self.progress_speed_low,
            self.progress_speed_high,
        ]
    }

    pub fn address(&self) -> u16 {
        u16::from_le_bytes([self.address_low, self.address_high])
    }

    pub fn progress_speed(&self) -> u16 {
        u16::from_le_bytes([self.progress_speed_low, self.progress_speed_high])
    }
}

/// One 256 byte block of the image as it goes on tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBlock<'a> {
    pub index: u8,
    pub page: u8,
    pub checksum: u8,
    pub data: &'a [u8],
}

impl<'a> DataBlock<'a> {
    pub fn new(index: u8, data: &'a [u8]) -> Self {
        debug_assert_eq!(data.len(), BLOCK_SIZE);
        let page = page_number(index);
        Self {
            index,
            page,
            checksum: block_checksum(page, data),
            data,
        }
    }
}

/// All data blocks of `rom`, in tape order.
pub fn data_blocks(rom: &Rom) -> impl Iterator<Item = DataBlock<'_>> {
    rom.blocks()
        .enumerate()
        .map(|(index, data)| DataBlock::new(index as u8, data))
}

/// Writes complete tapes for one [`TapeFormat`].
///
/// The start tone table is built once and reused for every tape.
#[derive(Debug, Clone)]
pub struct TapeFrameBuilder<'f> {
    format: &'f TapeFormat,
    start_tone: Waveform,
}

impl<'f> TapeFrameBuilder<'f> {
    /// Creates a builder for `format`.
    ///
    /// # Errors
    /// [`SuperchargeError::InvalidFormat`](crate::SuperchargeError::InvalidFormat)
    /// if `format` fails [`TapeFormat::validate`].
    pub fn new(format: &'f TapeFormat) -> Result<Self> {
        format.validate()?;
        Ok(Self::from_valid(format))
    }

    fn from_valid(format: &'f TapeFormat) -> Self {
        Self {
            format,
            start_tone: format.start_tone.synthesize(),
        }
    }

    pub fn format(&self) -> &TapeFormat {
        self.format
    }

    /// Encodes `rom` into `sink` and reports what was written.
    pub fn build<S: SampleSink>(&self, rom: &Rom, sink: S) -> TapeReport {
        let mut sink = CountSamples { inner: sink, samples: 0 };
        let mut report = TapeReport::default();
        let format = self.format;

        for _ in 0..format.start_tone_cycles() {
            sink.write_samples(&self.start_tone);
        }
        log::debug!("start tone: {} samples", sink.samples);

        let mut enc = BitEncoder::from_format(format, &mut sink);

        let calibration = enc.write_byte_duration(format.calibration_byte, format.header_tone_seconds);
        enc.write_byte(format.sync_byte);
        log::debug!("calibration: {} bytes of {:02x}", calibration, format.calibration_byte);

        let header = HeaderRecord::new(rom, format);
        report.record(TapeEvent::Address { address: header.address() });
        report.record(TapeEvent::BankConfig { bank_config: header.bank_config });
        report.record(TapeEvent::BlockCount { block_count: header.block_count });
        report.record(TapeEvent::Multiload { multiload: header.multiload });
        report.record(TapeEvent::LoadSpeed { speed: header.progress_speed() });
        report.record(TapeEvent::HeaderChecksum { checksum: header.checksum });
        enc.write_bytes(&header.to_bytes());

        for block in data_blocks(rom) {
            report.record(TapeEvent::BlockChecksum {
                block: block.index,
                page: block.page,
                checksum: block.checksum,
            });
            enc.write_byte(block.page);
            enc.write_byte(block.checksum);
            enc.write_bytes(block.data);
        }

        let trailer = enc.write_byte_duration(format.trailer_byte, format.end_tone_seconds);
        log::debug!("trailer: {} bytes of {:02x}", trailer, format.trailer_byte);

        report.sample_count = sink.samples;
        report
    }
}

impl TapeFrameBuilder<'static> {
    /// Builder for the [`TapeFormat::SUPERCHARGER`] preset.
    pub fn supercharger() -> Self {
        Self::from_valid(&TapeFormat::SUPERCHARGER)
    }
}

/// Forwards samples while keeping a running total.
struct CountSamples<S> {
    inner: S,
    samples: usize,
}

impl<S: SampleSink> SampleSink for CountSamples<S> {
    fn write_samples(&mut self, samples: &[u8]) {
        self.samples += samples.len();
        self.inner.write_samples(samples);
    }
}
