//! ROM images.
//!
//! A [`Rom`] can only be constructed from exactly [`ROM_SIZE`] bytes, so
//! everything downstream can index the image without further checks.

use crate::error::{Result, SuperchargeError};

/// The only image size the Supercharger loads in one pass.
pub const ROM_SIZE: usize = 4096;

/// Size of one tape data block.
pub const BLOCK_SIZE: usize = 256;

/// A validated 4K game image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    data: Box<[u8]>,
}

impl Rom {
    /// Validates `data` and wraps it.
    ///
    /// # Errors
    /// [`SuperchargeError::UnsupportedSize`] if `data` is not exactly 4096 bytes.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        validate(&data)?;
        Ok(Self { data: data.into_boxed_slice() })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of 256 byte blocks on tape.
    pub fn block_count(&self) -> usize {
        self.data.len() / BLOCK_SIZE
    }

    /// Execution start address, stored little-endian in the reset vector
    /// 4 bytes before the end of the image.
    pub fn start_address(&self) -> u16 {
        let len = self.data.len();
        u16::from_le_bytes([self.data[len - 4], self.data[len - 3]])
    }

    /// Iterates over the image in 256 byte blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(BLOCK_SIZE)
    }
}

/// Checks that `data` is a ROM the Supercharger can load.
pub fn validate(data: &[u8]) -> Result<()> {
    if data.len() != ROM_SIZE {
        return Err(SuperchargeError::UnsupportedSize(data.len()));
    }
    Ok(())
}

impl TryFrom<Vec<u8>> for Rom {
    type Error = SuperchargeError;

    fn try_from(data: Vec<u8>) -> Result<Self> {
        Self::new(data)
    }
}

impl TryFrom<&[u8]> for Rom {
    type Error = SuperchargeError;

    fn try_from(data: &[u8]) -> Result<Self> {
        Self::new(data.to_vec())
    }
}

impl AsRef<[u8]> for Rom {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
