//! Diagnostic events.
//!
//! The frame builder records what it wrote to tape as a list of
//! [`TapeEvent`]s. Nothing here feeds back into encoding; callers print the
//! events, serialize them, or drop them.

use serde::Serialize;
use std::fmt;

/// A single diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TapeEvent {
    Address { address: u16 },
    BankConfig { bank_config: u8 },
    BlockCount { block_count: u8 },
    Multiload { multiload: u8 },
    LoadSpeed { speed: u16 },
    HeaderChecksum { checksum: u8 },
    BlockChecksum { block: u8, page: u8, checksum: u8 },
}

impl fmt::Display for TapeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TapeEvent::Address { address } => write!(f, "address: {:04x}", address),
            TapeEvent::BankConfig { bank_config } => write!(f, "bank config: {:02x}", bank_config),
            TapeEvent::BlockCount { block_count } => write!(f, "block count: {:02x}", block_count),
            TapeEvent::Multiload { multiload } => write!(f, "multiload: {:02x}", multiload),
            TapeEvent::LoadSpeed { speed } => write!(f, "load speed: {:04x}", speed),
            TapeEvent::HeaderChecksum { checksum } => write!(f, "checksum: {:02x}", checksum),
            TapeEvent::BlockChecksum { block, checksum, .. } => {
                write!(f, "block {}: checksum {:02x}", block, checksum)
            }
        }
    }
}

/// Everything the frame builder has to say about one tape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TapeReport {
    /// Mono samples written, before any channel replication.
    pub sample_count: usize,
    pub events: Vec<TapeEvent>,
}

impl TapeReport {
    pub(crate) fn record(&mut self, event: TapeEvent) {
        log::debug!("{}", event);
        self.events.push(event);
    }

    /// Human readable diagnostic lines, one per event.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(|e| e.to_string())
    }

    /// Checksums of the data blocks in tape order.
    pub fn block_checksums(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                TapeEvent::BlockChecksum { checksum, .. } => Some(checksum),
                _ => None,
            })
            .collect()
    }
}
