//! Archive writing options.

use crate::error::{PackError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use zip::CompressionMethod;

/// Options applied to every entry written into the package.
///
/// The default is Deflate compression and a fixed 1980-01-01 00:00:00
/// timestamp, which keeps archives byte-identical across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteOptions {
    compression: CompressionMethod,
    timestamp: zip::DateTime,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
            timestamp: zip::DateTime::default(),
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store entries uncompressed.
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    pub fn compression(mut self, method: CompressionMethod) -> Self {
        self.compression = method;
        self
    }

    /// Stamp every entry with `timestamp` instead of the fixed default.
    ///
    /// # Errors
    ///
    /// ZIP timestamps only cover 1980 through 2107; anything outside that range
    /// yields [`PackError::InvalidTimestamp`].
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Result<Self> {
        let year = u16::try_from(timestamp.year())
            .map_err(|_| PackError::InvalidTimestamp(timestamp.to_string()))?;
        self.timestamp = zip::DateTime::from_date_and_time(
            year,
            timestamp.month() as u8,
            timestamp.day() as u8,
            timestamp.hour() as u8,
            timestamp.minute() as u8,
            timestamp.second() as u8,
        )
        .map_err(|_| PackError::InvalidTimestamp(timestamp.to_string()))?;
        Ok(self)
    }

    #[inline]
    pub fn compression_method(&self) -> CompressionMethod {
        self.compression
    }

    #[inline]
    pub fn timestamp(&self) -> zip::DateTime {
        self.timestamp
    }
}
