//! Dual-representation content unit
//!
//! A [`CompressibleUnit`] owns one payload that is either raw or gzipped and
//! converts between the two on demand:
//! - `*_view` accessors produce the other representation without touching
//!   the stored state
//! - [`CompressibleUnit::compress`] / [`CompressibleUnit::decompress`] switch
//!   the stored representation in place and are idempotent
//!
//! Mutation needs `&mut self`; callers sharing a unit across requests are
//! expected to hand it off through their own lock or cache.
//!
//! The codec-less methods use an unbounded [`Flate2Codec`]. A capped codec
//! refuses to compress a payload larger than its cap, so a unit never ends up
//! gzipped in a form that the same codec cannot inflate.

use bytes::Bytes;
use std::fmt;
use std::path::Path;

use crate::compression::{CompressionPreference, Encoding, Flate2Codec, GzipCodec};
use crate::error::CompressionError;

/// Shared zero-value placeholder
///
/// Only reachable through a shared reference, so it can never be mutated.
pub static EMPTY_UNIT: CompressibleUnit = CompressibleUnit {
    payload: Bytes::new(),
    encoding: Encoding::Identity,
    preference: CompressionPreference::Speed,
};

/// Byte payload that is held either raw or gzip-compressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressibleUnit {
    payload: Bytes,
    encoding: Encoding,
    preference: CompressionPreference,
}

impl CompressibleUnit {
    /// Create a unit holding raw (uncompressed) bytes
    pub fn new_uncompressed(data: impl Into<Bytes>, preference: CompressionPreference) -> Self {
        Self {
            payload: data.into(),
            encoding: Encoding::Identity,
            preference,
        }
    }

    /// Create a unit from bytes that are already a gzip stream
    pub(crate) fn from_gzip(data: impl Into<Bytes>, preference: CompressionPreference) -> Self {
        Self {
            payload: data.into(),
            encoding: Encoding::Gzip,
            preference,
        }
    }

    /// The shared empty unit
    pub fn empty() -> &'static CompressibleUnit {
        &EMPTY_UNIT
    }

    /// Read a whole file into an uncompressed unit
    ///
    /// Read failures are logged and yield an empty unit.
    pub fn from_file_or_empty<P: AsRef<Path>>(path: P, preference: CompressionPreference) -> Self {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(data) => Self::new_uncompressed(data, preference),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read file, using empty unit"
                );
                Self::new_uncompressed(Bytes::new(), preference)
            }
        }
    }

    /// Raw uncompressed bytes, inflating a fresh copy if needed
    pub fn uncompressed_view(&self) -> Result<Bytes, CompressionError> {
        self.uncompressed_view_with(&Flate2Codec::default())
    }

    pub fn uncompressed_view_with<C: GzipCodec>(
        &self,
        codec: &C,
    ) -> Result<Bytes, CompressionError> {
        match self.encoding {
            Encoding::Identity => Ok(self.payload.clone()),
            Encoding::Gzip => inflate(codec, &self.payload),
        }
    }

    /// Best-effort variant of [`Self::uncompressed_view`]
    ///
    /// Decode failures are logged and an empty buffer is returned.
    pub fn uncompressed_or_empty(&self) -> Bytes {
        match self.uncompressed_view() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    stored_length = self.len(),
                    "Failed to decompress unit, returning empty payload"
                );
                Bytes::new()
            }
        }
    }

    /// Gzipped bytes, compressing a fresh copy if needed
    pub fn compressed_view(&self) -> Result<Bytes, CompressionError> {
        self.compressed_view_with(&Flate2Codec::default())
    }

    pub fn compressed_view_with<C: GzipCodec>(&self, codec: &C) -> Result<Bytes, CompressionError> {
        match self.encoding {
            Encoding::Gzip => Ok(self.payload.clone()),
            Encoding::Identity => deflate(codec, &self.payload, self.preference),
        }
    }

    /// Switch the stored payload to gzip
    ///
    /// On error the unit is left untouched.
    pub fn compress(&mut self) -> Result<(), CompressionError> {
        self.compress_with(&Flate2Codec::default())
    }

    pub fn compress_with<C: GzipCodec>(&mut self, codec: &C) -> Result<(), CompressionError> {
        if self.encoding == Encoding::Gzip {
            return Ok(());
        }
        let compressed = deflate(codec, &self.payload, self.preference)?;
        self.payload = compressed;
        self.encoding = Encoding::Gzip;
        Ok(())
    }

    /// Switch the stored payload to raw bytes
    pub fn decompress(&mut self) -> Result<(), CompressionError> {
        self.decompress_with(&Flate2Codec::default())
    }

    pub fn decompress_with<C: GzipCodec>(&mut self, codec: &C) -> Result<(), CompressionError> {
        if self.encoding == Encoding::Identity {
            return Ok(());
        }
        let inflated = inflate(codec, &self.payload)?;
        self.payload = inflated;
        self.encoding = Encoding::Identity;
        Ok(())
    }

    pub fn is_compressed(&self) -> bool {
        self.encoding == Encoding::Gzip
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn preference(&self) -> CompressionPreference {
        self.preference
    }

    /// Length of the payload in its current representation
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn has_data(&self) -> bool {
        !self.is_empty()
    }

    /// Current length in decimal, as used for Content-Length
    pub fn length_string(&self) -> String {
        self.len().to_string()
    }

    /// Stored bytes in whatever representation the unit is in
    pub fn raw(&self) -> &Bytes {
        &self.payload
    }
}

impl Default for CompressibleUnit {
    fn default() -> Self {
        EMPTY_UNIT.clone()
    }
}

impl fmt::Display for CompressibleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.uncompressed_or_empty()))
    }
}

// Empty payloads never reach the codec.
fn deflate<C: GzipCodec>(
    codec: &C,
    data: &Bytes,
    preference: CompressionPreference,
) -> Result<Bytes, CompressionError> {
    if data.is_empty() {
        return Ok(Bytes::new());
    }
    codec.encode(data, preference).map(Bytes::from)
}

fn inflate<C: GzipCodec>(codec: &C, data: &Bytes) -> Result<Bytes, CompressionError> {
    if data.is_empty() {
        return Ok(Bytes::new());
    }
    codec.decode(data).map(Bytes::from)
}
