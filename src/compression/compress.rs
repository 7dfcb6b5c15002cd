//! Core gzip compression and decompression functions
use std::io::{Read, Write};

use super::algorithms::CompressionPreference;
use crate::error::CompressionError;

/// Whole-buffer gzip encoder/decoder used by units
///
/// Implementations must treat an empty input as an empty output.
pub trait GzipCodec {
    /// Gzip `data` at the level selected by `preference`
    fn encode(
        &self,
        data: &[u8],
        preference: CompressionPreference,
    ) -> Result<Vec<u8>, CompressionError>;

    /// Inflate a complete gzip stream
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;
}

/// flate2-backed codec with a cap on inflated size
///
/// The cap applies to both directions: input larger than the cap is refused
/// by `encode`, so anything this codec compressed it can also inflate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flate2Codec {
    max_decompressed_size: usize,
}

impl Flate2Codec {
    pub fn new(max_decompressed_size: usize) -> Self {
        Self {
            max_decompressed_size,
        }
    }

    /// Codec without a size cap
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    pub fn max_decompressed_size(&self) -> usize {
        self.max_decompressed_size
    }
}

impl Default for Flate2Codec {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl GzipCodec for Flate2Codec {
    fn encode(
        &self,
        data: &[u8],
        preference: CompressionPreference,
    ) -> Result<Vec<u8>, CompressionError> {
        if data.len() > self.max_decompressed_size {
            return Err(CompressionError::Encode(format!(
                "payload of {} bytes exceeds maximum decompressed size {}",
                data.len(),
                self.max_decompressed_size
            )));
        }
        compress_gzip(data, preference)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        decompress_gzip(data, self.max_decompressed_size)
    }
}

/// Compress data using gzip
///
/// # Arguments
/// * `data` - Input data to compress
/// * `preference` - Selects the fastest or the best flate2 level
///
/// # Returns
/// * `Ok(Vec<u8>)` - Gzip stream (empty for empty input)
/// * `Err(CompressionError::Encode)` - The encoder failed
pub fn compress_gzip(
    data: &[u8],
    preference: CompressionPreference,
) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut encoder = flate2::write::GzEncoder::new(
        Vec::with_capacity(data.len() / 2),
        preference.to_flate2(),
    );
    encoder
        .write_all(data)
        .map_err(|e| CompressionError::Encode(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CompressionError::Encode(e.to_string()))
}

/// Decompress gzip data
///
/// # Arguments
/// * `data` - Complete gzip stream
/// * `max_size` - Maximum allowed decompressed size in bytes
///
/// # Returns
/// * `Ok(Vec<u8>)` - Inflated data (empty for empty input)
/// * `Err(CompressionError::Decode)` - Corrupt stream or size limit exceeded
pub fn decompress_gzip(data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let decoder = flate2::read::GzDecoder::new(data);
    let mut reader = decoder.take((max_size as u64).saturating_add(1));
    let mut result = Vec::new();
    reader
        .read_to_end(&mut result)
        .map_err(|e| CompressionError::Decode(e.to_string()))?;

    if result.len() > max_size {
        return Err(CompressionError::Decode(format!(
            "decompressed size exceeds maximum allowed size {}",
            max_size
        )));
    }
    Ok(result)
}
