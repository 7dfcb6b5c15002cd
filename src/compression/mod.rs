//! Gzip primitives shared by units and the negotiator
//!
//! # Module Organization
//!
//! - [`algorithms`] - Content encodings and speed/ratio presets
//! - [`compress`] - Whole-buffer gzip codec

pub mod algorithms;
pub mod compress;

pub use algorithms::{CompressionPreference, Encoding};
pub use compress::{compress_gzip, decompress_gzip, Flate2Codec, GzipCodec};
