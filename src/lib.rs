// gzunit: lazily gzipped content units with HTTP content negotiation

pub mod compression;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod negotiation;
pub mod responder;
pub mod unit;

pub use compression::{CompressionPreference, Encoding, Flate2Codec, GzipCodec};
pub use config::NegotiationConfig;
pub use error::CompressionError;
pub use negotiation::{accepts_gzip, ContentNegotiator, NegotiationOutcome, Served};
pub use responder::{RangeResponder, StaticRangeResponder};
pub use unit::{CompressibleUnit, EMPTY_UNIT};
