//! Per-request Content-Encoding negotiation
//!
//! Decides whether a client receives a unit gzipped or raw, sets the matching
//! headers, and hands the bytes to a [`RangeResponder`].
//!
//! # Decision table
//!
//! | client gzip | unit state            | action                                   |
//! |-------------|-----------------------|------------------------------------------|
//! | no          | any                   | decompress in place (failure aborts)     |
//! | yes         | gzip, under threshold | serve as is with gzip headers            |
//! | yes         | over threshold        | gzip headers, compress in place          |
//! | yes         | raw, not over         | serve raw, no encoding headers           |
//!
//! The threshold is compared against the unit's *current* length, so an
//! already-gzipped unit is measured by its compressed size.

pub mod accept;
pub mod vary;

use bytes::Bytes;
use http::header::CONTENT_ENCODING;
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Response};
use std::fmt;
use std::io::Cursor;

use crate::compression::{CompressionPreference, Encoding, Flate2Codec, GzipCodec};
use crate::config::NegotiationConfig;
use crate::error::CompressionError;
use crate::responder::RangeResponder;
use crate::unit::CompressibleUnit;

pub use accept::{accepts_gzip, headers_accept_gzip};
pub use vary::add_vary_accept_encoding;

/// What a single `serve` call did with the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationOutcome {
    /// Client cannot gzip, unit was already raw
    Identity,
    /// Client cannot gzip, unit was inflated in place
    Decompressed,
    /// Unit was already gzipped and served as is
    PassThrough,
    /// Unit was over threshold and gzipped in place
    CompressedOnDemand,
    /// Client can gzip but the raw unit is at or under threshold
    SmallIdentity,
    /// Compression failed, raw bytes served with `Content-Encoding: identity`
    FellBackToIdentity,
}

impl NegotiationOutcome {
    /// Encoding of the bytes that were handed to the responder
    pub fn wire_encoding(&self) -> Encoding {
        match self {
            NegotiationOutcome::PassThrough | NegotiationOutcome::CompressedOnDemand => {
                Encoding::Gzip
            }
            _ => Encoding::Identity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationOutcome::Identity => "identity",
            NegotiationOutcome::Decompressed => "decompressed",
            NegotiationOutcome::PassThrough => "pass_through",
            NegotiationOutcome::CompressedOnDemand => "compressed_on_demand",
            NegotiationOutcome::SmallIdentity => "small_identity",
            NegotiationOutcome::FellBackToIdentity => "fell_back_to_identity",
        }
    }
}

impl fmt::Display for NegotiationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response produced by [`ContentNegotiator::serve`]
#[derive(Debug)]
pub struct Served {
    pub response: Response<Bytes>,
    pub outcome: NegotiationOutcome,
}

/// Chooses the wire representation of a unit for one response
#[derive(Debug, Clone)]
pub struct ContentNegotiator<C: GzipCodec = Flate2Codec> {
    config: NegotiationConfig,
    codec: C,
}

impl ContentNegotiator<Flate2Codec> {
    pub fn new(config: NegotiationConfig) -> Self {
        let codec = config.codec();
        Self { config, codec }
    }
}

impl Default for ContentNegotiator<Flate2Codec> {
    fn default() -> Self {
        Self::new(NegotiationConfig::default())
    }
}

impl<C: GzipCodec> ContentNegotiator<C> {
    /// Use a specific codec for every in-place conversion
    pub fn with_codec(config: NegotiationConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    pub fn threshold(&self) -> usize {
        self.config.gzip_threshold_bytes
    }

    /// New raw unit using the configured compression preference
    pub fn new_unit(&self, data: impl Into<Bytes>) -> CompressibleUnit {
        self.new_unit_with(data, self.config.compression_preference)
    }

    pub fn new_unit_with(
        &self,
        data: impl Into<Bytes>,
        preference: CompressionPreference,
    ) -> CompressibleUnit {
        CompressibleUnit::new_uncompressed(data, preference)
    }

    /// Serve a unit, deriving gzip capability from the request's Accept-Encoding
    pub fn serve_request<R: RangeResponder>(
        &self,
        unit: &mut CompressibleUnit,
        request: &Parts,
        name: &str,
        responder: &R,
    ) -> Result<Served, CompressionError> {
        let can_gzip = headers_accept_gzip(&request.headers);
        self.serve(unit, request, name, can_gzip, responder)
    }

    /// Serve a unit to a client whose gzip capability is already known
    ///
    /// # Errors
    ///
    /// Returns [`CompressionError::Decode`] when a gzipped unit cannot be
    /// inflated for a client without gzip support. The responder is not
    /// called in that case.
    pub fn serve<R: RangeResponder>(
        &self,
        unit: &mut CompressibleUnit,
        request: &Parts,
        name: &str,
        can_gzip: bool,
        responder: &R,
    ) -> Result<Served, CompressionError> {
        self.serve_with_headers(unit, request, name, can_gzip, HeaderMap::new(), responder)
    }

    /// Same as [`Self::serve`], starting from caller-provided response headers
    pub fn serve_with_headers<R: RangeResponder>(
        &self,
        unit: &mut CompressibleUnit,
        request: &Parts,
        name: &str,
        can_gzip: bool,
        mut headers: HeaderMap,
        responder: &R,
    ) -> Result<Served, CompressionError> {
        let outcome = self.negotiate(unit, name, can_gzip, &mut headers)?;

        tracing::debug!(
            name = name,
            outcome = %outcome,
            encoding = %outcome.wire_encoding(),
            length = unit.len(),
            threshold = self.threshold(),
            "Content negotiated"
        );

        let response = responder.respond(
            request,
            headers,
            name,
            None,
            Cursor::new(unit.raw().clone()),
        );
        Ok(Served { response, outcome })
    }

    /// Apply the negotiation to `unit` and `headers` without responding
    pub fn negotiate(
        &self,
        unit: &mut CompressibleUnit,
        name: &str,
        can_gzip: bool,
        headers: &mut HeaderMap,
    ) -> Result<NegotiationOutcome, CompressionError> {
        let over_threshold = unit.len() > self.threshold();

        if !can_gzip {
            let was_compressed = unit.is_compressed();
            if let Err(e) = unit.decompress_with(&self.codec) {
                tracing::error!(
                    name = name,
                    error = %e,
                    "Unable to decompress unit for client without gzip support"
                );
                return Err(e);
            }
            return Ok(if was_compressed {
                NegotiationOutcome::Decompressed
            } else {
                NegotiationOutcome::Identity
            });
        }

        if !unit.is_compressed() && !over_threshold {
            return Ok(NegotiationOutcome::SmallIdentity);
        }

        headers.insert(
            CONTENT_ENCODING,
            HeaderValue::from_static(Encoding::Gzip.to_header_value()),
        );
        add_vary_accept_encoding(headers);

        if unit.is_compressed() {
            return Ok(NegotiationOutcome::PassThrough);
        }

        match unit.compress_with(&self.codec) {
            Ok(()) => Ok(NegotiationOutcome::CompressedOnDemand),
            Err(e) => {
                tracing::error!(
                    name = name,
                    error = %e,
                    length = unit.len(),
                    "Compression failed, serving uncompressed"
                );
                headers.insert(
                    CONTENT_ENCODING,
                    HeaderValue::from_static(Encoding::Identity.to_header_value()),
                );
                Ok(NegotiationOutcome::FellBackToIdentity)
            }
        }
    }
}
