//! Byte delivery for negotiated responses
//!
//! The negotiator only decides representation and headers; a
//! [`RangeResponder`] turns the final bytes into a response, handling
//! `Range`, conditional headers and status codes on its own.

pub mod range;

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Response};
use std::io::Cursor;
use std::time::SystemTime;

pub use range::{parse_range_header, ByteRange, RangeHeader, StaticRangeResponder};

/// Range-capable content server
pub trait RangeResponder {
    /// Build the response for `content`
    ///
    /// # Arguments
    /// * `request` - Request head (method, Range and conditional headers)
    /// * `headers` - Headers already chosen by the caller, e.g. Content-Encoding
    /// * `name` - Response name used for content-type detection
    /// * `last_modified` - Modification time, `None` when not tracked
    /// * `content` - Seekable view over the exact bytes to send
    fn respond(
        &self,
        request: &Parts,
        headers: HeaderMap,
        name: &str,
        last_modified: Option<SystemTime>,
        content: Cursor<Bytes>,
    ) -> Response<Bytes>;
}
