//! In-memory range-aware responder
//!
//! Serves a byte buffer the way a static file server does:
//! - `Content-Type` guessed from the response name
//! - single `Range: bytes=...` requests answered with 206 / 416
//! - `If-Modified-Since` answered with 304 when a modification time is known
//! - HEAD answered with headers only

use bytes::Bytes;
use http::header::{
    ACCEPT_RANGES, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE,
    IF_MODIFIED_SINCE, LAST_MODIFIED, RANGE,
};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Method, Response, StatusCode};
use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use super::RangeResponder;

/// Represents a single byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Start byte (inclusive), None for suffix ranges
    pub start: Option<u64>,
    /// End byte (inclusive), None for open-ended ranges
    pub end: Option<u64>,
}

impl ByteRange {
    fn is_reversed(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Resolve against a content length into inclusive `(first, last)` offsets
    ///
    /// Returns None when the range does not overlap the content.
    pub fn resolve(&self, total: u64) -> Option<(u64, u64)> {
        let last = total.checked_sub(1)?;
        if self.is_reversed() {
            return None;
        }
        match (self.start, self.end) {
            (Some(start), end) if start <= last => Some((start, end.map_or(last, |e| e.min(last)))),
            (None, Some(suffix)) if suffix > 0 => Some((total - suffix.min(total), last)),
            _ => None,
        }
    }
}

/// Represents a parsed Range header
#[derive(Debug, Clone, PartialEq)]
pub struct RangeHeader {
    /// Unit (typically "bytes")
    pub unit: String,
    /// List of ranges
    pub ranges: Vec<ByteRange>,
}

/// Parses an HTTP Range header value
/// Supports formats like:
/// - bytes=0-1023 (single range)
/// - bytes=1000- (open-ended)
/// - bytes=-1000 (suffix)
/// - bytes=0-100,200-300 (multiple ranges)
pub fn parse_range_header(header_value: &str) -> Option<RangeHeader> {
    let (unit, ranges_str) = header_value.trim().split_once('=')?;
    let unit = unit.trim();
    if unit.is_empty() {
        return None;
    }

    let mut ranges = Vec::new();
    for range_str in ranges_str.split(',') {
        let (start_str, end_str) = range_str.trim().split_once('-')?;
        let start = parse_offset(start_str)?;
        let end = parse_offset(end_str)?;

        // Valid range must have at least start or end
        if start.is_none() && end.is_none() {
            return None;
        }
        ranges.push(ByteRange { start, end });
    }

    Some(RangeHeader {
        unit: unit.to_string(),
        ranges,
    })
}

// Outer None: malformed. Inner None: omitted.
fn parse_offset(s: &str) -> Option<Option<u64>> {
    let s = s.trim();
    if s.is_empty() {
        return Some(None);
    }
    s.parse::<u64>().ok().map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeRequest {
    /// No usable Range header: serve everything
    Full,
    Satisfiable(u64, u64),
    Unsatisfiable,
}

fn requested_range(headers: &HeaderMap, total: u64) -> RangeRequest {
    // Empty content has nothing to slice
    if total == 0 {
        return RangeRequest::Full;
    }
    let Some(parsed) = headers
        .get(RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_range_header)
    else {
        return RangeRequest::Full;
    };

    // Multipart byteranges are not produced; fall back to the full body
    if !parsed.unit.eq_ignore_ascii_case("bytes") || parsed.ranges.len() != 1 {
        return RangeRequest::Full;
    }
    let range = parsed.ranges[0];
    if range.is_reversed() {
        return RangeRequest::Full;
    }

    match range.resolve(total) {
        Some((first, last)) => RangeRequest::Satisfiable(first, last),
        None => RangeRequest::Unsatisfiable,
    }
}

fn unix_seconds(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

fn build_response(status: StatusCode, headers: HeaderMap, body: Bytes) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Stateless [`RangeResponder`] for fully buffered content
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRangeResponder;

impl StaticRangeResponder {
    pub fn new() -> Self {
        StaticRangeResponder
    }
}

impl RangeResponder for StaticRangeResponder {
    fn respond(
        &self,
        request: &Parts,
        mut headers: HeaderMap,
        name: &str,
        last_modified: Option<SystemTime>,
        content: Cursor<Bytes>,
    ) -> Response<Bytes> {
        let body = content.into_inner();
        let total = body.len() as u64;
        let is_get_or_head = matches!(request.method, Method::GET | Method::HEAD);

        if !headers.contains_key(CONTENT_TYPE) {
            let mime = mime_guess::from_path(name).first_or_octet_stream();
            if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
                headers.insert(CONTENT_TYPE, value);
            }
        }
        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));

        // The Unix epoch counts as "unknown", like an unset time
        let modified = last_modified.and_then(|t| unix_seconds(t).filter(|s| *s > 0).map(|s| (t, s)));

        if let Some((time, secs)) = modified {
            if let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(time)) {
                headers.insert(LAST_MODIFIED, value);
            }

            let since = request
                .headers
                .get(IF_MODIFIED_SINCE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| httpdate::parse_http_date(v).ok())
                .and_then(unix_seconds);
            if is_get_or_head && since.is_some_and(|since| secs <= since) {
                headers.remove(CONTENT_TYPE);
                headers.remove(CONTENT_LENGTH);
                headers.remove(CONTENT_ENCODING);
                return build_response(StatusCode::NOT_MODIFIED, headers, Bytes::new());
            }
        }

        let range = if is_get_or_head {
            requested_range(&request.headers, total)
        } else {
            RangeRequest::Full
        };

        let (status, body) = match range {
            RangeRequest::Full => (StatusCode::OK, body),
            RangeRequest::Satisfiable(first, last) => {
                let content_range = format!("bytes {}-{}/{}", first, last, total);
                if let Ok(value) = HeaderValue::from_str(&content_range) {
                    headers.insert(CONTENT_RANGE, value);
                }
                (
                    StatusCode::PARTIAL_CONTENT,
                    body.slice(first as usize..=last as usize),
                )
            }
            RangeRequest::Unsatisfiable => {
                tracing::debug!(name = name, total = total, "Range not satisfiable");
                if let Ok(value) = HeaderValue::from_str(&format!("bytes */{}", total)) {
                    headers.insert(CONTENT_RANGE, value);
                }
                headers.remove(CONTENT_ENCODING);
                (StatusCode::RANGE_NOT_SATISFIABLE, Bytes::new())
            }
        };

        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        let body = if request.method == Method::HEAD {
            Bytes::new()
        } else {
            body
        };

        build_response(status, headers, body)
    }
}
