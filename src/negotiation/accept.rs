/// Accept-Encoding header parsing
use http::header::ACCEPT_ENCODING;
use http::HeaderMap;

/// Represents a single encoding in Accept-Encoding header with quality value
#[derive(Debug, Clone, PartialEq)]
struct EncodingPreference {
    encoding: String,
    quality: f32,
}

impl EncodingPreference {
    /// Parse a single encoding preference (e.g., "gzip;q=0.8")
    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut parts = s.split(';');
        let encoding = parts.next()?.trim().to_lowercase();

        // A malformed q-value makes the whole entry unacceptable
        let mut quality = 1.0;
        for param in parts {
            let param = param.trim();
            if let Some(q_value) = param
                .strip_prefix("q=")
                .or_else(|| param.strip_prefix("Q="))
            {
                quality = q_value.trim().parse::<f32>().unwrap_or(0.0);
            }
        }

        Some(EncodingPreference { encoding, quality })
    }

    fn is_gzip(&self) -> bool {
        self.encoding == "gzip" || self.encoding == "x-gzip"
    }
}

/// Decide whether a client accepts gzip from its Accept-Encoding value
///
/// # Rules
/// 1. Absent header: no gzip
/// 2. An explicit `gzip` / `x-gzip` entry decides by its q-value
/// 3. Otherwise a `*` entry with q > 0 accepts gzip
pub fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
    let Some(accept_encoding) = accept_encoding else {
        return false;
    };

    let preferences: Vec<EncodingPreference> = accept_encoding
        .split(',')
        .filter_map(EncodingPreference::parse)
        .collect();

    if let Some(gzip) = preferences.iter().find(|p| p.is_gzip()) {
        return gzip.quality > 0.0;
    }

    preferences
        .iter()
        .any(|p| p.encoding == "*" && p.quality > 0.0)
}

/// Same as [`accepts_gzip`], reading every Accept-Encoding header line
pub fn headers_accept_gzip(headers: &HeaderMap) -> bool {
    let values: Vec<&str> = headers
        .get_all(ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if values.is_empty() {
        return false;
    }
    let joined = values.join(",");
    accepts_gzip(Some(joined.as_str()))
}
