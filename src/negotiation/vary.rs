//! Vary header handling for negotiated responses

use http::header::VARY;
use http::{HeaderMap, HeaderValue};

/// Returns true if the Vary values already cover Accept-Encoding
pub fn varies_on_accept_encoding(headers: &HeaderMap) -> bool {
    headers
        .get_all(VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|token| token == "*" || token.eq_ignore_ascii_case("accept-encoding"))
}

/// Adds Accept-Encoding to the Vary header unless it is already covered
pub fn add_vary_accept_encoding(headers: &mut HeaderMap) {
    if varies_on_accept_encoding(headers) {
        return;
    }
    headers.append(VARY, HeaderValue::from_static("Accept-Encoding"));
}
