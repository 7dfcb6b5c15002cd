// End-to-end negotiation tests: unit + negotiator + range responder

use bytes::Bytes;
use gzunit::negotiation::accepts_gzip;
use gzunit::{
    CompressibleUnit, ContentNegotiator, NegotiationConfig,
    NegotiationOutcome, StaticRangeResponder,
};
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, VARY};
use http::request::Parts;
use http::{Method, Request, StatusCode};
use rstest::rstest;
use std::io::Read;

const THRESHOLD: usize = 256;

fn request(method: Method, headers: &[(&str, &str)]) -> Parts {
    let mut builder = Request::builder().method(method).uri("/app.js");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(()).unwrap().into_parts().0
}

fn script(size: usize) -> Vec<u8> {
    b"console.log('hello');\n"
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::GzDecoder::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn negotiator() -> ContentNegotiator {
    ContentNegotiator::new(NegotiationConfig::with_threshold(THRESHOLD))
}

#[rstest]
#[case(THRESHOLD - 1, false)]
#[case(THRESHOLD, false)]
#[case(THRESHOLD + 1, true)]
fn test_threshold_boundary(#[case] size: usize, #[case] compressed: bool) {
    let negotiator = negotiator();
    let mut unit = negotiator.new_unit(script(size));
    let served = negotiator
        .serve(
            &mut unit,
            &request(Method::GET, &[]),
            "app.js",
            true,
            &StaticRangeResponder,
        )
        .unwrap();

    assert_eq!(unit.is_compressed(), compressed);
    assert_eq!(
        served.response.headers().contains_key(CONTENT_ENCODING),
        compressed
    );
    if compressed {
        assert_eq!(gunzip(served.response.body()), script(size));
    } else {
        assert_eq!(served.response.body().as_ref(), script(size).as_slice());
    }
}

#[test]
fn test_one_unit_serves_mixed_clients() {
    let negotiator = negotiator();
    let responder = StaticRangeResponder::new();
    let data = script(THRESHOLD * 8);
    let mut unit = negotiator.new_unit(data.clone());

    let gzip_client = request(Method::GET, &[("accept-encoding", "gzip, deflate")]);
    let plain_client = request(Method::GET, &[]);

    let first = negotiator
        .serve_request(&mut unit, &gzip_client, "app.js", &responder)
        .unwrap();
    assert_eq!(first.outcome, NegotiationOutcome::CompressedOnDemand);
    assert_eq!(first.response.headers()[CONTENT_ENCODING], "gzip");
    assert_eq!(first.response.headers()[VARY], "Accept-Encoding");
    assert_eq!(
        first.response.headers()[CONTENT_LENGTH],
        unit.length_string().as_str()
    );

    // Second gzip client reuses the stored gzip bytes
    let second = negotiator
        .serve_request(&mut unit, &gzip_client, "app.js", &responder)
        .unwrap();
    assert_eq!(second.outcome, NegotiationOutcome::PassThrough);
    assert_eq!(second.response.body(), first.response.body());

    let third = negotiator
        .serve_request(&mut unit, &plain_client, "app.js", &responder)
        .unwrap();
    assert_eq!(third.outcome, NegotiationOutcome::Decompressed);
    assert!(!third.response.headers().contains_key(CONTENT_ENCODING));
    assert_eq!(third.response.body().as_ref(), data.as_slice());
    assert!(!unit.is_compressed());
}

#[test]
fn test_range_applies_to_wire_bytes() {
    let negotiator = negotiator();
    let mut unit = negotiator.new_unit(script(THRESHOLD * 4));
    let served = negotiator
        .serve(
            &mut unit,
            &request(Method::GET, &[("range", "bytes=0-9")]),
            "app.js",
            true,
            &StaticRangeResponder,
        )
        .unwrap();

    assert_eq!(served.response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(served.response.body().as_ref(), &unit.raw()[..10]);
    assert_eq!(
        served.response.headers()[CONTENT_RANGE],
        format!("bytes 0-9/{}", unit.len()).as_str()
    );
    assert_eq!(served.response.headers()[CONTENT_ENCODING], "gzip");
}

#[test]
fn test_content_type_follows_name() {
    let negotiator = negotiator();
    let mut unit = negotiator.new_unit(Bytes::from_static(b"body { color: red }"));
    let served = negotiator
        .serve(
            &mut unit,
            &request(Method::GET, &[]),
            "style.css",
            false,
            &StaticRangeResponder,
        )
        .unwrap();
    assert_eq!(served.response.headers()[CONTENT_TYPE], "text/css");
}

#[test]
fn test_empty_unit_is_served_empty() {
    let negotiator = negotiator();
    let mut unit = CompressibleUnit::empty().clone();
    let served = negotiator
        .serve(
            &mut unit,
            &request(Method::GET, &[]),
            "empty.txt",
            true,
            &StaticRangeResponder,
        )
        .unwrap();
    assert_eq!(served.outcome, NegotiationOutcome::SmallIdentity);
    assert_eq!(served.response.status(), StatusCode::OK);
    assert!(served.response.body().is_empty());
}

#[test]
fn test_accepts_gzip_helper() {
    assert!(accepts_gzip(Some("gzip;q=1.0, identity; q=0.5, *;q=0")));
    assert!(!accepts_gzip(Some("identity")));
    assert!(!accepts_gzip(None));
}
