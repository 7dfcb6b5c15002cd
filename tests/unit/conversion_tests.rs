// Conversion tests for CompressibleUnit through the public API

use bytes::Bytes;
use gzunit::{CompressibleUnit, CompressionError, CompressionPreference, EMPTY_UNIT};
use rstest::rstest;

fn payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| ((i * 7) % 251) as u8).collect()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(17)]
#[case(4096)]
#[case(1_000_000)]
fn test_round_trip_preserves_bytes_and_length(#[case] size: usize) {
    // Decompress(Compress(unit)) yields the original bytes and length
    let data = payload(size);
    for preference in [CompressionPreference::Speed, CompressionPreference::Ratio] {
        let mut unit = CompressibleUnit::new_uncompressed(data.clone(), preference);
        unit.compress().unwrap();
        assert_eq!(unit.len(), unit.raw().len());
        unit.decompress().unwrap();
        assert_eq!(unit.raw().as_ref(), data.as_slice());
        assert_eq!(unit.len(), size);
        assert!(!unit.is_compressed());
    }
}

#[test]
fn test_second_compress_and_decompress_are_noops() {
    let mut unit = CompressibleUnit::new_uncompressed(payload(2000), CompressionPreference::Speed);

    unit.compress().unwrap();
    let compressed = unit.raw().clone();
    unit.compress().unwrap();
    assert_eq!(unit.raw(), &compressed);
    assert!(unit.is_compressed());

    unit.decompress().unwrap();
    let raw = unit.raw().clone();
    unit.decompress().unwrap();
    assert_eq!(unit.raw(), &raw);
    assert!(!unit.is_compressed());
}

#[test]
fn test_empty_unit_conversions() {
    let mut unit = CompressibleUnit::new_uncompressed(Bytes::new(), CompressionPreference::Ratio);
    assert!(!unit.has_data());
    assert!(unit.compress().is_ok());
    assert_eq!(unit.len(), 0);
    assert!(unit.decompress().is_ok());
    assert_eq!(unit.len(), 0);
}

#[test]
fn test_views_leave_state_untouched() {
    let data = b"view me twice, view me twice, view me twice".to_vec();
    let unit = CompressibleUnit::new_uncompressed(data.clone(), CompressionPreference::Speed);

    let gz = unit.compressed_view().unwrap();
    assert_eq!(&gz[..2], &[0x1f, 0x8b]);
    assert!(!unit.is_compressed());
    assert_eq!(unit.uncompressed_view().unwrap().as_ref(), data.as_slice());

    let mut compressed = unit.clone();
    compressed.compress().unwrap();
    assert_eq!(
        compressed.uncompressed_view().unwrap().as_ref(),
        data.as_slice()
    );
    assert!(compressed.is_compressed());
    assert_eq!(compressed.compressed_view().unwrap(), *compressed.raw());
}

#[test]
fn test_display_and_best_effort_view() {
    let mut unit = CompressibleUnit::new_uncompressed("plain text", CompressionPreference::Speed);
    unit.compress().unwrap();
    assert_eq!(unit.uncompressed_or_empty().as_ref(), b"plain text");
    assert_eq!(format!("{}", unit), "plain text");
}

#[test]
fn test_empty_sentinel_is_shared_and_empty() {
    let a = CompressibleUnit::empty();
    let b = CompressibleUnit::empty();
    assert!(std::ptr::eq(a, b));
    assert!(!EMPTY_UNIT.has_data());
    assert!(!EMPTY_UNIT.is_compressed());
    assert_eq!(EMPTY_UNIT.len(), 0);

    // A clone is independent of the sentinel
    let mut copy = EMPTY_UNIT.clone();
    copy.compress().unwrap();
    assert!(copy.is_compressed());
    assert!(!EMPTY_UNIT.is_compressed());
}

#[test]
fn test_seed_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, "<h1>hello</h1>").unwrap();

    let unit = CompressibleUnit::from_file_or_empty(&path, CompressionPreference::Ratio);
    assert_eq!(unit.to_string(), "<h1>hello</h1>");
    assert_eq!(unit.preference(), CompressionPreference::Ratio);

    let missing = CompressibleUnit::from_file_or_empty(dir.path().join("nope"), CompressionPreference::Speed);
    assert!(!missing.has_data());
}

#[test]
fn test_decode_error_status() {
    let err = CompressionError::Decode("corrupt".to_string());
    assert_eq!(err.to_http_status(), 500);
}
