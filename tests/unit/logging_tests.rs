// Logging tests: structured JSON subscriber

#[test]
fn test_can_initialize_tracing_subscriber() {
    use gzunit::logging::init_subscriber;

    // Only this test installs a global subscriber in this binary
    let result = init_subscriber();
    assert!(result.is_ok(), "Subscriber initialization should succeed");

    tracing::info!(component = "logging_tests", "subscriber installed");

    // A second install is rejected rather than silently replacing the first
    assert!(init_subscriber().is_err());
}

#[test]
fn test_build_filter_has_a_default() {
    // Falls back to the default directive instead of failing
    let _filter = gzunit::logging::build_filter();
}
