// Logging initialization tests

use photomark::logging::init_subscriber;

#[test]
fn test_can_initialize_tracing_subscriber() {
    assert!(init_subscriber(false).is_ok());

    // Events inside an export span must not panic with a live subscriber
    let span = tracing::info_span!("export_item", identifier = "IMG_0001.jpg");
    let _enter = span.enter();
    tracing::info!(completed = 1, total = 3, "Export progress");
}

#[test]
fn test_repeated_initialization_is_ok() {
    for json in [false, true, false] {
        assert!(init_subscriber(json).is_ok());
    }
}
