//! Failure policies, cancellation, progress and parallel ordering

use super::test_harness::*;
use parking_lot::Mutex;
use photomark::batch::{
    entry_names, BatchError, CancellationToken, ExportMode, ExportOptions, FailurePolicy,
    ItemErrorKind, NoProgress, Progress,
};
use photomark::watermark::{LogoVariant, WatermarkConfig};

fn mixed_items() -> Vec<photomark::batch::BatchItem> {
    vec![
        item("first.png", solid_png(40, 40, [1, 2, 3]), WatermarkConfig::default()),
        item("corrupt.jpg", vec![0xFF, 0xD8, 0x00, 0x01], WatermarkConfig::default()),
        item("third.png", solid_png(40, 40, [4, 5, 6]), WatermarkConfig::default()),
    ]
}

#[test]
fn test_fail_fast_reports_identifier() {
    let err = processor(ExportOptions::default())
        .process(&mixed_items(), ExportMode::Archive, &NoProgress)
        .unwrap_err();

    match err {
        BatchError::Item(item) => {
            assert_eq!(item.identifier, "corrupt.jpg");
            assert_eq!(item.kind, ItemErrorKind::Decode);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_collect_policy_reports_every_failure() {
    let options = ExportOptions {
        failure_policy: FailurePolicy::Collect,
        ..Default::default()
    };
    let artifact = processor(options)
        .export_archive(&mixed_items(), &NoProgress)
        .unwrap();

    assert!(!artifact.is_complete());
    assert_eq!(
        entry_names(&artifact.data).unwrap(),
        vec!["Logo_first.png", "Logo_third.png"]
    );
    let failed: Vec<_> = artifact.failures.iter().map(|f| f.identifier.as_str()).collect();
    assert_eq!(failed, vec!["corrupt.jpg"]);
}

#[test]
fn test_cancellation_returns_no_archive() {
    let token = CancellationToken::new();
    let processor = processor(ExportOptions::default()).with_cancellation(token.clone());
    let items: Vec<_> = (0..5)
        .map(|i| item(&format!("{}.png", i), solid_png(20, 20, [9, 9, 9]), WatermarkConfig::default()))
        .collect();

    let sink = move |p: Progress| {
        if p.completed == 2 {
            token.cancel();
        }
    };

    match processor.process(&items, ExportMode::Archive, &sink) {
        Err(BatchError::Cancelled { completed, total }) => {
            assert_eq!(completed, 2);
            assert_eq!(total, 5);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("cancelled batch produced output"),
    }
}

#[test]
fn test_parallel_workers_preserve_order_and_bytes() {
    let items: Vec<_> = (0..12)
        .map(|i| {
            let variant = if i % 3 == 0 { LogoVariant::Dark } else { LogoVariant::Light };
            item(
                &format!("shot_{:02}.png", i),
                gradient_png(48 + i, 32 + i),
                WatermarkConfig::new(variant, (i * 8) as u8, 10 + (i * 7) as u8),
            )
        })
        .collect();

    let sequential = processor(ExportOptions::default())
        .export_archive(&items, &NoProgress)
        .unwrap();

    let seen = Mutex::new(Vec::new());
    let sink = |p: Progress| seen.lock().push(p);
    let parallel = processor(ExportOptions {
        workers: 4,
        ..Default::default()
    })
    .export_archive(&items, &sink)
    .unwrap();

    let expected: Vec<String> = (0..12).map(|i| format!("Logo_shot_{:02}.png", i)).collect();
    assert_eq!(parallel.entries, expected);
    assert_eq!(parallel.data, sequential.data);

    let seen = seen.into_inner();
    assert_eq!(seen.len(), 12);
    assert!(seen.windows(2).all(|w| w[0].completed < w[1].completed));
    assert!(seen.iter().all(|p| p.total == 12));
    assert!(seen.last().map(Progress::is_complete).unwrap_or(false));
}

#[test]
fn test_empty_archive() {
    let artifact = processor(ExportOptions::default())
        .export_archive(&[], &NoProgress)
        .unwrap();
    assert!(artifact.entries.is_empty());
    assert!(entry_names(&artifact.data).unwrap().is_empty());
}

#[test]
fn test_single_mode_rejects_multiple_items() {
    let items = mixed_items();
    let err = processor(ExportOptions::default())
        .process(&items, ExportMode::Single, &NoProgress)
        .unwrap_err();
    assert!(matches!(err, BatchError::InvalidInput(_)));
}
