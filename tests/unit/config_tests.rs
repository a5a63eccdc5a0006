// Configuration loading tests
//
// Exercise AppConfig against real files on disk, including the wiring from
// configuration to a working resolver and processor.

use photomark::batch::{BatchProcessor, FailurePolicy};
use photomark::config::{AppConfig, ConfigError};
use photomark::imaging::OutputFormat;
use photomark::watermark::{Compositor, LogoVariant, WatermarkConfig};
use std::io::Write;
use std::sync::Arc;

fn write_config(dir: &tempfile::TempDir, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join("photomark.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    path
}

fn write_logo(dir: &tempfile::TempDir, name: &str, color: [u8; 4]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    image::RgbaImage::from_pixel(30, 10, image::Rgba(color))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
defaults:
  variant: dark
overrides:
  "IMG_0001.jpg":
    opacity: 90
export:
  format: png
  failure_policy: collect
"#,
    );

    let config = AppConfig::from_file(&path).unwrap();
    config.validate().unwrap();

    assert_eq!(config.defaults, WatermarkConfig::new(LogoVariant::Dark, 40, 100));
    assert_eq!(config.export.format, OutputFormat::Png);
    assert_eq!(config.export.failure_policy, FailurePolicy::Collect);

    // Fields missing from an override fall back to their own defaults
    let resolver = config.resolver();
    assert_eq!(
        resolver.resolve("IMG_0001.jpg"),
        WatermarkConfig::new(LogoVariant::Light, 90, 100)
    );
}

#[test]
fn test_assets_resolved_from_env() {
    let dir = tempfile::tempdir().unwrap();
    write_logo(&dir, "white.png", [255, 255, 255, 180]);
    write_logo(&dir, "black.png", [0, 0, 0, 180]);
    std::env::set_var("PHOTOMARK_UNIT_ASSET_DIR", dir.path());

    let path = write_config(
        &dir,
        r#"
assets:
  light: ${PHOTOMARK_UNIT_ASSET_DIR}/white.png
  dark: ${PHOTOMARK_UNIT_ASSET_DIR}/black.png
"#,
    );

    let config = AppConfig::from_file(&path).unwrap();
    let assets = config.load_assets().unwrap();
    assert_eq!(assets.dimensions(LogoVariant::Light), (30, 10));
    assert_eq!(assets.get(LogoVariant::Dark).get_pixel(0, 0)[0], 0);

    let processor = BatchProcessor::new(
        Compositor::new(Arc::new(assets)),
        config.export.clone(),
        config.quality,
    );
    assert_eq!(processor.options().archive_name, "watermarked_photos.zip");
}

#[test]
fn test_missing_asset_fails_startup() {
    let config = AppConfig {
        assets: photomark::config::AssetsConfig {
            light: "/nonexistent/light.png".into(),
            dark: "/nonexistent/dark.png".into(),
        },
        ..Default::default()
    };

    let err = config.load_assets().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("light"), "{}", message);
    assert!(message.contains("/nonexistent/light.png"), "{}", message);
}

#[test]
fn test_invalid_values_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
defaults:
  opacity: 140
"#,
    );

    let config = AppConfig::from_file(&path).unwrap();
    match config.validate() {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("defaults.opacity")),
        other => panic!("expected validation failure, got {:?}", other),
    }
}
