//! End-to-end export scenarios
//!
//! Drives the public API from raw photograph bytes to encoded outputs and
//! ZIP archives, and checks the pixels that come back out.

use super::test_harness::*;
use photomark::batch::{entry_names, read_entry, BatchOutput, ExportMode, ExportOptions, NoProgress};
use photomark::imaging::{ImageEncoder, JpegEncoder, OutputFormat, QualitySettings, QualityTier};
use photomark::watermark::{
    prepare_layer, ConfigResolver, ImageDimensions, LogoVariant, WatermarkConfig,
};

fn png_options() -> ExportOptions {
    ExportOptions {
        format: OutputFormat::Png,
        ..Default::default()
    }
}

#[test]
fn test_default_watermark_on_800x600_jpeg() {
    let source = solid_jpeg(800, 600, [100, 100, 100]);
    let item = item("photo.jpg", source, WatermarkConfig::default());

    let output = processor(ExportOptions::default())
        .process(&[item], ExportMode::Single, &NoProgress)
        .unwrap();

    let image = match output {
        BatchOutput::Single(image) => image,
        BatchOutput::Archive(_) => panic!("single mode returned an archive"),
    };
    assert_eq!(image.file_name, "Logo_photo.jpg");
    assert_eq!(image.content_type, "image/jpeg");

    let decoded = decode_rgb(&image.data);
    assert_eq!(decoded.dimensions(), (800, 600));

    // Logo spans the full width, 400px tall, starting at y = 100.
    // Alpha 255 * 40 / 100 = 102 blends white over gray to 162.
    let center = decoded.get_pixel(400, 300);
    for channel in center.0 {
        assert_channel_close(channel, 162, 4);
    }
    let above = decoded.get_pixel(400, 40);
    for channel in above.0 {
        assert_channel_close(channel, 100, 4);
    }
    let below = decoded.get_pixel(400, 560);
    for channel in below.0 {
        assert_channel_close(channel, 100, 4);
    }
}

#[test]
fn test_minimum_scale_on_50x50() {
    let dims = ImageDimensions {
        width: 50,
        height: 50,
    };
    let assets = solid_assets(200, 100);
    let config = WatermarkConfig::new(LogoVariant::Light, 100, 10);

    let layer = prepare_layer(assets.get(LogoVariant::Light), &dims, &config).unwrap();
    assert_eq!(layer.image.width(), 5);
    assert_eq!(layer.image.height(), 3);
    assert_eq!((layer.position.x, layer.position.y), (22, 23));

    let item = item("tiny.png", solid_png(50, 50, [0, 0, 0]), config);
    let image = processor(png_options()).export_single(&item).unwrap();
    let decoded = decode_rgb(&image.data);

    assert_eq!(decoded.dimensions(), (50, 50));
    for channel in decoded.get_pixel(24, 24).0 {
        assert_channel_close(channel, 255, 2);
    }
    assert_eq!(decoded.get_pixel(21, 24).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(27, 24).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(24, 22).0, [0, 0, 0]);
}

#[test]
fn test_archive_with_two_overrides() {
    let mut resolver = ConfigResolver::default();
    resolver.set("b.jpg", WatermarkConfig::new(LogoVariant::Dark, 70, 30));
    resolver.set("c.jpg", WatermarkConfig::new(LogoVariant::Light, 100, 50));

    let sources = vec![
        photomark::batch::SourceImage::new("a.jpg", gradient_png(120, 80)),
        photomark::batch::SourceImage::new("b.jpg", gradient_png(90, 60)),
        photomark::batch::SourceImage::new("c.jpg", gradient_png(60, 90)),
    ];
    let items = photomark::batch::BatchItem::resolve_all(sources, &resolver);
    assert_eq!(items[0].config, WatermarkConfig::new(LogoVariant::Light, 40, 100));

    let artifact = processor(ExportOptions::default())
        .export_archive(&items, &NoProgress)
        .unwrap();

    assert_eq!(artifact.file_name, "watermarked_photos.zip");
    assert_eq!(artifact.content_type, "application/zip");
    assert_eq!(
        entry_names(&artifact.data).unwrap(),
        vec!["Logo_a.jpg", "Logo_b.jpg", "Logo_c.jpg"]
    );

    // The default item is exactly what the compositor and archive-tier
    // encoder produce for {light, 40, 100}.
    let rgb = compositor()
        .composite(&items[0].source.data, &WatermarkConfig::default())
        .unwrap();
    let quality = QualitySettings::default().quality_for(QualityTier::Archive);
    let expected = JpegEncoder.encode(&rgb, quality).unwrap();
    assert_eq!(read_entry(&artifact.data, "Logo_a.jpg").unwrap(), expected.data);

    for (name, dims) in [("Logo_b.jpg", (90, 60)), ("Logo_c.jpg", (60, 90))] {
        let decoded = decode_rgb(&read_entry(&artifact.data, name).unwrap());
        assert_eq!(decoded.dimensions(), dims);
    }
}

#[test]
fn test_identical_input_yields_identical_archive() {
    let build = || {
        let items = vec![
            item("one.png", gradient_png(64, 48), WatermarkConfig::default()),
            item(
                "two.png",
                gradient_png(48, 64),
                WatermarkConfig::new(LogoVariant::Dark, 55, 35),
            ),
        ];
        processor(ExportOptions::default())
            .export_archive(&items, &NoProgress)
            .unwrap()
            .data
    };

    assert_eq!(build(), build());
}

#[test]
fn test_every_identifier_has_one_entry() {
    let identifiers: Vec<String> = (0..7).map(|i| format!("IMG_{:04}.png", i)).collect();
    let items: Vec<_> = identifiers
        .iter()
        .map(|id| item(id, solid_png(30, 20, [10, 20, 30]), WatermarkConfig::default()))
        .collect();

    let artifact = processor(ExportOptions::default())
        .export_archive(&items, &NoProgress)
        .unwrap();

    let names = entry_names(&artifact.data).unwrap();
    let expected: Vec<String> = identifiers.iter().map(|id| format!("Logo_{}", id)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_zero_opacity_leaves_photo_untouched() {
    let source = gradient_png(73, 41);
    let config = WatermarkConfig::new(LogoVariant::Dark, 0, 100);
    let image = processor(png_options())
        .export_single(&item("plain.png", source.clone(), config))
        .unwrap();

    assert_eq!(decode_rgb(&image.data), decode_rgb(&source));
}

#[test]
fn test_full_opacity_replaces_covered_pixels() {
    let config = WatermarkConfig::new(LogoVariant::Dark, 100, 100);
    let image = processor(png_options())
        .export_single(&item("bright.png", solid_png(100, 100, [250, 250, 250]), config))
        .unwrap();

    let decoded = decode_rgb(&image.data);
    // 100x50 logo centered vertically at y = 25
    for channel in decoded.get_pixel(50, 50).0 {
        assert_channel_close(channel, 0, 2);
    }
    assert_eq!(decoded.get_pixel(50, 10).0, [250, 250, 250]);
    assert_eq!(decoded.get_pixel(50, 90).0, [250, 250, 250]);
}

#[test]
fn test_preview_fits_thumbnail_bound() {
    let item = item("wide.jpg", solid_jpeg(800, 600, [40, 40, 40]), WatermarkConfig::default());
    let preview = processor(ExportOptions::default()).preview(&item).unwrap();

    assert_eq!((preview.width, preview.height), (600, 450));
    assert_eq!(decode_rgb(&preview.data).dimensions(), (600, 450));
}
