use anyhow::Context;
use clap::Parser;
use photomark::batch::{
    BatchItem, BatchOutput, BatchProcessor, ExportMode, Progress, SourceImage,
};
use photomark::config::AppConfig;
use photomark::watermark::Compositor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Photomark - stamp a logo onto photographs and export them
#[derive(Parser, Debug)]
#[command(name = "photomark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Photographs to watermark
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory that receives exported files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Export one photograph instead of an archive
    #[arg(long, conflicts_with = "preview")]
    single: bool,

    /// Write reduced-size previews instead of exports
    #[arg(long)]
    preview: bool,

    /// Override the configured number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = photomark::logging::init_subscriber(args.json_logs) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }),
        None => AppConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.export.workers = workers;
    }
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing::info!(
        config_file = ?args.config.as_ref().map(|p| p.display().to_string()),
        light_logo = %config.assets.light.display(),
        dark_logo = %config.assets.dark.display(),
        overrides = config.overrides.len(),
        workers = config.export.workers,
        "Configuration loaded successfully"
    );

    if let Err(e) = run(&args, config) {
        tracing::error!(error = %e, "Export failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, config: AppConfig) -> anyhow::Result<()> {
    let assets = config.load_assets()?;
    let processor = BatchProcessor::new(
        Compositor::new(Arc::new(assets)),
        config.export.clone(),
        config.quality,
    );

    let sources = args
        .inputs
        .iter()
        .map(|path| read_source(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let items = BatchItem::resolve_all(sources, &config.resolver());

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;

    if args.preview {
        let mut written = Vec::with_capacity(items.len());
        for item in &items {
            let preview = processor.preview(item)?;
            let path = args.output_dir.join(format!("preview_{}", preview.file_name));
            write_output(&path, &preview.data)?;
            written.push(path.display().to_string());
        }
        println!("{}", serde_json::json!({ "previews": written }));
        return Ok(());
    }

    let mode = if args.single {
        ExportMode::Single
    } else {
        ExportMode::Archive
    };
    let progress = |p: Progress| {
        tracing::info!(completed = p.completed, total = p.total, "Export progress");
    };

    let output = processor.process(&items, mode, &progress)?;
    let path = args.output_dir.join(output.file_name());
    write_output(&path, output.data())?;

    let summary = match &output {
        BatchOutput::Single(image) => serde_json::json!({
            "output": path.display().to_string(),
            "content_type": image.content_type,
            "width": image.width,
            "height": image.height,
            "bytes": image.data.len(),
        }),
        BatchOutput::Archive(archive) => serde_json::json!({
            "output": path.display().to_string(),
            "content_type": archive.content_type,
            "entries": archive.entries,
            "failures": archive
                .failures
                .iter()
                .map(|f| serde_json::json!({
                    "identifier": f.identifier,
                    "kind": f.kind.as_str(),
                    "error": f.message,
                }))
                .collect::<Vec<_>>(),
            "bytes": archive.data.len(),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<SourceImage> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let identifier = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceImage::new(identifier, data))
}

fn write_output(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "Output written");
    Ok(())
}
