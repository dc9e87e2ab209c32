use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use kalakini_booth::{
    config::Config,
    filters::{self, FilterRegistry, FilterSelection},
    overlay::OverlayClock,
    raster::{codec, RasterImage},
    session::{Booth, SequenceSource, SessionEvent},
    strip::StripCompositor,
};

#[derive(Parser)]
#[command(
    name = "kalakini-booth",
    version,
    about = "Turn three photos into a KalaKini photo strip",
    long_about = "KalaKini Booth applies vintage, bright or smooth filters to photos and composites three of them into a 600x1220 vertical photo strip, exactly as the booth does."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a static filter to one image
    Filter {
        /// none, vintage, bright or smooth
        kind: FilterSelection,
        input: PathBuf,
        /// Written as JPEG for .jpg/.jpeg, PNG otherwise
        output: PathBuf,
    },

    /// Composite three images into a strip
    Strip {
        #[arg(num_args = 3, required = true)]
        photos: Vec<PathBuf>,

        /// Output path; always written as PNG
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, default_value = "none")]
        filter: FilterSelection,
    },

    /// Run a full booth session using the images as camera frames
    Session {
        #[arg(num_args = 3, required = true)]
        frames: Vec<PathBuf>,

        #[arg(short, long, default_value = "none")]
        filter: FilterSelection,

        /// Save the live preview (with overlay) before each capture
        #[arg(long)]
        preview_dir: Option<PathBuf>,

        /// Time the overlay runs before each capture
        #[arg(long, default_value_t = 1000)]
        countdown_ms: u64,

        /// Strip file name inside the output directory
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List available filters
    Filters,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting KalaKini Booth v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            debug!("Using default configuration");
            Config::default()
        }
    };

    match cli.command {
        Command::Filter { kind, input, output } => run_filter(&config, kind, &input, &output).await,
        Command::Strip { photos, output, filter } => run_strip(&config, &photos, &output, filter).await,
        Command::Session {
            frames,
            filter,
            preview_dir,
            countdown_ms,
            name,
        } => {
            let countdown = Duration::from_millis(countdown_ms);
            run_session(config, &frames, filter, preview_dir.as_deref(), countdown, name.as_deref()).await
        }
        Command::Filters => {
            list_filters();
            Ok(())
        }
    }
}

async fn run_filter(config: &Config, kind: FilterSelection, input: &Path, output: &Path) -> Result<()> {
    if !kind.is_static() {
        bail!("'{}' is a live overlay and cannot be applied to a still image", kind);
    }

    let image = codec::load(input)
        .await
        .with_context(|| format!("Failed to load {:?}", input))?;
    info!("Applying {} filter to {:?} ({}x{})", kind, input, image.width(), image.height());

    let filtered = filters::apply(&image, kind.static_kind());
    write_image(&filtered, output, config.capture.jpeg_quality).await?;

    info!("Filtered image saved to: {:?}", output);
    Ok(())
}

async fn run_strip(config: &Config, photos: &[PathBuf], output: &Path, filter: FilterSelection) -> Result<()> {
    let mut images = Vec::with_capacity(photos.len());
    for path in photos {
        let image = codec::load(path)
            .await
            .with_context(|| format!("Failed to load {:?}", path))?;
        images.push(image);
    }

    let compositor = StripCompositor::new(config.strip.clone());
    let strip = compositor.compose(&images, filter)?;
    if !has_extension(output, &["png"]) {
        warn!("Strips are always PNG; writing PNG data to {:?}", output);
    }
    write_png(&strip, output).await?;

    info!("Strip saved to: {:?}", output);
    Ok(())
}

async fn run_session(
    config: Config,
    frames: &[PathBuf],
    filter: FilterSelection,
    preview_dir: Option<&Path>,
    countdown: Duration,
    name: Option<&str>,
) -> Result<()> {
    let source = SequenceSource::from_files(frames)
        .await
        .context("Failed to load camera frames")?;

    let clock = OverlayClock::start();
    let mut booth = Booth::new(config, source);
    booth.start()?;
    booth.select_filter(filter, clock.now());

    for shot in 0..frames.len() {
        let emitted = booth.animate_for(&clock, countdown).await;
        debug!("Countdown {} finished ({} overlay particles emitted)", shot + 1, emitted);

        if let Some(dir) = preview_dir {
            let preview = booth.live_preview(clock.now())?;
            let path = dir.join(format!("preview-{}.png", shot + 1));
            tokio::fs::create_dir_all(dir).await?;
            write_png(&preview, &path).await?;
            info!("Live preview saved to: {:?}", path);
        }

        booth.capture()?;
        for event in booth.take_events() {
            match event {
                SessionEvent::CaptureCountChanged { count, max } => info!("📸 {}/{} photos", count, max),
                SessionEvent::ThumbnailAdded { ordinal, image } => {
                    debug!("Thumbnail {} ready ({}x{})", ordinal, image.width(), image.height())
                }
                SessionEvent::StripReady(strip) => {
                    info!("🎞️  Strip ready ({}x{})", strip.width(), strip.height())
                }
            }
        }
    }

    let path = booth.download_strip(name).await?;
    info!("Session complete! Strip saved to: {:?}", path);
    Ok(())
}

fn list_filters() {
    let registry = FilterRegistry::new();

    println!("Static filters (baked into the strip):");
    println!("  {:<10} No filter", "none");
    for name in registry.available_filters() {
        if let Some(filter) = registry.get_filter(&name) {
            println!("  {:<10} {}", name, filter.description());
        }
    }

    println!("\nLive overlays (preview only):");
    for selection in FilterSelection::ALL.iter().filter(|s| s.is_animated()) {
        println!("  {}", selection);
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Filtered stills follow the output extension: JPEG for .jpg/.jpeg, PNG otherwise
async fn write_image(image: &RasterImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    if has_extension(path, &["jpg", "jpeg"]) {
        let bytes = codec::encode_jpeg(image, jpeg_quality)?;
        write_bytes(path, bytes).await
    } else {
        write_png(image, path).await
    }
}

async fn write_png(image: &RasterImage, path: &Path) -> Result<()> {
    write_bytes(path, codec::encode_png(image)?).await
}

async fn write_bytes(path: &Path, bytes: Vec<u8>) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
