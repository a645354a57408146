mod settings;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use face_overlay_core::detection::domain::detector_lease::DetectorLease;
use face_overlay_core::detection::infrastructure::detection_log::DetectionLog;
use face_overlay_core::detection::infrastructure::replay_face_detector::ReplayFaceDetector;
use face_overlay_core::diagnostics::domain::fallback_memory_probe::FallbackMemoryProbe;
use face_overlay_core::diagnostics::domain::memory_reporter::MemoryReporter;
use face_overlay_core::diagnostics::infrastructure::sysinfo_memory_probe::SysinfoMemoryProbe;
use face_overlay_core::diagnostics::infrastructure::tracking_allocator::{
    AllocatorMemoryProbe, TrackingAllocator,
};
use face_overlay_core::overlay::domain::overlay_renderer::OverlayRenderer;
use face_overlay_core::overlay::infrastructure::frame_compositor::FrameCompositor;
use face_overlay_core::overlay::infrastructure::retained_scene::RetainedScene;
use face_overlay_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use face_overlay_core::pipeline::visualize_faces_use_case::{
    PreviewSurface, VisualizeFacesUseCase,
};
use face_overlay_core::shared::display_surface::DisplaySurface;
use face_overlay_core::video::domain::image_writer::ImageWriter;
use face_overlay_core::video::infrastructure::image_file_writer::ImageFileWriter;
use face_overlay_core::video::infrastructure::image_sequence_source::ImageSequenceSource;

use settings::{BoxStyle, Settings};

#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator::new();

/// Draws recorded face detections over images and reports memory usage.
#[derive(Parser)]
#[command(name = "face-overlay")]
struct Cli {
    /// Input image file or directory of images.
    input: PathBuf,

    /// JSON file with recorded detections per frame index.
    detections: PathBuf,

    /// Directory for annotated frames (omit for a dry run).
    output: Option<PathBuf>,

    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum detection confidence (0.0-1.0).
    #[arg(long)]
    confidence: Option<f32>,

    /// Preview surface width in display units (default: frame width).
    #[arg(long, requires = "surface_height")]
    surface_width: Option<f32>,

    /// Preview surface height in display units (default: frame height).
    #[arg(long, requires = "surface_width")]
    surface_height: Option<f32>,

    /// Draw box outlines instead of solid boxes.
    #[arg(long)]
    outline: bool,

    /// Run without a preview surface; frames are written without overlays.
    #[arg(long)]
    no_preview_surface: bool,

    /// Log progress every N frames.
    #[arg(long, default_value = "30")]
    log_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(confidence) = cli.confidence {
        settings.confidence = confidence;
    }
    if cli.outline {
        settings.box_style = BoxStyle::Outline;
    }
    settings.validate()?;

    let recorded = DetectionLog::load(&cli.detections)?.into_frame_map()?;
    log::info!(
        "Loaded detections for {} frame(s) from {}",
        recorded.len(),
        cli.detections.display()
    );

    let source = ImageSequenceSource::open(&cli.input)?;
    let detector = DetectorLease::acquire(Box::new(ReplayFaceDetector::new(Arc::new(recorded))));
    let renderer = OverlayRenderer::new(RetainedScene::new(), settings.overlay_style());
    let reporter = MemoryReporter::new(FallbackMemoryProbe::new(
        AllocatorMemoryProbe::new(&ALLOCATOR),
        SysinfoMemoryProbe::current()?,
    ));

    let mut use_case = VisualizeFacesUseCase::new(
        Box::new(source),
        detector,
        renderer,
        reporter,
        preview_surface(&cli, &settings),
        settings.confidence,
        Box::new(StdoutPipelineLogger::new(cli.log_every)),
    );

    let compositor = FrameCompositor::new();
    let writer = ImageFileWriter::new();
    let output = cli.output.as_deref();

    let processed = use_case.run(|visualized, renderer| {
        let Some(dir) = output else {
            return Ok(true);
        };
        let path = frame_path(dir, visualized.frame.index());
        match visualized.surface {
            Some(surface) => {
                let annotated = compositor.compose(&visualized.frame, renderer.engine(), &surface);
                writer.write(&path, &annotated)?;
            }
            None => writer.write(&path, &visualized.frame)?,
        }
        Ok(true)
    })?;
    use_case.finish();

    match output {
        Some(dir) => log::info!("Wrote {processed} frame(s) to {}", dir.display()),
        None => log::info!("Processed {processed} frame(s) (dry run)"),
    }
    Ok(())
}

fn preview_surface(cli: &Cli, settings: &Settings) -> PreviewSurface {
    if cli.no_preview_surface {
        return PreviewSurface::Absent;
    }
    match (cli.surface_width, cli.surface_height) {
        (Some(w), Some(h)) => PreviewSurface::Fixed(DisplaySurface::measure(
            w,
            h,
            settings.surface_measurement,
        )),
        _ => PreviewSurface::MatchFrame(settings.surface_measurement),
    }
}

fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{index:05}.png"))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if !cli.detections.exists() {
        return Err(format!("Detections file not found: {}", cli.detections.display()).into());
    }
    for (name, value) in [
        ("width", cli.surface_width),
        ("height", cli.surface_height),
    ] {
        if let Some(v) = value {
            validate_surface_dimension(name, v)?;
        }
    }
    if let Some(path) = &cli.output {
        if path.is_file() {
            return Err(format!("Output must be a directory: {}", path.display()).into());
        }
    }
    Ok(())
}

fn validate_surface_dimension(name: &str, value: f32) -> Result<(), Box<dyn std::error::Error>> {
    if !(value.is_finite() && value > 0.0) {
        return Err(format!("Surface {name} must be a positive number, got {value}").into());
    }
    Ok(())
}
