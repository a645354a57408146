use std::time::Instant;

use crate::detection::domain::detector_lease::DetectorLease;
use crate::diagnostics::domain::memory_probe::MemoryProbe;
use crate::diagnostics::domain::memory_reporter::MemoryReporter;
use crate::overlay::domain::display_engine::DisplayEngine;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::display_surface::{DisplaySurface, SurfaceMeasurement};
use crate::shared::frame::Frame;
use crate::video::domain::image_source::ImageSource;

/// Where overlays are laid out for each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreviewSurface {
    /// A fixed-size preview region.
    Fixed(DisplaySurface),
    /// The preview is sized to each frame, measured with the given mode.
    MatchFrame(SurfaceMeasurement),
    /// No preview is attached; overlays are not drawn.
    Absent,
}

impl PreviewSurface {
    pub fn resolve(&self, frame: &Frame) -> Option<DisplaySurface> {
        match *self {
            PreviewSurface::Fixed(surface) => Some(surface),
            PreviewSurface::MatchFrame(mode) => Some(DisplaySurface::measure(
                frame.width() as f32,
                frame.height() as f32,
                mode,
            )),
            PreviewSurface::Absent => None,
        }
    }
}

/// Result of one frame: the preview image plus what was drawn over it.
#[derive(Debug)]
pub struct VisualizedFrame {
    pub frame: Frame,
    pub surface: Option<DisplaySurface>,
    pub detections: usize,
    pub memory_text: String,
}

/// Per-frame loop: fetch, detect, replace overlays, report memory.
///
/// The caller owns the loop and drives it through [`step`](Self::step) or
/// [`run`](Self::run); nothing here schedules itself.
pub struct VisualizeFacesUseCase<E: DisplayEngine, P: MemoryProbe> {
    source: Box<dyn ImageSource>,
    detector: DetectorLease,
    renderer: OverlayRenderer<E>,
    reporter: MemoryReporter<P>,
    surface: PreviewSurface,
    threshold: f32,
    logger: Box<dyn PipelineLogger>,
    frames: usize,
}

impl<E: DisplayEngine, P: MemoryProbe> VisualizeFacesUseCase<E, P> {
    pub fn new(
        source: Box<dyn ImageSource>,
        detector: DetectorLease,
        renderer: OverlayRenderer<E>,
        reporter: MemoryReporter<P>,
        surface: PreviewSurface,
        threshold: f32,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            renderer,
            reporter,
            surface,
            threshold,
            logger,
            frames: 0,
        }
    }

    /// Processes the next frame. Returns `None` once the source is exhausted.
    pub fn step(&mut self) -> Result<Option<VisualizedFrame>, Box<dyn std::error::Error>> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };

        let started = Instant::now();
        let detections = self.detector.detect(&frame, self.threshold)?;
        self.logger.timing("detect", elapsed_ms(started));

        let surface = self.surface.resolve(&frame);
        let started = Instant::now();
        match surface {
            Some(surface) => self.renderer.render(&detections, &surface),
            None => {
                self.renderer.clear();
                log::debug!(
                    "No preview surface, skipping {} overlay(s) for frame {}",
                    detections.len(),
                    frame.index()
                );
            }
        }
        self.logger.timing("render", elapsed_ms(started));
        self.logger
            .metric("overlays", self.renderer.overlays().len() as f64);

        let memory_text = self.reporter.report().to_string();
        self.logger.memory(&memory_text);

        self.frames += 1;
        self.logger.progress(self.frames, self.source.len_hint());

        Ok(Some(VisualizedFrame {
            frame,
            surface,
            detections: detections.len(),
            memory_text,
        }))
    }

    /// Steps until the source is exhausted or `on_frame` returns `false`.
    /// Returns the number of frames processed.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<usize, Box<dyn std::error::Error>>
    where
        F: FnMut(&VisualizedFrame, &OverlayRenderer<E>) -> Result<bool, Box<dyn std::error::Error>>,
    {
        let mut processed = 0;
        while let Some(visualized) = self.step()? {
            processed += 1;
            if !on_frame(&visualized, &self.renderer)? {
                self.logger.info("Stopped by caller");
                break;
            }
        }
        Ok(processed)
    }

    /// Tears down: releases the detector, removes remaining overlays and
    /// emits the run summary.
    pub fn finish(mut self) {
        self.detector.release();
        self.renderer.clear();
        self.logger.summary();
    }

    pub fn renderer(&self) -> &OverlayRenderer<E> {
        &self.renderer
    }

    pub fn frames_processed(&self) -> usize {
        self.frames
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detector::FaceDetector;
    use crate::overlay::domain::overlay_style::OverlayStyle;
    use crate::overlay::infrastructure::retained_scene::RetainedScene;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::detection::Detection;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        frames: Vec<Frame>,
        total: usize,
    }

    impl StubSource {
        fn new(count: usize, width: u32, height: u32) -> Self {
            let frames = (0..count)
                .rev()
                .map(|i| Frame::filled(width, height, [0, 0, 0], i))
                .collect();
            Self {
                frames,
                total: count,
            }
        }
    }

    impl ImageSource for StubSource {
        fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            Ok(self.frames.pop())
        }

        fn len_hint(&self) -> Option<usize> {
            Some(self.total)
        }
    }

    struct StubDetector {
        results: HashMap<usize, Vec<Detection>>,
        thresholds: Arc<Mutex<Vec<f32>>>,
        releases: Arc<AtomicUsize>,
        fail_on: Option<usize>,
    }

    impl FaceDetector for StubDetector {
        fn detect(
            &mut self,
            frame: &Frame,
            threshold: f32,
        ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            if self.fail_on == Some(frame.index()) {
                return Err("detector crashed".into());
            }
            self.thresholds.lock().unwrap().push(threshold);
            Ok(self
                .results
                .get(&frame.index())
                .cloned()
                .unwrap_or_default())
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FixedProbe(Option<u64>);

    impl MemoryProbe for FixedProbe {
        fn total_allocated_bytes(&self) -> Option<u64> {
            self.0
        }
    }

    struct Harness {
        thresholds: Arc<Mutex<Vec<f32>>>,
        releases: Arc<AtomicUsize>,
    }

    fn boxes(n: usize) -> Vec<Detection> {
        (0..n)
            .map(|i| Detection::new(0.1 * i as f32, 0.25, 0.1 * i as f32 + 0.05, 0.5))
            .collect()
    }

    fn use_case(
        counts: &[usize],
        surface: PreviewSurface,
        fail_on: Option<usize>,
    ) -> (VisualizeFacesUseCase<RetainedScene, FixedProbe>, Harness) {
        let harness = Harness {
            thresholds: Arc::new(Mutex::new(Vec::new())),
            releases: Arc::new(AtomicUsize::new(0)),
        };
        let results = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| (i, boxes(n)))
            .collect();
        let detector = StubDetector {
            results,
            thresholds: harness.thresholds.clone(),
            releases: harness.releases.clone(),
            fail_on,
        };
        let uc = VisualizeFacesUseCase::new(
            Box::new(StubSource::new(counts.len(), 200, 100)),
            DetectorLease::acquire(Box::new(detector)),
            OverlayRenderer::new(RetainedScene::new(), OverlayStyle::default()),
            MemoryReporter::new(FixedProbe(Some(3 * 1_048_576))),
            surface,
            0.7,
            Box::new(NullPipelineLogger),
        );
        (uc, harness)
    }

    fn match_frame() -> PreviewSurface {
        PreviewSurface::MatchFrame(SurfaceMeasurement::Independent)
    }

    // --- Tests ---

    #[test]
    fn test_live_overlays_track_each_frame() {
        let counts = [2, 5, 0, 1, 3];
        let (mut uc, _h) = use_case(&counts, match_frame(), None);

        for &n in &counts {
            let visualized = uc.step().unwrap().unwrap();
            assert_eq!(visualized.detections, n);
            assert_eq!(uc.renderer().overlays().len(), n);
            assert_eq!(uc.renderer().engine().live_count(), n);
        }
        assert!(uc.step().unwrap().is_none());
        assert_eq!(uc.frames_processed(), counts.len());
    }

    #[test]
    fn test_threshold_passed_through() {
        let (mut uc, h) = use_case(&[1, 1], match_frame(), None);
        uc.run(|_, _| Ok(true)).unwrap();
        assert_eq!(*h.thresholds.lock().unwrap(), vec![0.7, 0.7]);
    }

    #[test]
    fn test_match_frame_surface_uses_frame_dimensions() {
        let (mut uc, _h) = use_case(&[1], match_frame(), None);
        let visualized = uc.step().unwrap().unwrap();

        assert_eq!(visualized.surface, Some(DisplaySurface::new(200.0, 100.0)));
        // boxes(1)[0] = (0.0, 0.25) - (0.05, 0.5)
        let g = uc.renderer().overlays().geometries()[0];
        assert_relative_eq!(g.pos_y, -25.0);
        assert_relative_eq!(g.height, 25.0);
        assert_relative_eq!(g.width, 10.0);
    }

    #[test]
    fn test_width_only_measurement_squares_surface() {
        let surface = PreviewSurface::MatchFrame(SurfaceMeasurement::WidthOnly);
        let (mut uc, _h) = use_case(&[1], surface, None);
        let visualized = uc.step().unwrap().unwrap();
        assert_eq!(visualized.surface, Some(DisplaySurface::new(200.0, 200.0)));
    }

    #[test]
    fn test_fixed_surface() {
        let fixed = DisplaySurface::new(50.0, 40.0);
        let (mut uc, _h) = use_case(&[1], PreviewSurface::Fixed(fixed), None);
        let visualized = uc.step().unwrap().unwrap();
        assert_eq!(visualized.surface, Some(fixed));
    }

    #[test]
    fn test_absent_surface_skips_overlays_but_reports_memory() {
        let (mut uc, _h) = use_case(&[3], PreviewSurface::Absent, None);
        let visualized = uc.step().unwrap().unwrap();

        assert!(visualized.surface.is_none());
        assert_eq!(visualized.detections, 3);
        assert!(uc.renderer().overlays().is_empty());
        assert_eq!(visualized.memory_text, "Total Allocated Memory: 3 MB");
    }

    #[test]
    fn test_memory_reported_every_frame() {
        let (mut uc, _h) = use_case(&[0, 2], match_frame(), None);
        let mut texts = Vec::new();
        uc.run(|v, _| {
            texts.push(v.memory_text.clone());
            Ok(true)
        })
        .unwrap();
        assert_eq!(texts, vec!["Total Allocated Memory: 3 MB"; 2]);
    }

    #[test]
    fn test_run_callback_sees_current_overlays() {
        let counts = [1, 4, 2];
        let (mut uc, _h) = use_case(&counts, match_frame(), None);
        let mut seen = Vec::new();

        let processed = uc
            .run(|_, renderer| {
                seen.push(renderer.overlays().len());
                Ok(true)
            })
            .unwrap();

        assert_eq!(processed, 3);
        assert_eq!(seen, counts.to_vec());
    }

    #[test]
    fn test_run_stops_when_callback_returns_false() {
        let (mut uc, _h) = use_case(&[1, 1, 1], match_frame(), None);
        let processed = uc.run(|_, _| Ok(false)).unwrap();
        assert_eq!(processed, 1);
        assert!(uc.step().unwrap().is_some());
    }

    #[test]
    fn test_detector_error_propagates() {
        let (mut uc, _h) = use_case(&[1, 1], match_frame(), Some(1));
        let result = uc.run(|_, _| Ok(true));
        assert!(result.unwrap_err().to_string().contains("detector crashed"));
    }

    #[test]
    fn test_finish_releases_detector_once() {
        let (mut uc, h) = use_case(&[2], match_frame(), None);
        uc.step().unwrap();
        uc.finish();
        assert_eq!(h.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_error_releases_detector() {
        let (mut uc, h) = use_case(&[1], match_frame(), Some(0));
        assert!(uc.step().is_err());
        drop(uc);
        assert_eq!(h.releases.load(Ordering::SeqCst), 1);
    }
}
