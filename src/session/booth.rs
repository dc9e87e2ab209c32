use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{InvalidInputError, Result};
use crate::filters::FilterSelection;
use crate::overlay::{drive_for, OverlayAnimator, OverlayClock, ParticleLayer};
use crate::raster::{codec, RasterImage};
use crate::session::photo_session::{CaptureOutcome, PhotoSession, SessionEvent};
use crate::session::source::FrameSource;
use crate::strip::{save_strip, StripCompositor};

/// Owns one booth: the frame source, the session, the live overlay and the
/// selected filter. Everything runs on the caller's task.
pub struct Booth<F> {
    config: Config,
    source: F,
    session: PhotoSession,
    overlay: OverlayAnimator<ParticleLayer>,
    selection: FilterSelection,
}

impl<F: FrameSource> Booth<F> {
    pub fn new(config: Config, source: F) -> Self {
        let overlay = match config.overlay.seed {
            Some(seed) => OverlayAnimator::with_seed(ParticleLayer::new(), seed),
            None => OverlayAnimator::new(ParticleLayer::new()),
        };
        let session = PhotoSession::new(StripCompositor::new(config.strip.clone()));

        Self {
            config,
            source,
            session,
            overlay,
            selection: FilterSelection::None,
        }
    }

    /// Acquire the frame source so captures can be taken
    pub fn start(&mut self) -> Result<()> {
        self.source.acquire()
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    pub fn session(&self) -> &PhotoSession {
        &self.session
    }

    pub fn overlay(&self) -> &OverlayAnimator<ParticleLayer> {
        &self.overlay
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Make `selection` the active filter, restarting the overlay for it
    pub fn select_filter(&mut self, selection: FilterSelection, now: Duration) {
        info!("Filter selected: {}", selection);
        self.selection = selection;
        if self.source.is_active() {
            self.overlay.start(selection, now);
        } else {
            self.overlay.stop();
        }
    }

    /// Digitize the current frame.
    ///
    /// The frame goes through the capture JPEG encoding before it is stored.
    /// On the third capture the overlay stops, the source is released and
    /// the strip is composed. A failed attempt changes nothing.
    pub fn capture(&mut self) -> Result<CaptureOutcome> {
        if self.session.is_complete() {
            warn!("Capture refused: session already complete");
            return Ok(CaptureOutcome::Ignored);
        }

        let frame = self.source.current_frame()?;
        let stored = codec::jpeg_roundtrip(&frame, self.config.capture.jpeg_quality)?;
        let outcome = self.session.add_capture(stored, self.selection)?;
        self.source.advance();

        match outcome {
            CaptureOutcome::Added { ordinal } => {
                info!("Captured photo {} of {}", ordinal + 1, PhotoSession::MAX_CAPTURES);
            }
            CaptureOutcome::Completed => {
                info!("Captured final photo; releasing frame source");
                self.overlay.stop();
                self.source.release();
            }
            CaptureOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Throw away the captures and strip and go back to the live source
    pub fn retake(&mut self, now: Duration) -> Result<()> {
        info!("Retake requested");
        self.overlay.stop();
        self.session.clear();
        self.source.acquire()?;
        self.overlay.start(self.selection, now);
        Ok(())
    }

    /// Reset everything for the next guest: no captures, no filter, source off
    pub fn new_photo(&mut self) {
        info!("New photo requested");
        // Timers go before the source so nothing emits into a torn-down preview
        self.overlay.stop();
        self.selection = FilterSelection::None;
        self.session.clear();
        self.source.release();
    }

    /// Advance the overlay to `now`
    pub fn tick(&mut self, now: Duration) -> usize {
        self.overlay.tick(now)
    }

    /// Tick the overlay on the configured interval for `duration`
    pub async fn animate_for(&mut self, clock: &OverlayClock, duration: Duration) -> usize {
        let tick_every = Duration::from_millis(self.config.overlay.tick_ms);
        drive_for(&mut self.overlay, clock, duration, tick_every).await
    }

    /// The current frame with the live overlay drawn over it
    pub fn live_preview(&mut self, now: Duration) -> Result<RasterImage> {
        let frame = self.source.current_frame()?;
        Ok(self.overlay.surface().render_preview(&frame, now))
    }

    /// Write the composed strip as PNG into the configured output directory
    pub async fn download_strip(&self, filename: Option<&str>) -> Result<PathBuf> {
        let strip = self.session.strip().ok_or(InvalidInputError::StripNotReady)?;
        debug!("Downloading strip (filename: {:?})", filename);
        save_strip(
            strip,
            &self.config.output.directory,
            &self.config.output.filename_prefix,
            filename,
        )
        .await
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        self.session.take_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AcquisitionError, BoothError};
    use crate::filters::OverlayKind;
    use crate::overlay::{AnimatorState, OverlaySurface};
    use crate::raster::Color;
    use crate::session::source::{SequenceSource, StillFrameSource};
    use tempfile::tempdir;

    fn seeded_config() -> Config {
        let mut config = Config::default();
        config.overlay.seed = Some(11);
        config
    }

    fn still_booth() -> Booth<StillFrameSource> {
        let frame = RasterImage::new_filled(64, 36, Color::rgb(90, 120, 150));
        let mut booth = Booth::new(seeded_config(), StillFrameSource::new(frame));
        booth.start().unwrap();
        booth
    }

    #[test]
    fn test_three_captures_compose_and_release() {
        let mut booth = still_booth();

        assert_eq!(booth.capture().unwrap(), CaptureOutcome::Added { ordinal: 0 });
        assert_eq!(booth.capture().unwrap(), CaptureOutcome::Added { ordinal: 1 });
        assert_eq!(booth.capture().unwrap(), CaptureOutcome::Completed);

        assert!(booth.session().strip().is_some());
        assert!(!booth.source().is_active());
        assert_eq!(booth.capture().unwrap(), CaptureOutcome::Ignored);
        assert_eq!(booth.session().captures().len(), 3);
    }

    #[test]
    fn test_capture_without_source_changes_nothing() {
        let frame = RasterImage::new_filled(8, 8, Color::WHITE);
        let mut booth = Booth::new(seeded_config(), StillFrameSource::new(frame));

        let result = booth.capture();
        assert!(matches!(result, Err(BoothError::Acquisition(AcquisitionError::Released))));
        assert!(booth.session().captures().is_empty());
        assert!(booth.take_events().is_empty());
    }

    #[test]
    fn test_captures_go_through_jpeg() {
        let mut booth = still_booth();
        booth.capture().unwrap();

        let stored = &booth.session().captures()[0].image;
        assert_eq!((stored.width(), stored.height()), (64, 36));
        let [r, g, b, a] = stored.get_pixel(10, 10);
        assert!(r.abs_diff(90) <= 3 && g.abs_diff(120) <= 3 && b.abs_diff(150) <= 3);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_sequence_frames_fill_slots_in_order() {
        let frames = vec![
            RasterImage::new_filled(40, 40, Color::rgb(250, 0, 0)),
            RasterImage::new_filled(40, 40, Color::rgb(0, 250, 0)),
            RasterImage::new_filled(40, 40, Color::rgb(0, 0, 250)),
        ];
        let mut booth = Booth::new(seeded_config(), SequenceSource::new(frames));
        booth.start().unwrap();
        for _ in 0..3 {
            booth.capture().unwrap();
        }

        let strip = booth.session().strip().unwrap();
        let [r, _, _, _] = strip.get_pixel(300, 205);
        let [_, g, _, _] = strip.get_pixel(300, 610);
        let [_, _, b, _] = strip.get_pixel(300, 1015);
        assert!(r > 240 && g > 240 && b > 240);
    }

    #[test]
    fn test_overlay_follows_selection() {
        let mut booth = still_booth();

        booth.select_filter(FilterSelection::Hearts, Duration::ZERO);
        assert_eq!(booth.overlay().state(), AnimatorState::Running(OverlayKind::Hearts));
        booth.tick(Duration::from_millis(900));
        assert_eq!(booth.overlay().surface().live_count(), 4);

        booth.select_filter(FilterSelection::Vintage, Duration::from_millis(950));
        assert_eq!(booth.overlay().state(), AnimatorState::Idle);
        assert_eq!(booth.overlay().surface().live_count(), 0);
    }

    #[test]
    fn test_overlay_never_reaches_strip() {
        let mut plain = still_booth();
        let mut decorated = still_booth();
        decorated.select_filter(FilterSelection::Sparkles, Duration::ZERO);

        for step in 1..=3u64 {
            decorated.tick(Duration::from_millis(step * 250));
            plain.capture().unwrap();
            decorated.capture().unwrap();
        }

        assert_eq!(plain.session().strip(), decorated.session().strip());
        // Completion stops the overlay before the source goes away
        assert!(!decorated.overlay().is_running());
        assert_eq!(decorated.overlay().surface().live_count(), 0);
    }

    #[test]
    fn test_live_preview_leaves_captures_alone() {
        let mut booth = still_booth();
        booth.select_filter(FilterSelection::Stars, Duration::ZERO);
        booth.tick(Duration::from_millis(1200));

        let frame = RasterImage::new_filled(64, 36, Color::rgb(90, 120, 150));
        let preview = booth.live_preview(Duration::from_millis(1200)).unwrap();
        assert_eq!((preview.width(), preview.height()), (64, 36));
        assert_ne!(preview, frame);

        booth.capture().unwrap();
        let stored = &booth.session().captures()[0].image;
        assert_eq!(stored, &codec::jpeg_roundtrip(&frame, 95).unwrap());
    }

    #[test]
    fn test_retake_clears_and_reacquires() {
        let mut booth = still_booth();
        booth.select_filter(FilterSelection::Bright, Duration::ZERO);
        for _ in 0..3 {
            booth.capture().unwrap();
        }
        assert!(!booth.source().is_active());

        booth.retake(Duration::from_secs(5)).unwrap();
        assert!(booth.source().is_active());
        assert!(booth.session().captures().is_empty());
        assert!(booth.session().strip().is_none());
        assert_eq!(booth.selection(), FilterSelection::Bright);
        assert_eq!(booth.capture().unwrap(), CaptureOutcome::Added { ordinal: 0 });
    }

    #[test]
    fn test_retake_restarts_overlay() {
        let mut booth = still_booth();
        booth.select_filter(FilterSelection::Hearts, Duration::ZERO);
        booth.tick(Duration::from_millis(600));

        booth.retake(Duration::from_secs(1)).unwrap();
        assert!(booth.overlay().is_running());
        assert_eq!(booth.overlay().surface().live_count(), 1);
    }

    #[test]
    fn test_new_photo_resets_everything() {
        let mut booth = still_booth();
        booth.select_filter(FilterSelection::Stars, Duration::ZERO);
        booth.tick(Duration::from_secs(2));
        booth.capture().unwrap();

        booth.new_photo();
        assert_eq!(booth.selection(), FilterSelection::None);
        assert!(!booth.overlay().is_running());
        assert_eq!(booth.overlay().surface().live_count(), 0);
        assert!(!booth.source().is_active());
        assert!(booth.session().captures().is_empty());

        // Late ticks after teardown emit nothing
        assert_eq!(booth.tick(Duration::from_secs(10)), 0);
    }

    #[tokio::test]
    async fn test_download_before_strip_is_invalid() {
        let booth = still_booth();
        let result = booth.download_strip(None).await;
        assert!(matches!(
            result,
            Err(BoothError::InvalidInput(InvalidInputError::StripNotReady))
        ));
    }

    #[tokio::test]
    async fn test_download_writes_composed_strip() {
        let dir = tempdir().unwrap();
        let mut config = seeded_config();
        config.output.directory = dir.path().to_path_buf();

        let frame = RasterImage::new_filled(48, 64, Color::rgb(200, 180, 40));
        let mut booth = Booth::new(config, StillFrameSource::new(frame));
        booth.start().unwrap();
        booth.select_filter(FilterSelection::Vintage, Duration::ZERO);
        for _ in 0..3 {
            booth.capture().unwrap();
        }

        let path = booth.download_strip(None).await.unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("kalakini-booth-") && name.ends_with(".png"));

        let downloaded = codec::load(&path).await.unwrap();
        assert_eq!(Some(&downloaded), booth.session().strip());

        let named = booth.download_strip(Some("guest.png")).await.unwrap();
        assert_eq!(named, dir.path().join("guest.png"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_for_uses_configured_tick() {
        let mut booth = still_booth();
        let clock = OverlayClock::start();
        booth.select_filter(FilterSelection::Stars, clock.now());

        let emitted = booth.animate_for(&clock, Duration::from_millis(1000)).await;
        // 400 and 800ms after the first star
        assert_eq!(emitted, 2);
        assert_eq!(booth.overlay().surface().live_count(), 3);
    }
}
