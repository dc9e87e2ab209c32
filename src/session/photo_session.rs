use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::error::{DecodeError, Result};
use crate::filters::FilterSelection;
use crate::raster::RasterImage;
use crate::session::capture::Capture;
use crate::strip::StripCompositor;

/// Notifications for whatever presents the booth
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CaptureCountChanged { count: usize, max: usize },
    /// Gallery thumbnail for a freshly stored capture
    ThumbnailAdded { ordinal: usize, image: RasterImage },
    /// The composed strip, exactly as it will be downloaded
    StripReady(RasterImage),
}

/// Result of offering a capture to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Stored at `ordinal`; more captures are needed
    Added { ordinal: usize },
    /// The last capture was stored and the strip composed
    Completed,
    /// The session was already full
    Ignored,
}

/// The ordered captures of one strip and the strip composed from them
pub struct PhotoSession {
    compositor: StripCompositor,
    captures: Vec<Capture>,
    strip: Option<RasterImage>,
    events: VecDeque<SessionEvent>,
}

impl PhotoSession {
    pub const MAX_CAPTURES: usize = 3;

    /// Undrained events kept before the oldest are dropped; about four
    /// complete strips' worth
    pub const MAX_PENDING_EVENTS: usize = 32;

    pub fn new(compositor: StripCompositor) -> Self {
        Self {
            compositor,
            captures: Vec::with_capacity(Self::MAX_CAPTURES),
            strip: None,
            events: VecDeque::new(),
        }
    }

    /// Store `image` as the next capture.
    ///
    /// The third capture composes the strip with `filter`. Captures past the
    /// third are ignored. An image without pixels is rejected and leaves the
    /// session as it was.
    pub fn add_capture(&mut self, image: RasterImage, filter: FilterSelection) -> Result<CaptureOutcome> {
        if self.is_complete() {
            warn!("Session already has {} captures; ignoring capture", Self::MAX_CAPTURES);
            return Ok(CaptureOutcome::Ignored);
        }
        if image.is_empty() {
            return Err(DecodeError::EmptyImage {
                width: image.width(),
                height: image.height(),
            }
            .into());
        }

        let ordinal = self.captures.len();
        debug!("Storing capture {} ({}x{})", ordinal, image.width(), image.height());
        self.captures.push(Capture::new(ordinal, image.clone()));

        if self.is_complete() {
            if let Err(e) = self.compose(filter) {
                self.captures.pop();
                return Err(e);
            }
        }

        self.push_event(SessionEvent::ThumbnailAdded { ordinal, image });
        self.push_event(SessionEvent::CaptureCountChanged {
            count: self.captures.len(),
            max: Self::MAX_CAPTURES,
        });
        if let Some(strip) = &self.strip {
            let strip = strip.clone();
            self.push_event(SessionEvent::StripReady(strip));
            return Ok(CaptureOutcome::Completed);
        }

        Ok(CaptureOutcome::Added { ordinal })
    }

    fn compose(&mut self, filter: FilterSelection) -> Result<()> {
        let photos: Vec<RasterImage> = self.captures.iter().map(|c| c.image.clone()).collect();
        let strip = self.compositor.compose(&photos, filter)?;
        info!("Session complete; strip composed with '{}' filter", filter);
        self.strip = Some(strip);
        Ok(())
    }

    /// Drop every capture and the strip
    pub fn clear(&mut self) {
        if self.captures.is_empty() && self.strip.is_none() {
            return;
        }
        debug!("Clearing session ({} captures)", self.captures.len());
        self.captures.clear();
        self.strip = None;
        self.push_event(SessionEvent::CaptureCountChanged {
            count: 0,
            max: Self::MAX_CAPTURES,
        });
    }

    pub fn is_complete(&self) -> bool {
        self.captures.len() == Self::MAX_CAPTURES
    }

    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    pub fn strip(&self) -> Option<&RasterImage> {
        self.strip.as_ref()
    }

    /// Drain queued events, oldest first.
    ///
    /// Callers should drain after every capture or clear. At most
    /// [`Self::MAX_PENDING_EVENTS`] are held; past that the oldest are
    /// dropped, so a late reader still sees the latest count and strip.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.len() == Self::MAX_PENDING_EVENTS {
            self.events.pop_front();
            warn!("Session event queue full; dropped the oldest undrained event");
        }
        self.events.push_back(event);
    }
}

impl Default for PhotoSession {
    fn default() -> Self {
        Self::new(StripCompositor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoothError;
    use crate::raster::Color;

    fn frame(shade: u8) -> RasterImage {
        RasterImage::new_filled(32, 18, Color::rgb(shade, shade, shade))
    }

    #[test]
    fn test_third_capture_composes_strip() {
        let mut session = PhotoSession::default();

        assert_eq!(
            session.add_capture(frame(10), FilterSelection::None).unwrap(),
            CaptureOutcome::Added { ordinal: 0 }
        );
        assert_eq!(
            session.add_capture(frame(20), FilterSelection::None).unwrap(),
            CaptureOutcome::Added { ordinal: 1 }
        );
        assert!(session.strip().is_none());
        assert!(!session.is_complete());

        assert_eq!(
            session.add_capture(frame(30), FilterSelection::Bright).unwrap(),
            CaptureOutcome::Completed
        );
        assert!(session.is_complete());

        let strip = session.strip().unwrap();
        assert_eq!((strip.width(), strip.height()), (600, 1220));

        let ordinals: Vec<usize> = session.captures().iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_strip_uses_active_filter() {
        let mut plain = PhotoSession::default();
        let mut vintage = PhotoSession::default();
        for shade in [40, 80, 120] {
            plain.add_capture(frame(shade), FilterSelection::None).unwrap();
            vintage.add_capture(frame(shade), FilterSelection::Vintage).unwrap();
        }

        assert_ne!(plain.strip(), vintage.strip());
        // Captures themselves stay unfiltered
        assert_eq!(vintage.captures()[0].image, frame(40));
    }

    #[test]
    fn test_fourth_capture_is_ignored() {
        let mut session = PhotoSession::default();
        for shade in [1, 2, 3] {
            session.add_capture(frame(shade), FilterSelection::None).unwrap();
        }
        let strip = session.strip().cloned();
        session.take_events();

        assert_eq!(
            session.add_capture(frame(4), FilterSelection::Vintage).unwrap(),
            CaptureOutcome::Ignored
        );
        assert_eq!(session.captures().len(), 3);
        assert_eq!(session.strip().cloned(), strip);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_empty_capture_leaves_session_unchanged() {
        let mut session = PhotoSession::default();
        session.add_capture(frame(5), FilterSelection::None).unwrap();
        session.take_events();

        let result = session.add_capture(RasterImage::new_filled(0, 10, Color::BLACK), FilterSelection::None);
        assert!(matches!(result, Err(BoothError::Decode(DecodeError::EmptyImage { .. }))));
        assert_eq!(session.captures().len(), 1);
        assert!(session.take_events().is_empty());

        // The next good capture still lands in slot 1
        assert_eq!(
            session.add_capture(frame(6), FilterSelection::None).unwrap(),
            CaptureOutcome::Added { ordinal: 1 }
        );
    }

    #[test]
    fn test_clear_discards_captures_and_strip() {
        let mut session = PhotoSession::default();
        for shade in [1, 2, 3] {
            session.add_capture(frame(shade), FilterSelection::None).unwrap();
        }
        session.take_events();

        session.clear();
        assert!(session.captures().is_empty());
        assert!(session.strip().is_none());
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::CaptureCountChanged { count: 0, max: 3 }]
        );

        // Clearing an empty session queues nothing
        session.clear();
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_events_in_order() {
        let mut session = PhotoSession::default();
        session.add_capture(frame(1), FilterSelection::None).unwrap();
        session.add_capture(frame(2), FilterSelection::None).unwrap();
        session.add_capture(frame(3), FilterSelection::None).unwrap();

        let events = session.take_events();
        assert_eq!(events.len(), 7);
        assert_eq!(events[0], SessionEvent::ThumbnailAdded { ordinal: 0, image: frame(1) });
        assert_eq!(events[1], SessionEvent::CaptureCountChanged { count: 1, max: 3 });
        assert_eq!(events[5], SessionEvent::CaptureCountChanged { count: 3, max: 3 });
        match &events[6] {
            SessionEvent::StripReady(strip) => assert_eq!(Some(strip), session.strip()),
            other => panic!("expected StripReady, got {:?}", other),
        }
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut session = PhotoSession::default();
        for cycle in 0..5u8 {
            for shot in 0..3u8 {
                session.add_capture(frame(cycle * 10 + shot), FilterSelection::None).unwrap();
            }
            session.clear();
        }

        // 8 events per cycle; the first cycle's fall off the front
        let events = session.take_events();
        assert_eq!(events.len(), PhotoSession::MAX_PENDING_EVENTS);
        assert_eq!(events[0], SessionEvent::ThumbnailAdded { ordinal: 0, image: frame(10) });
        assert_eq!(
            events.last(),
            Some(&SessionEvent::CaptureCountChanged { count: 0, max: 3 })
        );
        assert!(session.take_events().is_empty());
    }
}
