use std::path::Path;

use tracing::{debug, info};

use crate::error::{AcquisitionError, Result};
use crate::raster::{codec, RasterImage};

/// Produces one RGBA frame on demand.
///
/// The booth only asks for a frame when a capture or preview is requested;
/// it never polls.
pub trait FrameSource {
    /// Start the source. Acquiring an active source is a no-op.
    fn acquire(&mut self) -> Result<()>;

    /// Stop the source and free whatever backs it
    fn release(&mut self);

    fn is_active(&self) -> bool;

    /// The frame currently showing
    fn current_frame(&mut self) -> Result<RasterImage>;

    /// Called after a frame has been captured; live sources move on by themselves
    fn advance(&mut self) {}
}

/// A source that always shows the same still image
#[derive(Debug, Clone)]
pub struct StillFrameSource {
    frame: RasterImage,
    active: bool,
}

impl StillFrameSource {
    pub fn new(frame: RasterImage) -> Self {
        Self {
            frame,
            active: false,
        }
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(codec::load(path).await?))
    }
}

impl FrameSource for StillFrameSource {
    fn acquire(&mut self) -> Result<()> {
        if self.frame.is_empty() {
            return Err(AcquisitionError::Unavailable {
                reason: "still image has no pixels".to_string(),
            }
            .into());
        }
        self.active = true;
        Ok(())
    }

    fn release(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn current_frame(&mut self) -> Result<RasterImage> {
        if !self.active {
            return Err(AcquisitionError::Released.into());
        }
        Ok(self.frame.clone())
    }
}

/// Cycles through a fixed list of frames, one per capture
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    frames: Vec<RasterImage>,
    cursor: usize,
    active: bool,
}

impl SequenceSource {
    pub fn new(frames: Vec<RasterImage>) -> Self {
        Self {
            frames,
            cursor: 0,
            active: false,
        }
    }

    /// Decode each file in order. Decodes run one after another.
    pub async fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            let frame = codec::load(path).await?;
            debug!("Loaded frame {}x{} from {:?}", frame.width(), frame.height(), path.as_ref());
            frames.push(frame);
        }
        Ok(Self::new(frames))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame currently showing
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl FrameSource for SequenceSource {
    fn acquire(&mut self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(AcquisitionError::Unavailable {
                reason: "frame sequence is empty".to_string(),
            }
            .into());
        }
        if !self.active {
            info!("Frame sequence started ({} frames)", self.frames.len());
        }
        self.active = true;
        Ok(())
    }

    fn release(&mut self) {
        if self.active {
            info!("Frame sequence released");
        }
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn current_frame(&mut self) -> Result<RasterImage> {
        if !self.active {
            return Err(AcquisitionError::Released.into());
        }
        Ok(self.frames[self.cursor].clone())
    }

    fn advance(&mut self) {
        if !self.frames.is_empty() {
            self.cursor = (self.cursor + 1) % self.frames.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoothError;
    use crate::raster::Color;
    use tempfile::tempdir;

    #[test]
    fn test_still_source_requires_acquire() {
        let mut source = StillFrameSource::new(RasterImage::new_filled(4, 3, Color::BLACK));
        assert!(matches!(
            source.current_frame(),
            Err(BoothError::Acquisition(AcquisitionError::Released))
        ));

        source.acquire().unwrap();
        assert_eq!(source.current_frame().unwrap().width(), 4);

        source.release();
        assert!(!source.is_active());
        assert!(source.current_frame().is_err());
    }

    #[test]
    fn test_empty_still_is_unavailable() {
        let mut source = StillFrameSource::new(RasterImage::new_filled(0, 0, Color::BLACK));
        assert!(matches!(
            source.acquire(),
            Err(BoothError::Acquisition(AcquisitionError::Unavailable { .. }))
        ));
        assert!(!source.is_active());
    }

    #[test]
    fn test_sequence_cycles_on_advance() {
        let frames = vec![
            RasterImage::new_filled(1, 1, Color::rgb(1, 0, 0)),
            RasterImage::new_filled(1, 1, Color::rgb(2, 0, 0)),
        ];
        let mut source = SequenceSource::new(frames);
        source.acquire().unwrap();

        // Looking does not move the sequence
        assert_eq!(source.current_frame().unwrap().get_pixel(0, 0)[0], 1);
        assert_eq!(source.current_frame().unwrap().get_pixel(0, 0)[0], 1);

        source.advance();
        assert_eq!(source.current_frame().unwrap().get_pixel(0, 0)[0], 2);
        source.advance();
        assert_eq!(source.position(), 0);
    }

    #[test]
    fn test_empty_sequence_is_unavailable() {
        let mut source = SequenceSource::default();
        assert!(source.acquire().is_err());
        source.advance();
        assert_eq!(source.position(), 0);
    }

    #[tokio::test]
    async fn test_sequence_from_files() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for (i, color) in [Color::WHITE, Color::CORAL].iter().enumerate() {
            let path = dir.path().join(format!("frame{}.png", i));
            let bytes = codec::encode_png(&RasterImage::new_filled(3, 2, *color)).unwrap();
            std::fs::write(&path, bytes).unwrap();
            paths.push(path);
        }

        let mut source = SequenceSource::from_files(&paths).await.unwrap();
        assert_eq!(source.len(), 2);
        source.acquire().unwrap();
        source.advance();
        assert_eq!(source.current_frame().unwrap().get_pixel(0, 0), Color::CORAL.to_array());
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = SequenceSource::from_files(&[dir.path().join("nope.png")]).await;
        assert!(matches!(result, Err(BoothError::Io(_))));
    }
}
