use crate::raster::RasterImage;

/// One digitized frame and its position in the strip (0 is the top slot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub ordinal: usize,
    pub image: RasterImage,
}

impl Capture {
    pub fn new(ordinal: usize, image: RasterImage) -> Self {
        Self { ordinal, image }
    }
}
