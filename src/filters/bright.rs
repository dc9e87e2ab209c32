use tracing::debug;

use crate::{
    filters::selection::StaticFilterKind,
    filters::traits::{brighten, PixelFilter},
    raster::RasterImage,
};

/// Gain applied to every color channel
pub const BRIGHT_GAIN: f64 = 1.3;

/// Uniform 30% brightness boost
pub struct BrightFilter;

impl BrightFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrightFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelFilter for BrightFilter {
    fn name(&self) -> &str {
        "bright"
    }

    fn description(&self) -> &str {
        "Lifts every color channel by 30%"
    }

    fn kind(&self) -> StaticFilterKind {
        StaticFilterKind::Bright
    }

    fn apply_in_place(&self, image: &mut RasterImage) {
        debug!("Applying bright filter to {}x{}", image.width(), image.height());
        brighten(image, BRIGHT_GAIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;

    #[test]
    fn test_scales_and_clamps() {
        let mut image = RasterImage::new_filled(2, 1, Color::rgba(100, 10, 0, 128));
        image.set_pixel(1, 0, [200, 255, 196, 255]);

        let filtered = BrightFilter::new().apply(&image);
        assert_eq!(filtered.get_pixel(0, 0), [130, 13, 0, 128]);
        assert_eq!(filtered.get_pixel(1, 0), [255, 255, 254, 255]);
    }
}
