use image::imageops;
use tracing::debug;

use crate::{
    filters::selection::StaticFilterKind,
    filters::traits::{brighten, PixelFilter},
    raster::{canvas::blend_over, RasterImage},
};

/// Gaussian sigma of the softening blur, in pixels
pub const SMOOTH_BLUR_SIGMA: f32 = 0.5;
/// Opacity of the blurred layer drawn back over the original
pub const SMOOTH_BLEND_OPACITY: f32 = 0.7;
/// Brightness gain after blending
pub const SMOOTH_GAIN: f64 = 1.1;

/// Beauty filter: a slight blur composited over the image, then a 10% lift
pub struct SmoothFilter {
    sigma: f32,
}

impl SmoothFilter {
    pub fn new() -> Self {
        Self {
            sigma: SMOOTH_BLUR_SIGMA,
        }
    }

    pub fn with_sigma(sigma: f32) -> Self {
        Self { sigma: sigma.max(0.01) }
    }
}

impl Default for SmoothFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelFilter for SmoothFilter {
    fn name(&self) -> &str {
        "smooth"
    }

    fn description(&self) -> &str {
        "Soft-focus beauty pass: gentle blur blended over the photo, then brightened"
    }

    fn kind(&self) -> StaticFilterKind {
        StaticFilterKind::Smooth
    }

    fn apply_in_place(&self, image: &mut RasterImage) {
        debug!(
            "Applying smooth filter (sigma {:.2}) to {}x{}",
            self.sigma,
            image.width(),
            image.height()
        );
        if image.is_empty() {
            return;
        }

        let blurred = imageops::blur(image.as_image(), self.sigma);

        for (dst, src) in image
            .as_bytes_mut()
            .chunks_exact_mut(4)
            .zip(blurred.as_raw().chunks_exact(4))
        {
            let out = blend_over(
                [dst[0], dst[1], dst[2], dst[3]],
                [src[0], src[1], src[2], src[3]],
                SMOOTH_BLEND_OPACITY,
            );
            dst.copy_from_slice(&out);
        }

        brighten(image, SMOOTH_GAIN);
    }
}
