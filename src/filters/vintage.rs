use tracing::debug;

use crate::{
    filters::selection::StaticFilterKind,
    filters::traits::{clamp_channel, scale_channel, PixelFilter},
    raster::RasterImage,
};

/// Sepia matrix rows, applied to (r, g, b)
const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Per-channel contrast applied after the sepia tone
const CONTRAST: [f64; 3] = [1.1, 1.05, 0.9];

/// Warm sepia tone followed by a slight red-lifting contrast pass
pub struct VintageFilter;

impl VintageFilter {
    pub fn new() -> Self {
        Self
    }

    /// Transform one RGB triple. Each pass is stored as a byte before the next.
    pub fn transform(rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb.map(f64::from);
        let mut out = [0u8; 3];
        for (channel, row) in SEPIA.iter().enumerate() {
            let toned = clamp_channel(row[0] * r + row[1] * g + row[2] * b);
            out[channel] = scale_channel(toned as f64, CONTRAST[channel]);
        }
        out
    }
}

impl Default for VintageFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelFilter for VintageFilter {
    fn name(&self) -> &str {
        "vintage"
    }

    fn description(&self) -> &str {
        "Nostalgic sepia tone with a warm contrast lift"
    }

    fn kind(&self) -> StaticFilterKind {
        StaticFilterKind::Vintage
    }

    fn apply_in_place(&self, image: &mut RasterImage) {
        debug!("Applying vintage filter to {}x{}", image.width(), image.height());
        for px in image.as_bytes_mut().chunks_exact_mut(4) {
            let [r, g, b] = Self::transform([px[0], px[1], px[2]]);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }
}
