use crate::{filters::selection::StaticFilterKind, raster::RasterImage};

/// Core trait that all static (baked-in) filters implement
pub trait PixelFilter: Send + Sync {
    /// Returns the unique name of this filter
    fn name(&self) -> &str;

    /// Returns a human-readable description of this filter
    fn description(&self) -> &str;

    /// Which selectable kind this filter implements
    fn kind(&self) -> StaticFilterKind;

    /// Transform a working copy in place.
    ///
    /// Callers own `image` outright; it is never a stored capture.
    fn apply_in_place(&self, image: &mut RasterImage);

    /// Return a filtered copy, leaving `image` untouched
    fn apply(&self, image: &RasterImage) -> RasterImage {
        let mut working = image.clone();
        self.apply_in_place(&mut working);
        working
    }
}

/// Scale a channel, clamp to `[0, 255]` and truncate on store
#[inline]
pub(crate) fn scale_channel(value: f64, factor: f64) -> u8 {
    clamp_channel(value * factor)
}

#[inline]
pub(crate) fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Multiply R, G and B of every pixel by `factor`; alpha untouched
pub(crate) fn brighten(image: &mut RasterImage, factor: f64) {
    for px in image.as_bytes_mut().chunks_exact_mut(4) {
        px[0] = scale_channel(px[0] as f64, factor);
        px[1] = scale_channel(px[1] as f64, factor);
        px[2] = scale_channel(px[2] as f64, factor);
    }
}
