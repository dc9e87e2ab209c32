//! # Filter System
//!
//! Static pixel filters that get baked into the photo strip, plus the
//! selection types shared with the overlay animator.
//!
//! ## Built-in Filters
//!
//! - **Vintage**: sepia tone matrix followed by a per-channel contrast pass
//! - **Bright**: uniform 1.3x gain on R, G and B
//! - **Smooth**: slight Gaussian blur blended at 70% over the photo, then 1.1x gain
//!
//! Hearts, Stars and Sparkles are selectable too, but they are live-preview
//! overlays (see [`crate::overlay`]) and never touch pixels here.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kalakini_booth::filters::{self, StaticFilterKind};
//! use kalakini_booth::raster::{Color, RasterImage};
//!
//! let photo = RasterImage::new_filled(640, 480, Color::rgb(120, 90, 60));
//! let toned = filters::apply(&photo, StaticFilterKind::Vintage);
//! assert_eq!(toned.width(), 640);
//! ```

pub mod registry;
pub mod selection;
pub mod traits;

mod bright;
mod smooth;
mod vintage;

pub use bright::BrightFilter;
pub use registry::FilterRegistry;
pub use selection::{FilterSelection, OverlayKind, StaticFilterKind};
pub use smooth::SmoothFilter;
pub use traits::PixelFilter;
pub use vintage::VintageFilter;

use crate::error::Result;
use crate::raster::{codec, RasterImage};

/// Apply a static filter, returning a new image. `None` returns an
/// identical copy; the input is never modified.
pub fn apply(image: &RasterImage, kind: StaticFilterKind) -> RasterImage {
    match kind {
        StaticFilterKind::None => image.clone(),
        StaticFilterKind::Vintage => VintageFilter::new().apply(image),
        StaticFilterKind::Bright => BrightFilter::new().apply(image),
        StaticFilterKind::Smooth => SmoothFilter::new().apply(image),
    }
}

/// Decode encoded image bytes and apply a filter.
///
/// Fails with a decode error when the bytes cannot be rasterized.
pub fn apply_encoded(bytes: &[u8], kind: StaticFilterKind) -> Result<RasterImage> {
    let image = codec::decode(bytes)?;
    Ok(apply(&image, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoothError;
    use crate::raster::Color;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut image = RasterImage::new_filled(width, height, Color::BLACK);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                image.set_pixel(x, y, [r, g, 255 - r, 200]);
            }
        }
        image
    }

    #[test]
    fn test_none_is_identity() {
        let image = gradient(17, 9);
        assert_eq!(apply(&image, StaticFilterKind::None), image);
    }

    #[test]
    fn test_channels_stay_in_range_at_full_white() {
        let white = RasterImage::new_filled(4, 4, Color::WHITE);
        for kind in [StaticFilterKind::Vintage, StaticFilterKind::Bright, StaticFilterKind::Smooth] {
            let filtered = apply(&white, kind);
            assert_eq!((filtered.width(), filtered.height()), (4, 4));
            // u8 storage already bounds the values; alpha must survive untouched
            assert!(filtered.as_image().pixels().all(|p| p.0[3] == 255), "{}", kind);
        }
        let bright = apply(&white, StaticFilterKind::Bright);
        assert!(bright.as_image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_filters_do_not_mutate_input() {
        let image = gradient(12, 12);
        let before = image.clone();
        for kind in [StaticFilterKind::Vintage, StaticFilterKind::Bright, StaticFilterKind::Smooth] {
            let _ = apply(&image, kind);
        }
        assert_eq!(image, before);
    }

    #[test]
    fn test_apply_encoded_rejects_garbage() {
        let result = apply_encoded(&[0x89, b'P', b'N', b'G', 0, 0], StaticFilterKind::Vintage);
        assert!(matches!(result, Err(BoothError::Decode(_))));
    }

    #[test]
    fn test_apply_encoded_filters_pixels() {
        let image = RasterImage::new_filled(3, 3, Color::rgb(100, 100, 100));
        let bytes = codec::encode_png(&image).unwrap();
        let filtered = apply_encoded(&bytes, StaticFilterKind::Vintage).unwrap();
        assert_eq!(filtered.get_pixel(1, 1), [148, 126, 83, 255]);
    }
}
