use tracing::{debug, info};

use crate::config::StripConfig;
use crate::error::{InvalidInputError, Result};
use crate::filters::{self, FilterSelection};
use crate::raster::{Canvas, DrawSurface, RasterImage, TextStyle};
use crate::strip::layout::StripLayout;

/// Distance from the bottom edge of the strip to the caption baseline
pub const CAPTION_BASELINE_OFFSET: f64 = 15.0;

/// Rasterizes three photos into the vertical photo-strip layout.
///
/// Pure with respect to its inputs: the same photos and filter always
/// produce the same bytes.
pub struct StripCompositor {
    layout: StripLayout,
    config: StripConfig,
}

impl StripCompositor {
    pub fn new(config: StripConfig) -> Self {
        Self {
            layout: StripLayout::STANDARD,
            config,
        }
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    /// Compose exactly three photos, top to bottom in the given order.
    ///
    /// Static filters are baked into each photo first; overlay selections
    /// leave the photos untouched.
    pub fn compose(&self, photos: &[RasterImage], filter: FilterSelection) -> Result<RasterImage> {
        if photos.len() != StripLayout::SLOT_COUNT {
            return Err(InvalidInputError::PhotoCount {
                expected: StripLayout::SLOT_COUNT,
                actual: photos.len(),
            }
            .into());
        }

        // Validates every size before any pixel work
        let placements = photos
            .iter()
            .enumerate()
            .map(|(i, photo)| self.layout.place(i, photo.width(), photo.height()))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Composing {}x{} strip with '{}' filter",
            self.layout.width,
            self.layout.height(),
            filter
        );

        let kind = filter.static_kind();
        let mut canvas = Canvas::new(self.layout.width, self.layout.height(), self.config.background);

        for (photo, placement) in photos.iter().zip(&placements) {
            let filtered = filters::apply(photo, kind);
            debug!(
                "Slot {}: {}x{} source drawn at ({:.2}, {:.2}) size {:.2}x{:.2}",
                placement.ordinal,
                photo.width(),
                photo.height(),
                placement.draw.x,
                placement.draw.y,
                placement.draw.width,
                placement.draw.height
            );

            canvas.fill_rect(placement.slot, self.config.background);
            canvas.draw_scaled_image(&filtered, placement.draw, self.config.resample);
            canvas.stroke_rect(placement.slot, self.layout.border as f64, self.config.border_color);
        }

        let style = TextStyle {
            size_px: self.config.caption_size,
            color: self.config.caption_color,
        };
        canvas.draw_text(
            &self.config.caption,
            self.layout.width as f64 / 2.0,
            self.layout.height() as f64 - CAPTION_BASELINE_OFFSET,
            &style,
        );

        Ok(canvas.into_image())
    }
}

impl Default for StripCompositor {
    fn default() -> Self {
        Self::new(StripConfig::default())
    }
}
