use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::raster::text::{unpremultiply, TextRenderer};
use crate::raster::types::{Color, RasterImage, RectF};

/// Resampling filter used when scaling images onto a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resample {
    Nearest,
    Triangle,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl From<Resample> for FilterType {
    fn from(resample: Resample) -> Self {
        match resample {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Font settings for [`DrawSurface::draw_text`]. The face is always the
/// bundled bold sans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Em size in device pixels
    pub size_px: f32,
    pub color: Color,
}

/// The minimal set of 2D drawing primitives the compositor needs.
///
/// Coordinates are continuous canvas units. A pixel is covered when its
/// center falls inside the shape, so results are exact and repeatable.
pub trait DrawSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill a rectangle, blending by the color's alpha
    fn fill_rect(&mut self, rect: RectF, color: Color);

    /// Stroke a rectangle outline centered on its edges
    fn stroke_rect(&mut self, rect: RectF, thickness: f64, color: Color) {
        let half = thickness / 2.0;
        let outer_x = rect.x - half;
        let outer_w = rect.width + thickness;

        // Horizontal bands span the corners, vertical bands fill in between
        self.fill_rect(RectF::new(outer_x, rect.y - half, outer_w, thickness), color);
        self.fill_rect(RectF::new(outer_x, rect.bottom() - half, outer_w, thickness), color);

        let inner_y = rect.y + half;
        let inner_h = (rect.height - thickness).max(0.0);
        self.fill_rect(RectF::new(outer_x, inner_y, thickness, inner_h), color);
        self.fill_rect(RectF::new(rect.right() - half, inner_y, thickness, inner_h), color);
    }

    /// Draw `image` scaled to fill `dest`
    fn draw_scaled_image(&mut self, image: &RasterImage, dest: RectF, resample: Resample);

    /// Draw a single line of text horizontally centered on `center_x`,
    /// sitting on `baseline`
    fn draw_text(&mut self, text: &str, center_x: f64, baseline: f64, style: &TextStyle);
}

/// Half-open pixel range covered by the continuous span `[lo, hi)`
pub fn pixel_span(lo: f64, hi: f64) -> (i64, i64) {
    ((lo - 0.5).ceil() as i64, (hi - 0.5).ceil() as i64)
}

/// Straight-alpha source-over of `src` onto `dst`, with extra opacity
pub fn blend_over(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0 * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    if sa >= 1.0 {
        return src;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// A [`DrawSurface`] that rasterizes straight into a [`RasterImage`]
pub struct Canvas {
    image: RasterImage,
    /// Created on the first `draw_text`
    text: Option<TextRenderer>,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self::from_image(RasterImage::new_filled(width, height, background))
    }

    /// Start from a copy of an existing image
    pub fn from_image(image: RasterImage) -> Self {
        Self { image, text: None }
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    pub fn into_image(self) -> RasterImage {
        self.image
    }

    fn clip_x(&self, (lo, hi): (i64, i64)) -> std::ops::Range<u32> {
        let w = self.image.width() as i64;
        (lo.clamp(0, w) as u32)..(hi.clamp(0, w) as u32)
    }

    fn clip_y(&self, (lo, hi): (i64, i64)) -> std::ops::Range<u32> {
        let h = self.image.height() as i64;
        (lo.clamp(0, h) as u32)..(hi.clamp(0, h) as u32)
    }

    fn text_renderer(&mut self) -> Option<&mut TextRenderer> {
        if self.text.is_none() {
            match TextRenderer::new() {
                Ok(renderer) => self.text = Some(renderer),
                Err(e) => {
                    warn!("Text rendering unavailable: {}", e);
                    return None;
                }
            }
        }
        self.text.as_mut()
    }

    fn paint(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if rgba[3] == 255 {
            self.image.set_pixel(x, y, rgba);
        } else {
            let dst = self.image.get_pixel(x, y);
            self.image.set_pixel(x, y, blend_over(dst, rgba, 1.0));
        }
    }
}

impl DrawSurface for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        if color.a == 0 {
            return;
        }
        let xs = self.clip_x(pixel_span(rect.x, rect.right()));
        let ys = self.clip_y(pixel_span(rect.y, rect.bottom()));
        let rgba = color.to_array();

        for y in ys {
            for x in xs.clone() {
                self.paint(x, y, rgba);
            }
        }
    }

    fn draw_scaled_image(&mut self, image: &RasterImage, dest: RectF, resample: Resample) {
        let (x0, x1) = pixel_span(dest.x, dest.right());
        let (y0, y1) = pixel_span(dest.y, dest.bottom());
        if x1 <= x0 || y1 <= y0 || image.is_empty() {
            return;
        }

        let target_w = (x1 - x0) as u32;
        let target_h = (y1 - y0) as u32;
        let scaled = if (target_w, target_h) == (image.width(), image.height()) {
            image.as_image().clone()
        } else {
            imageops::resize(image.as_image(), target_w, target_h, resample.into())
        };

        for y in self.clip_y((y0, y1)) {
            for x in self.clip_x((x0, x1)) {
                let src = scaled.get_pixel((x as i64 - x0) as u32, (y as i64 - y0) as u32).0;
                self.paint(x, y, src);
            }
        }
    }

    fn draw_text(&mut self, text: &str, center_x: f64, baseline: f64, style: &TextStyle) {
        let Some(renderer) = self.text_renderer() else {
            return;
        };

        let extent = renderer.measure(text, style.size_px);
        let left = center_x - extent.advance / 2.0;
        let top = baseline - extent.baseline;
        let (origin_x, origin_y) = (left.floor(), top.floor());
        let offset = (left - origin_x, top - origin_y);
        let Some(bitmap) = renderer.rasterize(text, style.size_px, style.color, offset) else {
            return;
        };

        let x0 = origin_x as i64 - bitmap.pad as i64;
        let y0 = origin_y as i64 - bitmap.pad as i64;
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);

        for (i, px) in bitmap.pixels.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let x = x0 + (i as u32 % bitmap.width) as i64;
            let y = y0 + (i as u32 / bitmap.width) as i64;
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            self.paint(x as u32, y as u32, unpremultiply([px[0], px[1], px[2], px[3]]));
        }
    }
}
