//! # Raster Module
//!
//! Pixel buffers and everything that reads, writes or draws onto them:
//! the [`RasterImage`] type, PNG/JPEG codecs, and the [`DrawSurface`]
//! primitives (fill, stroke, scaled image, text) used by the strip compositor.

pub mod canvas;
pub mod codec;
pub mod text;
pub mod types;

pub use canvas::{Canvas, DrawSurface, Resample, TextStyle};
pub use text::TextRenderer;
pub use types::{Color, RasterImage, RectF};
