use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageEncoder};
use tracing::debug;

use crate::error::{DecodeError, EncodeError, Result};
use crate::raster::types::RasterImage;

/// Quality used for intermediate capture JPEGs
pub const CAPTURE_JPEG_QUALITY: u8 = 95;

/// Decode any supported encoded image (PNG or JPEG) into an RGBA raster
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    let image = image::load_from_memory(bytes).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })?;

    let rgba = match image {
        DynamicImage::ImageRgba8(img) => img,
        _ => image.to_rgba8(),
    };

    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::EmptyImage {
            width: rgba.width(),
            height: rgba.height(),
        }
        .into());
    }

    debug!("Decoded {}x{} image from {} bytes", rgba.width(), rgba.height(), bytes.len());
    Ok(RasterImage::new(rgba))
}

/// Read and decode an image file.
///
/// The file read is the suspension point; decoding runs on the calling task.
pub async fn load<P: AsRef<Path>>(path: P) -> Result<RasterImage> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    decode(&bytes).map_err(|e| {
        debug!("Failed to decode {:?}: {}", path, e);
        e
    })
}

/// Encode as baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.as_image().clone()).to_rgb8();
    let mut out = Vec::new();

    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| EncodeError::Failed {
                format: "jpeg".to_string(),
                reason: e.to_string(),
            })?;
    }

    Ok(out)
}

/// Encode as lossless PNG, keeping alpha
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());

    PngEncoder::new(&mut out)
        .write_image(image.as_bytes(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(|e| EncodeError::Failed {
            format: "png".to_string(),
            reason: e.to_string(),
        })?;

    Ok(out.into_inner())
}

/// Push a frame through the JPEG intermediate representation and back.
///
/// Captures are stored as they would look after transfer, so filters and the
/// strip operate on the same pixels a re-decoded capture would have.
pub fn jpeg_roundtrip(image: &RasterImage, quality: u8) -> Result<RasterImage> {
    let bytes = encode_jpeg(image, quality)?;
    decode(&bytes)
}
