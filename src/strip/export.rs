use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{InvalidInputError, Result};
use crate::raster::codec;
use crate::raster::RasterImage;

/// Timestamp part of generated strip names; colons are not filename-safe
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// `<prefix>-YYYY-MM-DDTHH-MM-SS.png`
pub fn suggested_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.png", prefix, now.format(TIMESTAMP_FORMAT))
}

/// Accepts a bare file name only: no separators, no `.` or `..`
fn check_filename(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) || Path::new(name).file_name() != Some(OsStr::new(name)) {
        return Err(InvalidInputError::InvalidFilename {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Encode `strip` as PNG and write it into `directory`.
///
/// Without an explicit `filename` a timestamped name is generated from
/// `prefix`. An explicit name must be a bare file name; anything that would
/// leave `directory` is rejected before touching the filesystem. Returns the
/// path written.
pub async fn save_strip(
    strip: &RasterImage,
    directory: &Path,
    prefix: &str,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let name = match filename {
        Some(name) => name.to_string(),
        None => suggested_filename(prefix, Utc::now()),
    };
    check_filename(&name)?;
    let path = directory.join(name);

    let bytes = codec::encode_png(strip)?;
    tokio::fs::create_dir_all(directory).await?;
    tokio::fs::write(&path, &bytes).await?;

    info!("Saved {}x{} strip to {:?} ({} bytes)", strip.width(), strip.height(), path, bytes.len());
    Ok(path)
}
