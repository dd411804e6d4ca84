//! Raster image decoding: any sniffed image format → 3-channel RGB.
//!
//! The format comes from [`crate::pipeline::classify`], so the decoder is
//! picked from the content rather than the extension. Alpha and palette
//! information is dropped by flattening to `RgbImage`.

use crate::error::ConvertError;
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Decode `path` as `format` and flatten it to RGB.
///
/// The file handle and the intermediate `DynamicImage` are dropped before
/// returning; only the RGB buffer survives.
pub fn decode_rgb(path: &Path, format: ImageFormat) -> Result<RgbImage, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::from_read(path.to_path_buf(), e))?;

    let decoded = image::load(BufReader::new(file), format).map_err(|e| {
        ConvertError::ImageDecode {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    debug!(
        "Decoded {:?} {} → {}x{} px ({:?})",
        format,
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    Ok(decoded.into_rgb8())
}
