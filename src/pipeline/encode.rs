//! PNG output: naming rule and atomic write.
//!
//! The PNG is encoded into a temp file in the destination directory and
//! renamed over the target only once encoding succeeded. A failed encode
//! leaves no partial `<stem>.png` behind; the temp file is removed when the
//! `NamedTempFile` drops.
//!
//! The temp file is created with the same requested mode as `File::create`
//! (`0o666` on Unix, narrowed by the umask), so the renamed PNG ends up with
//! ordinary permissions rather than tempfile's private `0o600`.

use crate::error::ConvertError;
use crate::pipeline::classify::InputKind;
use image::{ImageFormat, RgbImage};
use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Where the PNG for `input` lands.
///
/// | kind          | output                              |
/// |---------------|-------------------------------------|
/// | `AlreadyPng`  | `input` itself                      |
/// | `RasterImage` | `<dir>/<stem>.png`                  |
/// | `PdfDocument` | `<dir>/<stem><page>.png`            |
/// | `Unsupported` | `None`                              |
pub fn output_path_for(input: &Path, kind: InputKind, page: u32) -> Option<PathBuf> {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    match kind {
        InputKind::AlreadyPng => return Some(input.to_path_buf()),
        InputKind::RasterImage(_) => {}
        InputKind::PdfDocument => name.push(page.to_string()),
        InputKind::Unsupported => return None,
    }
    name.push(".png");
    Some(input.with_file_name(name))
}

/// Encode `image` as PNG and atomically place it at `path`.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<(), ConvertError> {
    let write_failed = |detail: String| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        detail,
    };

    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };

    let mut tmp = temp_png_in(dir).map_err(|e| write_failed(e.to_string()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| write_failed(e.to_string()))?;
        writer.flush().map_err(|e| write_failed(e.to_string()))?;
    }

    tmp.persist(path)
        .map_err(|e| write_failed(e.error.to_string()))?;

    debug!(
        "Wrote {}x{} PNG → {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

fn temp_png_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".file2png-").suffix(".png.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}
