//! Input classification: decide which conversion branch handles a file.
//!
//! The checks run in a fixed order and the first match wins:
//!
//! 1. `.png` extension (any case) → [`InputKind::AlreadyPng`], file not opened
//! 2. magic bytes recognised by `image` with its decoder compiled in
//!    → [`InputKind::RasterImage`]
//! 3. `.pdf` extension (any case) → [`InputKind::PdfDocument`]
//! 4. anything else → [`InputKind::Unsupported`]
//!
//! Step 2 deliberately ignores the extension, so a JPEG saved as `photo.dat`
//! is still converted. Step 3 does not look at content; the `%PDF` header is
//! checked later by [`crate::pipeline::render::check_pdf_magic`] so a wrong
//! file gets a PDF-specific error instead of a generic one.

use crate::error::ConvertError;
use crate::pipeline::render::PDF_HEADER_WINDOW;
use image::ImageFormat;
use serde::{Serialize, Serializer};
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// How many leading bytes are read for sniffing. Wide enough for the whole
/// [`PDF_HEADER_WINDOW`], which also covers every signature `image` checks.
pub const HEADER_LEN: u64 = PDF_HEADER_WINDOW as u64;

/// How many of those bytes are quoted back in an `UnsupportedFormat` error.
pub const MAGIC_LEN: usize = 16;

/// The closed set of input kinds `convert` dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Extension is `.png`; nothing to do.
    AlreadyPng,
    /// Content sniffed as a raster format whose decoder is available.
    RasterImage(ImageFormat),
    /// Extension is `.pdf`.
    PdfDocument,
    /// None of the above.
    Unsupported,
}

impl InputKind {
    /// Short stable label, used in logs and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            InputKind::AlreadyPng => "image/png",
            InputKind::RasterImage(format) => format.to_mime_type(),
            InputKind::PdfDocument => "application/pdf",
            InputKind::Unsupported => "unsupported",
        }
    }
}

impl Serialize for InputKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A classified input together with the bytes the decision was made on.
#[derive(Debug, Clone)]
pub struct Probe {
    pub kind: InputKind,
    /// Up to [`HEADER_LEN`] leading bytes. Empty for `.png` input, which is
    /// classified without opening the file.
    pub header: Vec<u8>,
}

impl Probe {
    /// The first [`MAGIC_LEN`] header bytes, for error messages.
    pub fn magic(&self) -> Vec<u8> {
        self.header[..self.header.len().min(MAGIC_LEN)].to_vec()
    }
}

/// Classify the file at `path`.
pub fn classify(path: &Path) -> Result<InputKind, ConvertError> {
    probe(path).map(|p| p.kind)
}

/// Classify the file at `path`, keeping the sniffed header.
pub fn probe(path: &Path) -> Result<Probe, ConvertError> {
    if has_extension(path, "png") {
        debug!("{} classified by extension as PNG", path.display());
        return Ok(Probe {
            kind: InputKind::AlreadyPng,
            header: Vec::new(),
        });
    }

    let header = read_header(path)?;
    let kind = kind_for(path, &header);
    debug!("{} classified as {}", path.display(), kind.label());
    Ok(Probe { kind, header })
}

/// Pure classification from a path and its leading bytes.
pub fn kind_for(path: &Path, header: &[u8]) -> InputKind {
    if has_extension(path, "png") {
        return InputKind::AlreadyPng;
    }
    match image::guess_format(header) {
        Ok(format) if format.reading_enabled() => return InputKind::RasterImage(format),
        Ok(format) => debug!("Sniffed {:?} but its decoder is not compiled in", format),
        Err(_) => {}
    }
    if has_extension(path, "pdf") {
        return InputKind::PdfDocument;
    }
    InputKind::Unsupported
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn read_header(path: &Path) -> Result<Vec<u8>, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::from_read(path.to_path_buf(), e))?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN)
        .read_to_end(&mut header)
        .map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F'];
    const GIF_MAGIC: &[u8] = b"GIF89a\x01\x00\x01\x00";
    const PDF_MAGIC: &[u8] = b"%PDF-1.7\n";

    #[test]
    fn png_extension_wins_regardless_of_content() {
        assert_eq!(kind_for(Path::new("a.png"), PDF_MAGIC), InputKind::AlreadyPng);
        assert_eq!(kind_for(Path::new("A.PNG"), b""), InputKind::AlreadyPng);
        assert_eq!(kind_for(Path::new("dir/x.Png"), JPEG_MAGIC), InputKind::AlreadyPng);
    }

    #[test]
    fn raster_sniffed_from_content_not_extension() {
        assert_eq!(
            kind_for(Path::new("photo.dat"), JPEG_MAGIC),
            InputKind::RasterImage(ImageFormat::Jpeg)
        );
        assert_eq!(
            kind_for(Path::new("anim.gif"), GIF_MAGIC),
            InputKind::RasterImage(ImageFormat::Gif)
        );
        // PNG bytes under another name still go through the raster branch.
        assert_eq!(
            kind_for(Path::new("scan.jpg"), PNG_MAGIC),
            InputKind::RasterImage(ImageFormat::Png)
        );
    }

    #[test]
    fn raster_content_beats_pdf_extension() {
        assert_eq!(
            kind_for(Path::new("odd.pdf"), JPEG_MAGIC),
            InputKind::RasterImage(ImageFormat::Jpeg)
        );
    }

    #[test]
    fn pdf_by_extension() {
        assert_eq!(kind_for(Path::new("doc.pdf"), PDF_MAGIC), InputKind::PdfDocument);
        assert_eq!(kind_for(Path::new("DOC.PDF"), PDF_MAGIC), InputKind::PdfDocument);
        // Extension alone decides; content is checked when rendering.
        assert_eq!(kind_for(Path::new("doc.pdf"), b"hello"), InputKind::PdfDocument);
    }

    #[test]
    fn everything_else_unsupported() {
        assert_eq!(kind_for(Path::new("notes.txt"), b"hello"), InputKind::Unsupported);
        assert_eq!(kind_for(Path::new("noext"), b""), InputKind::Unsupported);
        assert_eq!(kind_for(Path::new("pdf"), PDF_MAGIC), InputKind::Unsupported);
    }

    #[test]
    fn labels() {
        assert_eq!(InputKind::AlreadyPng.label(), "image/png");
        assert_eq!(InputKind::RasterImage(ImageFormat::Jpeg).label(), "image/jpeg");
        assert_eq!(InputKind::PdfDocument.label(), "application/pdf");
        assert_eq!(InputKind::Unsupported.label(), "unsupported");
    }

    #[test]
    fn probe_png_does_not_open_file() {
        // The path does not exist; classification by extension must not care.
        let p = probe(Path::new("/definitely/not/here.png")).unwrap();
        assert_eq!(p.kind, InputKind::AlreadyPng);
        assert!(p.header.is_empty());
    }

    #[test]
    fn probe_missing_file_is_not_found() {
        let err = probe(Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[test]
    fn probe_reads_at_most_header_len() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 4096]).unwrap();
        let p = probe(&path).unwrap();
        assert_eq!(p.header.len(), HEADER_LEN as usize);
        assert_eq!(p.kind, InputKind::Unsupported);
        assert_eq!(p.magic().len(), MAGIC_LEN);
    }

    #[test]
    fn header_covers_late_pdf_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefixed.pdf");
        let mut bytes = vec![b'\n'; 900];
        bytes.extend_from_slice(b"%PDF-1.7\n");
        std::fs::write(&path, &bytes).unwrap();

        let p = probe(&path).unwrap();
        assert_eq!(p.kind, InputKind::PdfDocument);
        assert!(crate::pipeline::render::check_pdf_magic(&path, &p.header).is_ok());
    }
}
