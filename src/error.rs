//! Error types for the file2png library.
//!
//! Every failure is fatal to the single conversion attempt and is returned as
//! `Err(ConvertError)`. The concrete variants carry enough context (paths,
//! page numbers, backend detail) for a useful message, while
//! [`ConvertError::kind`] folds them into four coarse buckets for callers that
//! only need to branch on the category:
//!
//! | [`ErrorKind`]        | Raised when                                        |
//! |----------------------|----------------------------------------------------|
//! | `InvalidArgument`    | the request is malformed; no I/O has happened yet  |
//! | `PageOutOfRange`     | the requested PDF page does not exist              |
//! | `UnsupportedFormat`  | the input is neither PNG, a raster image, nor PDF  |
//! | `IoFailure`          | reading, decoding, rendering or writing failed     |

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidArgument,
    PageOutOfRange,
    UnsupportedFormat,
    IoFailure,
}

/// All errors returned by the file2png library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Argument errors ───────────────────────────────────────────────────
    /// Page of interest is not a positive integer.
    #[error("Page of interest must be >= 1, got {page}")]
    InvalidArgument { page: i64 },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file is not PNG, not a recognised raster image, and not a PDF.
    #[error("Unsupported input format: '{path}'\nFirst bytes: {magic:?}")]
    UnsupportedFormat { path: PathBuf, magic: Vec<u8> },

    /// Generic I/O error while reading the input.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Raster image errors ───────────────────────────────────────────────
    /// The image decoder rejected the file.
    #[error("Failed to decode image '{path}': {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// File carries a `.pdf` extension but not the `%PDF` magic bytes.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Requested page number exceeds the actual page count.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: usize },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: u32, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Converting PDF input needs the pdfium shared library at runtime.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or its directory).\n\
  • Or place libpdfium next to the file2png executable.\n\
  • Or install it on the system library search path.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not encode or write the output PNG.
    #[error("Failed to write output file '{path}': {detail}")]
    OutputWriteFailed { path: PathBuf, detail: String },

    /// The PNG was written but the source file could not be deleted.
    #[error("Converted to '{output}' but failed to remove source '{path}': {source}")]
    SourceRemovalFailed {
        path: PathBuf,
        output: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InvalidArgument { .. } | ConvertError::InvalidConfig(_) => {
                ErrorKind::InvalidArgument
            }
            ConvertError::PageOutOfRange { .. } => ErrorKind::PageOutOfRange,
            ConvertError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ConvertError::FileNotFound { .. }
            | ConvertError::PermissionDenied { .. }
            | ConvertError::Io { .. }
            | ConvertError::ImageDecode { .. }
            | ConvertError::NotAPdf { .. }
            | ConvertError::CorruptPdf { .. }
            | ConvertError::PasswordRequired { .. }
            | ConvertError::WrongPassword { .. }
            | ConvertError::RasterisationFailed { .. }
            | ConvertError::PdfiumBindingFailed(_)
            | ConvertError::OutputWriteFailed { .. }
            | ConvertError::SourceRemovalFailed { .. } => ErrorKind::IoFailure,
        }
    }

    /// Map an `io::Error` raised while opening `path` for reading.
    pub(crate) fn from_read(path: PathBuf, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => ConvertError::PermissionDenied { path },
            _ => ConvertError::Io { path, source: e },
        }
    }
}
