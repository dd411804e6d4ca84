//! Request types for a single file-to-PNG conversion.
//!
//! A [`ConversionRequest`] is built via its [`ConversionRequestBuilder`] right
//! before calling [`crate::convert`] and discarded afterwards. The builder is
//! where caller input is validated, so a malformed page number surfaces as
//! [`ConvertError::InvalidArgument`] before any file is touched.

use crate::error::ConvertError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolution a PDF page is rendered at when nothing else is asked for.
///
/// 72 DPI maps one PDF point to one pixel, so an A4 page becomes 595 × 842 px.
pub const DEFAULT_DPI: u32 = 72;

/// Inclusive DPI bounds accepted by the builder.
pub const DPI_RANGE: (u32, u32) = (72, 400);

/// One conversion: which file, which page, and what to do with the source.
///
/// # Example
/// ```rust
/// use file2png::ConversionRequest;
///
/// let request = ConversionRequest::builder("scan.pdf")
///     .page(2)
///     .dpi(150)
///     .build()
///     .unwrap();
/// assert_eq!(request.page, 2);
/// assert!(!request.delete_source);
/// ```
#[derive(Clone)]
pub struct ConversionRequest {
    /// Input file. Made absolute before use.
    pub input_path: PathBuf,

    /// Page of interest (1-indexed). Only meaningful for PDF input. Default: 1.
    pub page: u32,

    /// Remove the input file after a successful conversion. Default: false.
    ///
    /// Never applied to pass-through PNG input, where input and output are the
    /// same file.
    pub delete_source: bool,

    /// Rendering DPI for PDF pages. Range: 72–400. Default: 72.
    pub dpi: u32,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,
}

impl fmt::Debug for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRequest")
            .field("input_path", &self.input_path)
            .field("page", &self.page)
            .field("delete_source", &self.delete_source)
            .field("dpi", &self.dpi)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ConversionRequest {
    /// A request with every option at its default.
    pub fn new(input_path: impl AsRef<Path>) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            page: 1,
            delete_source: false,
            dpi: DEFAULT_DPI,
            password: None,
        }
    }

    /// Create a new builder for `ConversionRequest`.
    pub fn builder(input_path: impl AsRef<Path>) -> ConversionRequestBuilder {
        ConversionRequestBuilder {
            request: Self::new(input_path),
            page: 1,
        }
    }

    /// Check the invariants that must hold before any I/O.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.page == 0 {
            return Err(ConvertError::InvalidArgument { page: 0 });
        }
        let (lo, hi) = DPI_RANGE;
        if self.dpi < lo || self.dpi > hi {
            return Err(ConvertError::InvalidConfig(format!(
                "DPI must be {lo}–{hi}, got {}",
                self.dpi
            )));
        }
        Ok(())
    }
}

/// Builder for [`ConversionRequest`].
///
/// The page is held as a signed integer until [`build`](Self::build) so that
/// zero and negative input from callers (the CLI, mostly) is reported as
/// [`ConvertError::InvalidArgument`] rather than lost to a type conversion.
#[derive(Debug)]
pub struct ConversionRequestBuilder {
    request: ConversionRequest,
    page: i64,
}

impl ConversionRequestBuilder {
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn delete_source(mut self, v: bool) -> Self {
        self.request.delete_source = v;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.request.dpi = dpi.clamp(DPI_RANGE.0, DPI_RANGE.1);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.request.password = Some(pwd.into());
        self
    }

    /// Build the request, validating constraints.
    pub fn build(mut self) -> Result<ConversionRequest, ConvertError> {
        self.request.page = u32::try_from(self.page)
            .ok()
            .filter(|&p| p >= 1)
            .ok_or(ConvertError::InvalidArgument { page: self.page })?;
        self.request.validate()?;
        Ok(self.request)
    }
}
