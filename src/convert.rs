//! The conversion entry point.
//!
//! [`convert`] runs synchronously from start to finish: validate, classify,
//! dispatch on the [`InputKind`], write, and optionally delete the source.
//! Nothing is retried; the first failure is returned.

use crate::config::ConversionRequest;
use crate::engine;
use crate::error::ConvertError;
use crate::output::ConversionOutput;
use crate::pipeline::classify::{self, InputKind};
use crate::pipeline::{encode, raster, render};
use image::RgbImage;
use std::path::Path;
use tracing::{debug, info, info_span};

/// Convert the file named by `request` to PNG.
///
/// # Returns
/// The absolute path of the PNG (plus reporting detail). For `.png` input
/// that is the input path itself and nothing is written.
///
/// # Errors
/// - [`ConvertError::InvalidArgument`] / [`ConvertError::InvalidConfig`]
///   before any filesystem access
/// - [`ConvertError::UnsupportedFormat`] when the input is neither PNG, a
///   decodable raster image, nor a `.pdf`
/// - [`ConvertError::PageOutOfRange`] when the PDF is too short
/// - any I/O, decode, render or write failure
///
/// # Example
/// ```rust,no_run
/// use file2png::{convert, ConversionRequest};
///
/// let request = ConversionRequest::builder("scan.pdf").page(2).build()?;
/// let output = convert(&request)?;
/// assert!(output.output_path.ends_with("scan2.png"));
/// # Ok::<(), file2png::ConvertError>(())
/// ```
pub fn convert(request: &ConversionRequest) -> Result<ConversionOutput, ConvertError> {
    request.validate()?;

    let input = std::path::absolute(&request.input_path).map_err(|e| ConvertError::Io {
        path: request.input_path.clone(),
        source: e,
    })?;

    let span = info_span!("convert", path = %input.display(), page = request.page);
    let _guard = span.enter();

    ensure_regular_file(&input)?;

    let probe = classify::probe(&input)?;
    let kind = probe.kind;

    let image = match kind {
        InputKind::AlreadyPng => {
            info!("File {} is already PNG", display_name(&input));
            return Ok(ConversionOutput {
                input_path: input.clone(),
                output_path: input,
                kind,
                page: None,
                width: None,
                height: None,
                source_removed: false,
            });
        }
        InputKind::RasterImage(format) => raster::decode_rgb(&input, format)?,
        InputKind::PdfDocument => {
            render::check_pdf_magic(&input, &probe.header)?;
            let pdfium = engine::bind_pdfium()?;
            render::render_page(
                &pdfium,
                &input,
                request.page,
                request.dpi,
                request.password.as_deref(),
            )?
        }
        InputKind::Unsupported => {
            return Err(ConvertError::UnsupportedFormat {
                path: input,
                magic: probe.magic(),
            });
        }
    };

    let Some(output_path) = encode::output_path_for(&input, kind, request.page) else {
        return Err(ConvertError::UnsupportedFormat {
            path: input,
            magic: probe.magic(),
        });
    };

    encode::write_png(&image, &output_path)?;
    log_written(kind, request.page, &output_path, &image);

    let source_removed = if request.delete_source && output_path != input {
        std::fs::remove_file(&input).map_err(|e| ConvertError::SourceRemovalFailed {
            path: input.clone(),
            output: output_path.clone(),
            source: e,
        })?;
        info!("Original file '{}' has been deleted", display_name(&input));
        true
    } else {
        false
    };

    Ok(ConversionOutput {
        input_path: input,
        output_path,
        kind,
        page: matches!(kind, InputKind::PdfDocument).then_some(request.page),
        width: Some(image.width()),
        height: Some(image.height()),
        source_removed,
    })
}

/// Classify `path` without converting it.
///
/// Returns what [`convert`] would dispatch on. Unlike [`convert`], an
/// unsupported file is reported as [`InputKind::Unsupported`] rather than an
/// error.
pub fn inspect(path: impl AsRef<Path>) -> Result<InputKind, ConvertError> {
    let path = path.as_ref();
    ensure_regular_file(path)?;
    classify::classify(path)
}

/// Number of pages in a PDF, without rendering any of them.
pub fn pdf_page_count(
    path: impl AsRef<Path>,
    password: Option<&str>,
) -> Result<usize, ConvertError> {
    let path = path.as_ref();
    ensure_regular_file(path)?;
    let pdfium = engine::bind_pdfium()?;
    render::page_count(&pdfium, path, password)
}

/// Rasterise one PDF page exactly as [`convert`] would, without writing it.
pub fn render_pdf_page(
    path: impl AsRef<Path>,
    page: u32,
    dpi: u32,
    password: Option<&str>,
) -> Result<RgbImage, ConvertError> {
    if page == 0 {
        return Err(ConvertError::InvalidArgument { page: 0 });
    }
    let path = path.as_ref();
    ensure_regular_file(path)?;
    let pdfium = engine::bind_pdfium()?;
    render::render_page(&pdfium, path, page, dpi, password)
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn ensure_regular_file(path: &Path) -> Result<(), ConvertError> {
    let meta =
        std::fs::metadata(path).map_err(|e| ConvertError::from_read(path.to_path_buf(), e))?;
    if !meta.is_file() {
        return Err(ConvertError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

fn log_written(kind: InputKind, page: u32, output_path: &Path, image: &RgbImage) {
    let name = display_name(output_path);
    match kind {
        InputKind::PdfDocument => info!("Page {} from PDF converted to {}", page, name),
        _ => info!("File converted to {}", name),
    }
    debug!("Output is {}x{} RGB", image.width(), image.height());
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
