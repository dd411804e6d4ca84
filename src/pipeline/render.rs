//! PDF rasterisation: render one page to an RGB buffer via pdfium.
//!
//! The page is rendered at `dpi / 72` pixels per PDF point, so the default
//! 72 DPI yields one pixel per point. pdfium hands back a BGRA bitmap painted
//! over a white background; the alpha channel is dropped on the way out.
//!
//! The `PdfDocument` borrows the `Pdfium` instance and is dropped at the end
//! of each function, closing the document on success and error alike.

use crate::error::ConvertError;
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// How far into the file the `%PDF` marker may appear. pdfium tolerates a
/// BOM or other junk in front of the header as long as it fits in here.
pub const PDF_HEADER_WINDOW: usize = 1024;

/// Reject `.pdf` files with no `%PDF` marker in their first
/// [`PDF_HEADER_WINDOW`] bytes.
///
/// pdfium would fail on them anyway, but with a far less helpful message.
/// An empty or very short header is let through for pdfium to judge.
pub fn check_pdf_magic(pdf_path: &Path, header: &[u8]) -> Result<(), ConvertError> {
    if header.len() < 4 {
        return Ok(());
    }
    let window = &header[..header.len().min(PDF_HEADER_WINDOW)];
    if !window.windows(4).any(|w| w == b"%PDF") {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&header[..4]);
        return Err(ConvertError::NotAPdf {
            path: pdf_path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

/// Number of pages in the document.
pub fn page_count(
    pdfium: &Pdfium,
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<usize, ConvertError> {
    let document = open_document(pdfium, pdf_path, password)?;
    Ok(document.pages().len() as usize)
}

/// Rasterise page `page` (1-indexed) of the PDF at `pdf_path`.
///
/// # Errors
/// - [`ConvertError::PageOutOfRange`] if the document has fewer pages
/// - [`ConvertError::CorruptPdf`], [`ConvertError::PasswordRequired`],
///   [`ConvertError::WrongPassword`] if the document cannot be opened
/// - [`ConvertError::RasterisationFailed`] if pdfium fails on the page
pub fn render_page(
    pdfium: &Pdfium,
    pdf_path: &Path,
    page: u32,
    dpi: u32,
    password: Option<&str>,
) -> Result<RgbImage, ConvertError> {
    let document = open_document(pdfium, pdf_path, password)?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    if page == 0 || page as usize > total_pages {
        return Err(ConvertError::PageOutOfRange {
            page,
            total: total_pages,
        });
    }

    let pdf_page = pages
        .get((page - 1) as u16)
        .map_err(|e| ConvertError::RasterisationFailed {
            page,
            detail: format!("{:?}", e),
        })?;

    let render_config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / 72.0);

    let bitmap = pdf_page.render_with_config(&render_config).map_err(|e| {
        ConvertError::RasterisationFailed {
            page,
            detail: format!("{:?}", e),
        }
    })?;

    let image = bitmap.as_image().into_rgb8();
    debug!(
        "Rendered page {} at {} DPI → {}x{} px",
        page,
        dpi,
        image.width(),
        image.height()
    );

    Ok(image)
}

fn open_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, ConvertError> {
    pdfium.load_pdf_from_file(pdf_path, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                ConvertError::WrongPassword {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                ConvertError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            }
        } else {
            ConvertError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })
}
