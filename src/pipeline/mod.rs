//! Pipeline stages for file-to-PNG conversion.
//!
//! Each submodule implements exactly one step, so each is testable on its own
//! and the PDF backend can be swapped without touching the image path.
//!
//! ## Data Flow
//!
//! ```text
//!              ┌──▶ AlreadyPng ─────────────────────────────▶ (same path)
//! classify ────┼──▶ RasterImage ──▶ raster ──┐
//!              ├──▶ PdfDocument ──▶ render ──┼──▶ encode ──▶ <stem>[page].png
//!              └──▶ Unsupported ──▶ error    │
//! ```
//!
//! 1. [`classify`] — extension first, then magic-byte sniffing, into one
//!    closed [`classify::InputKind`]
//! 2. [`raster`]   — decode a raster image and flatten it to RGB
//! 3. [`render`]   — rasterise one PDF page via pdfium, without alpha
//! 4. [`encode`]   — atomically write the RGB buffer as PNG next to the input

pub mod classify;
pub mod encode;
pub mod raster;
pub mod render;
