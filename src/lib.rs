//! # file2png
//!
//! Convert a single input file (a raster image or one page of a PDF) to a PNG
//! written next to it, optionally deleting the source afterwards.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input path
//!  │
//!  ├─ 1. Classify  .png extension → magic-byte sniffing → .pdf extension
//!  ├─ 2. Decode    raster image → RGB            (image)
//!  │     or Render one PDF page → RGB            (pdfium-render)
//!  ├─ 3. Encode    atomic PNG write: <stem>.png or <stem><page>.png
//!  └─ 4. Cleanup   optional removal of the source file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use file2png::{convert, ConversionRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = ConversionRequest::builder("scan.pdf").page(2).build()?;
//!     let output = convert(&request)?;
//!     println!("{}", output.output_path.display()); // …/scan2.png
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! The library only emits [`tracing`] events; each [`convert`] call runs in a
//! `convert` span. Install whatever subscriber you like; with none installed
//! the events are discarded.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `file2png` binary (clap + anyhow + tracing-subscriber) |
//!
//! PDF input needs the pdfium shared library at runtime; see [`engine`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionRequest, ConversionRequestBuilder, DEFAULT_DPI};
pub use convert::{convert, inspect, pdf_page_count, render_pdf_page};
pub use error::{ConvertError, ErrorKind};
pub use output::ConversionOutput;
pub use pipeline::classify::InputKind;
