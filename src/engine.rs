//! Locating and binding the pdfium shared library.
//!
//! `pdfium-render` wraps pdfium, a C++ library loaded at runtime rather than
//! linked at build time. [`bind_pdfium`] tries, in order:
//!
//! 1. `PDFIUM_LIB_PATH` — path to the library file, or to a directory holding
//!    the platform library (`libpdfium.so`, `libpdfium.dylib`, `pdfium.dll`)
//! 2. the directory containing the running executable
//! 3. the system library search path
//!
//! Binding happens only when a PDF is actually converted, so image-only use
//! never needs pdfium installed.

use crate::error::ConvertError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the library location.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to pdfium using the lookup order described in the module docs.
pub fn bind_pdfium() -> Result<Pdfium, ConvertError> {
    let mut attempts: Vec<String> = Vec::new();

    for candidate in candidate_paths() {
        if !candidate.is_file() {
            attempts.push(format!("{}: not found", candidate.display()));
            continue;
        }
        match bind_pdfium_from_path(&candidate) {
            Ok(pdfium) => return Ok(pdfium),
            Err(e) => attempts.push(e.to_string()),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound pdfium from the system library path");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            attempts.push(format!("system library: {e}"));
            Err(ConvertError::PdfiumBindingFailed(attempts.join("; ")))
        }
    }
}

/// Bind to a pdfium library at an explicit `path`.
pub fn bind_pdfium_from_path(path: &Path) -> Result<Pdfium, ConvertError> {
    let bindings = Pdfium::bind_to_library(path).map_err(|e| {
        ConvertError::PdfiumBindingFailed(format!("{}: {}", path.display(), e))
    })?;
    debug!("Bound pdfium from {}", path.display());
    Ok(Pdfium::new(bindings))
}

/// Library files to try before falling back to the system search path.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = std::env::var_os(PDFIUM_LIB_PATH_ENV).filter(|p| !p.is_empty()) {
        let p = PathBuf::from(p);
        if p.is_dir() {
            paths.push(Pdfium::pdfium_platform_library_name_at_path(&p));
        } else {
            paths.push(p);
        }
    }

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(Pdfium::pdfium_platform_library_name_at_path(&dir));
    }

    paths
}
