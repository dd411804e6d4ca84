//! Result type returned by [`crate::convert`].

use crate::pipeline::classify::InputKind;
use serde::Serialize;
use std::path::PathBuf;

/// The outcome of a successful conversion.
///
/// `output_path` is the only field most callers need: it replaces the input
/// path from then on. The rest is reporting detail, and the whole struct
/// serialises to JSON for `file2png --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionOutput {
    /// Absolute path of the file the conversion started from.
    pub input_path: PathBuf,

    /// Absolute path of the PNG. Equal to `input_path` for pass-through.
    pub output_path: PathBuf,

    /// Which branch handled the input.
    pub kind: InputKind,

    /// 1-indexed page that was rendered. `Some` only for PDF input.
    pub page: Option<u32>,

    /// Pixel width of the written PNG. `None` when nothing was written.
    pub width: Option<u32>,

    /// Pixel height of the written PNG. `None` when nothing was written.
    pub height: Option<u32>,

    /// Whether the source file was deleted afterwards.
    pub source_removed: bool,
}

impl ConversionOutput {
    /// `true` when a new file was produced (the input was not already PNG).
    pub fn wrote_file(&self) -> bool {
        self.output_path != self.input_path
    }
}
