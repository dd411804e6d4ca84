//! CLI binary for file2png.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ConversionRequest`, installs logging, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use file2png::{convert, ConversionRequest, DEFAULT_DPI};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{debug, error, info, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const AFTER_HELP: &str = r#"EXAMPLES:
  # JPEG → photo.png (next to the input)
  file2png --file photo.jpg

  # Page 2 of a PDF → scan2.png
  file2png --file scan.pdf --page 2

  # Convert and delete the source
  file2png --file scan.tiff --remove

  # Sharper PDF render, JSON summary on stdout
  file2png --file report.pdf --dpi 200 --json

OUTPUT NAMING:
  <stem>.png          raster image input
  <stem><page>.png    PDF input
  (unchanged)         input already named *.png

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH     Path to libpdfium (file or directory), needed for PDF input
  RUST_LOG            Overrides the stderr log filter
  FILE2PNG_LOG_FILE   Log file path (default: info.log)
"#;

/// Convert an image or a PDF page to PNG.
#[derive(Parser, Debug)]
#[command(
    name = "file2png",
    version,
    about = "Convert an image or a PDF page to PNG",
    long_about = "Convert an image (JPEG, GIF, BMP, TIFF, WebP, PNM, …) or one page of a PDF \
to a PNG written next to the input. Files already named *.png are left untouched.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input file.
    #[arg(short, long)]
    file: PathBuf,

    /// Type of preprocessing to be done (accepted for compatibility; unused).
    #[arg(short, long, default_value = "thresh")]
    preprocess: String,

    /// Page of interest for PDF input (1-indexed).
    #[arg(long, env = "FILE2PNG_PAGE", default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Delete the input file after a successful conversion.
    #[arg(long, env = "FILE2PNG_REMOVE")]
    remove: bool,

    /// PDF rendering DPI (72–400).
    #[arg(long, env = "FILE2PNG_DPI", default_value_t = DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(72..=400))]
    dpi: u32,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "FILE2PNG_PASSWORD")]
    password: Option<String>,

    /// Append log lines to this file.
    #[arg(long, env = "FILE2PNG_LOG_FILE", default_value = "info.log")]
    log_file: PathBuf,

    /// Print the conversion result as JSON instead of the output path.
    #[arg(long, env = "FILE2PNG_JSON")]
    json: bool,

    /// Enable DEBUG-level logs on stderr.
    #[arg(short, long, env = "FILE2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress all stderr logs except errors.
    #[arg(short, long, env = "FILE2PNG_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match subscriber(&cli) {
        Ok(subscriber) => subscriber.init(),
        Err(e) => {
            eprintln!("Error: {e:?}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    debug!("Ignoring --preprocess {:?}; no preprocessing is applied", cli.preprocess);

    let request = build_request(cli).context("Invalid arguments")?;
    let output = convert(&request)
        .with_context(|| format!("Failed to convert {}", cli.file.display()))?;

    info!(
        "{} → {}",
        output.input_path.display(),
        output.output_path.display()
    );

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else {
        println!("{}", output.output_path.display());
    }

    Ok(())
}

/// Errors go through the subscriber so `info.log` keeps them next to the
/// informational lines; the stderr layer shows them to the user.
fn report_failure(err: &anyhow::Error) {
    error!("{err:#}");
}

/// Map CLI args to a `ConversionRequest`.
fn build_request(cli: &Cli) -> Result<ConversionRequest, file2png::ConvertError> {
    let mut builder = ConversionRequest::builder(&cli.file)
        .page(cli.page)
        .delete_source(cli.remove)
        .dpi(cli.dpi);
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    builder.build()
}

/// Two sinks: human-facing stderr filtered by flags (`RUST_LOG` wins), and an
/// append-only log file that always records DEBUG and above.
fn subscriber(cli: &Cli) -> Result<impl Subscriber + Send + Sync + 'static> {
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false).with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
    );

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::DEBUG);

    Ok(tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer))
}
