use std::path::PathBuf;
use std::process::exit;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "scripta",
    version,
    about = "Read text, detect writing scripts, and scan for keywords in images with Tesseract"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Language the engine should assume, e.g. "eng" or "ara"
    #[arg(long, default_value = "eng")]
    lang: String,

    /// OCR engine mode (0-3)
    #[arg(long, default_value_t = 3)]
    oem: i32,

    /// Page segmentation mode (0-13)
    #[arg(long, default_value_t = 6)]
    psm: i32,

    /// Source resolution in DPI, if known
    #[arg(long)]
    dpi: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize the text in an image
    Read {
        /// Image file to read
        image: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect the orientation and writing script of an image
    DetectScript {
        /// Image file to analyze
        image: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Horizontal tile count for the small-image retry
        #[arg(long, default_value_t = 5)]
        tile_cols: u32,

        /// Vertical tile count for the small-image retry
        #[arg(long, default_value_t = 5)]
        tile_rows: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recognize an image and search the text for a keyword
    Find {
        /// Image file to search
        image: PathBuf,

        /// Keyword to look for (case-sensitive)
        keyword: String,

        #[command(flatten)]
        engine: EngineArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = commands::run(cli) {
        eprintln!("error: {err:#}");
        exit(1);
    }
}
