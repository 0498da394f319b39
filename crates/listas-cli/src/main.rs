mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use listas_core::config::{PipelineConfig, DEFAULT_FUZZY_CUTOFF, DEFAULT_MIN_NAME_WORDS};
use listas_core::extraction::pdftotext::RASTER_DPI;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "listas",
    version,
    about = "Extract electoral candidate lists from PDFs and scans into validated CSV"
)]
struct Cli {
    /// Log extraction details (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Text recognition backend for rendered pages.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OcrBackend {
    /// Pages are already text (PDF text layer or plain text files)
    Text,
    /// Run image pages through the tesseract CLI
    Tesseract,
}

/// Options shared by every command that builds a pipeline.
#[derive(clap::Args)]
pub struct PipelineArgs {
    /// Custom reference data (sigla and anchor tables) as JSON
    #[arg(long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Text recognition backend
    #[arg(long, value_enum, default_value = "tesseract")]
    ocr: OcrBackend,

    /// Minimum similarity for fuzzy sigla matches, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_FUZZY_CUTOFF)]
    fuzzy_cutoff: f64,

    /// Minimum word count for a guessed candidate name
    #[arg(long, default_value_t = DEFAULT_MIN_NAME_WORDS)]
    min_name_words: usize,

    /// Resolution for rasterizing PDF pages that have no text layer
    #[arg(long, default_value_t = RASTER_DPI)]
    dpi: u32,

    /// Content type hint applied to every input (e.g. application/pdf)
    #[arg(long, value_name = "TYPE")]
    content_type: Option<String>,
}

impl PipelineArgs {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            fuzzy_cutoff: self.fuzzy_cutoff,
            min_name_words: self.min_name_words,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, validate and export candidates from one or more documents
    Extract {
        /// Input documents (PDF, image or text)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write CSV to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print validated rows as JSON instead of CSV
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Show how a document is split into anchored segments (JSON)
    Layout {
        /// Input document
        file: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Resolve raw party acronyms against the sigla table
    Sigla {
        /// Raw acronyms to resolve
        #[arg(required = true)]
        values: Vec<String>,

        /// Custom reference data as JSON
        #[arg(long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// Minimum similarity for fuzzy matches, in [0, 1]
        #[arg(long, default_value_t = DEFAULT_FUZZY_CUTOFF)]
        fuzzy_cutoff: f64,

        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect and validate reference data
    Reference {
        #[command(subcommand)]
        action: ReferenceAction,
    },
}

#[derive(Subcommand)]
enum ReferenceAction {
    /// Print the embedded reference data
    Show {
        /// Print the raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate a custom reference file
    Validate {
        /// Path to JSON reference file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Extract {
            files,
            output,
            json,
            pipeline,
        } => commands::extract::run(&files, output, json, &pipeline),
        Commands::Layout { file, pipeline } => commands::layout::run(&file, &pipeline),
        Commands::Sigla {
            values,
            reference,
            fuzzy_cutoff,
            json,
        } => commands::sigla::run(&values, reference.as_deref(), fuzzy_cutoff, json),
        Commands::Reference { action } => match action {
            ReferenceAction::Show { json } => commands::reference::show(json),
            ReferenceAction::Validate { file } => commands::reference::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        let code = if e.is_unprocessable() { 2 } else { 1 };
        std::process::exit(code);
    }
}
