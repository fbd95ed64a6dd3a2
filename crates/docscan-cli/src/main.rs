use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docscan_geometry::{
    detect_document_corners, load_json, verbosity_level, write_json, DocumentCornerParams,
    GeometryError, JsonIoError, LineSegment,
};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(Parser, Debug)]
#[command(
    name = "docscan",
    version,
    about = "Find document corners from detected line segments"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the corner pipeline on a segments file and print the report.
    Corners {
        /// JSON file of the form `{"segments": [[x1, y1, x2, y2], ...]}`.
        #[arg(long)]
        input: PathBuf,
        /// Parameter file; missing fields take defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Log every polar line.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the default parameters.
    DefaultConfig {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Deserialize)]
struct SegmentsInput {
    segments: Vec<LineSegment>,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: JsonIoError,
    },
    #[error(transparent)]
    Write(#[from] JsonIoError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[cfg(not(feature = "tracing"))]
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Corners {
            input,
            config,
            output,
            verbose,
        } => {
            init_logging(verbosity_level(verbose))?;

            let params = match &config {
                Some(path) => load_from(path)?,
                None => DocumentCornerParams::default(),
            };
            let SegmentsInput { segments } = load_from(&input)?;
            info!("loaded {} segments from {}", segments.len(), input.display());

            let report = detect_document_corners(&segments, &params)?;
            emit(&report, output.as_deref())
        }
        Command::DefaultConfig { output } => {
            emit(&DocumentCornerParams::default(), output.as_deref())
        }
    }
}

fn load_from<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    load_json(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            write_json(value, path)?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    docscan_geometry::init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    // `log` records from the geometry crate are forwarded into tracing.
    let _ = LogTracer::init();
    docscan_geometry::init_tracing(false, level);
    Ok(())
}
