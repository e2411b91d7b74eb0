//! Thin CLI wrapper around `bej_decode` (component C8).
//!
//! Reads a BEJ payload and a schema dictionary (and, optionally, an
//! annotation dictionary) from disk and writes pretty-printed JSON to
//! standard output or a file. Parsing/IO failures and decode failures are
//! both reported as a single line on standard error with exit code 1.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bej_decode::{decode, Diagnostics};
use clap::Parser;

/// Maximum size, in bytes, accepted for either the BEJ payload or a
/// dictionary file.
const MAX_INPUT_BYTES: u64 = 65_536;

#[derive(Parser)]
#[command(
    name = "bej-decode",
    about = "Decode a DSP0218 Binary Encoded JSON (BEJ) payload into pretty-printed JSON",
    long_about = None
)]
struct Cli {
    /// BEJ payload file.
    #[arg(short = 'b', long = "bej", value_name = "PATH")]
    bej: PathBuf,

    /// Schema dictionary file.
    #[arg(short = 's', long = "schema", value_name = "PATH")]
    schema: PathBuf,

    /// Output file; standard output if omitted.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Annotation dictionary file.
    #[arg(short = 'a', long = "annotation", value_name = "PATH")]
    annotation: Option<PathBuf>,
}

/// Writes `warning at offset {offset}: {message}` to standard error — the
/// default, process-facing [`Diagnostics`] implementation. Tests use
/// `bej_decode::VecDiagnostics` instead so they never need to capture stderr.
struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn warn(&mut self, offset: usize, message: &str) {
        eprintln!("warning at offset {offset}: {message}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let bej = read_bounded(&cli.bej)?;
    let schema = read_bounded(&cli.schema)?;
    let annotation = cli.annotation.as_deref().map(read_bounded).transpose()?;

    let mut diag = StderrDiagnostics;
    let mut sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    decode(&bej, &schema, annotation.as_deref(), &mut sink, &mut diag)
        .map_err(|e| e.to_string())?;
    sink.flush().map_err(|e| e.to_string())
}

/// Reads `path` whole, rejecting files over [`MAX_INPUT_BYTES`]
/// without reading their contents.
fn read_bounded(path: &std::path::Path) -> Result<Vec<u8>, String> {
    let metadata = fs::metadata(path).map_err(|e| format!("cannot stat {}: {e}", path.display()))?;
    if metadata.len() > MAX_INPUT_BYTES {
        return Err(format!(
            "{} is {} bytes, exceeding the {MAX_INPUT_BYTES}-byte limit",
            path.display(),
            metadata.len()
        ));
    }
    fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
