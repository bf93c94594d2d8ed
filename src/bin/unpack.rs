//! unpack - Expand packed asset files to plain data files
//!
//! Writes one unpacked file per input into the output directory. Colons in
//! input names (classic Mac path separators) become `=` in output names.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use packed_asset::decompress::DEFAULT_CHUNK_CAPACITY;
use packed_asset::{
    AlertSink, LoadOptions, LoadWarning, LocalFileMedia, PackedFileLoader, PackedHeaderParser,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Expand packed asset files (RLB, RLW, LZSS or stored).
#[derive(Parser, Debug)]
#[command(name = "unpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more packed files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory the unpacked files are written to
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Streaming chunk size in bytes
    #[arg(long = "chunk-size", default_value_t = DEFAULT_CHUNK_CAPACITY)]
    chunk_size: usize,

    /// Refuse files declaring more unpacked bytes than this
    #[arg(long = "max-size")]
    max_size: Option<usize>,

    /// Print header information without unpacking
    #[arg(long, action = ArgAction::SetTrue)]
    info: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Warnings go straight to stderr; fatal errors are printed by `main`.
struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn warn(&self, warning: &LoadWarning) {
        eprintln!("unpack: warning: {}", warning);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Output file name for `input`, with `:` replaced by `=`.
fn output_name(input: &Path) -> String {
    LocalFileMedia::new(input).name().replace(':', "=")
}

fn print_info(path: &Path) -> Result<()> {
    let mut file = LocalFileMedia::new(path).open()?;
    let header = PackedHeaderParser::read(&mut file)?;
    let scheme = match header.tag() {
        Some(tag) if tag.is_supported() => tag.to_string(),
        Some(tag) => format!("{} (unsupported)", tag),
        None => format!("unknown ({})", header.compression),
    };
    println!(
        "{}: {} bytes unpacked, compression {}",
        path.display(),
        header.decompressed_size,
        scheme
    );
    Ok(())
}

fn unpack(loader: &mut PackedFileLoader, path: &Path, out_dir: &Path) -> Result<()> {
    let loaded = loader
        .load(path)
        .with_context(|| format!("Can't unpack {}", path.display()))?;

    let out_path = out_dir.join(output_name(path));
    std::fs::write(&out_path, &loaded.data)
        .with_context(|| format!("Can't write {}", out_path.display()))?;

    println!("Wrote: {} ({} bytes)", out_path.display(), loaded.data.len());
    Ok(())
}

fn run(args: Args) -> Result<()> {
    if args.info {
        for path in &args.files {
            print_info(path)?;
        }
        return Ok(());
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Can't create {}", args.out_dir.display()))?;

    let mut loader = PackedFileLoader::with_options(LoadOptions {
        chunk_capacity: args.chunk_size,
        max_decompressed_size: args.max_size,
    })
    .with_alerts(ConsoleAlerts);
    for path in &args.files {
        unpack(&mut loader, path, &args.out_dir)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("unpack: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
