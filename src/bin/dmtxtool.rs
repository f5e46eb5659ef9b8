use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rust_dmtx::codec;
use rust_dmtx::{Point, ScanConfig, ScanPipeline};

#[derive(Parser)]
#[command(name = "dmtxtool")]
#[command(about = "Scan Data Matrix (ECC200) symbols in image files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode every symbol and print the scan result as JSON
    Scan {
        /// Image file to scan
        image: PathBuf,

        #[command(flatten)]
        options: ScanOptions,
    },

    /// Print per-frame dimensions and per-symbol details
    Inspect {
        /// Image file to inspect
        image: PathBuf,

        #[command(flatten)]
        options: ScanOptions,
    },
}

#[derive(Args)]
struct ScanOptions {
    /// JSON configuration file (camelCase keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search plane shrink factor
    #[arg(long)]
    shrink_min: Option<usize>,

    /// Maximum Reed-Solomon corrections per symbol
    #[arg(long)]
    corrections_max: Option<usize>,

    /// Stop scanning a frame after this many decoded symbols
    #[arg(long)]
    stop_after: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl ScanOptions {
    /// Config file (or the environment when none is given), overridden by flags
    fn resolve(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => ScanConfig::from_env(),
        };

        if let Some(shrink) = self.shrink_min {
            config = config.with_shrink_min(shrink);
        }
        if self.corrections_max.is_some() {
            config = config.with_corrections_max(self.corrections_max);
        }
        if self.stop_after.is_some() {
            config = config.with_stop_after(self.stop_after);
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct FrameReport {
    index: usize,
    width: usize,
    height: usize,
    symbols: Vec<SymbolReport>,
}

#[derive(Serialize)]
struct SymbolReport {
    size: String,
    corners: [Point; 4],
    corrections: usize,
    code: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Scan { image, options } => scan(&image, &options),
        Commands::Inspect { image, options } => inspect(&image, &options),
    }
}

fn read_blob(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading image {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn scan(path: &Path, options: &ScanOptions) -> Result<()> {
    let config = options.resolve()?;
    let blob = read_blob(path)?;

    let result = ScanPipeline::new(config)
        .run(&blob)
        .with_context(|| format!("scanning {}", path.display()))?;
    info!(codes = result.codes.len(), "scan complete");

    print_json(&result, options.pretty)
}

fn inspect(path: &Path, options: &ScanOptions) -> Result<()> {
    let config = options.resolve()?;
    let blob = read_blob(path)?;
    let pipeline = ScanPipeline::new(config);

    let mut reports = Vec::new();
    for scan in pipeline.scan_frames(&blob)? {
        let scan = scan.with_context(|| format!("decoding frame {}", reports.len()))?;
        reports.push(FrameReport {
            index: scan.index,
            width: scan.width,
            height: scan.height,
            symbols: scan
                .messages
                .iter()
                .map(|message| SymbolReport {
                    size: message.symbol.to_string(),
                    corners: message.corners,
                    corrections: message.corrections,
                    code: codec::to_text(message),
                })
                .collect(),
        });
    }
    let symbols: usize = reports.iter().map(|r| r.symbols.len()).sum();
    info!(frames = reports.len(), symbols, "inspection complete");

    print_json(&reports, options.pretty)
}
