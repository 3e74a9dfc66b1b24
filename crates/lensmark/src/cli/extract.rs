//! The `lensmark extract` command: print metadata without touching the catalog.

use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use lensmark_core::pipeline::FileDiscovery;
use lensmark_core::{Config, FileMetadata, MetadataExtractor, OutputWriter};

use super::OutputFormat;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Image file or directory
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

pub fn execute(config: &Config, args: ExtractArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input.display());
    }

    let files = FileDiscovery::new(config.processing.clone()).discover(&args.input, args.recursive);
    if files.is_empty() {
        anyhow::bail!("No supported images found at {}", args.input.display());
    }
    tracing::debug!(
        "Extracting metadata from {} file(s), {:.1} MB",
        files.len(),
        FileDiscovery::total_size(&files) as f64 / 1_000_000.0
    );

    let extractor = MetadataExtractor::new(&config.limits);
    let records: Vec<FileMetadata> = files
        .into_iter()
        .map(|file| {
            let metadata = extractor.extract(&file.path);
            FileMetadata {
                path: file.path,
                metadata,
            }
        })
        .collect();

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = OutputWriter::new(sink, args.format.into(), config.output.pretty);

    // A single file prints as one object rather than a one-element array.
    if records.len() == 1 && args.input.is_file() {
        writer.write(&records[0])?;
    } else {
        writer.write_all(&records)?;
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        let found = records.iter().filter(|r| !r.metadata.is_empty()).count();
        eprintln!(
            "Wrote {} record(s) ({} with metadata) to {}",
            writer.written(),
            found,
            path.display()
        );
    }
    Ok(())
}
