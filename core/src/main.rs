use clap::{Parser, ValueEnum};
use dicomstore_core::{ingest_file, MetadataStore, TextReport};
use log::info;
use std::path::PathBuf;
use std::process;

/// CLI tool for inspecting the metadata of a single DICOM file
#[derive(Parser, Debug)]
#[command(name = "dicomstore")]
#[command(about = "DICOM image metadata inspection tool")]
#[command(version)]
struct Cli {
    /// Path to DICOM file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut store = MetadataStore::new();
    let image_id = match ingest_file(&cli.file, &mut store) {
        Ok(image_id) => image_id,
        Err(e) => {
            eprintln!("Error: failed to ingest {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };
    info!("Ingested {} as {}", cli.file.display(), image_id);

    let Some(metadata) = store.get_metadata(&image_id) else {
        eprintln!("Error: no metadata recorded for {}", image_id);
        process::exit(1);
    };

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(&image_id, metadata));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(metadata) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
