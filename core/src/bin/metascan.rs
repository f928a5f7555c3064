use clap::{Parser, ValueEnum};
use dicomstore_core::{ingest_file, ImageMetadata, MetadataStore, Result};
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;
use std::process;

/// CLI tool for scanning a directory of DICOM files into a metadata store
#[derive(Parser, Debug)]
#[command(name = "metascan")]
#[command(about = "Scan a directory of DICOM files and report derived image metadata")]
#[command(version)]
struct Cli {
    /// Directory containing DICOM files
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

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
    /// Image ids only (one per line)
    Ids,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let files = match collect_dicom_files(&cli.directory) {
        Ok(files) => files,
        Err(e) => {
            eprintln!(
                "Error: failed to read directory {}: {}",
                cli.directory.display(),
                e
            );
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!(
            "Error: no DICOM files found in {}",
            cli.directory.display()
        );
        process::exit(1);
    }

    info!("Found {} DICOM files", files.len());

    let mut store = MetadataStore::new();
    for file_path in files {
        match ingest_file(&file_path, &mut store) {
            Ok(image_id) => {
                info!("Ingested {} as {}", file_path.display(), image_id);
            }
            Err(e) => {
                warn!("Skipping {}: {}", file_path.display(), e);
            }
        }
    }

    if store.is_empty() {
        eprintln!("Error: no valid DICOM files could be ingested");
        process::exit(1);
    }

    info!("Ingested {} images", store.len());
    output_store(&store, cli.format);
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

fn collect_dicom_files(directory: &PathBuf) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                // Accept .dcm and .dicom extensions
                if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") {
                    files.push(path);
                }
            } else {
                // For files without extension, check for DICOM header
                if is_dicom_file(&path) {
                    info!("Found headerless DICOM file: {}", path.display());
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Checks if a file has a DICOM header
///
/// DICOM files carry a 128-byte preamble followed by the 4-byte "DICM"
/// magic string. Files without the preamble exist but are not detected
/// here.
fn is_dicom_file(path: &PathBuf) -> bool {
    use std::fs::File;
    use std::io::Read;

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read(&mut buffer) {
        Ok(n) if n >= 132 => &buffer[128..132] == b"DICM",
        _ => false,
    }
}

/// One summary line per ingested image
struct ScanLine<'a> {
    image_id: &'a str,
    metadata: &'a ImageMetadata,
}

impl<'a> fmt::Display for ScanLine<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = &self.metadata.instance;
        let modality = self.metadata.series.modality.as_deref().unwrap_or("??");
        let rows = instance.rows.map_or_else(|| "?".to_string(), |r| r.to_string());
        let columns = instance
            .columns
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        let plane = if self.metadata.image_plane.is_some() {
            "yes"
        } else {
            "no"
        };
        let frames = instance
            .multiframe
            .as_ref()
            .filter(|info| info.is_multiframe)
            .map_or_else(|| "1".to_string(), |info| info.number_of_frames.to_string());

        write!(
            f,
            "{}  modality={} dims={}x{} plane={} frames={}",
            self.image_id, modality, rows, columns, plane, frames
        )
    }
}

fn output_store(store: &MetadataStore, format: OutputFormat) {
    let mut entries: Vec<_> = store.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    match format {
        OutputFormat::Text => {
            for (image_id, metadata) in entries {
                println!("{}", ScanLine { image_id, metadata });
            }
        }
        OutputFormat::Ids => {
            for (image_id, _) in entries {
                println!("{}", image_id);
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                let map: std::collections::BTreeMap<&str, &ImageMetadata> =
                    entries.into_iter().collect();
                match serde_json::to_string_pretty(&map) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = entries;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_collect_dicom_files_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.dcm"), b"x").unwrap();
        fs::write(dir.path().join("b.DICOM"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let files = collect_dicom_files(&dir.path().to_path_buf()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_headerless_dicom_file() {
        let dir = TempDir::new().unwrap();

        let path = dir.path().join("noext");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"DICM").unwrap();
        file.write_all(&[0u8; 16]).unwrap();

        fs::write(dir.path().join("plain"), b"not dicom").unwrap();

        let files = collect_dicom_files(&dir.path().to_path_buf()).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_collect_missing_directory_is_io_error() {
        use dicomstore_core::DicomStoreError;

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = collect_dicom_files(&missing).unwrap_err();
        assert!(matches!(err, DicomStoreError::IoError(_)));
    }

    #[test]
    fn test_is_dicom_file_rejects_short_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short");
        fs::write(&path, b"DICM").unwrap();

        assert!(!is_dicom_file(&path));
    }

    #[test]
    fn test_scan_line_format() {
        let mut store = MetadataStore::new();
        let mut source = dicomstore_core::MetadataSource::default();
        source.series.modality = Some("US".to_string());
        source.instance.rows = Some(128);
        source.instance.columns = Some(256);
        store.add_metadata("1.2.3.4", source);

        let metadata = store.get_metadata("1.2.3.4").unwrap();
        let line = format!(
            "{}",
            ScanLine {
                image_id: "1.2.3.4",
                metadata
            }
        );
        assert_eq!(line, "1.2.3.4  modality=US dims=128x256 plane=no frames=1");
    }
}
