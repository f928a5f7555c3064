pub mod error;
pub mod extraction;
pub mod report;
pub mod store;
pub mod types;

pub use error::{DicomStoreError, Result};
pub use extraction::{extract_metadata, extract_multiframe, ingest_file, TagSource};
pub use report::TextReport;
pub use store::{MetadataSection, MetadataStore, MetadataValue, RenderedImage};
pub use types::*;
