pub mod metadata;
pub mod multiframe;
pub mod tag_source;
pub mod tags;

pub use metadata::{
    extract_instance, extract_metadata, extract_patient, extract_series, extract_study,
    ingest_file,
};
pub use multiframe::extract_multiframe;
pub use tag_source::TagSource;
pub use tags::*;
