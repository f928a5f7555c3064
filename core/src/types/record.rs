use crate::types::{ImagePlane, MultiframeInfo};
use std::collections::HashMap;

/// Named custom metadata section (e.g. a tag display table)
///
/// Stored alongside the structured groups so annotation tooling can
/// attach arbitrary key/value categories to an image.
pub type CustomSection = HashMap<String, String>;

/// Study-level metadata group
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StudyMetadata {
    pub accession_number: Option<String>,
    pub patient_id: Option<String>,
    pub study_instance_uid: Option<String>,
    pub study_date: Option<String>,
    pub study_time: Option<String>,
    pub study_description: Option<String>,
    pub institution_name: Option<String>,
    pub patient_history: Option<String>,
}

/// Series-level metadata group
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesMetadata {
    pub series_description: Option<String>,
    pub series_number: Option<i32>,
    pub modality: Option<String>,
    pub series_instance_uid: Option<String>,

    /// Number of images in the series
    pub num_images: u32,
}

/// Patient demographics group
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PatientMetadata {
    pub name: Option<String>,
    pub id: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<String>,
}

/// Instance-level metadata group
///
/// Multi-valued numeric attributes (pixel spacing, orientation, position,
/// frame time vector) are kept in their raw DICOM backslash-delimited
/// string form; derivation into numeric form happens in [`ImagePlane`]
/// and the multiframe extractor.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InstanceMetadata {
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    pub sop_class_uid: Option<String>,
    pub sop_instance_uid: Option<String>,
    pub pixel_spacing: Option<String>,
    pub frame_of_reference_uid: Option<String>,
    pub image_orientation_patient: Option<String>,
    pub image_position_patient: Option<String>,
    pub slice_thickness: Option<String>,
    pub slice_location: Option<String>,
    pub table_position: Option<String>,
    pub spacing_between_slices: Option<String>,
    pub lossy_image_compression: Option<String>,
    pub lossy_image_compression_ratio: Option<String>,
    pub frame_increment_pointer: Option<String>,
    pub frame_time: Option<String>,
    pub frame_time_vector: Option<String>,

    /// Derived multiframe timing info, computed at most once per record
    pub multiframe: Option<MultiframeInfo>,
}

/// Full metadata record for one image identifier
///
/// Groups study, series, instance, and patient metadata together with the
/// derived image plane, so viewer tooling can query everything it needs
/// about an image through a single lookup.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImageMetadata {
    pub study: StudyMetadata,
    pub series: SeriesMetadata,
    pub instance: InstanceMetadata,
    pub patient: PatientMetadata,

    /// Derived geometry, present only when the instance carries all
    /// prerequisite fields (see [`ImagePlane::from_instance`])
    pub image_plane: Option<ImagePlane>,

    /// Custom sections attached via `add_specific_metadata`, keyed by name
    pub custom: HashMap<String, CustomSection>,
}

/// Ingest payload for [`MetadataStore::add_metadata`]
///
/// Carries the per-group metadata parsed for one image, plus the image
/// count of the owning series.
///
/// [`MetadataStore::add_metadata`]: crate::store::MetadataStore::add_metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataSource {
    pub study: StudyMetadata,
    pub series: SeriesMetadata,
    pub instance: InstanceMetadata,
    pub patient: PatientMetadata,
    pub num_images: u32,
}
