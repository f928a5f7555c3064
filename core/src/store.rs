use crate::extraction::tags::{
    FRAME_INCREMENT_POINTER, FRAME_OF_REFERENCE_UID, FRAME_TIME, FRAME_TIME_VECTOR,
    IMAGE_ORIENTATION_PATIENT, IMAGE_POSITION_PATIENT, LOSSY_IMAGE_COMPRESSION,
    LOSSY_IMAGE_COMPRESSION_RATIO, PIXEL_SPACING, SLICE_LOCATION, SLICE_THICKNESS,
    SOP_CLASS_UID, SOP_INSTANCE_UID, SPACING_BETWEEN_SLICES, TABLE_POSITION,
};
use crate::extraction::{extract_multiframe, TagSource};
use crate::types::{
    CustomSection, ImageMetadata, ImagePlane, InstanceMetadata, MetadataSource, PatientMetadata,
    SeriesMetadata, StudyMetadata,
};
use dicom_core::Tag;
use std::collections::HashMap;

/// One named section of an image metadata record, used to replace a
/// single group without touching the rest of the record
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataSection {
    Study(StudyMetadata),
    Series(SeriesMetadata),
    Instance(InstanceMetadata),
    Patient(PatientMetadata),
    ImagePlane(ImagePlane),

    /// Arbitrary named section (e.g. a tag display table)
    Custom(String, CustomSection),
}

/// Borrowed view of one record section, returned by [`MetadataStore::provider`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetadataValue<'a> {
    Study(&'a StudyMetadata),
    Series(&'a SeriesMetadata),
    Instance(&'a InstanceMetadata),
    Patient(&'a PatientMetadata),
    ImagePlane(&'a ImagePlane),
    Custom(&'a CustomSection),
}

/// Handle to a rendered image, carrying the dimensions the renderer
/// decoded plus an optional raw tag accessor for backfilling
pub struct RenderedImage<'a> {
    pub image_id: &'a str,
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    pub tags: Option<&'a dyn TagSource>,
}

/// In-memory metadata store mapping image identifiers to normalized
/// and derived metadata
///
/// Data from instances, series, and studies is associated with image ids
/// so rendering and annotation tooling can query it through one lookup;
/// the derived image plane positions reference lines and orientation
/// markers without re-parsing raw tag strings.
///
/// The store is an owned value: the component composing a viewer session
/// creates one and passes it by reference to consumers. Every read
/// returns `Option` — an unknown image id or section means "not yet
/// available", never an error.
///
/// # Example
///
/// ```
/// use dicomstore_core::{MetadataSource, MetadataStore};
///
/// let mut store = MetadataStore::new();
///
/// let mut source = MetadataSource::default();
/// source.series.modality = Some("CT".to_string());
/// source.num_images = 42;
/// store.add_metadata("ct://1.2.3/frame/1", source);
///
/// let record = store.get_metadata("ct://1.2.3/frame/1").unwrap();
/// assert_eq!(record.series.modality.as_deref(), Some("CT"));
/// assert_eq!(record.series.num_images, 42);
/// assert!(store.get_metadata("ct://unknown").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MetadataStore {
    lookup: HashMap<String, ImageMetadata>,
}

impl MetadataStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of image records held
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Iterates over (image id, record) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImageMetadata)> + '_ {
        self.lookup.iter().map(|(id, meta)| (id.as_str(), meta))
    }

    /// Builds and stores the full record for an image
    ///
    /// Computes the image plane when the instance group carries all
    /// prerequisite fields. The series image count is taken from the
    /// ingest payload. Replaces any prior record for `image_id`.
    pub fn add_metadata(&mut self, image_id: &str, source: MetadataSource) {
        let MetadataSource {
            study,
            mut series,
            instance,
            patient,
            num_images,
        } = source;
        series.num_images = num_images;

        let image_plane = ImagePlane::from_instance(&instance);

        self.lookup.insert(
            image_id.to_string(),
            ImageMetadata {
                study,
                series,
                instance,
                patient,
                image_plane,
                custom: HashMap::new(),
            },
        );
    }

    /// Returns the record for the given image id
    pub fn get_metadata(&self, image_id: &str) -> Option<&ImageMetadata> {
        self.lookup.get(image_id)
    }

    /// Replaces one named section of an image's record, leaving the
    /// other sections untouched
    ///
    /// When no record exists yet for `image_id`, an empty one is created
    /// lazily so out-of-order ingestion (e.g. a tag display table arriving
    /// before the instance data) is not dropped.
    pub fn add_specific_metadata(&mut self, image_id: &str, section: MetadataSection) {
        let metadata = self.lookup.entry(image_id.to_string()).or_default();

        match section {
            MetadataSection::Study(study) => metadata.study = study,
            MetadataSection::Series(series) => metadata.series = series,
            MetadataSection::Instance(instance) => metadata.instance = instance,
            MetadataSection::Patient(patient) => metadata.patient = patient,
            MetadataSection::ImagePlane(plane) => metadata.image_plane = Some(plane),
            MetadataSection::Custom(name, data) => {
                metadata.custom.insert(name, data);
            }
        }
    }

    /// Backfills missing instance fields for a rendered image
    ///
    /// Fields already populated are never overwritten, even when the tag
    /// source supplies a different value (first-write-wins). Multiframe
    /// info is computed once per record when a tag source is available,
    /// and the image plane is recomputed if still absent. No-op when the
    /// image was never added.
    pub fn update_metadata(&mut self, image: &RenderedImage<'_>) {
        let Some(metadata) = self.lookup.get_mut(image.image_id) else {
            return;
        };
        let instance = &mut metadata.instance;

        instance.rows = instance.rows.or(image.rows);
        instance.columns = instance.columns.or(image.columns);

        if let Some(tags) = image.tags {
            backfill(&mut instance.sop_class_uid, tags, SOP_CLASS_UID);
            backfill(&mut instance.sop_instance_uid, tags, SOP_INSTANCE_UID);

            backfill(&mut instance.pixel_spacing, tags, PIXEL_SPACING);
            backfill(
                &mut instance.frame_of_reference_uid,
                tags,
                FRAME_OF_REFERENCE_UID,
            );
            backfill(
                &mut instance.image_orientation_patient,
                tags,
                IMAGE_ORIENTATION_PATIENT,
            );
            backfill(
                &mut instance.image_position_patient,
                tags,
                IMAGE_POSITION_PATIENT,
            );

            backfill(&mut instance.slice_thickness, tags, SLICE_THICKNESS);
            backfill(&mut instance.slice_location, tags, SLICE_LOCATION);
            backfill(&mut instance.table_position, tags, TABLE_POSITION);
            backfill(
                &mut instance.spacing_between_slices,
                tags,
                SPACING_BETWEEN_SLICES,
            );

            backfill(
                &mut instance.lossy_image_compression,
                tags,
                LOSSY_IMAGE_COMPRESSION,
            );
            backfill(
                &mut instance.lossy_image_compression_ratio,
                tags,
                LOSSY_IMAGE_COMPRESSION_RATIO,
            );

            backfill(
                &mut instance.frame_increment_pointer,
                tags,
                FRAME_INCREMENT_POINTER,
            );
            backfill(&mut instance.frame_time, tags, FRAME_TIME);
            backfill(&mut instance.frame_time_vector, tags, FRAME_TIME_VECTOR);

            if instance.multiframe.is_none() {
                instance.multiframe = Some(extract_multiframe(tags));
            }
        }

        if metadata.image_plane.is_none() {
            metadata.image_plane = ImagePlane::from_instance(&metadata.instance);
        }
    }

    /// Looks up one record section by name
    ///
    /// Section names are `"study"`, `"series"`, `"instance"`, `"patient"`,
    /// `"imagePlane"`, or the name of a custom section. Extension point
    /// for annotation tooling that queries metadata categories without
    /// knowing the full record shape.
    pub fn provider(&self, section: &str, image_id: &str) -> Option<MetadataValue<'_>> {
        let metadata = self.lookup.get(image_id)?;

        match section {
            "study" => Some(MetadataValue::Study(&metadata.study)),
            "series" => Some(MetadataValue::Series(&metadata.series)),
            "instance" => Some(MetadataValue::Instance(&metadata.instance)),
            "patient" => Some(MetadataValue::Patient(&metadata.patient)),
            "imagePlane" => metadata.image_plane.as_ref().map(MetadataValue::ImagePlane),
            name => metadata.custom.get(name).map(MetadataValue::Custom),
        }
    }
}

/// Fills `field` from the tag source only when it is currently empty
fn backfill(field: &mut Option<String>, tags: &dyn TagSource, tag: Tag) {
    if field.as_deref().map_or(true, str::is_empty) {
        if let Some(value) = tags.string_tag(tag) {
            *field = Some(value);
        }
    }
}
