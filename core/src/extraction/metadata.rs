use crate::error::Result;
use crate::extraction::tags::*;
use crate::store::{MetadataStore, RenderedImage};
use crate::types::{
    InstanceMetadata, MetadataSource, PatientMetadata, SeriesMetadata, StudyMetadata,
};
use dicom_object::{open_file, InMemDicomObject};
use std::path::Path;

/// Reads a DICOM file and ingests it into the store
///
/// The record is keyed by SOP Instance UID, falling back to the file
/// path when the file carries none; the chosen image id is returned.
/// Instance fields are backfilled and multiframe info derived from the
/// raw data set in the same pass.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed as DICOM
pub fn ingest_file(path: &Path, store: &mut MetadataStore) -> Result<String> {
    let dcm = open_file(path)?;
    let dcm: &InMemDicomObject = &dcm;

    let image_id = get_string_value(dcm, SOP_INSTANCE_UID)
        .filter(|uid| !uid.is_empty())
        .unwrap_or_else(|| path.display().to_string());

    store.add_metadata(&image_id, extract_metadata(dcm, 1));
    store.update_metadata(&RenderedImage {
        image_id: &image_id,
        rows: None,
        columns: None,
        tags: Some(dcm),
    });

    Ok(image_id)
}

/// Builds a full ingest payload from a parsed DICOM object
///
/// `num_images` is the image count of the owning series, which the data
/// set itself does not carry; pass 1 for standalone files.
pub fn extract_metadata(dcm: &InMemDicomObject, num_images: u32) -> MetadataSource {
    MetadataSource {
        study: extract_study(dcm),
        series: extract_series(dcm),
        instance: extract_instance(dcm),
        patient: extract_patient(dcm),
        num_images,
    }
}

/// Extracts the study-level metadata group
pub fn extract_study(dcm: &InMemDicomObject) -> StudyMetadata {
    StudyMetadata {
        accession_number: get_string_value(dcm, ACCESSION_NUMBER),
        patient_id: get_string_value(dcm, PATIENT_ID),
        study_instance_uid: get_string_value(dcm, STUDY_INSTANCE_UID),
        study_date: get_string_value(dcm, STUDY_DATE),
        study_time: get_string_value(dcm, STUDY_TIME),
        study_description: get_string_value(dcm, STUDY_DESCRIPTION),
        institution_name: get_string_value(dcm, INSTITUTION_NAME),
        patient_history: get_string_value(dcm, ADDITIONAL_PATIENT_HISTORY),
    }
}

/// Extracts the series-level metadata group
///
/// `num_images` is left at zero; the store overwrites it from the ingest
/// payload's image count.
pub fn extract_series(dcm: &InMemDicomObject) -> SeriesMetadata {
    SeriesMetadata {
        series_description: get_string_value(dcm, SERIES_DESCRIPTION),
        series_number: get_int_value(dcm, SERIES_NUMBER),
        modality: get_string_value(dcm, MODALITY),
        series_instance_uid: get_string_value(dcm, SERIES_INSTANCE_UID),
        num_images: 0,
    }
}

/// Extracts the patient demographics group
pub fn extract_patient(dcm: &InMemDicomObject) -> PatientMetadata {
    PatientMetadata {
        name: get_string_value(dcm, PATIENT_NAME),
        id: get_string_value(dcm, PATIENT_ID),
        birth_date: get_string_value(dcm, PATIENT_BIRTH_DATE),
        sex: get_string_value(dcm, PATIENT_SEX),
    }
}

/// Extracts the instance-level metadata group
pub fn extract_instance(dcm: &InMemDicomObject) -> InstanceMetadata {
    InstanceMetadata {
        rows: get_u16_value(dcm, ROWS),
        columns: get_u16_value(dcm, COLUMNS),
        sop_class_uid: get_string_value(dcm, SOP_CLASS_UID),
        sop_instance_uid: get_string_value(dcm, SOP_INSTANCE_UID),
        pixel_spacing: get_string_value(dcm, PIXEL_SPACING),
        frame_of_reference_uid: get_string_value(dcm, FRAME_OF_REFERENCE_UID),
        image_orientation_patient: get_string_value(dcm, IMAGE_ORIENTATION_PATIENT),
        image_position_patient: get_string_value(dcm, IMAGE_POSITION_PATIENT),
        slice_thickness: get_string_value(dcm, SLICE_THICKNESS),
        slice_location: get_string_value(dcm, SLICE_LOCATION),
        table_position: get_string_value(dcm, TABLE_POSITION),
        spacing_between_slices: get_string_value(dcm, SPACING_BETWEEN_SLICES),
        lossy_image_compression: get_string_value(dcm, LOSSY_IMAGE_COMPRESSION),
        lossy_image_compression_ratio: get_string_value(dcm, LOSSY_IMAGE_COMPRESSION_RATIO),
        frame_increment_pointer: get_string_value(dcm, FRAME_INCREMENT_POINTER),
        frame_time: get_string_value(dcm, FRAME_TIME),
        frame_time_vector: get_string_value(dcm, FRAME_TIME_VECTOR),
        multiframe: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn put_str(dcm: &mut InMemDicomObject, tag: dicom_core::Tag, vr: VR, value: &str) {
        dcm.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
    }

    fn sample_object() -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        put_str(&mut dcm, ACCESSION_NUMBER, VR::SH, "ACC001");
        put_str(&mut dcm, STUDY_INSTANCE_UID, VR::UI, "1.2.840.1");
        put_str(&mut dcm, STUDY_DATE, VR::DA, "20240115");
        put_str(&mut dcm, STUDY_DESCRIPTION, VR::LO, "CT CHEST");
        put_str(&mut dcm, SERIES_INSTANCE_UID, VR::UI, "1.2.840.1.1");
        put_str(&mut dcm, SERIES_DESCRIPTION, VR::LO, "Axial");
        put_str(&mut dcm, SERIES_NUMBER, VR::IS, "3");
        put_str(&mut dcm, MODALITY, VR::CS, "CT");
        put_str(&mut dcm, PATIENT_NAME, VR::PN, "DOE^JANE");
        put_str(&mut dcm, PATIENT_ID, VR::LO, "PID42");
        put_str(&mut dcm, PATIENT_SEX, VR::CS, "F");
        dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(512u16)));
        dcm.put(DataElement::new(
            COLUMNS,
            VR::US,
            PrimitiveValue::from(512u16),
        ));
        put_str(&mut dcm, PIXEL_SPACING, VR::DS, "0.5\\0.5");
        put_str(&mut dcm, FRAME_OF_REFERENCE_UID, VR::UI, "1.2.3");
        put_str(&mut dcm, IMAGE_ORIENTATION_PATIENT, VR::DS, "1\\0\\0\\0\\1\\0");
        put_str(&mut dcm, IMAGE_POSITION_PATIENT, VR::DS, "0\\0\\0");
        put_str(&mut dcm, SLICE_THICKNESS, VR::DS, "2.5");
        dcm
    }

    #[test]
    fn test_extract_metadata_groups() {
        let source = extract_metadata(&sample_object(), 120);

        assert_eq!(source.num_images, 120);
        assert_eq!(source.study.accession_number, Some("ACC001".to_string()));
        assert_eq!(
            source.study.study_instance_uid,
            Some("1.2.840.1".to_string())
        );
        assert_eq!(source.series.series_number, Some(3));
        assert_eq!(source.series.modality, Some("CT".to_string()));
        assert_eq!(source.patient.name, Some("DOE^JANE".to_string()));
        assert_eq!(source.patient.id, Some("PID42".to_string()));
        assert_eq!(source.instance.rows, Some(512));
        assert_eq!(source.instance.pixel_spacing, Some("0.5\\0.5".to_string()));
        assert_eq!(source.instance.slice_thickness, Some("2.5".to_string()));
        assert_eq!(source.instance.table_position, None);
    }

    #[test]
    fn test_ingest_file_rejects_non_dicom() {
        use crate::error::DicomStoreError;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("garbage.dcm");
        std::fs::write(&path, b"not a dicom file").unwrap();

        let mut store = MetadataStore::new();
        let err = ingest_file(&path, &mut store).unwrap_err();
        assert!(matches!(err, DicomStoreError::DicomError(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ingest_file_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.dcm");

        let mut store = MetadataStore::new();
        assert!(ingest_file(&path, &mut store).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_extract_from_empty_object() {
        let source = extract_metadata(&InMemDicomObject::new_empty(), 1);

        assert_eq!(source.study, StudyMetadata::default());
        assert_eq!(source.patient, PatientMetadata::default());
        assert_eq!(source.instance, InstanceMetadata::default());
        assert_eq!(source.series.modality, None);
    }
}
