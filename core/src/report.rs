use crate::types::ImageMetadata;
use std::fmt;

/// Text report formatter for one image metadata record
pub struct TextReport<'a> {
    image_id: &'a str,
    metadata: &'a ImageMetadata,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(image_id: &'a str, metadata: &'a ImageMetadata) -> Self {
        Self { image_id, metadata }
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Metadata")?;
        writeln!(f, "==============")?;
        writeln!(f)?;
        writeln!(f, "Image Id:       {}", self.image_id)?;
        writeln!(f)?;

        let study = &self.metadata.study;
        writeln!(f, "Study")?;
        writeln!(f, "-----")?;
        writeln!(f, "Accession:      {}", opt(&study.accession_number))?;
        writeln!(f, "Study UID:      {}", opt(&study.study_instance_uid))?;
        writeln!(f, "Date:           {}", opt(&study.study_date))?;
        writeln!(f, "Description:    {}", opt(&study.study_description))?;
        writeln!(f, "Institution:    {}", opt(&study.institution_name))?;
        writeln!(f)?;

        let series = &self.metadata.series;
        writeln!(f, "Series")?;
        writeln!(f, "------")?;
        writeln!(f, "Series UID:     {}", opt(&series.series_instance_uid))?;
        writeln!(f, "Modality:       {}", opt(&series.modality))?;
        writeln!(f, "Description:    {}", opt(&series.series_description))?;
        writeln!(f, "Images:         {}", series.num_images)?;
        writeln!(f)?;

        let patient = &self.metadata.patient;
        writeln!(f, "Patient")?;
        writeln!(f, "-------")?;
        writeln!(f, "Name:           {}", opt(&patient.name))?;
        writeln!(f, "Id:             {}", opt(&patient.id))?;
        writeln!(f, "Birth Date:     {}", opt(&patient.birth_date))?;
        writeln!(f, "Sex:            {}", opt(&patient.sex))?;
        writeln!(f)?;

        let instance = &self.metadata.instance;
        writeln!(f, "Instance")?;
        writeln!(f, "--------")?;
        writeln!(f, "SOP UID:        {}", opt(&instance.sop_instance_uid))?;
        writeln!(
            f,
            "Dimensions:     {}x{}",
            instance.rows.map_or_else(|| "?".to_string(), |r| r.to_string()),
            instance
                .columns
                .map_or_else(|| "?".to_string(), |c| c.to_string())
        )?;
        writeln!(f, "Pixel Spacing:  {}", opt(&instance.pixel_spacing))?;
        writeln!(f, "Slice Location: {}", opt(&instance.slice_location))?;
        writeln!(f)?;

        writeln!(f, "Derived Properties")?;
        writeln!(f, "------------------")?;
        match &self.metadata.image_plane {
            Some(plane) => {
                writeln!(f, "Image Plane:    present")?;
                writeln!(f, "Frame of Ref:   {}", plane.frame_of_reference_uid)?;
                writeln!(f, "Row Cosines:    {}", plane.row_cosines)?;
                writeln!(f, "Col Cosines:    {}", plane.column_cosines)?;
                writeln!(f, "Position:       {}", plane.image_position_patient)?;
                writeln!(
                    f,
                    "Spacing:        {} x {} mm",
                    plane.row_pixel_spacing, plane.column_pixel_spacing
                )?;
            }
            None => writeln!(f, "Image Plane:    absent")?,
        }
        match &instance.multiframe {
            Some(info) if info.is_multiframe => {
                writeln!(f, "Multiframe:     yes ({} frames)", info.number_of_frames)?;
                writeln!(f, "Frame Pointer:  {}", info.frame_increment_pointer)?;
                writeln!(f, "Frame Time:     {} ms", info.frame_time)?;
                writeln!(f, "Frame Rate:     {} fps", info.average_frame_rate)?;
            }
            Some(_) => writeln!(f, "Multiframe:     no")?,
            None => writeln!(f, "Multiframe:     not computed")?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImagePlane, InstanceMetadata, MetadataSource};
    use crate::MetadataStore;

    #[test]
    fn test_text_report_format() {
        let mut source = MetadataSource::default();
        source.study.accession_number = Some("ACC001".to_string());
        source.series.modality = Some("CT".to_string());
        source.patient.name = Some("DOE^JANE".to_string());
        source.instance = InstanceMetadata {
            rows: Some(512),
            columns: Some(512),
            pixel_spacing: Some("0.5\\0.5".to_string()),
            frame_of_reference_uid: Some("1.2.3".to_string()),
            image_orientation_patient: Some("1\\0\\0\\0\\1\\0".to_string()),
            image_position_patient: Some("0\\0\\0".to_string()),
            ..Default::default()
        };
        source.num_images = 42;

        let mut store = MetadataStore::new();
        store.add_metadata("img-1", source);
        let metadata = store.get_metadata("img-1").unwrap();
        assert!(ImagePlane::from_instance(&metadata.instance).is_some());

        let output = format!("{}", TextReport::new("img-1", metadata));

        assert!(output.contains("Image Id:       img-1"));
        assert!(output.contains("Accession:      ACC001"));
        assert!(output.contains("Modality:       CT"));
        assert!(output.contains("Name:           DOE^JANE"));
        assert!(output.contains("Images:         42"));
        assert!(output.contains("Image Plane:    present"));
        assert!(output.contains("Row Cosines:    (1, 0, 0)"));
        assert!(output.contains("Multiframe:     not computed"));
    }

    #[test]
    fn test_text_report_absent_values() {
        let mut store = MetadataStore::new();
        store.add_metadata("img-2", MetadataSource::default());
        let metadata = store.get_metadata("img-2").unwrap();

        let output = format!("{}", TextReport::new("img-2", metadata));

        assert!(output.contains("Accession:      unknown"));
        assert!(output.contains("Dimensions:     ?x?"));
        assert!(output.contains("Image Plane:    absent"));
    }
}
