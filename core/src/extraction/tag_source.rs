use crate::extraction::tags::{get_float_array_value, get_int_value, get_string_value};
use dicom_core::value::{PrimitiveValue, Value};
use dicom_core::Tag;
use dicom_object::InMemDicomObject;

/// Capability interface over a raw DICOM tag accessor
///
/// Formalizes the duck-typed data set handle the store consumes: four
/// typed lookups, each returning `None` when the tag is absent or its
/// value cannot be converted. Any tag-parsing backend can implement it;
/// [`InMemDicomObject`] is the built-in one.
pub trait TagSource {
    /// Returns the tag value as a trimmed string
    fn string_tag(&self, tag: Tag) -> Option<String>;

    /// Returns the tag value as an integer
    fn int_tag(&self, tag: Tag) -> Option<i32>;

    /// Returns the tag value as a float array (multi-valued numeric tags)
    fn float_array_tag(&self, tag: Tag) -> Option<Vec<f64>>;

    /// Returns the tag referenced by an AT-valued attribute
    fn tag_reference(&self, tag: Tag) -> Option<Tag>;
}

impl TagSource for InMemDicomObject {
    fn string_tag(&self, tag: Tag) -> Option<String> {
        get_string_value(self, tag)
    }

    fn int_tag(&self, tag: Tag) -> Option<i32> {
        get_int_value(self, tag)
    }

    fn float_array_tag(&self, tag: Tag) -> Option<Vec<f64>> {
        get_float_array_value(self, tag)
    }

    fn tag_reference(&self, tag: Tag) -> Option<Tag> {
        match self.element(tag).ok()?.value() {
            Value::Primitive(PrimitiveValue::Tags(tags)) => tags.first().copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::{FRAME_INCREMENT_POINTER, FRAME_TIME_VECTOR, MODALITY, ROWS};
    use dicom_core::{DataElement, VR};

    #[test]
    fn test_in_mem_object_as_tag_source() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            MODALITY,
            VR::CS,
            PrimitiveValue::from("US"),
        ));
        dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(256u16)));
        dcm.put(DataElement::new(
            FRAME_INCREMENT_POINTER,
            VR::AT,
            PrimitiveValue::Tags(vec![FRAME_TIME_VECTOR].into()),
        ));

        let source: &dyn TagSource = &dcm;
        assert_eq!(source.string_tag(MODALITY), Some("US".to_string()));
        assert_eq!(source.int_tag(ROWS), Some(256));
        assert_eq!(
            source.tag_reference(FRAME_INCREMENT_POINTER),
            Some(FRAME_TIME_VECTOR)
        );
    }

    #[test]
    fn test_absent_tags_return_none() {
        let dcm = InMemDicomObject::new_empty();

        let source: &dyn TagSource = &dcm;
        assert_eq!(source.string_tag(MODALITY), None);
        assert_eq!(source.int_tag(ROWS), None);
        assert_eq!(source.float_array_tag(FRAME_TIME_VECTOR), None);
        assert_eq!(source.tag_reference(FRAME_INCREMENT_POINTER), None);
    }

    #[test]
    fn test_tag_reference_requires_at_value() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            FRAME_INCREMENT_POINTER,
            VR::CS,
            PrimitiveValue::from("not a tag"),
        ));

        let source: &dyn TagSource = &dcm;
        assert_eq!(source.tag_reference(FRAME_INCREMENT_POINTER), None);
    }
}
