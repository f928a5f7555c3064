use crate::types::InstanceMetadata;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A 3D vector in patient coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a new Vector3
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Extracts all decimal values from a DICOM multi-valued numeric string
///
/// Accepts the standard backslash separator as well as whitespace or
/// bracketed list formats, and exponential notation.
fn decimal_values(s: &str) -> Vec<f64> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
    });

    re.find_iter(s)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Parses a multi-valued numeric string with a fixed component count
///
/// Returns `None` when the string does not contain exactly `expected`
/// parseable numbers, so a malformed orientation or position tag yields
/// an absent plane instead of NaN components.
fn fixed_decimal_values(s: &str, expected: usize) -> Option<Vec<f64>> {
    let values = decimal_values(s);
    if values.len() == expected {
        Some(values)
    } else {
        None
    }
}

/// Parses a two-value pixel spacing string into (row, column) spacing
///
/// Per the DICOM convention the first component is row spacing and the
/// second is column spacing. Unparsable components fall back to 1.0.
fn pixel_spacing_values(s: &str) -> (f64, f64) {
    let values = decimal_values(s);
    let row = values.first().copied().unwrap_or(1.0);
    let col = values.get(1).copied().unwrap_or(1.0);
    (row, col)
}

/// Geometric description of an image slice in patient coordinate space
///
/// Derived from the instance-level orientation, position, and spacing
/// tags. Viewer tooling uses it to position reference lines and
/// orientation markers without re-parsing raw tag strings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImagePlane {
    /// Identifier of the shared 3D coordinate system
    pub frame_of_reference_uid: String,

    pub rows: u16,
    pub columns: u16,

    /// Direction cosines of the image row axis
    pub row_cosines: Vector3,

    /// Direction cosines of the image column axis
    pub column_cosines: Vector3,

    /// Position of the first transmitted voxel, in mm
    pub image_position_patient: Vector3,

    /// Physical distance between row centers, in mm
    pub row_pixel_spacing: f64,

    /// Physical distance between column centers, in mm
    pub column_pixel_spacing: f64,
}

impl ImagePlane {
    /// Derives the image plane from instance-level metadata
    ///
    /// Requires rows, columns, pixel spacing, frame-of-reference UID,
    /// orientation, and position to all be present; returns `None` when
    /// any is missing or empty. Orientation must parse as six numbers and
    /// position as three, otherwise the plane is absent.
    pub fn from_instance(instance: &InstanceMetadata) -> Option<Self> {
        let rows = instance.rows.filter(|&r| r > 0)?;
        let columns = instance.columns.filter(|&c| c > 0)?;
        let frame_of_reference_uid = instance
            .frame_of_reference_uid
            .as_deref()
            .filter(|s| !s.is_empty())?;
        let spacing = instance.pixel_spacing.as_deref().filter(|s| !s.is_empty())?;
        let orientation = instance
            .image_orientation_patient
            .as_deref()
            .filter(|s| !s.is_empty())?;
        let position = instance
            .image_position_patient
            .as_deref()
            .filter(|s| !s.is_empty())?;

        let orientation = fixed_decimal_values(orientation, 6)?;
        let position = fixed_decimal_values(position, 3)?;
        let (row_pixel_spacing, column_pixel_spacing) = pixel_spacing_values(spacing);

        Some(Self {
            frame_of_reference_uid: frame_of_reference_uid.to_string(),
            rows,
            columns,
            row_cosines: Vector3::new(orientation[0], orientation[1], orientation[2]),
            column_cosines: Vector3::new(orientation[3], orientation[4], orientation[5]),
            image_position_patient: Vector3::new(position[0], position[1], position[2]),
            row_pixel_spacing,
            column_pixel_spacing,
        })
    }
}
