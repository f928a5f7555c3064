use thiserror::Error;

/// Result type for dicomstore operations
pub type Result<T> = std::result::Result<T, DicomStoreError>;

/// Error types for dicomstore file ingestion
///
/// Store lookups signal absence through `Option`; errors only arise when
/// reading DICOM data from disk.
#[derive(Error, Debug)]
pub enum DicomStoreError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DicomStoreError {
    fn from(e: dicom_object::ReadError) -> Self {
        DicomStoreError::DicomError(format!("{}", e))
    }
}
