use thiserror::Error;

/// Result type for dose report operations
pub type Result<T> = std::result::Result<T, DoseSrError>;

/// Error types for dose report operations
///
/// Only whole-document problems surface here. A field that cannot be
/// found or parsed inside a valid report is represented as `None` in the
/// assembled record instead.
#[derive(Error, Debug)]
pub enum DoseSrError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Document is not a dose structured report with a content tree
    #[error("Not extractable: {0}")]
    NotExtractable(String),

    /// Failure while writing tabular or JSON output
    #[error("Export error: {0}")]
    ExportError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DoseSrError {
    /// Returns whether this error marks a structurally invalid document
    ///
    /// Batch callers skip such documents and keep going.
    pub fn is_not_extractable(&self) -> bool {
        matches!(self, DoseSrError::NotExtractable(_))
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DoseSrError {
    fn from(e: dicom_object::ReadError) -> Self {
        DoseSrError::DicomError(format!("{}", e))
    }
}

impl From<csv::Error> for DoseSrError {
    fn from(e: csv::Error) -> Self {
        DoseSrError::ExportError(format!("{}", e))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for DoseSrError {
    fn from(e: serde_json::Error) -> Self {
        DoseSrError::ExportError(format!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_extractable_display() {
        let err = DoseSrError::NotExtractable("modality is CT, expected SR".to_string());
        assert_eq!(err.to_string(), "Not extractable: modality is CT, expected SR");
        assert!(err.is_not_extractable());
    }

    #[test]
    fn test_io_error_is_not_structural() {
        let err: DoseSrError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_not_extractable());
    }
}
