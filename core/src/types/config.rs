use super::ReportKind;

/// Configuration for dose report extraction
///
/// # Example
///
/// ```
/// use dosesr_core::{ExtractConfig, ReportKind};
///
/// // Auto-detect the report kind from the content tree
/// let auto = ExtractConfig::default();
/// assert!(auto.kind.is_none());
///
/// // Force the mammography schema
/// let mammo = ExtractConfig::default().with_kind(ReportKind::Mammography);
/// assert_eq!(mammo.kind, Some(ReportKind::Mammography));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractConfig {
    /// Forced report kind. If None, the kind is detected from the content tree.
    pub kind: Option<ReportKind>,

    /// Require the SR modality in the document header
    pub require_sr_modality: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            kind: None,
            require_sr_modality: true,
        }
    }
}

impl ExtractConfig {
    /// Forces a report kind
    pub fn with_kind(mut self, kind: ReportKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets whether the SR modality is required
    pub fn require_sr_modality(mut self, require: bool) -> Self {
        self.require_sr_modality = require;
        self
    }
}

/// Configuration for batch processing of a directory tree
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Extraction settings applied to every document
    pub extract: ExtractConfig,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Extract documents on a worker pool
    pub parallel: bool,

    /// Placeholder written for missing cells in tabular output
    pub missing_placeholder: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            recursive: true,
            parallel: true,
            missing_placeholder: "-".to_string(),
        }
    }
}

impl BatchConfig {
    pub fn with_extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_missing_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.missing_placeholder = placeholder.into();
        self
    }
}
