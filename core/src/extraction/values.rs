//! Typed value extraction from content items
//!
//! Every extractor is total: absent sub-structure yields `None`.

use super::dates::format_dicom_date;
use crate::content::ContentItem;
use crate::types::{Laterality, Measurement};

/// Free text of a TEXT item, `None` when absent or blank
pub fn extract_text<N: ContentItem>(node: &N) -> Option<String> {
    node.text_value().filter(|s| !s.trim().is_empty())
}

/// Meaning of the coded value of a CODE item (not the code itself)
pub fn extract_code_meaning<N: ContentItem>(node: &N) -> Option<String> {
    node.code_meaning().filter(|s| !s.trim().is_empty())
}

/// Measured value of a NUM item, value and unit kept apart
pub fn extract_measurement<N: ContentItem>(node: &N) -> Option<Measurement> {
    node.measured_value()
}

/// "value unit" display string, or the bare value when there is no unit
pub fn extract_numeric_display<N: ContentItem>(node: &N) -> Option<String> {
    node.measured_value().map(|m| m.display())
}

/// Numeric value as a number, for statistics and export
pub fn extract_numeric<N: ContentItem>(node: &N) -> Option<f64> {
    node.measured_value().and_then(|m| m.as_f64())
}

/// UID of a UIDREF item
pub fn extract_uid<N: ContentItem>(node: &N) -> Option<String> {
    node.uid().filter(|s| !s.is_empty())
}

/// Display-normalized date/time of a DATETIME, DATE or TIME item
pub fn extract_datetime<N: ContentItem>(node: &N) -> Option<String> {
    node.datetime()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format_dicom_date(&s))
}

/// Normalized laterality from a coded laterality item
pub fn extract_laterality<N: ContentItem>(node: &N) -> Option<Laterality> {
    node.code_meaning()
        .and_then(|meaning| Laterality::from_meaning(&meaning))
}

/// Best available display text of any item, for diagnostics
///
/// Tries the payloads in order: text, coded meaning, measurement, UID, date/time.
pub fn display_value<N: ContentItem>(node: &N) -> Option<String> {
    extract_text(node)
        .or_else(|| extract_code_meaning(node))
        .or_else(|| extract_numeric_display(node))
        .or_else(|| extract_uid(node))
        .or_else(|| extract_datetime(node))
}
