//! Content tree access
//!
//! The extraction engine reads structured report content through the
//! [`ContentItem`] trait. Every accessor returns `Option` instead of failing,
//! so a missing sequence, tag or value is simply `None` at the call site.
//!
//! Two implementations are provided:
//! - [`InMemDicomObject`](dicom_object::InMemDicomObject), reading content items
//!   straight from a decoded DICOM data set
//! - [`ContentNode`], an owned tree used to build reports in memory

pub(crate) mod dicom;
mod node;

pub use node::{ContentNode, NodeValue};

use crate::types::{Measurement, ValueKind};

/// Read-only view of one structured report content item
pub trait ContentItem: Sized {
    /// Code value of the concept name, e.g. "113830"
    fn concept_code(&self) -> Option<String>;

    /// Code meaning of the concept name, e.g. "Mean CTDIvol"
    fn concept_name(&self) -> Option<String>;

    /// Value type of this item
    fn value_kind(&self) -> ValueKind;

    /// Free text payload of a TEXT item
    fn text_value(&self) -> Option<String>;

    /// Code meaning of the coded value of a CODE item
    fn code_meaning(&self) -> Option<String>;

    /// Numeric payload of a NUM item
    ///
    /// Returns `None` when there is no measured value or its numeric value is empty.
    fn measured_value(&self) -> Option<Measurement>;

    /// UID payload of a UIDREF item
    fn uid(&self) -> Option<String>;

    /// Raw DICOM date/time payload of a DATETIME, DATE or TIME item
    fn datetime(&self) -> Option<String>;

    /// Child content items, in encoded order
    fn children(&self) -> &[Self];

    /// Returns whether this item carries a content tree at all
    ///
    /// A present but empty content sequence still counts as a tree.
    fn has_content_tree(&self) -> bool {
        !self.children().is_empty()
    }
}
