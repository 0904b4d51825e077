use super::ContentItem;
use crate::extraction::codes::ConceptCode;
use crate::types::{Measurement, ValueKind};

/// Payload of an owned content node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeValue {
    #[default]
    None,
    Text(String),
    /// Code meaning of the coded value
    Code(String),
    Num(Measurement),
    Uid(String),
    /// Raw DICOM DT string, e.g. "20240615143000"
    DateTime(String),
}

/// Owned structured report content item
///
/// # Example
///
/// ```
/// use dosesr_core::content::{ContentItem, ContentNode};
/// use dosesr_core::extraction::codes::{CT_DOSE, MEAN_CTDIVOL};
///
/// let dose = ContentNode::container(
///     CT_DOSE,
///     vec![ContentNode::num(MEAN_CTDIVOL, "12.5", "mGy")],
/// );
///
/// assert_eq!(dose.children().len(), 1);
/// assert_eq!(dose.children()[0].concept_code().as_deref(), Some("113830"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentNode {
    pub code: Option<String>,
    pub name: Option<String>,
    pub kind: ValueKind,
    pub value: NodeValue,
    pub children: Vec<ContentNode>,
    /// Whether a content sequence is present, even when empty
    pub has_tree: bool,
}

impl ContentNode {
    /// Creates a document root holding a content tree
    pub fn root(children: Vec<ContentNode>) -> Self {
        Self {
            kind: ValueKind::Container,
            children,
            has_tree: true,
            ..Default::default()
        }
    }

    /// Creates a CONTAINER item
    pub fn container(code: ConceptCode, children: Vec<ContentNode>) -> Self {
        Self {
            code: Some(code.as_str().to_string()),
            kind: ValueKind::Container,
            children,
            has_tree: true,
            ..Default::default()
        }
    }

    /// Creates a TEXT item
    pub fn text(code: ConceptCode, text: &str) -> Self {
        Self::leaf(code, ValueKind::Text, NodeValue::Text(text.to_string()))
    }

    /// Creates a CODE item with the given code meaning
    pub fn code(code: ConceptCode, meaning: &str) -> Self {
        Self::leaf(code, ValueKind::Code, NodeValue::Code(meaning.to_string()))
    }

    /// Creates a NUM item; an empty unit means no unit
    pub fn num(code: ConceptCode, value: &str, unit: &str) -> Self {
        let unit = (!unit.is_empty()).then(|| unit.to_string());
        Self::leaf(
            code,
            ValueKind::Num,
            NodeValue::Num(Measurement::new(value, unit)),
        )
    }

    /// Creates a UIDREF item
    pub fn uid(code: ConceptCode, uid: &str) -> Self {
        Self::leaf(code, ValueKind::UidRef, NodeValue::Uid(uid.to_string()))
    }

    /// Creates a DATETIME item from a raw DICOM DT string
    pub fn datetime(code: ConceptCode, dt: &str) -> Self {
        Self::leaf(
            code,
            ValueKind::DateTime,
            NodeValue::DateTime(dt.to_string()),
        )
    }

    /// Creates an item of the given kind with no payload
    pub fn empty(code: ConceptCode, kind: ValueKind) -> Self {
        Self::leaf(code, kind, NodeValue::None)
    }

    /// Sets the concept name meaning
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Attaches child items (e.g. laterality under an anatomy item)
    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.children = children;
        self.has_tree = true;
        self
    }

    fn leaf(code: ConceptCode, kind: ValueKind, value: NodeValue) -> Self {
        Self {
            code: Some(code.as_str().to_string()),
            kind,
            value,
            ..Default::default()
        }
    }
}

impl ContentItem for ContentNode {
    fn concept_code(&self) -> Option<String> {
        self.code.clone()
    }

    fn concept_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn text_value(&self) -> Option<String> {
        match &self.value {
            NodeValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn code_meaning(&self) -> Option<String> {
        match &self.value {
            NodeValue::Code(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn measured_value(&self) -> Option<Measurement> {
        match &self.value {
            NodeValue::Num(m) if !m.value.trim().is_empty() => Some(m.clone()),
            _ => None,
        }
    }

    fn uid(&self) -> Option<String> {
        match &self.value {
            NodeValue::Uid(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn datetime(&self) -> Option<String> {
        match &self.value {
            NodeValue::DateTime(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn has_content_tree(&self) -> bool {
        self.has_tree
    }
}
