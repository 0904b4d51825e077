use super::ContentItem;
use crate::extraction::tags::{
    get_code_meaning, get_first_item, get_items, get_string_value, CODE_MEANING, CODE_VALUE,
    CONCEPT_CODE_SEQUENCE, CONCEPT_NAME_CODE_SEQUENCE, CONTENT_SEQUENCE, DATE, DATETIME,
    MEASURED_VALUE_SEQUENCE, MEASUREMENT_UNITS_CODE_SEQUENCE, NUMERIC_VALUE, TEXT_VALUE, TIME,
    UID, VALUE_TYPE,
};
use crate::types::{Measurement, ValueKind};
use dicom_object::InMemDicomObject;

/// Content items read directly from a decoded data set
///
/// The document root data set is itself the root content item: its
/// ContentSequence holds the top-level items.
impl ContentItem for InMemDicomObject {
    fn concept_code(&self) -> Option<String> {
        get_first_item(self, CONCEPT_NAME_CODE_SEQUENCE)
            .and_then(|item| get_string_value(item, CODE_VALUE))
    }

    fn concept_name(&self) -> Option<String> {
        get_first_item(self, CONCEPT_NAME_CODE_SEQUENCE)
            .and_then(|item| get_string_value(item, CODE_MEANING))
    }

    fn value_kind(&self) -> ValueKind {
        get_string_value(self, VALUE_TYPE)
            .map(|s| ValueKind::from_str(&s))
            .unwrap_or_default()
    }

    fn text_value(&self) -> Option<String> {
        get_string_value(self, TEXT_VALUE)
    }

    fn code_meaning(&self) -> Option<String> {
        get_code_meaning(self, CONCEPT_CODE_SEQUENCE)
    }

    fn measured_value(&self) -> Option<Measurement> {
        let measured = get_first_item(self, MEASURED_VALUE_SEQUENCE)?;
        let value = get_string_value(measured, NUMERIC_VALUE).filter(|v| !v.is_empty())?;
        let unit = get_code_meaning(measured, MEASUREMENT_UNITS_CODE_SEQUENCE);
        Some(Measurement::new(value, unit))
    }

    fn uid(&self) -> Option<String> {
        get_string_value(self, UID)
    }

    fn datetime(&self) -> Option<String> {
        if let Some(dt) = get_string_value(self, DATETIME) {
            return Some(dt);
        }

        // DATE and TIME items carry their payload in separate tags
        match (get_string_value(self, DATE), get_string_value(self, TIME)) {
            (Some(date), Some(time)) => Some(format!("{}{}", date, time)),
            (Some(date), None) => Some(date),
            (None, Some(time)) => Some(time),
            (None, None) => None,
        }
    }

    fn children(&self) -> &[Self] {
        get_items(self, CONTENT_SEQUENCE)
    }

    fn has_content_tree(&self) -> bool {
        self.element(CONTENT_SEQUENCE).is_ok()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders for SR content items as encoded in a DICOM data set

    use crate::extraction::codes::ConceptCode;
    use crate::extraction::tags::*;
    use dicom_core::value::{DataSetSequence, PrimitiveValue};
    use dicom_core::{DataElement, VR};
    use dicom_object::InMemDicomObject;

    fn code_item(value: &str, meaning: &str) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(CODE_VALUE, VR::SH, PrimitiveValue::from(value)),
            DataElement::new(CODE_MEANING, VR::LO, PrimitiveValue::from(meaning)),
        ])
    }

    fn sequence(tag: dicom_core::Tag, items: Vec<InMemDicomObject>) -> DataElement<InMemDicomObject> {
        DataElement::new(tag, VR::SQ, DataSetSequence::from(items))
    }

    fn item(code: ConceptCode, value_type: &str) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(VALUE_TYPE, VR::CS, PrimitiveValue::from(value_type)),
            sequence(
                CONCEPT_NAME_CODE_SEQUENCE,
                vec![code_item(code.as_str(), "concept")],
            ),
        ])
    }

    pub fn container(code: ConceptCode, children: Vec<InMemDicomObject>) -> InMemDicomObject {
        let mut dcm = item(code, "CONTAINER");
        dcm.put(sequence(CONTENT_SEQUENCE, children));
        dcm
    }

    pub fn text(code: ConceptCode, text: &str) -> InMemDicomObject {
        let mut dcm = item(code, "TEXT");
        dcm.put(DataElement::new(TEXT_VALUE, VR::UT, PrimitiveValue::from(text)));
        dcm
    }

    pub fn code(code: ConceptCode, meaning: &str) -> InMemDicomObject {
        let mut dcm = item(code, "CODE");
        dcm.put(sequence(
            CONCEPT_CODE_SEQUENCE,
            vec![code_item("X", meaning)],
        ));
        dcm
    }

    pub fn num(code: ConceptCode, value: &str, unit: &str) -> InMemDicomObject {
        let mut measured = InMemDicomObject::from_element_iter([DataElement::new(
            NUMERIC_VALUE,
            VR::DS,
            PrimitiveValue::from(value),
        )]);
        if !unit.is_empty() {
            measured.put(sequence(
                MEASUREMENT_UNITS_CODE_SEQUENCE,
                vec![code_item(unit, unit)],
            ));
        }
        let mut dcm = item(code, "NUM");
        dcm.put(sequence(MEASURED_VALUE_SEQUENCE, vec![measured]));
        dcm
    }

    pub fn uid(code: ConceptCode, uid: &str) -> InMemDicomObject {
        let mut dcm = item(code, "UIDREF");
        dcm.put(DataElement::new(UID, VR::UI, PrimitiveValue::from(uid)));
        dcm
    }

    pub fn datetime(code: ConceptCode, dt: &str) -> InMemDicomObject {
        let mut dcm = item(code, "DATETIME");
        dcm.put(DataElement::new(DATETIME, VR::DT, PrimitiveValue::from(dt)));
        dcm
    }

    /// Document root with SR modality and the given content tree
    pub fn sr_document(children: Vec<InMemDicomObject>) -> InMemDicomObject {
        let mut dcm = InMemDicomObject::from_element_iter([
            DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("SR")),
            DataElement::new(VALUE_TYPE, VR::CS, PrimitiveValue::from("CONTAINER")),
        ]);
        dcm.put(sequence(CONTENT_SEQUENCE, children));
        dcm
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;
    use crate::extraction::codes::{
        ACQUISITION_PROTOCOL, CT_DOSE, CTDIW_PHANTOM_TYPE, DATETIME_STARTED,
        IRRADIATION_EVENT_UID, MEAN_CTDIVOL,
    };

    #[test]
    fn test_empty_object_has_nothing() {
        let dcm = InMemDicomObject::new_empty();
        assert!(dcm.concept_code().is_none());
        assert!(dcm.measured_value().is_none());
        assert_eq!(dcm.value_kind(), ValueKind::Other);
        assert!(dcm.children().is_empty());
        assert!(!dcm.has_content_tree());
    }

    #[test]
    fn test_container_children() {
        let dose = fixtures::container(
            CT_DOSE,
            vec![
                fixtures::num(MEAN_CTDIVOL, "12.5", "mGy"),
                fixtures::code(CTDIW_PHANTOM_TYPE, "IEC Body Dosimetry Phantom"),
            ],
        );

        assert_eq!(dose.concept_code().as_deref(), Some("113829"));
        assert_eq!(dose.value_kind(), ValueKind::Container);
        assert_eq!(dose.children().len(), 2);

        let ctdi = &dose.children()[0];
        let m = ctdi.measured_value().unwrap();
        assert_eq!(m.value, "12.5");
        assert_eq!(m.unit.as_deref(), Some("mGy"));

        let phantom = &dose.children()[1];
        assert_eq!(
            phantom.code_meaning().as_deref(),
            Some("IEC Body Dosimetry Phantom")
        );
    }

    #[test]
    fn test_leaf_payloads() {
        assert_eq!(
            fixtures::text(ACQUISITION_PROTOCOL, "Head")
                .text_value()
                .as_deref(),
            Some("Head")
        );
        assert_eq!(
            fixtures::uid(IRRADIATION_EVENT_UID, "1.2.3").uid().as_deref(),
            Some("1.2.3")
        );
        assert_eq!(
            fixtures::datetime(DATETIME_STARTED, "20240615143000")
                .datetime()
                .as_deref(),
            Some("20240615143000")
        );
    }

    #[test]
    fn test_num_without_unit() {
        let m = fixtures::num(MEAN_CTDIVOL, "7", "").measured_value().unwrap();
        assert_eq!(m.value, "7");
        assert!(m.unit.is_none());
    }

    #[test]
    fn test_root_with_empty_sequence_has_tree() {
        let root = fixtures::sr_document(vec![]);
        assert!(root.has_content_tree());
        assert!(root.children().is_empty());
    }
}
