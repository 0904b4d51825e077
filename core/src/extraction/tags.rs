use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Document Identification Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
pub const CONTENT_DATE: Tag = Tag(0x0008, 0x0023);
pub const CONTENT_TIME: Tag = Tag(0x0008, 0x0033);

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

// Study Tags
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);

// Institution/Device Tags
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
pub const STATION_NAME: Tag = Tag(0x0008, 0x1010);

// Code Sequence Macro Tags
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);

// SR Content Item Tags
pub const VALUE_TYPE: Tag = Tag(0x0040, 0xA040);
pub const CONCEPT_NAME_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA043);
pub const CONCEPT_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA168);
pub const TEXT_VALUE: Tag = Tag(0x0040, 0xA160);
pub const UID: Tag = Tag(0x0040, 0xA124);
pub const DATETIME: Tag = Tag(0x0040, 0xA120);
pub const DATE: Tag = Tag(0x0040, 0xA121);
pub const TIME: Tag = Tag(0x0040, 0xA122);
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);

// Numeric Measurement Tags
pub const MEASURED_VALUE_SEQUENCE: Tag = Tag(0x0040, 0xA300);
pub const NUMERIC_VALUE: Tag = Tag(0x0040, 0xA30A);
pub const MEASUREMENT_UNITS_CODE_SEQUENCE: Tag = Tag(0x0040, 0x08EA);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get the first item of a sequence tag
///
/// Returns `None` if the tag is not present, is not a sequence, or is empty
pub fn get_first_item(dcm: &InMemDicomObject, tag: Tag) -> Option<&InMemDicomObject> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.items())
        .and_then(|items| items.first())
}

/// Helper to get all items of a sequence tag
///
/// Returns an empty slice if the tag is not present or is not a sequence
pub fn get_items(dcm: &InMemDicomObject, tag: Tag) -> &[InMemDicomObject] {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.items())
        .unwrap_or(&[])
}

/// Helper to get the code meaning of the first item of a code sequence
pub fn get_code_meaning(dcm: &InMemDicomObject, sequence: Tag) -> Option<String> {
    get_first_item(dcm, sequence).and_then(|item| get_string_value(item, CODE_MEANING))
}
