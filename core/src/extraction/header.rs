use super::dates::{format_date_with_time, format_dicom_date};
use super::tags::*;
use crate::types::{EquipmentInfo, EssentialInfo};
use dicom_object::InMemDicomObject;

/// Document-level header fields of a dose report
///
/// These are read once per document, not from the content tree. Empty
/// values are treated as absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentHeader {
    pub modality: Option<String>,
    pub sop_class_uid: Option<String>,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_sex: Option<String>,
    /// Raw DICOM DA value
    pub patient_birth_date: Option<String>,
    pub study_id: Option<String>,
    pub study_date: Option<String>,
    pub study_time: Option<String>,
    pub accession_number: Option<String>,
    pub institution_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub station_name: Option<String>,
    pub content_date: Option<String>,
    pub content_time: Option<String>,
}

fn non_empty(dcm: &InMemDicomObject, tag: dicom_core::Tag) -> Option<String> {
    get_string_value(dcm, tag).filter(|s| !s.is_empty())
}

impl DocumentHeader {
    /// Reads the header fields of a decoded data set
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        Self {
            modality: non_empty(dcm, MODALITY),
            sop_class_uid: non_empty(dcm, SOP_CLASS_UID),
            patient_id: non_empty(dcm, PATIENT_ID),
            patient_name: non_empty(dcm, PATIENT_NAME),
            patient_sex: non_empty(dcm, PATIENT_SEX),
            patient_birth_date: non_empty(dcm, PATIENT_BIRTH_DATE),
            study_id: non_empty(dcm, STUDY_ID),
            study_date: non_empty(dcm, STUDY_DATE),
            study_time: non_empty(dcm, STUDY_TIME),
            accession_number: non_empty(dcm, ACCESSION_NUMBER),
            institution_name: non_empty(dcm, INSTITUTION_NAME),
            manufacturer: non_empty(dcm, MANUFACTURER),
            model: non_empty(dcm, MANUFACTURER_MODEL_NAME),
            station_name: non_empty(dcm, STATION_NAME),
            content_date: non_empty(dcm, CONTENT_DATE),
            content_time: non_empty(dcm, CONTENT_TIME),
        }
    }

    /// Whether the document declares the SR modality
    pub fn is_sr(&self) -> bool {
        self.modality
            .as_deref()
            .map(|m| m.eq_ignore_ascii_case("SR"))
            .unwrap_or(false)
    }

    /// Patient name with `^` component separators replaced by spaces
    pub fn display_patient_name(&self) -> Option<String> {
        self.patient_name
            .as_deref()
            .map(|name| name.replace('^', " ").trim().to_string())
            .filter(|name| !name.is_empty())
    }

    /// Patient and study identity with normalized dates
    pub fn essential_info(&self) -> EssentialInfo {
        EssentialInfo {
            patient_id: self.patient_id.clone(),
            patient_name: self.display_patient_name(),
            study_id: self.study_id.clone(),
            accession_number: self.accession_number.clone(),
            study_date: self
                .study_date
                .as_deref()
                .map(|d| format_date_with_time(d, self.study_time.as_deref())),
            birth_date: self.patient_birth_date.as_deref().map(format_dicom_date),
            sex: self.patient_sex.clone(),
        }
    }

    pub fn equipment_info(&self) -> EquipmentInfo {
        EquipmentInfo {
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            station_name: self.station_name.clone(),
        }
    }

    /// Normalized content date, with time when available
    pub fn report_date(&self) -> Option<String> {
        self.content_date
            .as_deref()
            .map(|d| format_date_with_time(d, self.content_time.as_deref()))
    }
}
