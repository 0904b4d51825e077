use crate::content::ContentItem;
use crate::error::{DoseSrError, Result};
use crate::extraction::{
    assemble, detect_kind, has_mammography_evidence, DocumentHeader, ReportSchema,
};
use crate::types::{DoseReport, ExtractConfig, ReportKind};
use dicom_dictionary_std::tags;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::debug;
use std::path::Path;

/// Main extractor for radiation dose structured reports
///
/// Provides a high-level API for turning a dose SR document into a
/// [`DoseReport`].
///
/// # Example
///
/// ```
/// use dosesr_core::DoseReportExtractor;
/// use dicom_object::InMemDicomObject;
/// use dicom_core::value::DataSetSequence;
/// use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
///
/// fn concept(code: &str) -> DataElement<InMemDicomObject> {
///     DataElement::new(
///         Tag(0x0040, 0xA043), // ConceptNameCodeSequence
///         VR::SQ,
///         DataSetSequence::from(vec![InMemDicomObject::from_element_iter([
///             DataElement::new(Tag(0x0008, 0x0100), VR::SH, PrimitiveValue::from(code)),
///         ])]),
///     )
/// }
///
/// // A single CT acquisition holding its protocol
/// let protocol = InMemDicomObject::from_element_iter([
///     concept("125203"),
///     DataElement::new(Tag(0x0040, 0xA160), VR::UT, PrimitiveValue::from("Head")),
/// ]);
/// let acquisition = InMemDicomObject::from_element_iter([
///     concept("113819"),
///     DataElement::new(Tag(0x0040, 0xA730), VR::SQ, DataSetSequence::from(vec![protocol])),
/// ]);
///
/// let mut dcm = InMemDicomObject::new_empty();
/// dcm.put(DataElement::new(
///     Tag(0x0008, 0x0060), // Modality
///     VR::CS,
///     PrimitiveValue::from("SR"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0040, 0xA730), // ContentSequence
///     VR::SQ,
///     DataSetSequence::from(vec![acquisition]),
/// ));
///
/// let report = DoseReportExtractor::extract(&dcm).unwrap();
///
/// assert_eq!(report.kind.to_string(), "ct");
/// assert_eq!(report.events.len(), 1);
/// assert_eq!(report.events[0].fields.text("protocol").as_deref(), Some("Head"));
/// ```
pub struct DoseReportExtractor;

impl DoseReportExtractor {
    /// Extracts a dose report from a decoded DICOM object
    ///
    /// # Errors
    ///
    /// Returns [`DoseSrError::NotExtractable`] if:
    /// - The modality is not "SR"
    /// - The document has no content tree
    pub fn extract(dcm: &InMemDicomObject) -> Result<DoseReport> {
        Self::extract_with_config(dcm, &ExtractConfig::default())
    }

    /// Extracts a dose report with explicit options
    pub fn extract_with_config(dcm: &InMemDicomObject, config: &ExtractConfig) -> Result<DoseReport> {
        let header = DocumentHeader::from_dicom(dcm);
        Self::extract_document(&header, dcm, config)
    }

    /// Extracts a dose report from a header and any content tree root
    ///
    /// The document either yields a complete report or a
    /// [`DoseSrError::NotExtractable`] error; there is no partial result.
    pub fn extract_document<N: ContentItem>(
        header: &DocumentHeader,
        root: &N,
        config: &ExtractConfig,
    ) -> Result<DoseReport> {
        if config.require_sr_modality && !header.is_sr() {
            return Err(DoseSrError::NotExtractable(format!(
                "modality is {}, expected SR",
                header.modality.as_deref().unwrap_or("missing")
            )));
        }

        if !root.has_content_tree() {
            return Err(DoseSrError::NotExtractable(
                "document has no content tree".to_string(),
            ));
        }

        let kind = Self::resolve_kind(root, config)?;
        debug!("Extracting {} dose report", kind);

        Ok(assemble(header, root, ReportSchema::for_kind(kind)))
    }

    /// Reads a file and extracts its dose report
    ///
    /// Reading stops before pixel data, which dose reports do not carry.
    pub fn from_file<P: AsRef<Path>>(path: P, config: &ExtractConfig) -> Result<DoseReport> {
        let dcm = OpenFileOptions::new()
            .read_until(tags::PIXEL_DATA)
            .open_file(path.as_ref())?;
        Self::extract_with_config(&dcm, config)
    }

    fn resolve_kind<N: ContentItem>(root: &N, config: &ExtractConfig) -> Result<ReportKind> {
        match config.kind {
            Some(ReportKind::Mammography) if !has_mammography_evidence(root) => {
                Err(DoseSrError::NotExtractable(
                    "no mammography dose data in content tree".to_string(),
                ))
            }
            Some(kind) => Ok(kind),
            None => Ok(detect_kind(root).unwrap_or_else(|| {
                debug!("Report kind not recognized, falling back to CT");
                ReportKind::Ct
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::dicom::fixtures;
    use crate::content::ContentNode;
    use crate::extraction::codes::*;
    use crate::extraction::tags::{MODALITY, PATIENT_ID, STUDY_DATE};
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};

    fn sr_header() -> DocumentHeader {
        DocumentHeader {
            modality: Some("SR".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_wrong_modality_not_extractable() {
        let mut dcm = fixtures::sr_document(vec![]);
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("CT")));

        let err = DoseReportExtractor::extract(&dcm).unwrap_err();
        assert!(err.is_not_extractable());
        assert!(err.to_string().contains("CT"));

        // relaxed configuration accepts it
        let config = ExtractConfig::default().require_sr_modality(false);
        assert!(DoseReportExtractor::extract_with_config(&dcm, &config).is_ok());
    }

    #[test]
    fn test_no_content_tree_not_extractable() {
        let dcm = InMemDicomObject::from_element_iter([DataElement::new(
            MODALITY,
            VR::CS,
            PrimitiveValue::from("SR"),
        )]);
        let err = DoseReportExtractor::extract(&dcm).unwrap_err();
        assert!(matches!(err, DoseSrError::NotExtractable(_)));
    }

    #[test]
    fn test_extract_from_dicom_mammography() {
        let mut dcm = fixtures::sr_document(vec![
            fixtures::container(
                ACCUMULATED_XRAY_DOSE_DATA,
                vec![fixtures::num(ACCUMULATED_AVERAGE_GLANDULAR_DOSE, "2.5", "mGy")],
            ),
            fixtures::container(
                IRRADIATION_EVENT_XRAY_DATA,
                vec![
                    fixtures::num(KVP, "28", "kV"),
                    fixtures::num(KVP, "29", "kV"),
                    fixtures::code(IMAGE_VIEW, "medio-lateral oblique"),
                ],
            ),
        ]);
        dcm.put(DataElement::new(PATIENT_ID, VR::LO, PrimitiveValue::from("42")));
        dcm.put(DataElement::new(STUDY_DATE, VR::DA, PrimitiveValue::from("20240615")));

        let report = DoseReportExtractor::extract(&dcm).unwrap();
        assert_eq!(report.kind, ReportKind::Mammography);
        assert_eq!(report.essential.patient_id.as_deref(), Some("42"));
        assert_eq!(report.essential.study_date.as_deref(), Some("Jun 15, 2024"));

        let event = &report.events[0];
        assert_eq!(event.stats_for("kvp").count, 2);
        assert_eq!(
            event.fields.text("image_view").as_deref(),
            Some("medio-lateral oblique")
        );
        // accumulated dose without a laterality is not attributed
        assert!(report.irradiation.accumulated_by_laterality.is_empty());
    }

    #[test]
    fn test_forced_mammography_without_evidence() {
        let root = ContentNode::root(vec![ContentNode::container(CT_ACQUISITION, vec![])]);
        let config = ExtractConfig::default().with_kind(ReportKind::Mammography);
        let err = DoseReportExtractor::extract_document(&sr_header(), &root, &config).unwrap_err();
        assert!(err.is_not_extractable());
    }

    #[test]
    fn test_forced_ct() {
        let root = ContentNode::root(vec![ContentNode::container(
            IRRADIATION_EVENT_XRAY_DATA,
            vec![],
        )]);
        let config = ExtractConfig::default().with_kind(ReportKind::Ct);
        let report = DoseReportExtractor::extract_document(&sr_header(), &root, &config).unwrap();
        assert_eq!(report.kind, ReportKind::Ct);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_unrecognized_falls_back_to_ct() {
        let root = ContentNode::root(vec![ContentNode::text(COMMENT, "nothing here")]);
        let report =
            DoseReportExtractor::extract_document(&sr_header(), &root, &ExtractConfig::default())
                .unwrap();
        assert_eq!(report.kind, ReportKind::Ct);
        assert!(report.irradiation.is_empty());
    }

    #[test]
    fn test_from_missing_file() {
        let err = DoseReportExtractor::from_file("/nonexistent/report.dcm", &ExtractConfig::default())
            .unwrap_err();
        assert!(!err.is_not_extractable());
    }
}
