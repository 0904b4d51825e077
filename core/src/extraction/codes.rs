//! Concept codes of the radiation dose reporting vocabulary
//!
//! Codes are DCM code values unless noted; the anatomy and laterality codes
//! keep their SRT legacy values as emitted by dose reporting equipment.

use std::fmt;

/// Concept code identifying a field in the dose reporting vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptCode(pub &'static str);

impl ConceptCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Returns whether a content item's code value matches this code
    pub fn matches(&self, code_value: &str) -> bool {
        self.0 == code_value
    }
}

impl fmt::Display for ConceptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Device Observer Context
pub const DEVICE_OBSERVER_NAME: ConceptCode = ConceptCode("121013");
pub const DEVICE_OBSERVER_MANUFACTURER: ConceptCode = ConceptCode("121014");
pub const DEVICE_OBSERVER_MODEL_NAME: ConceptCode = ConceptCode("121015");
pub const DEVICE_OBSERVER_SERIAL_NUMBER: ConceptCode = ConceptCode("121016");
pub const DEVICE_OBSERVER_PHYSICAL_LOCATION: ConceptCode = ConceptCode("121017");

// Report Level
pub const XRAY_RADIATION_DOSE_REPORT: ConceptCode = ConceptCode("113701");
pub const START_OF_XRAY_IRRADIATION: ConceptCode = ConceptCode("113809");
pub const END_OF_XRAY_IRRADIATION: ConceptCode = ConceptCode("113810");
pub const SOURCE_OF_DOSE_INFORMATION: ConceptCode = ConceptCode("113854");

// CT Accumulated Dose Data
pub const CT_ACCUMULATED_DOSE_DATA: ConceptCode = ConceptCode("113811");
pub const TOTAL_NUMBER_OF_IRRADIATION_EVENTS: ConceptCode = ConceptCode("113812");
pub const CT_DOSE_LENGTH_PRODUCT_TOTAL: ConceptCode = ConceptCode("113813");

// CT Acquisition
pub const CT_ACQUISITION: ConceptCode = ConceptCode("113819");
pub const ACQUISITION_PROTOCOL: ConceptCode = ConceptCode("125203");
pub const TARGET_REGION: ConceptCode = ConceptCode("123014");
pub const CT_ACQUISITION_TYPE: ConceptCode = ConceptCode("113820");
pub const PROCEDURE_CONTEXT: ConceptCode = ConceptCode("G-C32C");
pub const IRRADIATION_EVENT_UID: ConceptCode = ConceptCode("113769");
pub const COMMENT: ConceptCode = ConceptCode("121106");

// CT Acquisition Parameters
pub const CT_ACQUISITION_PARAMETERS: ConceptCode = ConceptCode("113822");
pub const EXPOSURE_TIME: ConceptCode = ConceptCode("113824");
pub const SCANNING_LENGTH: ConceptCode = ConceptCode("113825");
pub const NOMINAL_SINGLE_COLLIMATION_WIDTH: ConceptCode = ConceptCode("113826");
pub const NOMINAL_TOTAL_COLLIMATION_WIDTH: ConceptCode = ConceptCode("113827");
pub const NUMBER_OF_XRAY_SOURCES: ConceptCode = ConceptCode("113823");
pub const PITCH_FACTOR: ConceptCode = ConceptCode("113828");

// CT X-Ray Source Parameters
pub const CT_XRAY_SOURCE_PARAMETERS: ConceptCode = ConceptCode("113831");
pub const IDENTIFICATION_OF_XRAY_SOURCE: ConceptCode = ConceptCode("113832");
pub const KVP: ConceptCode = ConceptCode("113733");
pub const MAXIMUM_XRAY_TUBE_CURRENT: ConceptCode = ConceptCode("113833");
pub const XRAY_TUBE_CURRENT: ConceptCode = ConceptCode("113734");
pub const EXPOSURE_TIME_PER_ROTATION: ConceptCode = ConceptCode("113834");

// CT Dose
pub const CT_DOSE: ConceptCode = ConceptCode("113829");
pub const MEAN_CTDIVOL: ConceptCode = ConceptCode("113830");
pub const CTDIW_PHANTOM_TYPE: ConceptCode = ConceptCode("113835");
pub const DLP: ConceptCode = ConceptCode("113838");
pub const SIZE_SPECIFIC_DOSE_ESTIMATION: ConceptCode = ConceptCode("113930");
pub const CTDIVOL_ALERT_VALUE: ConceptCode = ConceptCode("113904");

// Projection X-Ray Accumulated Dose Data
pub const ACCUMULATED_XRAY_DOSE_DATA: ConceptCode = ConceptCode("113702");
pub const ACCUMULATED_AVERAGE_GLANDULAR_DOSE: ConceptCode = ConceptCode("111637");

// Irradiation Event X-Ray Data
pub const IRRADIATION_EVENT_XRAY_DATA: ConceptCode = ConceptCode("113706");
pub const DATETIME_STARTED: ConceptCode = ConceptCode("111526");
pub const IRRADIATION_EVENT_TYPE: ConceptCode = ConceptCode("113721");

// Anatomy
pub const ANATOMICAL_STRUCTURE: ConceptCode = ConceptCode("T-D0005");
pub const LATERALITY: ConceptCode = ConceptCode("G-C171");
pub const IMAGE_VIEW: ConceptCode = ConceptCode("111031");

// Technique
pub const PULSE_WIDTH: ConceptCode = ConceptCode("113793");
pub const NUMBER_OF_PULSES: ConceptCode = ConceptCode("113768");
pub const IRRADIATION_DURATION: ConceptCode = ConceptCode("113742");
pub const FOCAL_SPOT_SIZE: ConceptCode = ConceptCode("113766");

// Dose and Exposure
pub const AVERAGE_GLANDULAR_DOSE: ConceptCode = ConceptCode("111631");
pub const ENTRANCE_EXPOSURE_AT_RP: ConceptCode = ConceptCode("111636");
pub const HALF_VALUE_LAYER: ConceptCode = ConceptCode("111634");

// Geometry
pub const COMPRESSION_THICKNESS: ConceptCode = ConceptCode("111633");
pub const DISTANCE_SOURCE_TO_RP: ConceptCode = ConceptCode("113737");
pub const COLLIMATED_FIELD_AREA: ConceptCode = ConceptCode("113790");
pub const COLLIMATED_FIELD_HEIGHT: ConceptCode = ConceptCode("113788");
pub const COLLIMATED_FIELD_WIDTH: ConceptCode = ConceptCode("113789");

// Equipment
pub const ANODE_TARGET_MATERIAL: ConceptCode = ConceptCode("111632");
pub const XRAY_FILTERS: ConceptCode = ConceptCode("113771");
pub const XRAY_FILTER_MATERIAL: ConceptCode = ConceptCode("113757");
pub const XRAY_GRID: ConceptCode = ConceptCode("111635");
pub const POSITIONER_PRIMARY_ANGLE: ConceptCode = ConceptCode("112011");
