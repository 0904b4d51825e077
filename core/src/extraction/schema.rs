//! Declarative report schemas
//!
//! A [`ReportSchema`] lists, per report kind, which container holds each
//! event and which field is read from where. Adding a report kind means
//! adding a table, not a new traversal.

use super::codes::*;
use super::locator::find_first;
use crate::content::ContentItem;
use crate::types::ReportKind;

/// How the value of a located content item is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// Free text of a TEXT item
    Text,
    /// Meaning of the coded value of a CODE item
    CodeMeaning,
    /// Measured value of a NUM item, with unit
    Numeric,
    /// First same-coded NUM item whose value parses as a number
    FirstNumber,
    /// UID of a UIDREF item
    Uid,
    /// Display-normalized date/time
    DateTime,
    /// Laterality normalized from a coded meaning
    Laterality,
}

/// One field read from a container
///
/// `path` names the sub-containers to descend through, first match at each
/// step, before looking up `code`. Specs sharing a name are fallbacks: the
/// first one in table order that yields a value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub path: &'static [ConceptCode],
    pub code: ConceptCode,
    pub mode: ValueMode,
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        path: &'static [ConceptCode],
        code: ConceptCode,
        mode: ValueMode,
    ) -> Self {
        Self {
            name,
            path,
            code,
            mode,
        }
    }
}

const fn field(name: &'static str, code: ConceptCode, mode: ValueMode) -> FieldSpec {
    FieldSpec::new(name, &[], code, mode)
}

/// Statistics over every same-coded measurement directly inside an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatSpec {
    pub name: &'static str,
    pub code: ConceptCode,
}

/// Distinct coded meanings collected from every matching sub-container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    pub name: &'static str,
    pub container: ConceptCode,
    pub code: ConceptCode,
}

/// Where accumulated dose data lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulatedSpec {
    /// Root-level accumulated dose container
    pub container: ConceptCode,
    pub total_events: Option<ConceptCode>,
    pub total_dose: Option<ConceptCode>,
    /// Dose items each annotated by a nested laterality item
    pub per_laterality: Option<ConceptCode>,
}

/// Complete extraction schema for one report kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSchema {
    pub kind: ReportKind,
    /// Root-level container code of one acquisition or event
    pub event_container: ConceptCode,
    pub accumulated: AccumulatedSpec,
    /// Fields read from each event container
    pub event_fields: &'static [FieldSpec],
    pub event_stats: &'static [StatSpec],
    pub event_lists: &'static [ListSpec],
    /// Fields read from the content tree root
    pub summary_fields: &'static [FieldSpec],
}

impl ReportSchema {
    /// Returns the built-in schema of a report kind
    pub fn for_kind(kind: ReportKind) -> &'static ReportSchema {
        match kind {
            ReportKind::Ct => &CT_SCHEMA,
            ReportKind::Mammography => &MAMMOGRAPHY_SCHEMA,
        }
    }

    /// Field names in schema order, fallbacks collapsed
    pub fn event_field_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for spec in self.event_fields {
            if !names.contains(&spec.name) {
                names.push(spec.name);
            }
        }
        names
    }
}

const ACQ_PARAMS: &[ConceptCode] = &[CT_ACQUISITION_PARAMETERS];
const SOURCE_PARAMS: &[ConceptCode] = &[CT_ACQUISITION_PARAMETERS, CT_XRAY_SOURCE_PARAMETERS];
// some devices place the source parameters directly in the acquisition
const SOURCE_PARAMS_FLAT: &[ConceptCode] = &[CT_XRAY_SOURCE_PARAMETERS];
const DOSE: &[ConceptCode] = &[CT_DOSE];
const ANATOMY: &[ConceptCode] = &[ANATOMICAL_STRUCTURE];

const SUMMARY_FIELDS: &[FieldSpec] = &[field(
    "dose_source",
    SOURCE_OF_DOSE_INFORMATION,
    ValueMode::CodeMeaning,
)];

const CT_EVENT_FIELDS: &[FieldSpec] = &[
    field("protocol", ACQUISITION_PROTOCOL, ValueMode::Text),
    field("target_region", TARGET_REGION, ValueMode::CodeMeaning),
    field("acquisition_type", CT_ACQUISITION_TYPE, ValueMode::CodeMeaning),
    field("procedure_context", PROCEDURE_CONTEXT, ValueMode::CodeMeaning),
    field("irradiation_event_uid", IRRADIATION_EVENT_UID, ValueMode::Uid),
    field("comment", COMMENT, ValueMode::Text),
    FieldSpec::new("exposure_time", ACQ_PARAMS, EXPOSURE_TIME, ValueMode::Numeric),
    FieldSpec::new("scanning_length", ACQ_PARAMS, SCANNING_LENGTH, ValueMode::Numeric),
    FieldSpec::new(
        "single_collimation",
        ACQ_PARAMS,
        NOMINAL_SINGLE_COLLIMATION_WIDTH,
        ValueMode::Numeric,
    ),
    FieldSpec::new(
        "total_collimation",
        ACQ_PARAMS,
        NOMINAL_TOTAL_COLLIMATION_WIDTH,
        ValueMode::Numeric,
    ),
    FieldSpec::new(
        "num_xray_sources",
        ACQ_PARAMS,
        NUMBER_OF_XRAY_SOURCES,
        ValueMode::Numeric,
    ),
    FieldSpec::new("pitch_factor", ACQ_PARAMS, PITCH_FACTOR, ValueMode::Numeric),
    FieldSpec::new(
        "xray_source_id",
        SOURCE_PARAMS,
        IDENTIFICATION_OF_XRAY_SOURCE,
        ValueMode::Text,
    ),
    FieldSpec::new(
        "xray_source_id",
        SOURCE_PARAMS_FLAT,
        IDENTIFICATION_OF_XRAY_SOURCE,
        ValueMode::Text,
    ),
    FieldSpec::new("kvp", SOURCE_PARAMS, KVP, ValueMode::Numeric),
    FieldSpec::new("kvp", SOURCE_PARAMS_FLAT, KVP, ValueMode::Numeric),
    FieldSpec::new(
        "max_tube_current",
        SOURCE_PARAMS,
        MAXIMUM_XRAY_TUBE_CURRENT,
        ValueMode::Numeric,
    ),
    FieldSpec::new(
        "max_tube_current",
        SOURCE_PARAMS_FLAT,
        MAXIMUM_XRAY_TUBE_CURRENT,
        ValueMode::Numeric,
    ),
    FieldSpec::new("tube_current", SOURCE_PARAMS, XRAY_TUBE_CURRENT, ValueMode::Numeric),
    FieldSpec::new(
        "tube_current",
        SOURCE_PARAMS_FLAT,
        XRAY_TUBE_CURRENT,
        ValueMode::Numeric,
    ),
    FieldSpec::new(
        "exposure_time_per_rotation",
        SOURCE_PARAMS,
        EXPOSURE_TIME_PER_ROTATION,
        ValueMode::Numeric,
    ),
    FieldSpec::new(
        "exposure_time_per_rotation",
        SOURCE_PARAMS_FLAT,
        EXPOSURE_TIME_PER_ROTATION,
        ValueMode::Numeric,
    ),
    FieldSpec::new("mean_ctdivol", DOSE, MEAN_CTDIVOL, ValueMode::Numeric),
    FieldSpec::new("phantom_type", DOSE, CTDIW_PHANTOM_TYPE, ValueMode::CodeMeaning),
    FieldSpec::new("dlp", DOSE, DLP, ValueMode::Numeric),
    FieldSpec::new("ssde", DOSE, SIZE_SPECIFIC_DOSE_ESTIMATION, ValueMode::Numeric),
    FieldSpec::new(
        "ctdivol_alert_value",
        DOSE,
        CTDIVOL_ALERT_VALUE,
        ValueMode::Numeric,
    ),
];

const MAMMOGRAPHY_EVENT_FIELDS: &[FieldSpec] = &[
    field("event_uid", IRRADIATION_EVENT_UID, ValueMode::Uid),
    field("datetime_started", DATETIME_STARTED, ValueMode::DateTime),
    field("event_type", IRRADIATION_EVENT_TYPE, ValueMode::CodeMeaning),
    field("protocol", ACQUISITION_PROTOCOL, ValueMode::Text),
    field("target_region", ANATOMICAL_STRUCTURE, ValueMode::CodeMeaning),
    field("target_region", TARGET_REGION, ValueMode::CodeMeaning),
    FieldSpec::new("laterality", ANATOMY, LATERALITY, ValueMode::Laterality),
    field("laterality", LATERALITY, ValueMode::Laterality),
    field("image_view", IMAGE_VIEW, ValueMode::CodeMeaning),
    field("kvp", KVP, ValueMode::FirstNumber),
    field("tube_current", XRAY_TUBE_CURRENT, ValueMode::FirstNumber),
    field("exposure_time", EXPOSURE_TIME, ValueMode::Numeric),
    field("pulse_width", PULSE_WIDTH, ValueMode::FirstNumber),
    field("number_of_pulses", NUMBER_OF_PULSES, ValueMode::Numeric),
    field("irradiation_duration", IRRADIATION_DURATION, ValueMode::Numeric),
    field("focal_spot_size", FOCAL_SPOT_SIZE, ValueMode::Numeric),
    field("agd", AVERAGE_GLANDULAR_DOSE, ValueMode::Numeric),
    field("entrance_exposure", ENTRANCE_EXPOSURE_AT_RP, ValueMode::Numeric),
    field("half_value_layer", HALF_VALUE_LAYER, ValueMode::Numeric),
    field("compression_thickness", COMPRESSION_THICKNESS, ValueMode::Numeric),
    field("distance_source_rp", DISTANCE_SOURCE_TO_RP, ValueMode::Numeric),
    field("field_area", COLLIMATED_FIELD_AREA, ValueMode::Numeric),
    field("field_height", COLLIMATED_FIELD_HEIGHT, ValueMode::Numeric),
    field("field_width", COLLIMATED_FIELD_WIDTH, ValueMode::Numeric),
    field("anode_material", ANODE_TARGET_MATERIAL, ValueMode::CodeMeaning),
    field("grid", XRAY_GRID, ValueMode::CodeMeaning),
    field("positioner_angle", POSITIONER_PRIMARY_ANGLE, ValueMode::Numeric),
];

const MAMMOGRAPHY_EVENT_STATS: &[StatSpec] = &[
    StatSpec {
        name: "kvp",
        code: KVP,
    },
    StatSpec {
        name: "tube_current",
        code: XRAY_TUBE_CURRENT,
    },
    StatSpec {
        name: "pulse_width",
        code: PULSE_WIDTH,
    },
];

const MAMMOGRAPHY_EVENT_LISTS: &[ListSpec] = &[ListSpec {
    name: "filters",
    container: XRAY_FILTERS,
    code: XRAY_FILTER_MATERIAL,
}];

/// CT radiation dose report: one record per CT acquisition
pub static CT_SCHEMA: ReportSchema = ReportSchema {
    kind: ReportKind::Ct,
    event_container: CT_ACQUISITION,
    accumulated: AccumulatedSpec {
        container: CT_ACCUMULATED_DOSE_DATA,
        total_events: Some(TOTAL_NUMBER_OF_IRRADIATION_EVENTS),
        total_dose: Some(CT_DOSE_LENGTH_PRODUCT_TOTAL),
        per_laterality: None,
    },
    event_fields: CT_EVENT_FIELDS,
    event_stats: &[],
    event_lists: &[],
    summary_fields: SUMMARY_FIELDS,
};

/// Mammography dose report: one record per irradiation event
pub static MAMMOGRAPHY_SCHEMA: ReportSchema = ReportSchema {
    kind: ReportKind::Mammography,
    event_container: IRRADIATION_EVENT_XRAY_DATA,
    accumulated: AccumulatedSpec {
        container: ACCUMULATED_XRAY_DOSE_DATA,
        total_events: Some(TOTAL_NUMBER_OF_IRRADIATION_EVENTS),
        total_dose: None,
        per_laterality: Some(ACCUMULATED_AVERAGE_GLANDULAR_DOSE),
    },
    event_fields: MAMMOGRAPHY_EVENT_FIELDS,
    event_stats: MAMMOGRAPHY_EVENT_STATS,
    event_lists: MAMMOGRAPHY_EVENT_LISTS,
    summary_fields: SUMMARY_FIELDS,
};

/// Returns whether the root carries mammography dose content
///
/// True when the root has an accumulated projection dose container, an
/// irradiation event container, or a child whose coded meaning mentions
/// "Mammography".
pub fn has_mammography_evidence<N: ContentItem>(root: &N) -> bool {
    let children = root.children();
    find_first(children, ACCUMULATED_XRAY_DOSE_DATA).is_some()
        || find_first(children, IRRADIATION_EVENT_XRAY_DATA).is_some()
        || children.iter().any(|child| {
            child
                .code_meaning()
                .map(|m| m.contains("Mammography"))
                .unwrap_or(false)
        })
}

/// Returns whether the root carries CT dose content
pub fn has_ct_evidence<N: ContentItem>(root: &N) -> bool {
    let children = root.children();
    find_first(children, CT_ACCUMULATED_DOSE_DATA).is_some()
        || find_first(children, CT_ACQUISITION).is_some()
}

/// Detects the report kind from root-level content
///
/// CT evidence takes precedence. Returns `None` when neither kind is recognized.
pub fn detect_kind<N: ContentItem>(root: &N) -> Option<ReportKind> {
    if has_ct_evidence(root) {
        Some(ReportKind::Ct)
    } else if has_mammography_evidence(root) {
        Some(ReportKind::Mammography)
    } else {
        None
    }
}
