//! Tabular export
//!
//! Each report kind has a fixed column schema. A report yields one row per
//! event, or a single row of document-level values when it has no events.
//! Missing values stay [`Cell::Missing`]; rendering them is the writer's job.

mod columns;
pub mod csv;
#[cfg(feature = "json")]
pub mod json;

pub use columns::{CT_COLUMNS, MAMMOGRAPHY_COLUMNS};

use crate::types::{Age, DoseReport, EventRecord, ReportKind};
use std::fmt;

/// One exported value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Integer(i64),
}

impl Cell {
    /// Text cell, missing when absent
    pub fn text(value: Option<String>) -> Self {
        value.map(Cell::Text).unwrap_or(Cell::Missing)
    }

    /// Number cell, missing when absent
    pub fn number(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Missing)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Renders the cell, using `placeholder` for missing values
    pub fn render(&self, placeholder: &str) -> String {
        match self {
            Cell::Missing => placeholder.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Integer(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(""))
    }
}

/// Values available while building one row
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub report: &'a DoseReport,
    /// `None` for the base row of a report without events
    pub event: Option<&'a EventRecord>,
}

impl<'a> RowContext<'a> {
    /// Display string of an event field
    pub fn field_text(&self, name: &str) -> Cell {
        Cell::text(self.event.and_then(|e| e.fields.text(name)))
    }

    /// Bare number of an event measurement field
    pub fn field_number(&self, name: &str) -> Cell {
        Cell::number(self.event.and_then(|e| e.fields.number(name)))
    }

    /// Patient ID, as an integer when it is all digits
    pub fn patient_id(&self) -> Cell {
        match self.report.essential.patient_id.as_deref() {
            Some(id) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => id
                .parse::<i64>()
                .map(Cell::Integer)
                .unwrap_or_else(|_| Cell::Text(id.to_string())),
            Some(id) => Cell::Text(id.to_string()),
            None => Cell::Missing,
        }
    }

    /// Patient age; estimated ages are marked with `~`
    pub fn age(&self) -> Cell {
        match self.report.age() {
            Age::Exact(years) => Cell::Integer(years as i64),
            estimated @ Age::Estimated(_) => Cell::Text(estimated.to_string()),
            Age::Unknown => Cell::Missing,
        }
    }
}

/// One column of an export schema
#[derive(Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub value: fn(&RowContext<'_>) -> Cell,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("header", &self.header).finish()
    }
}

/// Returns the column schema of a report kind
pub fn columns_for(kind: ReportKind) -> &'static [Column] {
    match kind {
        ReportKind::Ct => CT_COLUMNS,
        ReportKind::Mammography => MAMMOGRAPHY_COLUMNS,
    }
}

/// Returns the column headers of a report kind
pub fn headers(kind: ReportKind) -> Vec<&'static str> {
    columns_for(kind).iter().map(|c| c.header).collect()
}

/// Builds the rows of one report
pub fn rows(report: &DoseReport) -> Vec<Vec<Cell>> {
    let columns = columns_for(report.kind);
    let build = |event: Option<&EventRecord>| {
        let ctx = RowContext { report, event };
        columns.iter().map(|c| (c.value)(&ctx)).collect::<Vec<_>>()
    };

    if report.events.is_empty() {
        vec![build(None)]
    } else {
        report.events.iter().map(|e| build(Some(e))).collect()
    }
}

/// Builds header-keyed rows, `(header, cell)` pairs in column order
pub fn named_rows(report: &DoseReport) -> Vec<Vec<(&'static str, Cell)>> {
    let headers = headers(report.kind);
    rows(report)
        .into_iter()
        .map(|row| headers.iter().copied().zip(row).collect())
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{
        EssentialInfo, FieldList, FieldValue, IrradiationInfo, Measurement, Named,
    };

    pub(crate) fn report(kind: ReportKind, events: Vec<EventRecord>) -> DoseReport {
        DoseReport {
            kind,
            hospital: None,
            report_date: None,
            essential: EssentialInfo {
                patient_id: Some("00123".to_string()),
                birth_date: Some("Jan 1, 1980".to_string()),
                study_date: Some("Jun 15, 2024".to_string()),
                ..Default::default()
            },
            equipment: Default::default(),
            device: Default::default(),
            irradiation: IrradiationInfo {
                total_dose: Some(Measurement::new("500", Some("mGy.cm".to_string()))),
                ..Default::default()
            },
            summary: FieldList::new(),
            events,
        }
    }

    fn ct_event(protocol: &str) -> EventRecord {
        let mut fields = FieldList::new();
        fields.insert("protocol", Some(FieldValue::Text(protocol.to_string())));
        fields.insert(
            "mean_ctdivol",
            Some(FieldValue::Measurement(Measurement::new(
                "12.5",
                Some("mGy".to_string()),
            ))),
        );
        EventRecord {
            index: 1,
            fields,
            stats: Named::new(),
            lists: Named::new(),
        }
    }

    #[test]
    fn test_cell_render() {
        assert_eq!(Cell::Missing.render("-"), "-");
        assert_eq!(Cell::Number(90.0).render("-"), "90");
        assert_eq!(Cell::Number(1.333).render("-"), "1.333");
        assert_eq!(Cell::Integer(44).to_string(), "44");
    }

    #[test]
    fn test_rows_per_event() {
        let r = report(ReportKind::Ct, vec![ct_event("Head"), ct_event("Chest")]);
        let rows = rows(&r);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), CT_COLUMNS.len());

        let named = named_rows(&r);
        let get = |h: &str| named[1].iter().find(|(n, _)| *n == h).unwrap().1.clone();
        assert_eq!(get("Patient ID"), Cell::Integer(123));
        assert_eq!(get("Age"), Cell::Integer(44));
        assert_eq!(get("Protocol"), Cell::Text("Chest".to_string()));
        assert_eq!(get("CTDIvol"), Cell::Text("12.5 mGy".to_string()));
        assert_eq!(get("Total DLP"), Cell::Text("500 mGy.cm".to_string()));
        assert_eq!(get("SSDE"), Cell::Missing);
    }

    #[test]
    fn test_report_without_events_has_base_row() {
        let r = report(ReportKind::Mammography, vec![]);
        let rows = rows(&r);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], Cell::Integer(123));
        let protocol = headers(ReportKind::Mammography)
            .iter()
            .position(|h| *h == "Protocol")
            .unwrap();
        assert!(rows[0][protocol].is_missing());
    }

    #[test]
    fn test_mammography_event_row() {
        use crate::content::ContentNode;
        use crate::extraction::codes::*;
        use crate::extraction::{assemble, DocumentHeader, MAMMOGRAPHY_SCHEMA};

        let root = ContentNode::root(vec![
            ContentNode::container(
                ACCUMULATED_XRAY_DOSE_DATA,
                vec![ContentNode::num(ACCUMULATED_AVERAGE_GLANDULAR_DOSE, "2.5", "mGy")
                    .with_children(vec![ContentNode::code(LATERALITY, "Left breast")])],
            ),
            ContentNode::container(
                IRRADIATION_EVENT_XRAY_DATA,
                vec![
                    ContentNode::code(ANATOMICAL_STRUCTURE, "Breast")
                        .with_children(vec![ContentNode::code(LATERALITY, "Left breast")]),
                    ContentNode::num(KVP, "28", "kV"),
                    ContentNode::num(KVP, "30", "kV"),
                    ContentNode::num(XRAY_TUBE_CURRENT, "100", "mA"),
                    ContentNode::num(XRAY_TUBE_CURRENT, "120", "mA"),
                    ContentNode::num(PULSE_WIDTH, "50", "ms"),
                    ContentNode::num(PULSE_WIDTH, "60", "ms"),
                    ContentNode::num(PULSE_WIDTH, "70", "ms"),
                    ContentNode::num(AVERAGE_GLANDULAR_DOSE, "1.2", "mGy"),
                    ContentNode::container(
                        XRAY_FILTERS,
                        vec![
                            ContentNode::code(XRAY_FILTER_MATERIAL, "Rhodium"),
                            ContentNode::code(XRAY_FILTER_MATERIAL, "Silver"),
                        ],
                    ),
                ],
            ),
        ]);
        let header = DocumentHeader {
            modality: Some("SR".to_string()),
            patient_id: Some("00123".to_string()),
            ..Default::default()
        };
        let report = assemble(&header, &root, &MAMMOGRAPHY_SCHEMA);

        let named = named_rows(&report);
        assert_eq!(named.len(), 1);
        let get = |h: &str| named[0].iter().find(|(n, _)| *n == h).unwrap().1.clone();

        assert_eq!(get("Patient ID"), Cell::Integer(123));
        assert_eq!(get("Laterality"), Cell::Text("Left".to_string()));
        assert_eq!(get("kVp"), Cell::Number(28.0));
        assert_eq!(get("kVp min"), Cell::Number(28.0));
        assert_eq!(get("kVp max"), Cell::Number(30.0));
        assert_eq!(get("kVp avg"), Cell::Number(29.0));
        assert_eq!(get("Tube current"), Cell::Number(100.0));
        assert_eq!(get("mA avg"), Cell::Number(110.0));
        assert_eq!(get("Pulses recorded"), Cell::Integer(3));
        assert_eq!(get("Pulse width"), Cell::Number(50.0));
        assert_eq!(get("Pulse width max"), Cell::Number(70.0));
        assert_eq!(get("AGD (event)"), Cell::Number(1.2));
        assert_eq!(get("AGD (accumulated)"), Cell::Number(2.5));
        assert_eq!(get("Filter 1"), Cell::Text("Rhodium".to_string()));
        assert_eq!(get("Filter 2"), Cell::Text("Silver".to_string()));
        assert!(get("Filter 3").is_missing());
        assert!(get("Grid").is_missing());
    }

    #[test]
    fn test_estimated_age_is_marked() {
        let mut r = report(ReportKind::Ct, vec![]);
        r.essential.birth_date = Some("1980".to_string());
        let ctx = RowContext {
            report: &r,
            event: None,
        };
        assert_eq!(ctx.age(), Cell::Text("~44".to_string()));
    }

    #[test]
    fn test_patient_id_text() {
        let mut r = report(ReportKind::Ct, vec![]);
        r.essential.patient_id = Some("AB-12".to_string());
        let ctx = RowContext {
            report: &r,
            event: None,
        };
        assert_eq!(ctx.patient_id(), Cell::Text("AB-12".to_string()));
    }
}
