use crate::content::ContentItem;
use crate::extraction::display_value;
use crate::types::{DoseReport, FieldList, Measurement};
use std::fmt;

const UNKNOWN: &str = "unknown";

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

/// Text report formatter for dose reports
pub struct TextReport<'a> {
    report: &'a DoseReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a DoseReport) -> Self {
        Self { report }
    }

    fn write_fields(f: &mut fmt::Formatter<'_>, fields: &FieldList) -> fmt::Result {
        for (name, value) in fields.iter() {
            if let Some(value) = value {
                writeln!(f, "  {:<24}{}", format!("{}:", name), value.display())?;
            }
        }
        Ok(())
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let essential = &report.essential;

        writeln!(f, "Dose Report ({})", report.kind)?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Patient ID:     {}", or_unknown(&essential.patient_id))?;
        writeln!(f, "Patient Name:   {}", or_unknown(&essential.patient_name))?;
        writeln!(f, "Sex:            {}", or_unknown(&essential.sex))?;
        writeln!(f, "Birth Date:     {}", or_unknown(&essential.birth_date))?;
        writeln!(f, "Age:            {}", report.age())?;
        writeln!(f, "Study Date:     {}", or_unknown(&essential.study_date))?;
        writeln!(f, "Accession:      {}", or_unknown(&essential.accession_number))?;
        writeln!(f, "Hospital:       {}", or_unknown(&report.hospital))?;
        writeln!(f, "Report Date:    {}", or_unknown(&report.report_date))?;
        writeln!(
            f,
            "Manufacturer:   {}",
            or_unknown(&report.equipment.manufacturer)
        )?;
        writeln!(f, "Model:          {}", or_unknown(&report.equipment.model))?;
        writeln!(
            f,
            "Station:        {}",
            or_unknown(&report.equipment.station_name)
        )?;
        writeln!(f)?;

        writeln!(f, "Accumulated Dose")?;
        writeln!(f, "----------------")?;
        let irradiation = &report.irradiation;
        let measurement = |m: &Option<Measurement>| {
            m.as_ref()
                .map(Measurement::display)
                .unwrap_or_else(|| UNKNOWN.to_string())
        };
        writeln!(f, "Total Events:   {}", measurement(&irradiation.total_events))?;
        writeln!(f, "Total Dose:     {}", measurement(&irradiation.total_dose))?;
        for (laterality, dose) in &irradiation.accumulated_by_laterality {
            writeln!(f, "  {:<14}{}", format!("{}:", laterality.simple_name()), dose)?;
        }
        if !report.summary.all_missing() {
            Self::write_fields(f, &report.summary)?;
        }
        writeln!(f)?;

        writeln!(f, "Events: {}", report.events.len())?;
        for event in &report.events {
            writeln!(f)?;
            writeln!(f, "Event {}", event.index)?;
            writeln!(f, "--------")?;
            Self::write_fields(f, &event.fields)?;
            for (name, stats) in event.stats.iter() {
                if stats.count > 0 {
                    writeln!(
                        f,
                        "  {:<24}n={} min={} max={} avg={}",
                        format!("{} stats:", name),
                        stats.count,
                        stats.min.unwrap_or_default(),
                        stats.max.unwrap_or_default(),
                        stats.avg.unwrap_or_default()
                    )?;
                }
            }
            for (name, values) in event.lists.iter() {
                if !values.is_empty() {
                    writeln!(f, "  {:<24}{}", format!("{}:", name), values.join(", "))?;
                }
            }
        }

        Ok(())
    }
}

/// Depth-indented dump of a whole content tree
///
/// Each line holds the concept code, the value type, the concept name and
/// the typed value of one item.
pub struct ContentTreeDump<'a, N> {
    root: &'a N,
}

impl<'a, N: ContentItem> ContentTreeDump<'a, N> {
    pub fn new(root: &'a N) -> Self {
        Self { root }
    }

    fn write_node(f: &mut fmt::Formatter<'_>, node: &N, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}[{}] {} {}",
            "",
            node.concept_code().as_deref().unwrap_or("?"),
            node.value_kind().dicom_name(),
            node.concept_name().as_deref().unwrap_or(""),
            indent = depth * 2
        )?;
        match display_value(node) {
            Some(value) => writeln!(f, " = {}", value)?,
            None => writeln!(f)?,
        }
        for child in node.children() {
            Self::write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl<'a, N: ContentItem> fmt::Display for ContentTreeDump<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.root.children() {
            Self::write_node(f, child, 0)?;
        }
        Ok(())
    }
}
