//! Report assembly
//!
//! Walks one content tree top to bottom, once. Root-level children are
//! indexed by concept code, the accumulated dose container and each event
//! container are indexed on entry, and every field is a lookup in the index
//! of the container it belongs to. A missing container or field is recorded
//! as missing and the walk goes on.

use super::aggregate::aggregate;
use super::codes::*;
use super::header::DocumentHeader;
use super::locator::{find_first, ContainerIndex};
use super::schema::{AccumulatedSpec, FieldSpec, ReportSchema, ValueMode};
use super::values::*;
use crate::content::ContentItem;
use crate::types::{
    DeviceInfo, DoseReport, EventRecord, FieldList, FieldValue, IrradiationInfo, Laterality,
    Measurement, Named,
};
use log::debug;

/// Assembles a report from a content tree root
///
/// Structural checks are the caller's concern; this never fails.
pub fn assemble<N: ContentItem>(
    header: &DocumentHeader,
    root: &N,
    schema: &ReportSchema,
) -> DoseReport {
    let root_index = ContainerIndex::new(root);

    let events: Vec<EventRecord> = root_index
        .all(schema.event_container)
        .iter()
        .enumerate()
        .map(|(i, event)| assemble_event(*event, i + 1, schema))
        .collect();
    debug!("Assembled {} {} events", events.len(), schema.kind);

    DoseReport {
        kind: schema.kind,
        hospital: header.institution_name.clone(),
        report_date: header.report_date(),
        essential: header.essential_info(),
        equipment: header.equipment_info(),
        device: device_info(&root_index),
        irradiation: irradiation_info(&root_index, &schema.accumulated),
        summary: extract_fields(&root_index, schema.summary_fields),
        events,
    }
}

/// Reads one typed value from a located item
pub fn extract_value<N: ContentItem>(node: &N, mode: ValueMode) -> Option<FieldValue> {
    match mode {
        ValueMode::Text => extract_text(node).map(FieldValue::Text),
        ValueMode::CodeMeaning => extract_code_meaning(node).map(FieldValue::Text),
        ValueMode::Numeric => extract_measurement(node).map(FieldValue::Measurement),
        ValueMode::FirstNumber => extract_measurement(node)
            .filter(|m| m.as_f64().is_some())
            .map(FieldValue::Measurement),
        ValueMode::Uid => extract_uid(node).map(FieldValue::Text),
        ValueMode::DateTime => extract_datetime(node).map(FieldValue::DateTime),
        ValueMode::Laterality => extract_laterality(node).map(FieldValue::Laterality),
    }
}

/// Reads every field of a table from one container
///
/// Each distinct sub-container path is indexed at most once. A name that
/// already holds a value is not overwritten by a later fallback spec.
/// [`ValueMode::FirstNumber`] fields skip same-coded items whose value does
/// not parse.
pub fn extract_fields<'a, N: ContentItem>(
    index: &ContainerIndex<'a, N>,
    specs: &[FieldSpec],
) -> FieldList {
    let mut fields = FieldList::new();
    let mut nested: Vec<(&[ConceptCode], Option<ContainerIndex<'a, N>>)> = Vec::new();

    for spec in specs {
        if let Some(Some(_)) = fields.get(spec.name) {
            continue;
        }

        let container = if spec.path.is_empty() {
            Some(index)
        } else {
            let pos = match nested.iter().position(|(path, _)| *path == spec.path) {
                Some(pos) => pos,
                None => {
                    nested.push((spec.path, index.descend(spec.path)));
                    nested.len() - 1
                }
            };
            nested[pos].1.as_ref()
        };

        let value = container.and_then(|c| match spec.mode {
            ValueMode::FirstNumber => c
                .all(spec.code)
                .iter()
                .find_map(|n| extract_value(*n, spec.mode)),
            mode => c.first(spec.code).and_then(|n| extract_value(n, mode)),
        });
        if value.is_none() {
            debug!("Field {} ({}) missing", spec.name, spec.code);
        }
        fields.insert(spec.name, value);
    }

    fields
}

fn assemble_event<N: ContentItem>(event: &N, index: usize, schema: &ReportSchema) -> EventRecord {
    let event_index = ContainerIndex::new(event);
    let fields = extract_fields(&event_index, schema.event_fields);

    let mut stats = Named::new();
    for spec in schema.event_stats {
        stats.insert(
            spec.name,
            aggregate(event_index.all(spec.code).iter().copied(), spec.code),
        );
    }

    let mut lists = Named::new();
    for spec in schema.event_lists {
        let mut values: Vec<String> = Vec::new();
        for container in event_index.all(spec.container) {
            for item in container.children() {
                let matches = item
                    .concept_code()
                    .map(|c| spec.code.matches(&c))
                    .unwrap_or(false);
                if !matches {
                    continue;
                }
                if let Some(meaning) = extract_code_meaning(item) {
                    if !values.contains(&meaning) {
                        values.push(meaning);
                    }
                }
            }
        }
        lists.insert(spec.name, values);
    }

    if event.children().is_empty() {
        debug!("Event {} has no content", index);
    }

    EventRecord {
        index,
        fields,
        stats,
        lists,
    }
}

fn text_of<N: ContentItem>(index: &ContainerIndex<'_, N>, code: ConceptCode) -> Option<String> {
    index
        .first(code)
        .and_then(|node| extract_text(node).or_else(|| extract_code_meaning(node)))
}

fn device_info<N: ContentItem>(root: &ContainerIndex<'_, N>) -> DeviceInfo {
    DeviceInfo {
        observer_name: text_of(root, DEVICE_OBSERVER_NAME),
        manufacturer: text_of(root, DEVICE_OBSERVER_MANUFACTURER),
        model_name: text_of(root, DEVICE_OBSERVER_MODEL_NAME),
        serial_number: text_of(root, DEVICE_OBSERVER_SERIAL_NUMBER),
        physical_location: text_of(root, DEVICE_OBSERVER_PHYSICAL_LOCATION),
    }
}

/// Reads accumulated irradiation data
///
/// Only populated when the accumulated container exists. Start and end
/// times are looked up inside the container first, then among its
/// root-level siblings.
/// A later per-laterality dose replaces an earlier one for the same side.
fn irradiation_info<N: ContentItem>(
    root: &ContainerIndex<'_, N>,
    spec: &AccumulatedSpec,
) -> IrradiationInfo {
    let container = match root.first(spec.container) {
        Some(container) => container,
        None => {
            debug!("No accumulated dose container {}", spec.container);
            return IrradiationInfo::default();
        }
    };
    let acc = ContainerIndex::new(container);

    let datetime = |code: ConceptCode| {
        acc.first(code)
            .and_then(extract_datetime)
            .or_else(|| root.first(code).and_then(extract_datetime))
    };
    let measurement = |code: Option<ConceptCode>| {
        code.and_then(|c| acc.first(c))
            .and_then(extract_measurement)
    };

    let mut by_laterality: Vec<(Laterality, Measurement)> = Vec::new();
    if let Some(code) = spec.per_laterality {
        for item in acc.all(code) {
            let laterality =
                find_first(item.children(), LATERALITY).and_then(extract_laterality);
            match (laterality, extract_measurement(*item)) {
                (Some(l), Some(m)) => {
                    match by_laterality.iter_mut().find(|(seen, _)| *seen == l) {
                        Some(entry) => entry.1 = m,
                        None => by_laterality.push((l, m)),
                    }
                }
                _ => debug!("Skipping accumulated dose item without laterality or value"),
            }
        }
    }

    IrradiationInfo {
        start_time: datetime(START_OF_XRAY_IRRADIATION),
        end_time: datetime(END_OF_XRAY_IRRADIATION),
        total_events: measurement(spec.total_events),
        total_dose: measurement(spec.total_dose),
        accumulated_by_laterality: by_laterality,
    }
}
