use super::{Age, Laterality, Measurement, MeasurementStats, ReportKind};
use crate::extraction::dates::calculate_age;

/// Typed value of one extracted field
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(untagged))]
pub enum FieldValue {
    /// Free text, coded meaning or UID
    Text(String),
    /// Numeric value with unit
    Measurement(Measurement),
    /// Display-normalized date/time
    DateTime(String),
    /// Normalized laterality
    Laterality(Laterality),
}

impl FieldValue {
    /// Returns the human-readable form of the value
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::DateTime(s) => s.clone(),
            FieldValue::Measurement(m) => m.display(),
            FieldValue::Laterality(l) => l.simple_name().to_string(),
        }
    }

    /// Returns the bare numeric value, for measurements only
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Measurement(m) => m.as_f64(),
            _ => None,
        }
    }

    /// Returns the measurement, if this is one
    pub fn as_measurement(&self) -> Option<&Measurement> {
        match self {
            FieldValue::Measurement(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the laterality, if this is one
    pub fn as_laterality(&self) -> Option<Laterality> {
        match self {
            FieldValue::Laterality(l) => Some(*l),
            _ => None,
        }
    }
}

/// Ordered list of named entries
///
/// Order is the schema order and is stable across documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Named<T>(Vec<(&'static str, T)>);

/// Ordered (field name, value-or-missing) pairs
pub type FieldList = Named<Option<FieldValue>>;

impl<T> Named<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an entry, or replaces the value of an existing name
    pub fn insert(&mut self, name: &'static str, value: T) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, T)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for Named<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldList {
    /// Returns the value of a field, `None` when missing or unknown
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).and_then(|v| v.as_ref())
    }

    /// Returns the display string of a field
    pub fn text(&self, name: &str) -> Option<String> {
        self.value(name).map(FieldValue::display)
    }

    /// Returns the bare number of a measurement field
    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(FieldValue::as_f64)
    }

    /// Returns whether every field is missing
    pub fn all_missing(&self) -> bool {
        self.iter().all(|(_, v)| v.is_none())
    }
}

#[cfg(feature = "json")]
impl<T: serde::Serialize> serde::Serialize for Named<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Patient and study identity, read from the document header
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct EssentialInfo {
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub study_id: Option<String>,
    pub accession_number: Option<String>,
    /// Display-normalized study date, with time when available
    pub study_date: Option<String>,
    /// Display-normalized birth date
    pub birth_date: Option<String>,
    pub sex: Option<String>,
}

impl EssentialInfo {
    /// Patient age at exam time, derived from birth date and study date
    pub fn age(&self) -> Age {
        match (&self.birth_date, &self.study_date) {
            (Some(birth), Some(exam)) => calculate_age(birth, exam),
            _ => Age::Unknown,
        }
    }
}

/// Equipment identification from the document header
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct EquipmentInfo {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub station_name: Option<String>,
}

/// Device observer context found at the content tree root
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DeviceInfo {
    pub observer_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub serial_number: Option<String>,
    pub physical_location: Option<String>,
}

/// Accumulated irradiation data
///
/// Populated only from the accumulated dose container; when the container
/// is absent every field stays missing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct IrradiationInfo {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_events: Option<Measurement>,
    /// Total accumulated dose (total DLP for CT)
    pub total_dose: Option<Measurement>,
    /// Accumulated dose per laterality (accumulated AGD for mammography)
    pub accumulated_by_laterality: Vec<(Laterality, Measurement)>,
}

impl IrradiationInfo {
    /// Returns the accumulated dose recorded for a laterality
    pub fn accumulated_for(&self, laterality: Laterality) -> Option<&Measurement> {
        self.accumulated_by_laterality
            .iter()
            .find(|(l, _)| *l == laterality)
            .map(|(_, m)| m)
    }

    /// Total accumulated dose as a number
    ///
    /// Falls back to the sum of the per-laterality doses when no total was
    /// recorded.
    pub fn total_dose_value(&self) -> Option<f64> {
        if let Some(total) = self.total_dose.as_ref().and_then(Measurement::as_f64) {
            return Some(total);
        }
        let values: Vec<f64> = self
            .accumulated_by_laterality
            .iter()
            .filter_map(|(_, m)| m.as_f64())
            .collect();
        (!values.is_empty()).then(|| values.iter().sum())
    }

    /// Returns whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.end_time.is_none()
            && self.total_events.is_none()
            && self.total_dose.is_none()
            && self.accumulated_by_laterality.is_empty()
    }
}

/// One CT acquisition or mammography irradiation event
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct EventRecord {
    /// 1-based position in tree-encounter order
    pub index: usize,
    pub fields: FieldList,
    /// Statistics over repeated same-coded measurements
    pub stats: Named<MeasurementStats>,
    /// Multi-valued fields (e.g. distinct filter materials)
    pub lists: Named<Vec<String>>,
}

impl EventRecord {
    /// Returns the event laterality, if one was recorded
    pub fn laterality(&self) -> Option<Laterality> {
        self.fields
            .value("laterality")
            .and_then(FieldValue::as_laterality)
    }

    /// Returns statistics for a name, empty statistics when unknown
    pub fn stats_for(&self, name: &str) -> MeasurementStats {
        self.stats.get(name).copied().unwrap_or_default()
    }

    /// Returns a multi-valued field, empty when unknown
    pub fn list(&self, name: &str) -> &[String] {
        self.lists.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Fully assembled dose report for one document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DoseReport {
    pub kind: ReportKind,
    /// Institution name
    pub hospital: Option<String>,
    /// Display-normalized content date/time
    pub report_date: Option<String>,
    pub essential: EssentialInfo,
    pub equipment: EquipmentInfo,
    pub device: DeviceInfo,
    pub irradiation: IrradiationInfo,
    /// Document-level fields found at the content tree root
    pub summary: FieldList,
    /// Events in tree-encounter order
    pub events: Vec<EventRecord>,
}

impl DoseReport {
    /// Patient age at exam time
    pub fn age(&self) -> Age {
        self.essential.age()
    }

    /// Accumulated dose matching an event's laterality
    pub fn accumulated_dose_for(&self, event: &EventRecord) -> Option<&Measurement> {
        event
            .laterality()
            .and_then(|l| self.irradiation.accumulated_for(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_insert_preserves_order() {
        let mut list: Named<u32> = Named::new();
        list.insert("b", 1);
        list.insert("a", 2);
        list.insert("b", 3);
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(list.get("b"), Some(&3));
        assert_eq!(list.get("c"), None);
    }

    #[test]
    fn test_field_list_accessors() {
        let mut fields = FieldList::new();
        fields.insert(
            "kvp",
            Some(FieldValue::Measurement(Measurement::new(
                "28",
                Some("kV".to_string()),
            ))),
        );
        fields.insert("protocol", None);

        assert_eq!(fields.text("kvp"), Some("28 kV".to_string()));
        assert_eq!(fields.number("kvp"), Some(28.0));
        assert_eq!(fields.text("protocol"), None);
        assert!(!fields.all_missing());
    }

    #[test]
    fn test_essential_age_requires_both_dates() {
        let info = EssentialInfo {
            birth_date: Some("Jan 1, 1980".to_string()),
            ..Default::default()
        };
        assert_eq!(info.age(), Age::Unknown);

        let info = EssentialInfo {
            birth_date: Some("Jan 1, 1980".to_string()),
            study_date: Some("Jun 15, 2024".to_string()),
            ..Default::default()
        };
        assert_eq!(info.age(), Age::Exact(44));
    }

    #[test]
    fn test_accumulated_for_laterality() {
        let info = IrradiationInfo {
            accumulated_by_laterality: vec![(
                Laterality::Left,
                Measurement::new("2.1", Some("mGy".to_string())),
            )],
            ..Default::default()
        };
        assert!(info.accumulated_for(Laterality::Left).is_some());
        assert_eq!(info.total_dose_value(), Some(2.1));
        assert!(info.accumulated_for(Laterality::Right).is_none());
        assert!(!info.is_empty());
        assert!(IrradiationInfo::default().is_empty());
    }
}
