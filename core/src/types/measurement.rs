use std::fmt;

/// Numeric measurement carried by a NUM content item
///
/// Keeps the numeric payload exactly as encoded (a DICOM decimal string)
/// together with the code meaning of its unit, so that both a display
/// string and a bare number can be derived without re-parsing formatted text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Measurement {
    /// Numeric value as encoded
    pub value: String,
    /// Unit code meaning (e.g. "mGy", "kV")
    pub unit: Option<String>,
}

impl Measurement {
    /// Creates a new Measurement
    pub fn new(value: impl Into<String>, unit: Option<String>) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    /// Returns "value unit", or the bare value when there is no unit
    pub fn display(&self) -> String {
        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{} {}", self.value, unit),
            _ => self.value.clone(),
        }
    }

    /// Returns the value as a number
    ///
    /// Returns `None` when the encoded value is not a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Summary statistics over repeated same-coded measurements
///
/// With zero samples every statistic is `None` and `count` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MeasurementStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub count: usize,
}

impl MeasurementStats {
    /// Computes statistics from samples, rounded to three decimal places
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;

        Self {
            min: Some(round3(min)),
            max: Some(round3(max)),
            avg: Some(round3(avg)),
            count: values.len(),
        }
    }

    /// Returns whether no samples were found
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
