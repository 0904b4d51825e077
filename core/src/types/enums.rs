use std::fmt;

/// Kind of radiation dose report carried by a structured report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ReportKind {
    /// CT radiation dose report (per-acquisition records)
    Ct,
    /// Projection X-ray / mammography dose report (per-irradiation-event records)
    Mammography,
}

impl ReportKind {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ReportKind::Ct => "ct",
            ReportKind::Mammography => "mammography",
        }
    }

    /// Parses a report kind from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let s_lower = s.trim().to_lowercase();
        if s_lower == "ct" {
            Some(ReportKind::Ct)
        } else if s_lower.starts_with("mammo") || s_lower == "mg" {
            Some(ReportKind::Mammography)
        } else {
            None
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Breast laterality of a mammography irradiation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Laterality {
    Left,
    Right,
}

impl Laterality {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Laterality::Left => "Left",
            Laterality::Right => "Right",
        }
    }

    /// Parses laterality from a coded meaning such as "Left breast"
    ///
    /// "Left" is checked before "Right"; anything else is `None`.
    pub fn from_meaning(meaning: &str) -> Option<Self> {
        if meaning.contains("Left") {
            Some(Laterality::Left)
        } else if meaning.contains("Right") {
            Some(Laterality::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Value type of a content item (DICOM Value Type, 0040,A040)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Text,
    Code,
    Num,
    UidRef,
    DateTime,
    Date,
    Time,
    PersonName,
    Container,
    /// Any other value type, or a missing value type
    #[default]
    Other,
}

impl ValueKind {
    /// Parses the DICOM value type string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TEXT" => ValueKind::Text,
            "CODE" => ValueKind::Code,
            "NUM" => ValueKind::Num,
            "UIDREF" => ValueKind::UidRef,
            "DATETIME" => ValueKind::DateTime,
            "DATE" => ValueKind::Date,
            "TIME" => ValueKind::Time,
            "PNAME" => ValueKind::PersonName,
            "CONTAINER" => ValueKind::Container,
            _ => ValueKind::Other,
        }
    }

    /// Returns the DICOM value type string
    pub fn dicom_name(&self) -> &'static str {
        match self {
            ValueKind::Text => "TEXT",
            ValueKind::Code => "CODE",
            ValueKind::Num => "NUM",
            ValueKind::UidRef => "UIDREF",
            ValueKind::DateTime => "DATETIME",
            ValueKind::Date => "DATE",
            ValueKind::Time => "TIME",
            ValueKind::PersonName => "PNAME",
            ValueKind::Container => "CONTAINER",
            ValueKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dicom_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_from_str() {
        assert_eq!(ReportKind::from_str("CT"), Some(ReportKind::Ct));
        assert_eq!(ReportKind::from_str("mammography"), Some(ReportKind::Mammography));
        assert_eq!(ReportKind::from_str(" MG "), Some(ReportKind::Mammography));
        assert_eq!(ReportKind::from_str("fluoro"), None);
    }

    #[test]
    fn test_laterality_from_meaning() {
        assert_eq!(Laterality::from_meaning("Left breast"), Some(Laterality::Left));
        assert_eq!(Laterality::from_meaning("Right breast"), Some(Laterality::Right));
        assert_eq!(Laterality::from_meaning("Both breasts"), None);
        assert_eq!(Laterality::from_meaning("left"), None);
    }

    #[test]
    fn test_value_kind_round_trip_names() {
        assert_eq!(ValueKind::from_str("NUM"), ValueKind::Num);
        assert_eq!(ValueKind::from_str("container"), ValueKind::Container);
        assert_eq!(ValueKind::from_str("SCOORD"), ValueKind::Other);
        assert_eq!(ValueKind::UidRef.to_string(), "UIDREF");
    }
}
