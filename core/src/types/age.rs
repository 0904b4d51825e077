use std::fmt;

/// Patient age at exam time, in whole years
///
/// `Estimated` marks ages where at least one of the two dates was
/// recovered from a bare year (birth defaults to January 1, exam to June 15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Age {
    Exact(i32),
    Estimated(i32),
    Unknown,
}

impl Age {
    /// Returns the age in years, if known
    pub fn years(&self) -> Option<i32> {
        match self {
            Age::Exact(y) | Age::Estimated(y) => Some(*y),
            Age::Unknown => None,
        }
    }

    /// Returns whether the age was derived from a year-only fallback
    pub fn is_estimated(&self) -> bool {
        matches!(self, Age::Estimated(_))
    }

    /// Returns whether the age could not be determined
    pub fn is_unknown(&self) -> bool {
        matches!(self, Age::Unknown)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Exact(y) => write!(f, "{}", y),
            Age::Estimated(y) => write!(f, "~{}", y),
            Age::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_accessors() {
        assert_eq!(Age::Exact(44).years(), Some(44));
        assert_eq!(Age::Estimated(44).years(), Some(44));
        assert!(Age::Estimated(44).is_estimated());
        assert!(!Age::Exact(44).is_estimated());
        assert_eq!(Age::Unknown.years(), None);
        assert!(Age::Unknown.is_unknown());
    }

    #[test]
    fn test_age_display() {
        assert_eq!(Age::Exact(7).to_string(), "7");
        assert_eq!(Age::Estimated(7).to_string(), "~7");
        assert_eq!(Age::Unknown.to_string(), "unknown");
    }
}
