//! Date normalization and patient age calculation
//!
//! DICOM dates arrive as `YYYYMMDD`, optionally followed by `HHMMSS`. They are
//! rendered as "Mon D, YYYY" (plus ", HH:MM:SS"), and ages are computed from
//! those display strings.

use crate::types::Age;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Display formats accepted for any date
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Additional date-with-time formats accepted for exam dates
const EXAM_DATETIME_FORMATS: &[&str] = &[
    "%b %d, %Y, %H:%M:%S",
    "%B %d, %Y, %H:%M:%S",
    "%b %d, %Y, %I:%M:%S %p",
    "%B %d, %Y, %I:%M:%S %p",
];

/// Normalizes a DICOM DA or DT string for display
///
/// Fractional seconds and timezone offsets are dropped. Strings that are
/// too short or not a valid date are returned unchanged.
///
/// # Example
///
/// ```
/// use dosesr_core::extraction::dates::format_dicom_date;
///
/// assert_eq!(format_dicom_date("20240615"), "Jun 15, 2024");
/// assert_eq!(format_dicom_date("20240605143000.000"), "Jun 5, 2024, 14:30:00");
/// assert_eq!(format_dicom_date("2024"), "2024");
/// ```
pub fn format_dicom_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let core = trimmed
        .split(|c: char| c == '.' || c == '+' || c == '-')
        .next()
        .unwrap_or(trimmed);

    let date = match parse_compact_date(core) {
        Some(date) => date,
        None => return raw.to_string(),
    };
    let mut out = date.format("%b %-d, %Y").to_string();

    if let Some(time) = core.get(8..14).and_then(parse_compact_time) {
        out.push_str(&time.format(", %H:%M:%S").to_string());
    }
    out
}

/// Normalizes a DICOM date joined with the first six digits of its time
///
/// Times shorter than `HHMMSS` are ignored.
pub fn format_date_with_time(date: &str, time: Option<&str>) -> String {
    let date = date.trim();
    match time.map(str::trim).and_then(|t| t.get(..6)) {
        Some(hms) if date.len() == 8 && hms.bytes().all(|b| b.is_ascii_digit()) => {
            format_dicom_date(&format!("{}{}", date, hms))
        }
        _ => format_dicom_date(date),
    }
}

fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    let digits = s.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = digits[..4].parse().ok()?;
    let month = digits[4..6].parse().ok()?;
    let day = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_compact_time(s: &str) -> Option<NaiveTime> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(s[..2].parse().ok()?, s[2..4].parse().ok()?, s[4..6].parse().ok()?)
}

fn year_pattern() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\d{4})").expect("Failed to compile regex"))
}

/// Recovers a bare four-digit year
fn extract_year(s: &str) -> Option<i32> {
    year_pattern()
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn parse_display_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_exam_date(s: &str) -> Option<NaiveDate> {
    parse_display_date(s).or_else(|| {
        let s = s.trim();
        EXAM_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|dt| dt.date())
    })
}

/// Resolves a date, falling back to a fixed month and day of a bare year
///
/// The flag is `true` when the fallback was used.
fn resolve(
    s: &str,
    parse: fn(&str) -> Option<NaiveDate>,
    month: u32,
    day: u32,
) -> Option<(NaiveDate, bool)> {
    if let Some(date) = parse(s) {
        return Some((date, false));
    }
    let year = extract_year(s)?;
    NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, true))
}

/// Computes patient age in whole years at exam time
///
/// Both inputs are display-form dates (see [`format_dicom_date`]). When a
/// date cannot be parsed, its four-digit year is used with January 1 for the
/// birth date and June 15 for the exam date, and the result is
/// [`Age::Estimated`]. Without a recoverable year the result is
/// [`Age::Unknown`]. This never fails.
///
/// # Example
///
/// ```
/// use dosesr_core::extraction::dates::calculate_age;
/// use dosesr_core::Age;
///
/// assert_eq!(calculate_age("Dec 31, 1980", "Jan 1, 2024"), Age::Exact(43));
/// assert_eq!(calculate_age("1980", "2024"), Age::Estimated(44));
/// assert_eq!(calculate_age("", "Jan 1, 2024"), Age::Unknown);
/// ```
pub fn calculate_age(birth: &str, exam: &str) -> Age {
    if birth.trim().is_empty() || exam.trim().is_empty() {
        return Age::Unknown;
    }

    let (birth_date, birth_estimated) = match resolve(birth, parse_display_date, 1, 1) {
        Some(resolved) => resolved,
        None => return Age::Unknown,
    };
    let (exam_date, exam_estimated) = match resolve(exam, parse_exam_date, 6, 15) {
        Some(resolved) => resolved,
        None => return Age::Unknown,
    };

    let mut years = exam_date.year() - birth_date.year();
    if (exam_date.month(), exam_date.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }

    if birth_estimated || exam_estimated {
        Age::Estimated(years)
    } else {
        Age::Exact(years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("20240615", "Jun 15, 2024")]
    #[case("19800101", "Jan 1, 1980")]
    #[case("20240615143000", "Jun 15, 2024, 14:30:00")]
    #[case("20240615143000.123456+0100", "Jun 15, 2024, 14:30:00")]
    #[case("202406151430", "Jun 15, 2024")]
    #[case("2024061", "2024061")]
    #[case("20241315", "20241315")]
    #[case("abcdefgh", "abcdefgh")]
    #[case("", "")]
    fn test_format_dicom_date(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_dicom_date(raw), expected);
    }

    #[test]
    fn test_format_date_with_time() {
        assert_eq!(
            format_date_with_time("20240615", Some("093015.000")),
            "Jun 15, 2024, 09:30:15"
        );
        assert_eq!(format_date_with_time("20240615", Some("0930")), "Jun 15, 2024");
        assert_eq!(format_date_with_time("20240615", None), "Jun 15, 2024");
    }

    #[rstest]
    #[case("Jan 1, 1980", "Jun 15, 2024", Age::Exact(44))]
    #[case("Dec 31, 1980", "Jan 1, 2024", Age::Exact(43))]
    #[case("1980", "2024", Age::Estimated(44))]
    #[case("1980-03-10", "10/03/2024", Age::Exact(44))]
    #[case("March 10, 1980", "Mar 9, 2024", Age::Exact(43))]
    #[case("Jan 1, 1980", "Jun 15, 2024, 14:30:00", Age::Exact(44))]
    #[case("Jul 1, 1980", "May 5, 2024, 1:20:41 PM", Age::Exact(43))]
    #[case("Jul 1, 1980", "sometime in 2024", Age::Estimated(43))]
    #[case("unknown", "Jun 15, 2024", Age::Unknown)]
    #[case("Jan 1, 1980", "", Age::Unknown)]
    fn test_calculate_age(#[case] birth: &str, #[case] exam: &str, #[case] expected: Age) {
        assert_eq!(calculate_age(birth, exam), expected);
    }

    #[test]
    fn test_age_from_normalized_dates() {
        let birth = format_dicom_date("19800101");
        let exam = format_date_with_time("20240615", Some("143000"));
        assert_eq!(calculate_age(&birth, &exam), Age::Exact(44));
        // deterministic
        assert_eq!(calculate_age(&birth, &exam), calculate_age(&birth, &exam));
    }
}
