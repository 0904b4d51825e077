use crate::error::Result;
use crate::types::DoseReport;
use serde::Serializer;
use std::io::Write;

/// Writes reports as a pretty-printed JSON array
pub fn write_reports<'r, W, I>(writer: W, reports: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'r DoseReport>,
{
    let mut serializer = serde_json::Serializer::pretty(writer);
    serializer.collect_seq(reports)?;
    Ok(())
}

/// Serializes one report as pretty-printed JSON
pub fn report_to_json(report: &DoseReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::report;
    use crate::types::ReportKind;

    #[test]
    fn test_report_json_shape() {
        let json = report_to_json(&report(ReportKind::Ct, vec![])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "ct");
        assert_eq!(value["essential"]["patient_id"], "00123");
        assert!(value["hospital"].is_null());
        assert_eq!(value["irradiation"]["total_dose"]["value"], "500");
    }

    #[test]
    fn test_write_reports_array() {
        let reports = vec![
            report(ReportKind::Ct, vec![]),
            report(ReportKind::Mammography, vec![]),
        ];
        let mut buf = Vec::new();
        write_reports(&mut buf, &reports).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["kind"], "mammography");
    }

    #[test]
    fn test_empty_batch_is_empty_array() {
        let mut buf = Vec::new();
        write_reports(&mut buf, std::iter::empty()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]");
    }
}
