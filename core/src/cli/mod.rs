pub mod report;

use crate::types::{ExtractConfig, ReportKind};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dosesr
#[derive(Parser, Debug)]
#[command(name = "dosesr")]
#[command(about = "Radiation dose structured report extraction tool")]
#[command(version)]
pub struct Cli {
    /// Path to DICOM file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Force a report kind instead of detecting it
    #[arg(short, long)]
    pub kind: Option<KindArg>,

    /// Accept documents whose modality is not SR
    #[arg(long)]
    pub no_require_sr: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Extraction settings selected on the command line
    pub fn extract_config(&self) -> ExtractConfig {
        extract_config(self.kind, self.no_require_sr)
    }
}

/// Builds extraction settings from the shared command-line options
pub fn extract_config(kind: Option<KindArg>, no_require_sr: bool) -> ExtractConfig {
    let config = ExtractConfig::default().require_sr_modality(!no_require_sr);
    match kind {
        Some(kind) => config.with_kind(kind.into()),
        None => config,
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Raw content tree, one item per line
    Tree,
}

/// Report kind options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// CT radiation dose report
    Ct,
    /// Mammography / projection X-ray dose report
    Mammography,
}

impl From<KindArg> for ReportKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Ct => ReportKind::Ct,
            KindArg::Mammography => ReportKind::Mammography,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["dosesr", "report.dcm"]);
        assert!(matches!(cli.format, OutputFormat::Text));
        assert_eq!(cli.extract_config(), ExtractConfig::default());
    }

    #[test]
    fn test_parse_forced_kind() {
        let cli = Cli::parse_from([
            "dosesr",
            "report.dcm",
            "--format",
            "tree",
            "--kind",
            "mammography",
            "--no-require-sr",
        ]);
        assert!(matches!(cli.format, OutputFormat::Tree));
        let config = cli.extract_config();
        assert_eq!(config.kind, Some(ReportKind::Mammography));
        assert!(!config.require_sr_modality);
    }
}
