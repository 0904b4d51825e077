//! Directory batch extraction
//!
//! Discovers DICOM files under a directory, extracts one report per file and
//! keeps per-file failures alongside the successful reports.

use crate::api::DoseReportExtractor;
use crate::error::{DoseSrError, Result};
use crate::types::{BatchConfig, DoseReport, MeasurementStats, ReportKind};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Checks if a file has a DICOM header
///
/// DICOM files typically have:
/// - 128-byte preamble
/// - 4-byte "DICM" magic string at offset 128
pub fn is_dicom_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..132] == b"DICM",
        Err(_) => false,
    }
}

fn has_dicom_extension(path: &Path) -> Option<bool> {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"))
}

/// Collects DICOM files under a directory, sorted by path
///
/// Accepts `.dcm` and `.dicom` extensions (case-insensitive) and
/// extensionless files carrying the DICOM magic.
pub fn collect_dicom_files(directory: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(DoseSrError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", directory.display()),
        )));
    }

    let walker = WalkDir::new(directory)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match has_dicom_extension(path) {
            Some(true) => files.push(path.to_path_buf()),
            Some(false) => {}
            None if is_dicom_file(path) => {
                debug!("Found extensionless DICOM file: {}", path.display());
                files.push(path.to_path_buf());
            }
            None => {}
        }
    }

    Ok(files)
}

/// A file that yielded no report
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: DoseSrError,
}

/// Result of a batch run, in discovery order
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<(PathBuf, DoseReport)>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Number of files that produced a report
    pub fn processed(&self) -> usize {
        self.reports.len()
    }

    /// Number of files skipped on error
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// Number of skipped files that were not dose reports at all
    pub fn not_extractable(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.error.is_not_extractable())
            .count()
    }

    /// Events across all reports
    pub fn total_events(&self) -> usize {
        self.reports.iter().map(|(_, r)| r.events.len()).sum()
    }

    /// Reports of one kind
    pub fn reports_of(&self, kind: ReportKind) -> impl Iterator<Item = &DoseReport> {
        self.reports
            .iter()
            .map(|(_, r)| r)
            .filter(move |r| r.kind == kind)
    }

    /// Statistics of the total accumulated dose per report
    ///
    /// Reports without a total dose are not sampled.
    pub fn total_dose_stats(&self) -> MeasurementStats {
        let values: Vec<f64> = self
            .reports
            .iter()
            .filter_map(|(_, r)| r.irradiation.total_dose_value())
            .collect();
        MeasurementStats::from_values(&values)
    }

    /// Consumes the outcome, keeping only the reports
    pub fn into_reports(self) -> Vec<DoseReport> {
        self.reports.into_iter().map(|(_, r)| r).collect()
    }
}

fn process_one(path: &Path, config: &BatchConfig) -> Result<DoseReport> {
    let report = DoseReportExtractor::from_file(path, &config.extract)?;
    info!(
        "Processed: {} ({} report, {} events)",
        path.display(),
        report.kind,
        report.events.len()
    );
    Ok(report)
}

/// Extracts a report from every file
///
/// Failures are logged and collected; they never abort the batch. With
/// `config.parallel` files are extracted on the rayon pool, and results
/// still come back in the order of `files`.
pub fn process_files(
    files: &[PathBuf],
    config: &BatchConfig,
    progress: Option<&ProgressBar>,
) -> BatchOutcome {
    let run = |path: &PathBuf| {
        let result = process_one(path, config);
        if let Some(pb) = progress {
            pb.inc(1);
        }
        (path.clone(), result)
    };

    let results: Vec<_> = if config.parallel && files.len() > 1 {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    let mut outcome = BatchOutcome::default();
    for (path, result) in results {
        match result {
            Ok(report) => outcome.reports.push((path, report)),
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                outcome.failures.push(BatchFailure { path, error });
            }
        }
    }
    outcome
}

/// Discovers and extracts every DICOM file under a directory
pub fn process_directory(
    directory: &Path,
    config: &BatchConfig,
    progress: Option<&ProgressBar>,
) -> Result<BatchOutcome> {
    let files = collect_dicom_files(directory, config.recursive)?;
    info!("Found {} DICOM files", files.len());
    if let Some(pb) = progress {
        pb.set_length(files.len() as u64);
    }
    Ok(process_files(&files, config, progress))
}
