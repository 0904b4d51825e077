use clap::{Parser, ValueEnum};
use dosesr_core::batch::{collect_dicom_files, process_files, BatchOutcome};
use dosesr_core::cli::{extract_config, KindArg};
use dosesr_core::export::csv::CsvExporter;
use dosesr_core::{BatchConfig, ReportKind};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

/// CLI tool for extracting dose reports from a directory
#[derive(Parser, Debug)]
#[command(name = "dosebatch")]
#[command(about = "Extract radiation dose reports from a directory of DICOM files")]
#[command(version)]
struct Cli {
    /// Directory containing DICOM files
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Output file; CSV output gets one file per report kind
    #[arg(short, long, default_value = "dose_reports")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Force a report kind instead of detecting it
    #[arg(short, long)]
    kind: Option<KindArg>,

    /// Text written for missing values in CSV output
    #[arg(long, default_value = "-")]
    placeholder: String,

    /// Only scan the top-level directory
    #[arg(long)]
    no_recursive: bool,

    /// Process files one at a time
    #[arg(long)]
    sequential: bool,

    /// Accept documents whose modality is not SR
    #[arg(long)]
    no_require_sr: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// One CSV file per report kind
    Csv,
    /// A single JSON array of reports
    Json,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    let config = BatchConfig::default()
        .with_extract(extract_config(cli.kind, cli.no_require_sr))
        .recursive(!cli.no_recursive)
        .parallel(!cli.sequential)
        .with_missing_placeholder(cli.placeholder.clone());

    info!("Processing directory: {}", cli.directory.display());

    let files = match collect_dicom_files(&cli.directory, config.recursive) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to read directory: {}", e);
            eprintln!("Error: Failed to read directory: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!("Error: No DICOM files (.dcm) found in directory");
        process::exit(1);
    }

    info!("Found {} DICOM files", files.len());

    let progress_bar = cli.progress.then(|| progress_bar(files.len()));
    let outcome = process_files(&files, &config, progress_bar.as_ref());
    if let Some(pb) = &progress_bar {
        pb.finish_with_message("done");
    }

    if outcome.reports.is_empty() {
        eprintln!("Error: No dose reports could be extracted");
        process::exit(1);
    }

    let written = match cli.format {
        OutputFormat::Csv => write_csv(&outcome, &cli.output, &config.missing_placeholder),
        OutputFormat::Json => write_json(&outcome, &cli.output),
    };
    match written {
        Ok(paths) => {
            for path in paths {
                info!("Wrote {}", path.display());
            }
        }
        Err(e) => {
            error!("Failed to write output: {}", e);
            eprintln!("Error: Failed to write output: {}", e);
            process::exit(1);
        }
    }

    println!("{}", Summary::new(&outcome));
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Output path of one report kind, e.g. `out_ct.csv`
fn kind_path(output: &Path, kind: ReportKind) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dose_reports".to_string());
    output.with_file_name(format!("{}_{}.csv", stem, kind))
}

fn write_csv(
    outcome: &BatchOutcome,
    output: &Path,
    placeholder: &str,
) -> dosesr_core::Result<Vec<PathBuf>> {
    let exporter = CsvExporter::new(placeholder);

    let mut written = Vec::new();
    for kind in [ReportKind::Ct, ReportKind::Mammography] {
        if outcome.reports_of(kind).next().is_none() {
            continue;
        }
        let path = kind_path(output, kind);
        let file = BufWriter::new(File::create(&path)?);
        let rows = exporter.write(file, kind, outcome.reports_of(kind))?;
        info!("{} {} rows", kind, rows);
        written.push(path);
    }
    Ok(written)
}

#[cfg(feature = "json")]
fn write_json(outcome: &BatchOutcome, output: &Path) -> dosesr_core::Result<Vec<PathBuf>> {
    let path = output.with_extension("json");
    let file = BufWriter::new(File::create(&path)?);
    let reports = outcome.reports.iter().map(|(_, r)| r);
    dosesr_core::export::json::write_reports(file, reports)?;
    Ok(vec![path])
}

#[cfg(not(feature = "json"))]
fn write_json(_outcome: &BatchOutcome, _output: &Path) -> dosesr_core::Result<Vec<PathBuf>> {
    Err(dosesr_core::DoseSrError::ExportError(
        "JSON output requires the 'json' feature".to_string(),
    ))
}

/// End-of-run summary
struct Summary<'a> {
    outcome: &'a BatchOutcome,
}

impl<'a> Summary<'a> {
    fn new(outcome: &'a BatchOutcome) -> Self {
        Self { outcome }
    }
}

impl<'a> std::fmt::Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = self.outcome;
        writeln!(f, "Batch Summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "Processed:      {}", outcome.processed())?;
        writeln!(
            f,
            "Skipped:        {} ({} not dose reports)",
            outcome.skipped(),
            outcome.not_extractable()
        )?;
        writeln!(
            f,
            "CT reports:     {}",
            outcome.reports_of(ReportKind::Ct).count()
        )?;
        writeln!(
            f,
            "Mammo reports:  {}",
            outcome.reports_of(ReportKind::Mammography).count()
        )?;
        writeln!(f, "Total events:   {}", outcome.total_events())?;

        let stats = outcome.total_dose_stats();
        match (stats.min, stats.max, stats.avg) {
            (Some(min), Some(max), Some(avg)) => write!(
                f,
                "Total dose:     min {} / max {} / avg {} (n={})",
                min, max, avg, stats.count
            ),
            _ => write!(f, "Total dose:     unknown"),
        }
    }
}
