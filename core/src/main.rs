use clap::Parser;
use dicom_dictionary_std::tags;
use dicom_object::OpenFileOptions;
use dosesr_core::cli::report::ContentTreeDump;
use dosesr_core::cli::{Cli, OutputFormat};
use dosesr_core::{DoseReport, DoseReportExtractor, TextReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.file.is_file() {
        eprintln!("Error: {} is not a file", cli.file.display());
        process::exit(1);
    }

    info!("Processing file: {}", cli.file.display());

    let dcm = match OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(&cli.file)
    {
        Ok(dcm) => dcm,
        Err(e) => {
            error!("Failed to read DICOM file: {}", e);
            eprintln!("Error: Failed to read DICOM file: {}", e);
            process::exit(1);
        }
    };

    // The tree dump needs no report and works on any SR-like document
    if let OutputFormat::Tree = cli.format {
        print!("{}", ContentTreeDump::new(&*dcm));
        return;
    }

    let report = match DoseReportExtractor::extract_with_config(&dcm, &cli.extract_config()) {
        Ok(report) => report,
        Err(e) if e.is_not_extractable() => {
            eprintln!("Error: {}: {}", cli.file.display(), e);
            process::exit(2);
        }
        Err(e) => {
            error!("Extraction failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Extracted {} report with {} events",
        report.kind,
        report.events.len()
    );

    output_report(&report, cli.format);
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

fn output_report(report: &DoseReport, format: OutputFormat) {
    match format {
        OutputFormat::Text | OutputFormat::Tree => {
            println!("{}", TextReport::new(report));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match dosesr_core::export::json::report_to_json(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
