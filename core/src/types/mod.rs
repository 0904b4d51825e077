//! Core type definitions for radiation dose reports
//!
//! This module provides the fundamental types used throughout the dosesr library:
//! - [`ReportKind`]: Kind of dose report (CT, Mammography)
//! - [`Laterality`]: Breast laterality of a mammography event
//! - [`ValueKind`]: Value type of a structured report content item
//! - [`Measurement`] and [`MeasurementStats`]: Numeric values with units, and their statistics
//! - [`Age`]: Patient age at exam time, exact or estimated
//! - [`DoseReport`]: The assembled report record
//! - [`ExtractConfig`] and [`BatchConfig`]: Extraction and batch options

mod age;
mod config;
mod enums;
mod measurement;
mod report;

pub use age::Age;
pub use config::{BatchConfig, ExtractConfig};
pub use enums::{Laterality, ReportKind, ValueKind};
pub use measurement::{Measurement, MeasurementStats};
pub use report::{
    DeviceInfo, DoseReport, EquipmentInfo, EssentialInfo, EventRecord, FieldList, FieldValue,
    IrradiationInfo, Named,
};
