use super::{Cell, Column, RowContext};
use crate::types::{Measurement, MeasurementStats};

const fn col(header: &'static str, value: fn(&RowContext<'_>) -> Cell) -> Column {
    Column { header, value }
}

fn stat(ctx: &RowContext<'_>, name: &str, pick: fn(&MeasurementStats) -> Option<f64>) -> Cell {
    Cell::number(ctx.event.and_then(|e| pick(&e.stats_for(name))))
}

fn filter(ctx: &RowContext<'_>, n: usize) -> Cell {
    Cell::text(ctx.event.and_then(|e| e.list("filters").get(n).cloned()))
}

fn patient_name(ctx: &RowContext<'_>) -> Cell {
    Cell::text(ctx.report.essential.patient_name.clone())
}

fn sex(ctx: &RowContext<'_>) -> Cell {
    Cell::text(ctx.report.essential.sex.clone())
}

fn birth_date(ctx: &RowContext<'_>) -> Cell {
    Cell::text(ctx.report.essential.birth_date.clone())
}

fn exam_date(ctx: &RowContext<'_>) -> Cell {
    Cell::text(ctx.report.essential.study_date.clone())
}

/// CT report columns; numeric cells carry "value unit" display strings
pub static CT_COLUMNS: &[Column] = &[
    col("Patient ID", |ctx| ctx.patient_id()),
    col("Patient name", patient_name),
    col("Sex", sex),
    col("Birth date", birth_date),
    col("Age", |ctx| ctx.age()),
    col("Protocol", |ctx| ctx.field_text("protocol")),
    col("Exam date", exam_date),
    col("Series description", |ctx| ctx.field_text("comment")),
    col("Scan mode", |ctx| ctx.field_text("acquisition_type")),
    col("Tube current", |ctx| ctx.field_text("tube_current")),
    col("kV", |ctx| ctx.field_text("kvp")),
    col("CTDIvol", |ctx| ctx.field_text("mean_ctdivol")),
    col("DLP", |ctx| ctx.field_text("dlp")),
    col("Total DLP", |ctx| {
        Cell::text(ctx.report.irradiation.total_dose.as_ref().map(Measurement::display))
    }),
    col("Phantom type", |ctx| ctx.field_text("phantom_type")),
    col("SSDE", |ctx| ctx.field_text("ssde")),
];

/// Mammography report columns; numeric cells carry bare numbers
pub static MAMMOGRAPHY_COLUMNS: &[Column] = &[
    col("Patient ID", |ctx| ctx.patient_id()),
    col("Patient name", patient_name),
    col("Sex", sex),
    col("Birth date", birth_date),
    col("Age", |ctx| ctx.age()),
    col("Exam date", exam_date),
    col("Manufacturer", |ctx| {
        Cell::text(ctx.report.equipment.manufacturer.clone())
    }),
    col("Model", |ctx| Cell::text(ctx.report.equipment.model.clone())),
    col("Station name", |ctx| {
        Cell::text(ctx.report.equipment.station_name.clone())
    }),
    col("Protocol", |ctx| ctx.field_text("protocol")),
    col("Laterality", |ctx| ctx.field_text("laterality")),
    col("View", |ctx| ctx.field_text("image_view")),
    col("Event type", |ctx| ctx.field_text("event_type")),
    col("kVp", |ctx| ctx.field_number("kvp")),
    col("kVp min", |ctx| stat(ctx, "kvp", |s| s.min)),
    col("kVp max", |ctx| stat(ctx, "kvp", |s| s.max)),
    col("kVp avg", |ctx| stat(ctx, "kvp", |s| s.avg)),
    col("Tube current", |ctx| ctx.field_number("tube_current")),
    col("mA min", |ctx| stat(ctx, "tube_current", |s| s.min)),
    col("mA max", |ctx| stat(ctx, "tube_current", |s| s.max)),
    col("mA avg", |ctx| stat(ctx, "tube_current", |s| s.avg)),
    col("Exposure time", |ctx| ctx.field_number("exposure_time")),
    col("Number of pulses", |ctx| ctx.field_number("number_of_pulses")),
    col("Pulses recorded", |ctx| match ctx.event {
        Some(e) => Cell::Integer(e.stats_for("pulse_width").count as i64),
        None => Cell::Missing,
    }),
    col("Pulse width", |ctx| ctx.field_number("pulse_width")),
    col("Pulse width min", |ctx| stat(ctx, "pulse_width", |s| s.min)),
    col("Pulse width max", |ctx| stat(ctx, "pulse_width", |s| s.max)),
    col("Pulse width avg", |ctx| stat(ctx, "pulse_width", |s| s.avg)),
    col("Irradiation duration", |ctx| {
        ctx.field_number("irradiation_duration")
    }),
    col("Focal spot size", |ctx| ctx.field_number("focal_spot_size")),
    col("AGD (event)", |ctx| ctx.field_number("agd")),
    col("AGD (accumulated)", |ctx| {
        Cell::number(
            ctx.event
                .and_then(|e| ctx.report.accumulated_dose_for(e))
                .and_then(Measurement::as_f64),
        )
    }),
    col("Entrance exposure", |ctx| ctx.field_number("entrance_exposure")),
    col("Half value layer", |ctx| ctx.field_number("half_value_layer")),
    col("Compression thickness", |ctx| {
        ctx.field_number("compression_thickness")
    }),
    col("Source-RP distance", |ctx| ctx.field_number("distance_source_rp")),
    col("Field area", |ctx| ctx.field_number("field_area")),
    col("Field height", |ctx| ctx.field_number("field_height")),
    col("Field width", |ctx| ctx.field_number("field_width")),
    col("Anode material", |ctx| ctx.field_text("anode_material")),
    col("Filter 1", |ctx| filter(ctx, 0)),
    col("Filter 2", |ctx| filter(ctx, 1)),
    col("Filter 3", |ctx| filter(ctx, 2)),
    col("Grid", |ctx| ctx.field_text("grid")),
    col("Positioner angle", |ctx| ctx.field_number("positioner_angle")),
    col("Dose source", |ctx| Cell::text(ctx.report.summary.text("dose_source"))),
    col("Event UID", |ctx| ctx.field_text("event_uid")),
];
