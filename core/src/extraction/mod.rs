pub mod aggregate;
pub mod assembler;
pub mod codes;
pub mod dates;
pub mod header;
pub mod locator;
pub mod schema;
pub mod tags;
pub mod values;

pub use aggregate::{aggregate, collect_values};
pub use assembler::{assemble, extract_fields, extract_value};
pub use dates::{calculate_age, format_date_with_time, format_dicom_date};
pub use header::DocumentHeader;
pub use locator::{find_all, find_first, ContainerIndex};
pub use schema::{
    detect_kind, has_ct_evidence, has_mammography_evidence, FieldSpec, ReportSchema, ValueMode,
    CT_SCHEMA, MAMMOGRAPHY_SCHEMA,
};
pub use values::{
    display_value, extract_code_meaning, extract_datetime, extract_laterality, extract_measurement,
    extract_numeric, extract_numeric_display, extract_text, extract_uid,
};
