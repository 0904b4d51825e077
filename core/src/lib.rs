pub mod api;
pub mod batch;
pub mod cli;
pub mod content;
pub mod error;
pub mod export;
pub mod extraction;
pub mod types;

pub use api::DoseReportExtractor;
pub use cli::report::TextReport;
pub use content::{ContentItem, ContentNode};
pub use error::{DoseSrError, Result};
pub use types::*;
