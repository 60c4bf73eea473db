pub mod json_export;
pub mod record;

use anyhow::Result;
use std::path::PathBuf;

pub use json_export::JsonExporter;
pub use record::{
    find_record, load_records, prune_records, summarize, AnalysisRecord, AnalysisStats,
};

pub trait Exporter {
    /// Persist one record and return where it was written.
    fn export(&self, record: &AnalysisRecord) -> Result<PathBuf>;
}
