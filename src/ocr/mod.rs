pub mod extractor;
pub mod regions;

use anyhow::Result;
use std::path::Path;

pub use extractor::RegionTextExtractor;
pub use regions::{locate_text_regions, TextRegion};

/// Source of document text for the text heuristics.
///
/// Substitute a real OCR engine here; the pipeline only sees the string.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, image_path: &Path) -> Result<String>;
}
