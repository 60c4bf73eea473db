use anyhow::Result;
use std::path::Path;

use tracing::{debug, warn};

use crate::features::load_grayscale;
use crate::ocr::regions::locate_text_regions;
use crate::ocr::TextExtractor;

/// Locates candidate text regions but performs no recognition.
///
/// Always yields an empty string, so every text indicator reads as absent
/// until a real OCR engine is plugged in through [`TextExtractor`].
#[derive(Debug, Default, Clone)]
pub struct RegionTextExtractor;

impl RegionTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for RegionTextExtractor {
    fn extract_text(&self, image_path: &Path) -> Result<String> {
        let gray = match load_grayscale(image_path) {
            Ok(gray) => gray,
            Err(err) => {
                warn!("Error extracting text: {err}");
                return Ok(String::new());
            }
        };

        let regions = locate_text_regions(&gray);
        debug!(regions = regions.len(), "located candidate text regions");

        Ok(String::new())
    }
}
