use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use image::{GrayImage, Luma};

pub fn temp_output_dir(prefix: &str) -> PathBuf {
    let mut out = std::env::temp_dir();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let pid = std::process::id();
    out.push(format!("{prefix}-{pid}-{now}"));
    out
}

/// White page with a few dark text-like bars.
pub fn write_record_image(dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let img = GrayImage::from_fn(160, 120, |x, y| {
        let on_bar = (20..140).contains(&x) && matches!(y % 24, 8..=13);
        if on_bar {
            Luma([20])
        } else {
            Luma([235])
        }
    });
    let path = dir.join(name);
    img.save(&path)?;
    Ok(path)
}

pub fn write_corrupt_image(dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, b"definitely not a png")?;
    Ok(path)
}
