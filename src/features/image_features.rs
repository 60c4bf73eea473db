use std::path::Path;

use image::{GrayImage, ImageReader, Luma, RgbImage};
use tracing::{debug, warn};

use crate::core::model::{FeatureVector, HISTOGRAM_FEATURE_BINS};
use crate::error::VerifyError;

/// Decode an image and convert it to single-channel intensity.
///
/// The format is sniffed from the file's leading bytes, so uploads with a
/// missing or wrong extension still decode.
pub fn load_grayscale(path: &Path) -> Result<GrayImage, VerifyError> {
    let img = decode_sniffed(path).map_err(|source| VerifyError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(to_intensity(&img.to_rgb8()))
}

fn decode_sniffed(path: &Path) -> image::ImageResult<image::DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// BT.601 luma (0.299 R + 0.587 G + 0.114 B), rounded to the nearest level.
pub fn to_intensity(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

pub fn intensity_histogram(gray: &GrayImage) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for pixel in gray.pixels() {
        hist[pixel.0[0] as usize] += 1;
    }
    hist
}

/// Brightness, spread and the first eight histogram bins of an image.
///
/// An image that cannot be decoded yields [`FeatureVector::zeros`]. Callers
/// should read that as a degraded signal, not as evidence of forgery.
pub fn extract_image_features(path: &Path) -> FeatureVector {
    match load_grayscale(path) {
        Ok(gray) => features_from_gray(&gray),
        Err(err) => {
            warn!("Error extracting image features: {err}");
            FeatureVector::zeros()
        }
    }
}

pub fn features_from_gray(gray: &GrayImage) -> FeatureVector {
    let count = gray.width() as u64 * gray.height() as u64;
    if count == 0 {
        warn!("image has no pixels; using zero features");
        return FeatureVector::zeros();
    }

    let hist = intensity_histogram(gray);
    let n = count as f64;
    let mean = hist
        .iter()
        .enumerate()
        .map(|(level, c)| level as f64 * *c as f64)
        .sum::<f64>()
        / n;
    let variance = hist
        .iter()
        .enumerate()
        .map(|(level, c)| (level as f64 - mean).powi(2) * *c as f64)
        .sum::<f64>()
        / n;

    let mut bins = [0.0; HISTOGRAM_FEATURE_BINS];
    for (bin, c) in bins.iter_mut().zip(hist.iter()) {
        *bin = *c as f64;
    }

    debug!(mean, std_dev = variance.sqrt(), "extracted image features");
    FeatureVector::from_stats(mean, variance.sqrt(), bins)
}
