pub mod image_features;

pub use image_features::{extract_image_features, intensity_histogram, load_grayscale};
