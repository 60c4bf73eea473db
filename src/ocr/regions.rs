use std::collections::VecDeque;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;
use crate::features::intensity_histogram;

/// Regions beyond the largest ten are never considered.
pub const MAX_CANDIDATE_REGIONS: usize = 10;
/// Candidates must be strictly wider and taller than this.
pub const MIN_REGION_SIDE: u32 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextRegion {
    pub bbox: BBox,
    /// Foreground pixel count.
    pub area: u64,
}

/// Otsu's threshold: the level maximising between-class variance.
///
/// Pixels strictly above the returned level are foreground.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let hist = intensity_histogram(gray);
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0;
    }

    let weighted_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(level, c)| level as f64 * *c as f64)
        .sum();

    let mut best_level = 0u8;
    let mut best_variance = -1.0;
    let mut background_count = 0.0;
    let mut background_sum = 0.0;

    for (level, count) in hist.iter().enumerate() {
        background_count += *count as f64;
        if background_count == 0.0 {
            continue;
        }
        let foreground_count = total as f64 - background_count;
        if foreground_count == 0.0 {
            break;
        }
        background_sum += level as f64 * *count as f64;
        let mean_b = background_sum / background_count;
        let mean_f = (weighted_total - background_sum) / foreground_count;
        let variance = background_count * foreground_count * (mean_b - mean_f).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    best_level
}

pub fn binarize(gray: &GrayImage, threshold: u8) -> Vec<bool> {
    gray.pixels().map(|p| p.0[0] > threshold).collect()
}

/// Candidate text regions: the largest external foreground components of
/// the Otsu-binarised image, largest first, then filtered by size.
pub fn locate_text_regions(gray: &GrayImage) -> Vec<TextRegion> {
    let threshold = otsu_threshold(gray);
    let mask = binarize(gray, threshold);
    let mut regions = external_components(&mask, gray.width(), gray.height());

    regions.sort_by(|a, b| b.area.cmp(&a.area));
    regions
        .into_iter()
        .take(MAX_CANDIDATE_REGIONS)
        .filter(|r| r.bbox.width() > MIN_REGION_SIDE && r.bbox.height() > MIN_REGION_SIDE)
        .collect()
}

/// 8-connected foreground components that are not nested inside a hole of
/// another component. Pixels past the image frame count as background.
pub fn external_components(mask: &[bool], width: u32, height: u32) -> Vec<TextRegion> {
    let (w, h) = (width as usize, height as usize);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let outside = outside_background(mask, w, h);
    let mut visited = vec![false; w * h];
    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..w * h {
        if !mask[start] || visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        let mut bbox = BBox::pixel((start % w) as u32, (start / w) as u32);
        let mut area = 0u64;
        let mut external = false;

        while let Some(idx) = queue.pop_front() {
            let (x, y) = (idx % w, idx / w);
            area += 1;
            bbox.include(x as u32, y as u32);

            if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
                external = true;
            }

            for (nx, ny) in neighbours(x, y, w, h, true) {
                let n = ny * w + nx;
                if mask[n] {
                    if !visited[n] {
                        visited[n] = true;
                        queue.push_back(n);
                    }
                } else if outside[n] && is_orthogonal(x, y, nx, ny) {
                    external = true;
                }
            }
        }

        if external {
            regions.push(TextRegion { bbox, area });
        }
    }

    regions
}

/// Background pixels 4-connected to the image frame.
fn outside_background(mask: &[bool], w: usize, h: usize) -> Vec<bool> {
    let mut outside = vec![false; w * h];
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let on_frame = x == 0 || y == 0 || x + 1 == w || y + 1 == h;
            let idx = y * w + x;
            if on_frame && !mask[idx] {
                outside[idx] = true;
                queue.push_back(idx);
            }
        }
    }

    while let Some(idx) = queue.pop_front() {
        let (x, y) = (idx % w, idx / w);
        for (nx, ny) in neighbours(x, y, w, h, false) {
            let n = ny * w + nx;
            if !mask[n] && !outside[n] {
                outside[n] = true;
                queue.push_back(n);
            }
        }
    }

    outside
}

fn is_orthogonal(x: usize, y: usize, nx: usize, ny: usize) -> bool {
    x == nx || y == ny
}

fn neighbours(
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    diagonal: bool,
) -> impl Iterator<Item = (usize, usize)> {
    const OFFSETS: [(isize, isize); 8] = [
        (0, -1),
        (-1, 0),
        (1, 0),
        (0, 1),
        (-1, -1),
        (1, -1),
        (-1, 1),
        (1, 1),
    ];
    let take = if diagonal { 8 } else { 4 };
    OFFSETS[..take].iter().filter_map(move |(dx, dy)| {
        let nx = x.checked_add_signed(*dx)?;
        let ny = y.checked_add_signed(*dy)?;
        (nx < w && ny < h).then_some((nx, ny))
    })
}
