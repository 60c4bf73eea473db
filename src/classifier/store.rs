use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::linear::PlaceholderModel;
use crate::classifier::scaler::StandardScaler;
use crate::classifier::ScaledModel;
use crate::core::model::FEATURE_COUNT;

pub const MODEL_FILE: &str = "forgery_detector.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Rows of random data the placeholder scaler is fit on.
pub const SYNTHETIC_SAMPLES: usize = 1000;

/// Model and scaler artifacts kept side by side in one directory.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    pub fn load(&self) -> Result<ScaledModel> {
        let model: PlaceholderModel = read_json(&self.model_path())?;
        let scaler: StandardScaler = read_json(&self.scaler_path())?;
        Ok(ScaledModel::new(scaler, model))
    }

    pub fn save(&self, model: &ScaledModel) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        write_json(&self.model_path(), &model.model)?;
        write_json(&self.scaler_path(), &model.scaler)?;
        Ok(())
    }

    pub fn load_or_bootstrap(&self) -> Result<ScaledModel> {
        self.load_or_bootstrap_with(&mut rand::thread_rng())
    }

    /// Load both artifacts, or synthesize and persist a placeholder when
    /// either is missing or unreadable.
    ///
    /// A placeholder that cannot be written is still returned.
    pub fn load_or_bootstrap_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ScaledModel> {
        match self.load() {
            Ok(model) => {
                debug!(dir = %self.dir.display(), "loaded model artifacts");
                return Ok(model);
            }
            Err(err) => debug!("model artifacts unavailable: {err:#}"),
        }

        info!(dir = %self.dir.display(), "synthesizing placeholder model from random data");
        let model = synthesize_placeholder(rng)?;
        if let Err(err) = self.save(&model) {
            warn!("could not persist placeholder model: {err:#}");
        }
        Ok(model)
    }
}

/// Build a placeholder probability source from random data.
///
/// The scaler is fit on standard-normal noise and the weights are random.
/// Nothing here is training; it only produces an artifact of the right
/// shape.
pub fn synthesize_placeholder<R: Rng + ?Sized>(rng: &mut R) -> Result<ScaledModel> {
    let samples: Vec<Vec<f64>> = (0..SYNTHETIC_SAMPLES)
        .map(|_| (0..FEATURE_COUNT).map(|_| standard_normal(rng)).collect())
        .collect();
    let scaler = StandardScaler::fit(&samples)?;
    let model = PlaceholderModel::random(rng, FEATURE_COUNT);
    Ok(ScaledModel::new(scaler, model))
}

// Box-Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}
