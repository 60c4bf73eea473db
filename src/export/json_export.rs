use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::export::record::AnalysisRecord;
use crate::export::Exporter;

/// Suffixed names tried before giving up on a colliding id.
const MAX_SUFFIX: usize = 100;

/// Writes each record as `<id>.json` under one directory.
///
/// Existing files are never overwritten. When `<id>.json` is taken, the
/// record is stored as `<id>-1.json`, `<id>-2.json`, ... with its `id`
/// field matching the file name.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl Exporter for JsonExporter {
    fn export(&self, record: &AnalysisRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        let mut stored = record.clone();
        for n in 0..=MAX_SUFFIX {
            if n > 0 {
                stored.id = format!("{}-{n}", record.id);
            }
            let path = self.out_dir.join(format!("{}.json", stored.id));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to create {}", path.display()))
                }
            };
            let data = serde_json::to_string_pretty(&stored)?;
            file.write_all(data.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            return Ok(path);
        }
        bail!(
            "no free file name for record {} in {}",
            record.id,
            self.out_dir.display()
        )
    }
}
