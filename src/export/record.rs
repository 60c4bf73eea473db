use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::model::{AnalysisResult, ReviewStatus, TextIndicators};
use crate::core::risk::review_status;

/// Forgery probability above which a record counts as image manipulation.
pub const MANIPULATION_FLOOR: f64 = 0.7;

/// A completed analysis as kept on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub document: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub status: ReviewStatus,
    pub result: AnalysisResult,
}

impl AnalysisRecord {
    pub fn new(document: &Path, result: AnalysisResult, timestamp: DateTime<Utc>) -> Self {
        let stem = stem_of(document);
        Self {
            id: format!("{stem}_{}", timestamp.timestamp_millis()),
            document: document.to_path_buf(),
            timestamp,
            status: review_status(result.anomaly_score),
            result,
        }
    }

    pub fn document_stem(&self) -> String {
        stem_of(&self.document)
    }
}

fn stem_of(document: &Path) -> String {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub total: usize,
    /// Every status is present, zero when no record carries it.
    pub by_status: HashMap<ReviewStatus, usize>,
    pub image_manipulation: usize,
    pub text_inconsistency: usize,
}

/// Read every `*.json` record in `dir`, newest first.
///
/// Files that do not parse as records are skipped with a warning.
pub fn load_records(dir: &Path) -> Result<Vec<AnalysisRecord>> {
    Ok(read_record_files(dir)?
        .into_iter()
        .map(|(_, record)| record)
        .collect())
}

/// Newest record saved for the document with this file stem.
///
/// Matches on the stored document path, so `visit` does not pick up
/// records of `visit_two`.
pub fn find_record(dir: &Path, document_stem: &str) -> Result<Option<AnalysisRecord>> {
    Ok(read_record_files(dir)?
        .into_iter()
        .map(|(_, record)| record)
        .find(|record| record.document_stem() == document_stem))
}

/// Delete records older than `older_than`; returns how many were removed.
pub fn prune_records(dir: &Path, older_than: TimeDelta) -> Result<usize> {
    prune_records_at(dir, older_than, Utc::now())
}

pub fn prune_records_at(dir: &Path, older_than: TimeDelta, now: DateTime<Utc>) -> Result<usize> {
    let cutoff = now
        .checked_sub_signed(older_than)
        .with_context(|| format!("retention of {older_than} is out of range"))?;

    let mut removed = 0;
    for (path, record) in read_record_files(dir)? {
        if record.timestamp >= cutoff {
            continue;
        }
        fs::remove_file(&path).with_context(|| format!("failed to remove {}", path.display()))?;
        debug!(id = %record.id, "pruned analysis record");
        removed += 1;
    }
    Ok(removed)
}

pub fn summarize(records: &[AnalysisRecord]) -> AnalysisStats {
    let mut stats = AnalysisStats {
        total: records.len(),
        by_status: ReviewStatus::ALL.into_iter().map(|s| (s, 0)).collect(),
        ..AnalysisStats::default()
    };
    for record in records {
        *stats.by_status.entry(record.status).or_insert(0) += 1;
        if record.result.forgery_probability > MANIPULATION_FLOOR {
            stats.image_manipulation += 1;
        }
        if has_text_findings(&record.result.text_analysis) {
            stats.text_inconsistency += 1;
        }
    }
    stats
}

// Any indicator that fired, any text at all, or a flagged pattern.
fn has_text_findings(indicators: &TextIndicators) -> bool {
    indicators.present_count() > 0
        || indicators.text_length > 0
        || !indicators.suspicious_patterns.is_empty()
}

fn read_record_files(dir: &Path) -> Result<Vec<(PathBuf, AnalysisRecord)>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut records = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|data| Ok(serde_json::from_str::<AnalysisRecord>(&data)?));
        match parsed {
            Ok(record) => records.push((path, record)),
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }

    records.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{DecisionEngine, WeightedDecisionEngine};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn record_at(name: &str, probability: f64, millis: i64) -> AnalysisRecord {
        let result = WeightedDecisionEngine::new().decide(probability, TextIndicators::default());
        let ts = Utc.timestamp_millis_opt(millis).unwrap();
        AnalysisRecord::new(Path::new(name), result, ts)
    }

    #[test]
    fn record_id_uses_stem_and_millis() {
        let record = record_at("scans/visit.png", 0.2, 1_700_000_000_123);
        assert_eq!(record.id, "visit_1700000000123");
        // anomaly 0.12 + 0.4
        assert_eq!(record.status, ReviewStatus::MediumRisk);
    }

    #[test]
    fn summary_counts_statuses_and_manipulation() {
        let records = vec![
            record_at("a.png", 0.9, 1),
            record_at("b.png", 0.0, 2),
            record_at("c.png", 0.95, 3),
        ];
        let stats = summarize(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.image_manipulation, 2);
        assert_eq!(stats.by_status.get(&ReviewStatus::HighRisk), Some(&2));
        assert_eq!(stats.by_status.get(&ReviewStatus::LowRisk), Some(&1));
        assert_eq!(stats.by_status.get(&ReviewStatus::Safe), Some(&0));
        assert_eq!(stats.by_status.get(&ReviewStatus::MediumRisk), Some(&0));
        assert_eq!(stats.text_inconsistency, 0);
    }

    #[test]
    fn empty_summary_lists_every_status() {
        let stats = summarize(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.by_status.len(), ReviewStatus::ALL.len());
        assert!(stats.by_status.values().all(|count| *count == 0));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["by_status"]["safe"], 0);
        assert_eq!(json["by_status"]["high_risk"], 0);
    }

    #[test]
    fn text_findings_are_counted() {
        let mut with_text = record_at("a.png", 0.1, 1);
        with_text.result.text_analysis.text_length = 42;
        let mut with_terms = record_at("b.png", 0.1, 2);
        with_terms.result.text_analysis.has_medical_terms = true;
        let blank = record_at("c.png", 0.1, 3);

        let stats = summarize(&[with_text, with_terms, blank]);
        assert_eq!(stats.text_inconsistency, 2);
    }

    fn temp_records_dir(prefix: &str) -> PathBuf {
        let mut out = std::env::temp_dir();
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        out.push(format!("{prefix}-{}-{now}", std::process::id()));
        out
    }

    fn write_record(dir: &Path, record: &AnalysisRecord) -> Result<()> {
        fs::create_dir_all(dir)?;
        let data = serde_json::to_string_pretty(record)?;
        fs::write(dir.join(format!("{}.json", record.id)), data)?;
        Ok(())
    }

    #[test]
    fn find_record_returns_newest_for_stem() -> Result<()> {
        let dir = temp_records_dir("docverify-find");
        write_record(&dir, &record_at("visit.png", 0.2, 1_000))?;
        write_record(&dir, &record_at("visit.png", 0.9, 5_000))?;
        write_record(&dir, &record_at("visit_two.png", 0.1, 9_000))?;

        let found = find_record(&dir, "visit")?.expect("a visit record");
        assert_eq!(found.id, "visit_5000");
        assert_eq!(find_record(&dir, "discharge")?, None);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn prune_removes_only_expired_records() -> Result<()> {
        let dir = temp_records_dir("docverify-prune");
        let day_ms = 86_400_000;
        let now = Utc.timestamp_millis_opt(40 * day_ms).unwrap();
        write_record(&dir, &record_at("old.png", 0.2, 5 * day_ms))?;
        write_record(&dir, &record_at("recent.png", 0.2, 35 * day_ms))?;
        fs::write(dir.join("notes.json"), "not a record")?;

        let removed = prune_records_at(&dir, TimeDelta::days(30), now)?;
        assert_eq!(removed, 1);

        let left: Vec<String> = load_records(&dir)?.into_iter().map(|r| r.id).collect();
        assert_eq!(left, vec![format!("recent_{}", 35 * day_ms)]);
        assert!(dir.join("notes.json").exists());

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }
}
