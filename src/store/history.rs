use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ScorePoint;
use crate::predict::form::FormSnapshot;
use crate::store::json_store::{HISTORY_SLOT, JsonStore};
use crate::store::schema::HistoryData;

/// One completed prediction. Immutable once appended; insertion order is
/// chronological order (timestamps are taken at append time).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub input: FormSnapshot,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of past predictions. Append-only within a session, cleared
/// only by explicit user action, persisted in full after every mutation.
/// `version` is a mutation counter callers use to memoize derived metrics.
pub struct HistoryStore {
    records: Vec<PredictionRecord>,
    version: u64,
    store: Option<JsonStore>,
}

impl HistoryStore {
    /// Restore the log from the store. A missing or unparseable slot loads
    /// as an empty log.
    pub fn load(store: Option<JsonStore>) -> Self {
        let records = store
            .as_ref()
            .map(|s| s.load::<HistoryData>(HISTORY_SLOT).records)
            .unwrap_or_default();
        Self {
            records,
            version: 0,
            store,
        }
    }

    pub fn append(&mut self, record: PredictionRecord) {
        self.records.push(record);
        self.version += 1;
        self.persist();
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.version += 1;
        if let Some(ref store) = self.store {
            let _ = store.clear(HISTORY_SLOT);
        }
    }

    pub fn all(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn last(&self) -> Option<&PredictionRecord> {
        self.records.last()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Result values only, in order. This is the payload shape the advice
    /// endpoints take; raw form inputs never leave the client.
    pub fn score_points(&self) -> Vec<ScorePoint> {
        self.records
            .iter()
            .map(|r| ScorePoint { result: r.result })
            .collect()
    }

    fn persist(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save(
                HISTORY_SLOT,
                &HistoryData {
                    records: self.records.clone(),
                    ..HistoryData::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(result: f64) -> PredictionRecord {
        PredictionRecord {
            input: FormSnapshot::default(),
            result,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut history = HistoryStore::load(None);
        history.append(record(10.0));
        history.append(record(20.0));
        history.append(record(30.0));
        let results: Vec<f64> = history.all().iter().map(|r| r.result).collect();
        assert_eq!(results, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let mut history = HistoryStore::load(None);
        let v0 = history.version();
        history.append(record(10.0));
        assert!(history.version() > v0);
        let v1 = history.version();
        history.clear();
        assert!(history.version() > v1);
        assert!(history.is_empty());
    }

    #[test]
    fn test_persists_across_reload() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

        let mut history = HistoryStore::load(Some(store.clone()));
        history.append(record(73.0));
        history.append(record(88.0));

        let reloaded = HistoryStore::load(Some(store));
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.all()[1].result, 88.0);
    }

    #[test]
    fn test_clear_purges_persisted_state() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

        let mut history = HistoryStore::load(Some(store.clone()));
        history.append(record(50.0));
        history.clear();

        let reloaded = HistoryStore::load(Some(store));
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_score_points_carry_results_only() {
        let mut history = HistoryStore::load(None);
        history.append(record(64.0));
        let points = history.score_points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].result, 64.0);
    }
}
