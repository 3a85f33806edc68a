//! Assessment history kept in a single key-value slot.

use nutriscan_core::assessment::{Assessment, AssessmentStore, MAX_HISTORY_ENTRIES};
use nutriscan_core::error::Result;

use super::key_value::KeyValueStore;

/// Key of the slot holding the JSON array of assessments.
pub const STORAGE_KEY: &str = "malnutrition_assessments";

/// [`AssessmentStore`] over any [`KeyValueStore`].
///
/// The slot holds a JSON array, most recent first, never longer than
/// [`MAX_HISTORY_ENTRIES`].
pub struct LocalAssessmentStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LocalAssessmentStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    fn try_save(&self, assessment: &Assessment) -> Result<()> {
        self.store.update(&self.key, &mut |current| {
            let existing = current
                .as_deref()
                .map(parse_history)
                .unwrap_or_default();

            let mut updated = Vec::with_capacity(existing.len() + 1);
            updated.push(assessment.clone());
            updated.extend(existing);
            updated.truncate(MAX_HISTORY_ENTRIES);

            Ok(serde_json::to_string(&updated)?)
        })
    }
}

impl<S: KeyValueStore> AssessmentStore for LocalAssessmentStore<S> {
    fn save(&self, assessment: &Assessment) {
        match self.try_save(assessment) {
            Ok(()) => tracing::debug!(id = %assessment.id, "Saved assessment"),
            Err(e) => tracing::error!(error = %e, "Error saving assessment"),
        }
    }

    fn load_all(&self) -> Vec<Assessment> {
        match self.store.get(&self.key) {
            Ok(Some(content)) => parse_history(&content),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Error loading assessments");
                Vec::new()
            }
        }
    }

    fn clear_all(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::error!(error = %e, "Error clearing assessments");
        }
    }
}

/// Parses a stored slot; corrupt content counts as no history.
fn parse_history(content: &str) -> Vec<Assessment> {
    serde_json::from_str(content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Stored assessment history is unreadable, treating as empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use nutriscan_core::assessment::{AnalysisResult, RiskLevel};
    use nutriscan_core::error::NutriscanError;

    fn assessment(n: usize) -> Assessment {
        Assessment::from_result(
            format!("data:image/png;base64,{}", n),
            AnalysisResult::new(RiskLevel::Low, format!("record {}", n), 0.9),
        )
    }

    #[test]
    fn test_load_all_empty_when_absent() {
        let store = LocalAssessmentStore::new(MemoryKeyValueStore::new());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_save_prepends() {
        let store = LocalAssessmentStore::new(MemoryKeyValueStore::new());
        let first = assessment(1);
        let second = assessment(2);

        store.save(&first);
        store.save(&second);

        let loaded = store.load_all();
        assert_eq!(loaded, vec![second, first]);
    }

    #[test]
    fn test_history_is_bounded() {
        let store = LocalAssessmentStore::new(MemoryKeyValueStore::new());
        let records: Vec<Assessment> = (0..51).map(assessment).collect();
        for record in &records {
            store.save(record);
        }

        let loaded = store.load_all();
        assert_eq!(loaded.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(loaded[0], records[50]);
        assert_eq!(loaded[49], records[1]);
        assert!(!loaded.contains(&records[0]));
    }

    #[test]
    fn test_clear_all() {
        let store = LocalAssessmentStore::new(MemoryKeyValueStore::new());
        store.save(&assessment(1));
        store.clear_all();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_slot_reads_as_empty() {
        let kv = MemoryKeyValueStore::new();
        kv.set(STORAGE_KEY, "not json at all").unwrap();
        let store = LocalAssessmentStore::new(kv);

        assert!(store.load_all().is_empty());

        // Saving over a corrupt slot starts a fresh history.
        let record = assessment(7);
        store.save(&record);
        assert_eq!(store.load_all(), vec![record]);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(NutriscanError::io("disk unavailable"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(NutriscanError::io("disk unavailable"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(NutriscanError::io("disk unavailable"))
        }

        fn update(&self, _key: &str, _f: super::super::key_value::UpdateFn<'_>) -> Result<()> {
            Err(NutriscanError::io("disk unavailable"))
        }
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let store = LocalAssessmentStore::new(BrokenStore);
        store.save(&assessment(1));
        store.clear_all();
        assert!(store.load_all().is_empty());
    }
}
