//! Storage layer: key-value slots and the assessment history on top of them.

mod assessment_store;
mod file_store;
mod key_value;

pub use assessment_store::{LocalAssessmentStore, STORAGE_KEY};
pub use file_store::FileKeyValueStore;
pub use key_value::{KeyValueStore, MemoryKeyValueStore, UpdateFn};
