//! File system and configuration adapters for NutriScan.

pub mod config_service;
pub mod intake;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::NutriscanPaths;
pub use crate::storage::{FileKeyValueStore, LocalAssessmentStore, MemoryKeyValueStore};

/// The history store used by the applications: JSON slots on disk.
pub type FileAssessmentStore = LocalAssessmentStore<FileKeyValueStore>;
