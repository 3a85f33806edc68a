//! Composition root: configuration, logging, storage and the analysis stack.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use nutriscan_application::{AssessmentService, AssessmentSession};
use nutriscan_core::config::AppConfig;
use nutriscan_core::prompt::PromptTemplate;
use nutriscan_infrastructure::{
    ConfigService, FileAssessmentStore, FileKeyValueStore, LocalAssessmentStore, NutriscanPaths,
};
use nutriscan_interaction::GroqApiAgent;
use tracing_appender::non_blocking::WorkerGuard;

use crate::logging;

pub struct App {
    pub session: AssessmentSession,
    pub config: AppConfig,
    pub storage_dir: PathBuf,
    // Flushes the log file on drop.
    _log_guard: Option<WorkerGuard>,
}

pub fn bootstrap(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<App> {
    let config_service = match config_path {
        Some(path) => ConfigService::new(path.to_path_buf()),
        None => ConfigService::from_default_location()?,
    };
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    let data_base = data_dir
        .map(Path::to_path_buf)
        .or_else(|| config.storage.data_dir.clone());
    let paths = NutriscanPaths::new(data_base.as_deref());

    let log_guard = logging::init(&paths.logs_dir()?);
    tracing::info!(
        config = %config_service.path().display(),
        "[Bootstrap] Configuration loaded"
    );

    let storage_dir = paths.storage_dir()?;
    let store: Arc<FileAssessmentStore> = Arc::new(LocalAssessmentStore::new(
        FileKeyValueStore::new(storage_dir.clone()),
    ));
    tracing::info!(dir = %storage_dir.display(), "[Bootstrap] Assessment store ready");

    let agent = GroqApiAgent::from_env(&config.api)?;
    let service = AssessmentService::new(agent, &PromptTemplate::default(), config.api.sampling())?;
    tracing::info!(model = %config.api.model, "[Bootstrap] Assessment service ready");

    let session = AssessmentSession::new(Arc::new(service), store);

    Ok(App {
        session,
        config,
        storage_dir,
        _log_guard: log_guard,
    })
}
