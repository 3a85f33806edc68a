//! Session controller driven by the user-facing front-end.
//!
//! Holds only transient state (the selected image, the latest result or
//! error, and an in-memory copy of the history). Everything durable goes
//! through the [`AssessmentStore`].

mod error;

pub use error::SessionError;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use nutriscan_core::assessment::{
    AnalysisError, AnalysisResult, Analyzer, Assessment, AssessmentStore, HistoryOverview,
};
use nutriscan_core::intake::{EncodedImage, ImageFile, IntakeError};
use nutriscan_infrastructure::intake;
use tokio::sync::Mutex;

/// Identifies one image selection. Only the newest ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionTicket(u64);

/// Point-in-time copy of the session state, for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub selected_image: Option<EncodedImage>,
    pub is_analyzing: bool,
    pub result: Option<AnalysisResult>,
    pub intake_error: Option<IntakeError>,
    pub analysis_error: Option<AnalysisError>,
    pub history: Vec<Assessment>,
}

#[derive(Default)]
struct SessionState {
    selected_image: Option<EncodedImage>,
    result: Option<AnalysisResult>,
    intake_error: Option<IntakeError>,
    analysis_error: Option<AnalysisError>,
    history: Vec<Assessment>,
}

/// Clears the in-flight flag when an analysis ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One user's screening session.
///
/// At most one analysis runs at a time. Image selections may overlap; the
/// last one begun wins.
pub struct AssessmentSession {
    analyzer: Arc<dyn Analyzer>,
    store: Arc<dyn AssessmentStore>,
    state: Mutex<SessionState>,
    latest_selection: AtomicU64,
    in_flight: AtomicBool,
}

impl AssessmentSession {
    /// Creates a session and loads the stored history.
    pub fn new(analyzer: Arc<dyn Analyzer>, store: Arc<dyn AssessmentStore>) -> Self {
        let history = store.load_all();
        tracing::debug!(entries = history.len(), "Loaded assessment history");

        Self {
            analyzer,
            store,
            state: Mutex::new(SessionState {
                history,
                ..SessionState::default()
            }),
            latest_selection: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Starts a selection. Any selection begun earlier becomes stale.
    pub fn begin_selection(&self) -> SelectionTicket {
        SelectionTicket(self.latest_selection.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies the outcome of a selection if it is still the newest one.
    ///
    /// A valid image replaces the selection and clears the previous result
    /// and errors. A rejected file only records the intake error. Returns
    /// `false` when the ticket was stale and nothing changed.
    pub async fn complete_selection(
        &self,
        ticket: SelectionTicket,
        outcome: Result<EncodedImage, IntakeError>,
    ) -> bool {
        let mut state = self.state.lock().await;
        if ticket.0 != self.latest_selection.load(Ordering::SeqCst) {
            tracing::debug!(ticket = ticket.0, "Discarding stale image selection");
            return false;
        }

        match outcome {
            Ok(image) => {
                tracing::info!(
                    name = %image.file.name,
                    mime_type = %image.file.mime_type,
                    size = image.file.size,
                    "Image selected"
                );
                state.selected_image = Some(image);
                state.result = None;
                state.intake_error = None;
                state.analysis_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Image rejected");
                state.intake_error = Some(err);
            }
        }
        true
    }

    /// Validates, reads and encodes the image at `path`, then selects it.
    pub async fn select_file(&self, path: &Path) -> Result<ImageFile, SessionError> {
        let ticket = self.begin_selection();
        let outcome = intake::load_image(path).await;
        let reported = match &outcome {
            Ok(image) => Ok(image.file.clone()),
            Err(err) => Err(SessionError::Intake(err.clone())),
        };
        self.complete_selection(ticket, outcome).await;
        reported
    }

    /// Drops the selection together with any result or error.
    ///
    /// Selections still being read when this is called are discarded.
    pub async fn clear_image(&self) {
        self.latest_selection.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        state.selected_image = None;
        state.result = None;
        state.intake_error = None;
        state.analysis_error = None;
    }

    pub async fn new_assessment(&self) {
        self.clear_image().await;
    }

    /// Analyzes the selected image and records the outcome.
    ///
    /// On success the new record is saved, the history refreshed and the
    /// record returned. On failure the classified error is kept and nothing
    /// is persisted; calling `analyze` again retries.
    pub async fn analyze(&self) -> Result<Assessment, SessionError> {
        let (image, ticket) = {
            let mut state = self.state.lock().await;
            let Some(image) = state.selected_image.clone() else {
                return Err(SessionError::NoImageSelected);
            };
            if self.in_flight.swap(true, Ordering::SeqCst) {
                return Err(SessionError::AnalysisInFlight);
            }
            state.analysis_error = None;
            (image, self.latest_selection.load(Ordering::SeqCst))
        };
        let _guard = InFlightGuard(&self.in_flight);

        let outcome = self.analyzer.analyze(&image.data_url).await;

        match outcome {
            Ok(result) => {
                let record = Assessment::from_result(image.data_url, result.clone());
                self.store.save(&record);
                let history = self.store.load_all();
                tracing::info!(id = %record.id, risk_level = %record.risk_level, "Assessment recorded");

                let mut state = self.state.lock().await;
                state.history = history;
                // A newer selection owns the result area now.
                if self.latest_selection.load(Ordering::SeqCst) == ticket {
                    state.result = Some(result);
                }
                Ok(record)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                if self.latest_selection.load(Ordering::SeqCst) == ticket {
                    state.analysis_error = Some(err);
                }
                Err(SessionError::Analysis(err))
            }
        }
    }

    /// Clears the stored history, but only when `confirmed`.
    ///
    /// Returns whether anything was cleared.
    pub async fn clear_history(&self, confirmed: bool) -> bool {
        if !confirmed {
            tracing::debug!("History clear not confirmed");
            return false;
        }
        self.store.clear_all();
        self.state.lock().await.history.clear();
        tracing::info!("Assessment history cleared");
        true
    }

    pub async fn history(&self) -> Vec<Assessment> {
        self.state.lock().await.history.clone()
    }

    pub async fn find_record(&self, id: &str) -> Option<Assessment> {
        self.state
            .lock()
            .await
            .history
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    pub async fn overview(&self) -> Option<HistoryOverview> {
        HistoryOverview::from_assessments(&self.state.lock().await.history)
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            selected_image: state.selected_image.clone(),
            is_analyzing: self.is_analyzing(),
            result: state.result.clone(),
            intake_error: state.intake_error.clone(),
            analysis_error: state.analysis_error,
            history: state.history.clone(),
        }
    }
}
