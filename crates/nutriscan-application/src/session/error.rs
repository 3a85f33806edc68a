use nutriscan_core::assessment::AnalysisError;
use nutriscan_core::intake::IntakeError;
use thiserror::Error;

/// Why a session operation was rejected or failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please select an image to analyze")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
