//! Application layer: the assessment service and the session controller
//! that front-ends drive.

pub mod assessment_service;
pub mod session;

pub use assessment_service::AssessmentService;
pub use session::{AssessmentSession, SelectionTicket, SessionError, SessionSnapshot};
