//! Assessment history persistence trait.

use super::model::Assessment;

/// Local, bounded history of assessments, most recent first.
///
/// None of these operations fail from the caller's point of view:
/// persistence problems are logged by the implementation and the history
/// degrades to empty. Callers never block on storage errors.
pub trait AssessmentStore: Send + Sync {
    /// Prepends `assessment` and prunes the list to
    /// [`super::MAX_HISTORY_ENTRIES`].
    fn save(&self, assessment: &Assessment);

    /// Returns the stored history, or an empty list when absent or corrupt.
    fn load_all(&self) -> Vec<Assessment>;

    /// Removes the stored history entirely.
    fn clear_all(&self);
}
