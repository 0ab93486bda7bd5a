//! Error types for the automation crate.
//!
//! Every variant is recoverable-by-retry at the next sync cycle; none of
//! them corrupts the sync client's state, since the last applied record
//! only advances on full success.

use crate::fields::LevelField;
use crate::surface::SurfaceError;
use thiserror::Error;

/// Terminal failure outcomes of one automation attempt.
#[derive(Error, Debug)]
pub enum AutomationError {
    /// No element matching the configured name fragment was found. The host
    /// UI was not touched.
    #[error("Target indicator not found (fragment: {0:?})")]
    TargetNotFound(String),

    /// Some (or all) input fields could not be resolved. Fields that were
    /// resolved have been written and committed; the configuration surface
    /// is left open if nothing could be applied.
    #[error("Input fields not found: applied {}, missing {}",
        display_fields(applied), display_fields(missing))]
    FieldsNotFound {
        applied: Vec<LevelField>,
        missing: Vec<LevelField>,
    },

    /// No confirm action was found. Edited-but-uncommitted state is left
    /// as-is for manual completion; rollback is not achievable through this
    /// interaction model.
    #[error("Commit action not found on configuration surface")]
    CommitNotFound,

    /// The surface adapter itself failed (e.g. bridge unreachable).
    #[error("Surface failure: {0}")]
    Surface(String),
}

impl From<SurfaceError> for AutomationError {
    fn from(err: SurfaceError) -> Self {
        AutomationError::Surface(err.to_string())
    }
}

fn display_fields(fields: &[LevelField]) -> String {
    if fields.is_empty() {
        return "none".to_string();
    }
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
