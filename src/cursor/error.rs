//! Errors reported by cursor creation and attribute updates.

use thiserror::Error;

/// Failures surfaced to the caller by the cursor engine.
///
/// Operations on inactive or stale handles are not errors; they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("Maximum number of cursors reached ({capacity})")]
    PoolExhausted { capacity: usize },

    #[error("Invalid thickness {0}: thickness must be a positive number of pixels")]
    InvalidThickness(i64),
}
