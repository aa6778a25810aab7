//! Error types for the repair engine.

use keysync_anim::AnimError;
use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur while planning or applying repairs.
///
/// Structural violations are never errors; these only cover requests that
/// name something the scene does not contain.
#[derive(Debug, Error)]
pub enum RepairError {
    /// A curve selected for repair does not exist.
    #[error("Curve '{0}' selected for repair does not exist in the scene")]
    UnknownCurve(String),

    /// A repair operation name could not be parsed.
    #[error("Unknown repair operation '{0}'. Expected one of: repeat, overflow, union, intersect, bind")]
    UnknownOperation(String),

    /// Scene access failed.
    #[error(transparent)]
    Anim(#[from] AnimError),
}
