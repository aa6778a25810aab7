//! Error types for curve model and scene document operations.

use thiserror::Error;

/// Result type for curve model operations.
pub type AnimResult<T> = Result<T, AnimError>;

/// Errors raised at the API boundary of the curve model.
///
/// These are caller bugs or unreadable documents. Inconsistent keyframe data
/// is never an error; it is reported as a violation by the diagnostics crate.
#[derive(Debug, Error)]
pub enum AnimError {
    /// A channel name outside the thirteen fixed transform channels.
    #[error("unknown channel name '{0}' (expected one of LocX, LocY, LocZ, RotX, RotY, RotZ, ScaleX, ScaleY, ScaleZ, QuatW, QuatX, QuatY, QuatZ)")]
    UnknownChannel(String),

    /// A group name outside the four fixed channel groups.
    #[error("unknown channel group '{0}' (expected position, rotation, scale, or quaternion)")]
    UnknownGroup(String),

    /// A curve name that is not defined in the scene.
    #[error("curve '{0}' is not defined in the scene")]
    UnknownCurve(String),

    /// An object name that is not defined in the scene.
    #[error("object '{0}' is not defined in the scene")]
    UnknownObject(String),

    /// An object name declared more than once.
    #[error("object '{0}' is declared more than once")]
    DuplicateObject(String),

    /// An object references a curve that the scene does not define.
    #[error("object '{object}' references undefined curve '{curve}'")]
    DanglingCurveReference { object: String, curve: String },

    /// Scene document version is not supported.
    #[error("unsupported scene version {found} (expected {expected})")]
    UnsupportedSceneVersion { found: u32, expected: u32 },

    /// Options file version is not supported.
    #[error("unsupported options version {found} (expected {expected})")]
    UnsupportedOptionsVersion { found: u32, expected: u32 },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
