//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and prints exactly one of these documents,
//! pretty-printed, with no colored text.

use keysync_anim::{AnimError, Options};
use keysync_lint::{CheckReport, Violation};
use keysync_repair::{PassRecord, RepairError, RepairSummary, SessionState};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Scene file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Scene document is malformed or references something missing
    pub const INVALID_SCENE: &str = "CLI_002";
    /// A selected curve does not exist
    pub const UNKNOWN_CURVE: &str = "CLI_003";
    /// Neither `--curve` nor `--all` was given
    pub const NO_SELECTION: &str = "CLI_004";
    /// Scene or options file could not be written
    pub const FILE_WRITE: &str = "CLI_005";
    /// An operation or group name on the command line is not recognized
    pub const INVALID_ARGUMENT: &str = "CLI_006";
    /// Anything else
    pub const INTERNAL: &str = "CLI_099";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Options file ignored, defaults used
    pub const OPTIONS_FALLBACK: &str = "CLI_W001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Classifies a command failure by the library error underneath it.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        for cause in err.chain() {
            if let Some(repair) = cause.downcast_ref::<RepairError>() {
                let code = match repair {
                    RepairError::UnknownCurve(_) => error_codes::UNKNOWN_CURVE,
                    RepairError::UnknownOperation(_) => error_codes::INVALID_ARGUMENT,
                    RepairError::Anim(_) => error_codes::INVALID_SCENE,
                };
                return Self::new(code, message);
            }
            if let Some(anim) = cause.downcast_ref::<AnimError>() {
                let code = match anim {
                    AnimError::Io(_) => error_codes::FILE_READ,
                    AnimError::UnknownGroup(_) => error_codes::INVALID_ARGUMENT,
                    _ => error_codes::INVALID_SCENE,
                };
                return Self::new(code, message);
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::new(error_codes::FILE_READ, message);
            }
        }
        Self::new(error_codes::INTERNAL, message)
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "CLI_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
}

impl JsonWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A curve rejected by the export gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectedCurve {
    pub curve: String,
    pub blocking: Vec<Violation>,
}

/// JSON output for the `check` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Whether the scene has no violation
    pub success: bool,
    /// Errors that stopped the check
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// BLAKE3 hash of the scene file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// BLAKE3 hash of the canonical scene content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_hash: Option<String>,
    /// The diagnostics report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CheckReport>,
    /// Curves the exporter would accept
    pub exportable: Vec<String>,
    /// Curves the exporter would reject
    pub rejected: Vec<RejectedCurve>,
}

impl CheckOutput {
    /// Creates a failed check output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            source_hash: None,
            scene_hash: None,
            report: None,
            exportable: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// JSON output for the `fix` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixOutput {
    /// Whether the selection ended clean
    pub success: bool,
    /// Errors that stopped the repair
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// Effective options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    /// Curves selected for repair
    pub selected: Vec<String>,
    /// Terminal session state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SessionState>,
    /// Total modifications
    pub modifications: usize,
    /// Modifications per curve and operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RepairSummary>,
    /// Per-pass history
    pub passes: Vec<PassRecord>,
    /// Violations still present in the selection
    pub remaining: usize,
    /// Canonical scene hash before repair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_before: Option<String>,
    /// Canonical scene hash after repair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_after: Option<String>,
    /// Where the scene was written, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<String>,
}

impl FixOutput {
    /// Creates a failed fix output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            options: None,
            selected: Vec::new(),
            state: None,
            modifications: 0,
            summary: None,
            passes: Vec::new(),
            remaining: 0,
            hash_before: None,
            hash_after: None,
            written: None,
        }
    }
}

/// JSON output for the `options` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsOutput {
    pub success: bool,
    pub warnings: Vec<JsonWarning>,
    /// Options file consulted
    pub path: String,
    /// "file", "default" or "fallback"
    pub source: String,
    /// Effective options
    pub options: Options,
}
