//! Persisted repair options.
//!
//! Options are loaded once per invocation and passed by value into the
//! diagnostics and repair passes; nothing mutates them mid-scan.

use crate::error::{AnimError, AnimResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current options file version.
pub const OPTIONS_VERSION: u32 = 1;

/// Which repairs to run and where the bind pose lives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Options file version.
    pub version: u32,
    /// Collapse runs of three keys at the same time.
    pub repeat_removal: bool,
    /// Subdivide rotation segments that exceed the safe delta.
    pub overflow_split: bool,
    /// Make groups simultaneous by adding keys (set union).
    pub union_merge: bool,
    /// Make groups simultaneous by removing keys (set intersection).
    pub intersection_trim: bool,
    /// Synchronize live poses with the curves at the reference frame.
    pub bind_sync: bool,
    /// Frame holding the bind pose.
    pub reference_frame: f64,
    /// Upper bound on repair/re-scan passes.
    pub max_passes: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            version: OPTIONS_VERSION,
            repeat_removal: true,
            overflow_split: true,
            union_merge: true,
            intersection_trim: false,
            bind_sync: false,
            reference_frame: 1.0,
            max_passes: 4,
        }
    }
}

impl Options {
    /// Parses options JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> AnimResult<Self> {
        let options: Options = serde_json::from_str(json)?;
        if options.version != OPTIONS_VERSION {
            return Err(AnimError::UnsupportedOptionsVersion {
                found: options.version,
                expected: OPTIONS_VERSION,
            });
        }
        Ok(options)
    }

    /// Loads options from disk, or returns defaults if the file does not exist.
    pub fn load(path: &Path) -> AnimResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes the options to disk.
    pub fn save(&self, path: &Path) -> AnimResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
