//! Scene and options loading.
//!
//! Scenes must load cleanly; a broken scene aborts the command. Options are
//! forgiving: a missing file means defaults, and a file that cannot be read
//! or parsed produces a warning and falls back to defaults.

use anyhow::{Context, Result};
use keysync_anim::{scene_hash, Options, Scene};
use std::fs;
use std::path::{Path, PathBuf};

/// Options file used when none is given on the command line.
pub const DEFAULT_OPTIONS_FILE: &str = "keysync.json";

/// A scene read from disk.
#[derive(Debug)]
pub struct LoadedScene {
    /// The parsed scene.
    pub scene: Scene,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
    /// BLAKE3 hash of the canonical scene content.
    pub scene_hash: String,
}

/// Reads and checks a scene document.
pub fn load_scene(path: &Path) -> Result<LoadedScene> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let scene = Scene::from_json(&content)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
    let scene_hash = scene_hash(&scene).context("Failed to hash scene")?;
    Ok(LoadedScene {
        scene,
        source_hash,
        scene_hash,
    })
}

/// Where the effective options came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsSource {
    /// Read from the options file.
    File,
    /// The file does not exist.
    Default,
    /// The file exists but could not be used.
    Fallback,
}

impl OptionsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionsSource::File => "file",
            OptionsSource::Default => "default",
            OptionsSource::Fallback => "fallback",
        }
    }
}

/// Options read from disk, with any warning raised on the way.
#[derive(Debug)]
pub struct LoadedOptions {
    pub options: Options,
    pub path: PathBuf,
    pub source: OptionsSource,
    pub warning: Option<String>,
}

/// Resolves the options path, defaulting to [`DEFAULT_OPTIONS_FILE`].
pub fn options_path(path: Option<&str>) -> PathBuf {
    PathBuf::from(path.unwrap_or(DEFAULT_OPTIONS_FILE))
}

/// Loads options, never failing.
pub fn load_options(path: Option<&str>) -> LoadedOptions {
    let path = options_path(path);
    if !path.exists() {
        return LoadedOptions {
            options: Options::default(),
            path,
            source: OptionsSource::Default,
            warning: None,
        };
    }
    match Options::load(&path) {
        Ok(options) => LoadedOptions {
            options,
            path,
            source: OptionsSource::File,
            warning: None,
        },
        Err(e) => {
            let warning = format!(
                "Ignoring options file {} ({}); using defaults",
                path.display(),
                e
            );
            LoadedOptions {
                options: Options::default(),
                path,
                source: OptionsSource::Fallback,
                warning: Some(warning),
            }
        }
    }
}
