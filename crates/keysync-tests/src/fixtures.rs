//! Test fixture utilities for building curves and scene files.

use keysync_anim::{Channel, Extrapolation, Interpolation, Keyframe, Scene};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A channel with linear interpolation and constant extrapolation.
pub fn linear(points: &[(f64, f64)]) -> Channel {
    channel(Interpolation::Linear, points)
}

/// A channel with constant interpolation and extrapolation.
pub fn stepped(points: &[(f64, f64)]) -> Channel {
    channel(Interpolation::Constant, points)
}

pub fn channel(interpolation: Interpolation, points: &[(f64, f64)]) -> Channel {
    Channel::from_points(
        interpolation,
        Extrapolation::Constant,
        points.iter().map(|&(t, v)| Keyframe::new(t, v)),
    )
}

/// A temporary directory holding a scene file and, optionally, options.
pub struct SceneFixture {
    pub root: TempDir,
    pub scene_path: PathBuf,
}

impl SceneFixture {
    /// Writes `scene` as `scene.json` in a fresh temporary directory.
    pub fn new(scene: &Scene) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let scene_path = root.path().join("scene.json");
        let json = scene.to_json_pretty().expect("Failed to serialize scene");
        fs::write(&scene_path, json).expect("Failed to write scene file");
        Self { root, scene_path }
    }

    /// Get the fixture directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the options file inside the fixture (may not exist yet).
    pub fn options_path(&self) -> PathBuf {
        self.root.path().join("keysync.json")
    }

    /// Writes raw JSON as the options file.
    pub fn write_options(&self, json: &str) -> PathBuf {
        let path = self.options_path();
        fs::write(&path, json).expect("Failed to write options file");
        path
    }

    /// Reads the scene file back.
    pub fn read_scene(&self) -> Scene {
        Scene::load(&self.scene_path).expect("Failed to read scene file")
    }

    pub fn scene_str(&self) -> &str {
        self.scene_path.to_str().expect("temp path is not UTF-8")
    }
}
