//! The scene document: every curve plus the objects that reference them.
//!
//! This is the store the diagnostics and repair passes operate on. It is
//! written by the authoring tool's exporter plugin and read back after
//! repair.

use crate::curve::Curve;
use crate::error::{AnimError, AnimResult};
use crate::pose::LivePose;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Current scene document version.
pub const SCENE_VERSION: u32 = 1;

/// A scene object with its live transform and optional curve reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name.
    pub name: String,
    /// Name of the curve driving this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    /// Live transform at the reference frame.
    #[serde(default)]
    pub pose: LivePose,
}

impl SceneObject {
    /// Creates an object with an identity pose and no curve.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curve: None,
            pose: LivePose::default(),
        }
    }

    /// Builder method to set the curve reference.
    pub fn with_curve(mut self, curve: impl Into<String>) -> Self {
        self.curve = Some(curve.into());
        self
    }

    /// Builder method to set the live pose.
    pub fn with_pose(mut self, pose: LivePose) -> Self {
        self.pose = pose;
        self
    }
}

/// A scene: named curves and the objects that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Document version.
    pub version: u32,
    /// Curves by name.
    #[serde(default)]
    pub curves: BTreeMap<String, Curve>,
    /// Objects in document order.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self {
            version: SCENE_VERSION,
            curves: BTreeMap::new(),
            objects: Vec::new(),
        }
    }

    /// Builder method to add a curve.
    pub fn with_curve(mut self, name: impl Into<String>, curve: Curve) -> Self {
        self.curves.insert(name.into(), curve);
        self
    }

    /// Builder method to add an object.
    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Parses and checks a scene document.
    pub fn from_json(json: &str) -> AnimResult<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.check()?;
        Ok(scene)
    }

    /// Serializes the scene to pretty JSON.
    pub fn to_json_pretty(&self) -> AnimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a scene document from disk.
    pub fn load(path: &Path) -> AnimResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes the scene document to disk.
    pub fn save(&self, path: &Path) -> AnimResult<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Checks the document version, object names, and curve references.
    pub fn check(&self) -> AnimResult<()> {
        if self.version != SCENE_VERSION {
            return Err(AnimError::UnsupportedSceneVersion {
                found: self.version,
                expected: SCENE_VERSION,
            });
        }

        let mut names = HashSet::new();
        for object in &self.objects {
            if !names.insert(object.name.as_str()) {
                return Err(AnimError::DuplicateObject(object.name.clone()));
            }
            if let Some(ref curve) = object.curve {
                if !self.curves.contains_key(curve) {
                    return Err(AnimError::DanglingCurveReference {
                        object: object.name.clone(),
                        curve: curve.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns a curve by name.
    pub fn curve(&self, name: &str) -> AnimResult<&Curve> {
        self.curves
            .get(name)
            .ok_or_else(|| AnimError::UnknownCurve(name.to_string()))
    }

    /// Returns a curve by name, mutably.
    pub fn curve_mut(&mut self, name: &str) -> AnimResult<&mut Curve> {
        self.curves
            .get_mut(name)
            .ok_or_else(|| AnimError::UnknownCurve(name.to_string()))
    }

    /// Returns an object by name.
    pub fn object(&self, name: &str) -> AnimResult<&SceneObject> {
        self.objects
            .iter()
            .find(|object| object.name == name)
            .ok_or_else(|| AnimError::UnknownObject(name.to_string()))
    }

    /// Returns the objects driven by the named curve.
    pub fn objects_using<'a>(&'a self, curve: &'a str) -> impl Iterator<Item = &'a SceneObject> {
        self.objects
            .iter()
            .filter(move |object| object.curve.as_deref() == Some(curve))
    }

    /// Borrows an object's pose together with the curve it references.
    ///
    /// Returns `Ok(None)` if the object has no curve.
    pub fn bind_pair_mut(&mut self, object: &str) -> AnimResult<Option<(&mut LivePose, &mut Curve)>> {
        let entry = self
            .objects
            .iter_mut()
            .find(|candidate| candidate.name == object)
            .ok_or_else(|| AnimError::UnknownObject(object.to_string()))?;
        let Some(curve_name) = entry.curve.as_deref() else {
            return Ok(None);
        };
        let curve = self
            .curves
            .get_mut(curve_name)
            .ok_or_else(|| AnimError::UnknownCurve(curve_name.to_string()))?;
        Ok(Some((&mut entry.pose, curve)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ChannelName;
    use pretty_assertions::assert_eq;

    const SCENE: &str = r#"{
        "version": 1,
        "curves": {
            "WalkIpo": {
                "channels": {
                    "LocX": {
                        "interpolation": "linear",
                        "points": [
                            { "time": 2.0, "value": 1.0 },
                            { "time": 1.0, "value": 0.0 }
                        ]
                    }
                }
            }
        },
        "objects": [
            { "name": "Cube", "curve": "WalkIpo",
              "pose": { "position": [2.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0] } },
            { "name": "Lamp" }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_json(SCENE).unwrap();
        let curve = scene.curve("WalkIpo").unwrap();
        assert_eq!(curve.channel(ChannelName::LocX).unwrap().times(), vec![1.0, 2.0]);
        assert_eq!(scene.object("Cube").unwrap().pose.position, [2.0, 0.0, 0.0]);
        assert_eq!(scene.object("Lamp").unwrap().pose, LivePose::default());
        assert_eq!(scene.objects_using("WalkIpo").count(), 1);
    }

    #[test]
    fn test_round_trip() {
        let scene = Scene::from_json(SCENE).unwrap();
        let json = scene.to_json_pretty().unwrap();
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_rejects_bad_version() {
        let err = Scene::from_json(r#"{"version": 7}"#).unwrap_err();
        assert!(matches!(
            err,
            AnimError::UnsupportedSceneVersion { found: 7, expected: 1 }
        ));
    }

    #[test]
    fn test_rejects_dangling_reference() {
        let json = r#"{"version": 1, "objects": [{"name": "Cube", "curve": "Missing"}]}"#;
        let err = Scene::from_json(json).unwrap_err();
        assert!(matches!(err, AnimError::DanglingCurveReference { .. }));
    }

    #[test]
    fn test_rejects_duplicate_object() {
        let json = r#"{"version": 1, "objects": [{"name": "Cube"}, {"name": "Cube"}]}"#;
        let err = Scene::from_json(json).unwrap_err();
        assert!(matches!(err, AnimError::DuplicateObject(ref name) if name == "Cube"));
    }

    #[test]
    fn test_rejects_unknown_channel() {
        let json = r#"{"version": 1, "curves": {"A": {"channels": {"SizeX": {}}}}}"#;
        assert!(Scene::from_json(json).is_err());
    }

    #[test]
    fn test_bind_pair_mut() {
        let mut scene = Scene::from_json(SCENE).unwrap();
        let (pose, curve) = scene.bind_pair_mut("Cube").unwrap().unwrap();
        pose.position[0] = 5.0;
        curve.remove_channel(ChannelName::LocX);
        assert_eq!(scene.object("Cube").unwrap().pose.position[0], 5.0);
        assert!(!scene.curve("WalkIpo").unwrap().is_animated());

        assert!(scene.bind_pair_mut("Lamp").unwrap().is_none());
        assert!(matches!(
            scene.bind_pair_mut("Ghost"),
            Err(AnimError::UnknownObject(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let scene = Scene::from_json(SCENE).unwrap();
        scene.save(&path).unwrap();
        assert_eq!(Scene::load(&path).unwrap(), scene);
    }
}
