//! Live object transforms and the compact angle encoding of rotation curves.
//!
//! Rotation channels store Euler angles in tenths of degrees while the
//! authoring tool reports an object's live rotation in radians. Conversions
//! between the two are rounded to six decimal places, and radians are reduced
//! into [0, 2π) before any comparison.

use crate::group::{ChannelGroup, ChannelName};
use crate::tolerance::EPSILON;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// An object's current transform at the reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivePose {
    /// Local position [X, Y, Z].
    pub position: [f64; 3],
    /// Local Euler rotation [X, Y, Z] in radians.
    pub rotation: [f64; 3],
    /// Local scale [X, Y, Z].
    pub scale: [f64; 3],
}

impl Default for LivePose {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl LivePose {
    /// Returns the pose component matching a channel.
    ///
    /// Quaternion channels have no live counterpart and return `None`.
    pub fn component(&self, name: ChannelName) -> Option<f64> {
        let slot = name.slot();
        match name.group() {
            ChannelGroup::Position => Some(self.position[slot]),
            ChannelGroup::Rotation => Some(self.rotation[slot]),
            ChannelGroup::Scale => Some(self.scale[slot]),
            ChannelGroup::Quaternion => None,
        }
    }

    /// Returns the pose component matching a channel mutably.
    pub fn component_mut(&mut self, name: ChannelName) -> Option<&mut f64> {
        let slot = name.slot();
        match name.group() {
            ChannelGroup::Position => Some(&mut self.position[slot]),
            ChannelGroup::Rotation => Some(&mut self.rotation[slot]),
            ChannelGroup::Scale => Some(&mut self.scale[slot]),
            ChannelGroup::Quaternion => None,
        }
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Reduces an angle in radians into [0, 2π).
///
/// Values within epsilon of 2π wrap to (almost) zero.
pub fn reduce_radians(radians: f64) -> f64 {
    let reduced = radians.rem_euclid(TAU);
    if reduced >= TAU - EPSILON {
        reduced - TAU
    } else {
        reduced
    }
}

/// Converts a rotation channel value (tenths of degrees) to radians.
pub fn encoded_to_radians(encoded: f64) -> f64 {
    round6(encoded * 10.0 * PI / 180.0)
}

/// Converts radians to a rotation channel value (tenths of degrees).
pub fn radians_to_encoded(radians: f64) -> f64 {
    round6(radians * 180.0 / PI) / 10.0
}
