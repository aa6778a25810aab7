//! The fixed transform channels and the groups that bundle them.
//!
//! Every animated transform is stored as up to thirteen scalar channels. The
//! runtime consumes them in four groups (position, Euler rotation, scale and
//! quaternion) which must stay jointly well-formed.

use crate::error::AnimError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Channel Names
// =============================================================================

/// One of the thirteen fixed transform channels.
///
/// The declaration order is the canonical scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelName {
    LocX,
    LocY,
    LocZ,
    RotX,
    RotY,
    RotZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    QuatW,
    QuatX,
    QuatY,
    QuatZ,
}

impl ChannelName {
    /// All channels in canonical order.
    pub const ALL: [ChannelName; 13] = [
        ChannelName::LocX,
        ChannelName::LocY,
        ChannelName::LocZ,
        ChannelName::RotX,
        ChannelName::RotY,
        ChannelName::RotZ,
        ChannelName::ScaleX,
        ChannelName::ScaleY,
        ChannelName::ScaleZ,
        ChannelName::QuatW,
        ChannelName::QuatX,
        ChannelName::QuatY,
        ChannelName::QuatZ,
    ];

    /// Returns the channel name as used in scene documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelName::LocX => "LocX",
            ChannelName::LocY => "LocY",
            ChannelName::LocZ => "LocZ",
            ChannelName::RotX => "RotX",
            ChannelName::RotY => "RotY",
            ChannelName::RotZ => "RotZ",
            ChannelName::ScaleX => "ScaleX",
            ChannelName::ScaleY => "ScaleY",
            ChannelName::ScaleZ => "ScaleZ",
            ChannelName::QuatW => "QuatW",
            ChannelName::QuatX => "QuatX",
            ChannelName::QuatY => "QuatY",
            ChannelName::QuatZ => "QuatZ",
        }
    }

    /// Returns the group this channel belongs to.
    pub fn group(&self) -> ChannelGroup {
        match self {
            ChannelName::LocX | ChannelName::LocY | ChannelName::LocZ => ChannelGroup::Position,
            ChannelName::RotX | ChannelName::RotY | ChannelName::RotZ => ChannelGroup::Rotation,
            ChannelName::ScaleX | ChannelName::ScaleY | ChannelName::ScaleZ => ChannelGroup::Scale,
            ChannelName::QuatW | ChannelName::QuatX | ChannelName::QuatY | ChannelName::QuatZ => {
                ChannelGroup::Quaternion
            }
        }
    }

    /// Returns the position of this channel inside its group.
    pub fn slot(&self) -> usize {
        match self {
            ChannelName::LocX | ChannelName::RotX | ChannelName::ScaleX | ChannelName::QuatW => 0,
            ChannelName::LocY | ChannelName::RotY | ChannelName::ScaleY | ChannelName::QuatX => 1,
            ChannelName::LocZ | ChannelName::RotZ | ChannelName::ScaleZ | ChannelName::QuatY => 2,
            ChannelName::QuatZ => 3,
        }
    }

    /// Returns the group default used when this channel is synthesized.
    pub fn default_value(&self) -> f64 {
        self.group().defaults()[self.slot()]
    }

    /// Returns true for the Euler rotation channels.
    pub fn is_rotation(&self) -> bool {
        self.group() == ChannelGroup::Rotation
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelName {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| AnimError::UnknownChannel(s.to_string()))
    }
}

// Channel names are also map keys in scene documents, so they go through
// plain strings rather than serde's enum representation.
impl Serialize for ChannelName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChannelName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Channel Groups
// =============================================================================

/// A fixed bundle of channels that must stay jointly consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelGroup {
    /// LocX, LocY, LocZ.
    Position,
    /// RotX, RotY, RotZ (Euler angles in tenths of degrees).
    Rotation,
    /// ScaleX, ScaleY, ScaleZ.
    Scale,
    /// QuatW, QuatX, QuatY, QuatZ.
    Quaternion,
}

impl ChannelGroup {
    /// All groups in scan order.
    pub const ALL: [ChannelGroup; 4] = [
        ChannelGroup::Position,
        ChannelGroup::Rotation,
        ChannelGroup::Scale,
        ChannelGroup::Quaternion,
    ];

    /// Groups that have a live pose counterpart.
    pub const POSED: [ChannelGroup; 3] = [
        ChannelGroup::Position,
        ChannelGroup::Rotation,
        ChannelGroup::Scale,
    ];

    /// Returns the group's channels in canonical order.
    pub fn channels(&self) -> &'static [ChannelName] {
        match self {
            ChannelGroup::Position => &[ChannelName::LocX, ChannelName::LocY, ChannelName::LocZ],
            ChannelGroup::Rotation => &[ChannelName::RotX, ChannelName::RotY, ChannelName::RotZ],
            ChannelGroup::Scale => &[
                ChannelName::ScaleX,
                ChannelName::ScaleY,
                ChannelName::ScaleZ,
            ],
            ChannelGroup::Quaternion => &[
                ChannelName::QuatW,
                ChannelName::QuatX,
                ChannelName::QuatY,
                ChannelName::QuatZ,
            ],
        }
    }

    /// Returns the default value of each channel, matching [`Self::channels`].
    pub fn defaults(&self) -> &'static [f64] {
        match self {
            ChannelGroup::Position => &[0.0, 0.0, 0.0],
            ChannelGroup::Rotation => &[0.0, 0.0, 0.0],
            ChannelGroup::Scale => &[1.0, 1.0, 1.0],
            ChannelGroup::Quaternion => &[1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Short label used in human-readable reports.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelGroup::Position => "Loc",
            ChannelGroup::Rotation => "Rot",
            ChannelGroup::Scale => "Scale",
            ChannelGroup::Quaternion => "Quat",
        }
    }

    /// Returns the group name as used in documents and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelGroup::Position => "position",
            ChannelGroup::Rotation => "rotation",
            ChannelGroup::Scale => "scale",
            ChannelGroup::Quaternion => "quaternion",
        }
    }
}

impl fmt::Display for ChannelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelGroup {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        ChannelGroup::ALL
            .iter()
            .copied()
            .find(|group| group.as_str() == lowered || group.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AnimError::UnknownGroup(s.to_string()))
    }
}
