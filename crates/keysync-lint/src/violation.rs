//! Violation records produced by the diagnostics scan.

use keysync_anim::{ChannelGroup, ChannelName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of cross-channel problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// K001: Some but not all channels of a group are present.
    MissingChannel,
    /// K002: Channels of a group hold different numbers of keys.
    CountMismatch,
    /// K003: Channels of a group disagree on a key time.
    TimeMismatch,
    /// K004: Three consecutive keys share one time.
    RepeatedTime,
    /// K005: A rotation segment exceeds the safe delta.
    RotationOverflow,
    /// K006: The live pose disagrees with the curve at the reference frame.
    BindDesync,
}

impl ViolationKind {
    /// Returns the violation code string (e.g., "K001").
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingChannel => "K001",
            ViolationKind::CountMismatch => "K002",
            ViolationKind::TimeMismatch => "K003",
            ViolationKind::RepeatedTime => "K004",
            ViolationKind::RotationOverflow => "K005",
            ViolationKind::BindDesync => "K006",
        }
    }

    /// Returns true if an exporter must skip a curve with this violation.
    pub fn blocks_export(&self) -> bool {
        matches!(
            self,
            ViolationKind::MissingChannel
                | ViolationKind::CountMismatch
                | ViolationKind::TimeMismatch
                | ViolationKind::RotationOverflow
        )
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind-specific data of a violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationDetail {
    /// Which channels of the group exist.
    Presence {
        present: Vec<ChannelName>,
        absent: Vec<ChannelName>,
    },
    /// Key count per channel.
    Counts { counts: Vec<(ChannelName, usize)> },
    /// First key index whose times disagree, with each channel's time there.
    Times {
        index: usize,
        times: Vec<(ChannelName, f64)>,
    },
    /// Middle key of a repeated-time triple.
    Repeat {
        channel: ChannelName,
        index: usize,
        time: f64,
    },
    /// Segment ending at `index` whose value delta is too large.
    Overflow {
        channel: ChannelName,
        index: usize,
        delta: f64,
    },
    /// Pose and curve values in pose units (radians for rotation).
    ///
    /// `curve_value` is `None` when the channel is absent and the pose
    /// differs from the group default.
    Bind {
        channel: ChannelName,
        pose_value: f64,
        curve_value: Option<f64>,
    },
}

/// One cross-channel problem in one group of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Group the problem belongs to.
    pub group: ChannelGroup,
    /// What is wrong.
    pub kind: ViolationKind,
    /// Where and by how much.
    pub detail: ViolationDetail,
}

impl Violation {
    pub fn missing_channel(
        group: ChannelGroup,
        present: Vec<ChannelName>,
        absent: Vec<ChannelName>,
    ) -> Self {
        Self {
            group,
            kind: ViolationKind::MissingChannel,
            detail: ViolationDetail::Presence { present, absent },
        }
    }

    pub fn count_mismatch(group: ChannelGroup, counts: Vec<(ChannelName, usize)>) -> Self {
        Self {
            group,
            kind: ViolationKind::CountMismatch,
            detail: ViolationDetail::Counts { counts },
        }
    }

    pub fn time_mismatch(group: ChannelGroup, index: usize, times: Vec<(ChannelName, f64)>) -> Self {
        Self {
            group,
            kind: ViolationKind::TimeMismatch,
            detail: ViolationDetail::Times { index, times },
        }
    }

    pub fn repeated_time(channel: ChannelName, index: usize, time: f64) -> Self {
        Self {
            group: channel.group(),
            kind: ViolationKind::RepeatedTime,
            detail: ViolationDetail::Repeat {
                channel,
                index,
                time,
            },
        }
    }

    pub fn rotation_overflow(channel: ChannelName, index: usize, delta: f64) -> Self {
        Self {
            group: channel.group(),
            kind: ViolationKind::RotationOverflow,
            detail: ViolationDetail::Overflow {
                channel,
                index,
                delta,
            },
        }
    }

    pub fn bind_desync(channel: ChannelName, pose_value: f64, curve_value: Option<f64>) -> Self {
        Self {
            group: channel.group(),
            kind: ViolationKind::BindDesync,
            detail: ViolationDetail::Bind {
                channel,
                pose_value,
                curve_value,
            },
        }
    }

    /// Human-readable description of the problem.
    pub fn message(&self) -> String {
        let label = self.group.label();
        match &self.detail {
            ViolationDetail::Presence { present, absent } => format!(
                "{} missing kf channel def (present: {}; absent: {})",
                label,
                join_names(present),
                join_names(absent)
            ),
            ViolationDetail::Counts { counts } => format!(
                "{} channel kf count mismatch ({})",
                label,
                counts
                    .iter()
                    .map(|(name, count)| format!("{}:{}", name, count))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ViolationDetail::Times { index, times } => format!(
                "{} kf indices not simultaneous at index {} ({})",
                label,
                index,
                times
                    .iter()
                    .map(|(name, time)| format!("{}:{:.6}", name, time))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ViolationDetail::Repeat {
                channel,
                index,
                time,
            } => format!(
                "{} kf repeating time {:.6} around index {}",
                channel, time, index
            ),
            ViolationDetail::Overflow {
                channel,
                index,
                delta,
            } => format!(
                "{} kf {} extends past 90 degree tol (delta {:.6})",
                channel, index, delta
            ),
            ViolationDetail::Bind {
                channel,
                pose_value,
                curve_value: Some(curve_value),
            } => format!(
                "{} mismatch (pose {:.6}, curve {:.6})",
                channel, pose_value, curve_value
            ),
            ViolationDetail::Bind {
                channel,
                pose_value,
                curve_value: None,
            } => format!("{} w/o curve (pose {:.6})", channel, pose_value),
        }
    }
}

fn join_names(names: &[ChannelName]) -> String {
    if names.is_empty() {
        return "-".to_string();
    }
    names
        .iter()
        .map(ChannelName::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ViolationKind::MissingChannel,
            ViolationKind::CountMismatch,
            ViolationKind::TimeMismatch,
            ViolationKind::RepeatedTime,
            ViolationKind::RotationOverflow,
            ViolationKind::BindDesync,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_export_blocking() {
        assert!(ViolationKind::MissingChannel.blocks_export());
        assert!(ViolationKind::RotationOverflow.blocks_export());
        assert!(!ViolationKind::RepeatedTime.blocks_export());
        assert!(!ViolationKind::BindDesync.blocks_export());
    }

    #[test]
    fn test_display() {
        let violation = Violation::missing_channel(
            ChannelGroup::Position,
            vec![ChannelName::LocX],
            vec![ChannelName::LocY, ChannelName::LocZ],
        );
        assert_eq!(
            violation.to_string(),
            "K001: Loc missing kf channel def (present: LocX; absent: LocY,LocZ)"
        );

        let bind = Violation::bind_desync(ChannelName::ScaleY, 2.0, None);
        assert_eq!(bind.group, ChannelGroup::Scale);
        assert_eq!(bind.to_string(), "K006: ScaleY w/o curve (pose 2.000000)");
    }

    #[test]
    fn test_serializes_tagged_detail() {
        let violation = Violation::repeated_time(ChannelName::LocX, 1, 1.0);
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["kind"], "repeated_time");
        assert_eq!(json["group"], "position");
        assert_eq!(json["detail"]["type"], "repeat");
        assert_eq!(json["detail"]["channel"], "LocX");
    }
}
