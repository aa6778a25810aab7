//! Export gate for the serialization step.
//!
//! The serializer re-validates instead of repairing: a curve that still
//! carries a blocking violation is skipped.

use crate::scan::scan;
use crate::violation::Violation;
use keysync_anim::{Curve, Scene};

/// Returns the violations that stop a curve from being exported.
///
/// Missing channels, count and time mismatches, and rotation overflows
/// block export. Repeated times and bind desyncs do not.
pub fn export_gate(curve: &Curve) -> Vec<Violation> {
    scan(curve)
        .into_iter()
        .filter(|violation| violation.kind.blocks_export())
        .collect()
}

/// Splits the scene's animated curves into exportable and rejected names.
///
/// Rejected names carry their blocking violations.
pub fn partition_exportable(scene: &Scene) -> (Vec<String>, Vec<(String, Vec<Violation>)>) {
    let mut exportable = Vec::new();
    let mut rejected = Vec::new();
    for (name, curve) in &scene.curves {
        if !curve.is_animated() {
            continue;
        }
        let blocking = export_gate(curve);
        if blocking.is_empty() {
            exportable.push(name.clone());
        } else {
            rejected.push((name.clone(), blocking));
        }
    }
    (exportable, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::ViolationKind;
    use keysync_anim::{Channel, ChannelName};

    fn full_position(time: f64) -> Curve {
        Curve::new()
            .with_channel(ChannelName::LocX, Channel::constant_key(time, 0.0))
            .with_channel(ChannelName::LocY, Channel::constant_key(time, 0.0))
            .with_channel(ChannelName::LocZ, Channel::constant_key(time, 0.0))
    }

    #[test]
    fn test_consistent_curve_passes() {
        assert!(export_gate(&full_position(1.0)).is_empty());
    }

    #[test]
    fn test_partial_group_blocks() {
        let curve = Curve::new().with_channel(ChannelName::RotZ, Channel::constant_key(1.0, 0.0));
        let blocking = export_gate(&curve);
        assert_eq!(blocking.len(), 1);
        assert_eq!(blocking[0].kind, ViolationKind::MissingChannel);
    }

    #[test]
    fn test_partition() {
        let scene = Scene::new()
            .with_curve("Good", full_position(1.0))
            .with_curve(
                "Bad",
                Curve::new().with_channel(ChannelName::LocX, Channel::constant_key(1.0, 0.0)),
            )
            .with_curve("Unanimated", Curve::new());
        let (exportable, rejected) = partition_exportable(&scene);
        assert_eq!(exportable, vec!["Good".to_string()]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, "Bad");
    }
}
