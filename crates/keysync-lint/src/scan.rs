//! The diagnostics scan.
//!
//! Groups are visited in declared order (Position, Rotation, Scale,
//! Quaternion). Within a group, the group-level check runs first, followed by
//! the repeated-time check of each present channel in declared order.

use crate::report::{BindReport, CheckReport, CurveReport};
use crate::violation::Violation;
use keysync_anim::{
    encoded_to_radians, fp_equal, reduce_radians, Channel, ChannelGroup, ChannelName, Curve,
    LivePose, Options, Scene, SAFE_ROTATION_DELTA,
};

/// Scans a curve for structural violations.
///
/// Never mutates the curve, so scanning twice yields the same list.
pub fn scan(curve: &Curve) -> Vec<Violation> {
    let mut violations = Vec::new();
    for group in ChannelGroup::ALL {
        let present = curve.present_in(group);
        if present.is_empty() {
            continue;
        }

        if present.len() < group.channels().len() {
            let names: Vec<ChannelName> = present.iter().map(|(name, _)| *name).collect();
            let absent = group
                .channels()
                .iter()
                .copied()
                .filter(|name| !names.contains(name))
                .collect();
            violations.push(Violation::missing_channel(group, names, absent));
        } else if let Some(violation) = check_complete_group(group, &present) {
            violations.push(violation);
        }

        for (name, channel) in &present {
            scan_repeats(*name, channel, &mut violations);
        }
    }
    violations
}

/// Count, simultaneity and (for rotation) overflow checks of a fully present group.
fn check_complete_group(group: ChannelGroup, present: &[(ChannelName, &Channel)]) -> Option<Violation> {
    let len = present[0].1.len();
    if present.iter().any(|(_, channel)| channel.len() != len) {
        let counts = present.iter().map(|(name, channel)| (*name, channel.len())).collect();
        return Some(Violation::count_mismatch(group, counts));
    }

    for index in 0..len {
        let first = present[0].1.points()[index].time;
        let simultaneous = present
            .iter()
            .all(|(_, channel)| fp_equal(first, channel.points()[index].time));
        if !simultaneous {
            let times = present
                .iter()
                .map(|(name, channel)| (*name, channel.points()[index].time))
                .collect();
            return Some(Violation::time_mismatch(group, index, times));
        }

        if group == ChannelGroup::Rotation && index > 0 {
            for (name, channel) in present {
                let points = channel.points();
                let delta = (points[index].value - points[index - 1].value).abs();
                if delta > SAFE_ROTATION_DELTA {
                    return Some(Violation::rotation_overflow(*name, index, delta));
                }
            }
        }
    }
    None
}

/// Reports every index `i` whose neighbors share its time, back to front.
fn scan_repeats(name: ChannelName, channel: &Channel, violations: &mut Vec<Violation>) {
    let points = channel.points();
    if points.len() < 3 {
        return;
    }
    for index in (1..points.len() - 1).rev() {
        if fp_equal(points[index + 1].time, points[index].time)
            && fp_equal(points[index].time, points[index - 1].time)
        {
            violations.push(Violation::repeated_time(name, index, points[index].time));
        }
    }
}

/// How one pose component relates to its channel at the reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindState {
    /// Pose and curve agree, the channel is present but holds no keys, or
    /// the channel is absent and the pose is default.
    InSync,
    /// The channel exists and evaluates to something else.
    Mismatch { pose_value: f64, curve_value: f64 },
    /// The channel is absent but the pose is not at the group default.
    Unkeyed { pose_value: f64 },
}

/// Compares one pose component against the curve at `reference_frame`.
///
/// Values are in pose units; rotation is compared in radians reduced into
/// [0, 2π). An empty channel constrains nothing. Returns `None` for
/// quaternion channels, which have no pose counterpart.
pub fn bind_state(
    curve: &Curve,
    pose: &LivePose,
    name: ChannelName,
    reference_frame: f64,
) -> Option<BindState> {
    let raw = pose.component(name)?;
    let pose_value = if name.is_rotation() {
        reduce_radians(raw)
    } else {
        raw
    };

    let state = match curve.channel(name) {
        Some(channel) if channel.is_empty() => BindState::InSync,
        Some(channel) => {
            let evaluated = channel.evaluate(reference_frame);
            let curve_value = if name.is_rotation() {
                reduce_radians(encoded_to_radians(evaluated))
            } else {
                evaluated
            };
            if fp_equal(pose_value, curve_value) {
                BindState::InSync
            } else {
                BindState::Mismatch {
                    pose_value,
                    curve_value,
                }
            }
        }
        None if fp_equal(pose_value, name.default_value()) => BindState::InSync,
        None => BindState::Unkeyed { pose_value },
    };
    Some(state)
}

/// Reports a bind desync for every non-quaternion component out of sync.
pub fn scan_bind(curve: &Curve, pose: &LivePose, reference_frame: f64) -> Vec<Violation> {
    let mut violations = Vec::new();
    for group in ChannelGroup::POSED {
        for &name in group.channels() {
            match bind_state(curve, pose, name, reference_frame) {
                Some(BindState::Mismatch {
                    pose_value,
                    curve_value,
                }) => violations.push(Violation::bind_desync(name, pose_value, Some(curve_value))),
                Some(BindState::Unkeyed { pose_value }) => {
                    violations.push(Violation::bind_desync(name, pose_value, None))
                }
                Some(BindState::InSync) | None => {}
            }
        }
    }
    violations
}

/// Diagnostics bound to one invocation's options.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    options: Options,
}

impl Diagnostics {
    /// Creates diagnostics for the given options.
    pub fn new(options: &Options) -> Self {
        Self { options: *options }
    }

    /// Returns the options this scan was configured with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Scans a curve for structural violations.
    pub fn scan(&self, curve: &Curve) -> Vec<Violation> {
        scan(curve)
    }

    /// Scans a pose against a curve at the configured reference frame.
    pub fn scan_bind(&self, curve: &Curve, pose: &LivePose) -> Vec<Violation> {
        scan_bind(curve, pose, self.options.reference_frame)
    }

    /// Scans every animated curve and every object bound to one.
    ///
    /// Curves without any transform channel are skipped.
    pub fn check_scene(&self, scene: &Scene) -> CheckReport {
        let mut report = CheckReport::new();
        for (name, curve) in &scene.curves {
            if !curve.is_animated() {
                continue;
            }
            report.add_curve(CurveReport::new(name.clone(), self.scan(curve)));
        }

        for object in &scene.objects {
            let Some(curve_name) = object.curve.as_deref() else {
                continue;
            };
            let Some(curve) = scene.curves.get(curve_name) else {
                continue;
            };
            if !curve.is_animated() {
                continue;
            }
            report.add_bind(BindReport::new(
                object.name.clone(),
                curve_name.to_string(),
                self.scan_bind(curve, &object.pose),
            ));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::{ViolationDetail, ViolationKind};
    use keysync_anim::{Extrapolation, Interpolation, Keyframe, SceneObject};
    use pretty_assertions::assert_eq;

    fn linear(points: &[(f64, f64)]) -> Channel {
        Channel::from_points(
            Interpolation::Linear,
            Extrapolation::Constant,
            points.iter().map(|&(t, v)| Keyframe::new(t, v)),
        )
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_empty_curve_is_clean() {
        assert!(scan(&Curve::new()).is_empty());
    }

    #[test]
    fn test_missing_channel_lists_present_and_absent() {
        let curve = Curve::new().with_channel(
            ChannelName::LocX,
            linear(&[(0.0, 2.0), (1.0, 2.0), (2.0, 2.0)]),
        );
        let violations = scan(&curve);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].detail,
            ViolationDetail::Presence {
                present: vec![ChannelName::LocX],
                absent: vec![ChannelName::LocY, ChannelName::LocZ],
            }
        );
    }

    #[test]
    fn test_count_mismatch() {
        let curve = Curve::new()
            .with_channel(ChannelName::ScaleX, linear(&[(0.0, 1.0), (1.0, 1.0)]))
            .with_channel(ChannelName::ScaleY, linear(&[(0.0, 1.0)]))
            .with_channel(ChannelName::ScaleZ, linear(&[(0.0, 1.0), (1.0, 1.0)]));
        let violations = scan(&curve);
        assert_eq!(kinds(&violations), vec![ViolationKind::CountMismatch]);
        assert_eq!(violations[0].group, ChannelGroup::Scale);
    }

    #[test]
    fn test_first_time_mismatch_wins() {
        let curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]))
            .with_channel(ChannelName::LocY, linear(&[(0.0, 0.0), (1.5, 0.0), (2.5, 0.0)]))
            .with_channel(ChannelName::LocZ, linear(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        let violations = scan(&curve);
        assert_eq!(kinds(&violations), vec![ViolationKind::TimeMismatch]);
        match &violations[0].detail {
            ViolationDetail::Times { index, .. } => assert_eq!(*index, 1),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_times_within_epsilon_are_simultaneous() {
        let curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (1.0, 0.0)]))
            .with_channel(ChannelName::LocY, linear(&[(0.0, 0.0), (1.0000005, 0.0)]))
            .with_channel(ChannelName::LocZ, linear(&[(0.0, 0.0), (1.0, 0.0)]));
        assert!(scan(&curve).is_empty());
    }

    #[test]
    fn test_rotation_overflow() {
        let curve = Curve::new()
            .with_channel(ChannelName::RotX, linear(&[(1.0, 0.0), (2.0, 12.0)]))
            .with_channel(ChannelName::RotY, linear(&[(1.0, 0.0), (2.0, 0.0)]))
            .with_channel(ChannelName::RotZ, linear(&[(1.0, 0.0), (2.0, 0.0)]));
        let violations = scan(&curve);
        assert_eq!(kinds(&violations), vec![ViolationKind::RotationOverflow]);
        assert_eq!(
            violations[0].detail,
            ViolationDetail::Overflow {
                channel: ChannelName::RotX,
                index: 1,
                delta: 12.0,
            }
        );
    }

    #[test]
    fn test_rotation_at_threshold_is_safe() {
        let curve = Curve::new()
            .with_channel(ChannelName::RotX, linear(&[(1.0, 0.0), (2.0, 9.0)]))
            .with_channel(ChannelName::RotY, linear(&[(1.0, 0.0), (2.0, -9.0)]))
            .with_channel(ChannelName::RotZ, linear(&[(1.0, 0.0), (2.0, 0.0)]));
        assert!(scan(&curve).is_empty());
    }

    #[test]
    fn test_quaternion_has_no_overflow_check() {
        let curve = Curve::new()
            .with_channel(ChannelName::QuatW, linear(&[(1.0, 0.0), (2.0, 50.0)]))
            .with_channel(ChannelName::QuatX, linear(&[(1.0, 0.0), (2.0, 0.0)]))
            .with_channel(ChannelName::QuatY, linear(&[(1.0, 0.0), (2.0, 0.0)]))
            .with_channel(ChannelName::QuatZ, linear(&[(1.0, 0.0), (2.0, 0.0)]));
        assert!(scan(&curve).is_empty());
    }

    #[test]
    fn test_repeated_times_back_to_front() {
        let curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(1.0, 0.0), (1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]))
            .with_channel(ChannelName::LocY, linear(&[(1.0, 0.0)]))
            .with_channel(ChannelName::LocZ, linear(&[(1.0, 0.0)]));
        let violations = scan(&curve);
        assert_eq!(
            kinds(&violations),
            vec![
                ViolationKind::CountMismatch,
                ViolationKind::RepeatedTime,
                ViolationKind::RepeatedTime,
            ]
        );
        let indices: Vec<usize> = violations
            .iter()
            .filter_map(|v| match v.detail {
                ViolationDetail::Repeat { index, .. } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![2, 1]);
    }

    #[test]
    fn test_repeats_reported_for_partial_group() {
        let curve = Curve::new().with_channel(
            ChannelName::ScaleZ,
            linear(&[(0.0, 1.0), (0.0, 1.0), (0.0, 1.0)]),
        );
        assert_eq!(
            kinds(&scan(&curve)),
            vec![ViolationKind::MissingChannel, ViolationKind::RepeatedTime]
        );
    }

    #[test]
    fn test_scan_is_deterministic() {
        let curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]))
            .with_channel(ChannelName::RotZ, linear(&[(0.0, 0.0), (1.0, 20.0)]));
        assert_eq!(scan(&curve), scan(&curve));
    }

    #[test]
    fn test_bind_state_position() {
        let curve = Curve::new().with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (2.0, 4.0)]));
        let mut pose = LivePose::default();
        pose.position = [2.0, 0.0, 3.0];

        assert_eq!(
            bind_state(&curve, &pose, ChannelName::LocX, 1.0),
            Some(BindState::InSync)
        );
        assert_eq!(
            bind_state(&curve, &pose, ChannelName::LocY, 1.0),
            Some(BindState::InSync)
        );
        assert_eq!(
            bind_state(&curve, &pose, ChannelName::LocZ, 1.0),
            Some(BindState::Unkeyed { pose_value: 3.0 })
        );
        assert_eq!(bind_state(&curve, &pose, ChannelName::QuatW, 1.0), None);
    }

    #[test]
    fn test_bind_state_rotation_wraps() {
        // 36.0 encodes 360 degrees, which reduces to zero.
        let curve = Curve::new().with_channel(ChannelName::RotX, Channel::constant_key(1.0, 36.0));
        let pose = LivePose::default();
        assert_eq!(
            bind_state(&curve, &pose, ChannelName::RotX, 1.0),
            Some(BindState::InSync)
        );

        let curve = Curve::new().with_channel(ChannelName::RotY, Channel::constant_key(1.0, 9.0));
        match bind_state(&curve, &pose, ChannelName::RotY, 1.0) {
            Some(BindState::Mismatch { pose_value, curve_value }) => {
                assert_eq!(pose_value, 0.0);
                assert!((curve_value - std::f64::consts::FRAC_PI_2).abs() < 1e-5);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_empty_channel_is_in_sync() {
        let curve = Curve::new().with_channel(ChannelName::ScaleX, linear(&[]));
        let mut pose = LivePose::default();
        pose.scale[0] = 2.0;
        assert_eq!(
            bind_state(&curve, &pose, ChannelName::ScaleX, 1.0),
            Some(BindState::InSync)
        );
        assert!(scan_bind(&curve, &pose, 1.0).is_empty());
    }

    #[test]
    fn test_scan_bind_default_scale() {
        let curve = Curve::new().with_channel(ChannelName::LocX, Channel::constant_key(1.0, 0.0));
        let mut pose = LivePose::default();
        pose.scale[1] = 2.0;
        let violations = scan_bind(&curve, &pose, 1.0);
        assert_eq!(violations, vec![Violation::bind_desync(ChannelName::ScaleY, 2.0, None)]);
    }

    #[test]
    fn test_check_scene() {
        let scene = Scene::new()
            .with_curve(
                "Broken",
                Curve::new().with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (2.0, 4.0)])),
            )
            .with_curve("Still", Curve::new())
            .with_object(SceneObject::new("Cube").with_curve("Broken"))
            .with_object(SceneObject::new("Empty").with_curve("Still"))
            .with_object(SceneObject::new("Lamp"));

        let report = Diagnostics::new(&Options::default()).check_scene(&scene);
        assert!(!report.ok);
        assert_eq!(report.curves.len(), 1);
        assert_eq!(report.curves[0].curve, "Broken");
        assert_eq!(report.binds.len(), 1);
        assert_eq!(report.binds[0].object, "Cube");
        // LocX evaluates to 2.0 at frame 1 while the pose sits at the origin.
        assert_eq!(report.summary.bind_desyncs, 1);
    }
}
