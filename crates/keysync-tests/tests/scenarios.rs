//! Hand-built repair scenarios with exact expected outcomes.

use pretty_assertions::assert_eq;

use keysync_anim::{ChannelGroup, ChannelName, Curve, LivePose, Options, Scene, SceneObject};
use keysync_lint::{scan, Diagnostics, ViolationDetail, ViolationKind};
use keysync_repair::{RepairEngine, RepairOp, RepairPlan, Session, SessionState};
use keysync_tests::fixtures::{linear, stepped};

fn kinds(curve: &Curve) -> Vec<ViolationKind> {
    scan(curve).into_iter().map(|v| v.kind).collect()
}

/// Position group with only LocX keyed; the object sits at (2, 0, 0).
fn missing_channels_scene() -> Scene {
    let curve = Curve::new().with_channel(
        ChannelName::LocX,
        linear(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]),
    );
    let pose = LivePose {
        position: [2.0, 0.0, 0.0],
        ..LivePose::default()
    };
    Scene::new()
        .with_curve("Walk", curve)
        .with_object(SceneObject::new("Hero").with_curve("Walk").with_pose(pose))
}

#[test]
fn scenario_union_creates_missing_channels() {
    let mut scene = missing_channels_scene();
    let options = Options::default();

    let violations = scan(scene.curve("Walk").unwrap());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::MissingChannel);
    assert_eq!(
        violations[0].detail,
        ViolationDetail::Presence {
            present: vec![ChannelName::LocX],
            absent: vec![ChannelName::LocY, ChannelName::LocZ],
        }
    );

    // The pose already matches LocX at frame 1.
    let report = Diagnostics::new(&options).check_scene(&scene);
    assert!(report.binds.is_empty());

    let engine = RepairEngine::new(&options);
    let curve = scene.curve_mut("Walk").unwrap();
    assert_eq!(engine.union_merge(curve, &ChannelGroup::ALL), 8);

    for name in [ChannelName::LocY, ChannelName::LocZ] {
        let channel = curve.channel(name).unwrap();
        assert_eq!(channel.times(), vec![0.0, 1.0, 2.0]);
        assert!(channel.points().iter().all(|p| p.value == 0.0));
    }
    assert!(kinds(curve).is_empty());
}

#[test]
fn scenario_overflow_split_at_boundary() {
    let mut curve = Curve::new()
        .with_channel(ChannelName::RotX, linear(&[(1.0, 0.0), (2.0, 12.0)]))
        .with_channel(ChannelName::RotY, linear(&[(1.0, 0.0), (2.0, 0.0)]))
        .with_channel(ChannelName::RotZ, linear(&[(1.0, 0.0), (2.0, 0.0)]));
    assert_eq!(kinds(&curve), vec![ViolationKind::RotationOverflow]);

    let engine = RepairEngine::new(&Options::default());
    assert_eq!(engine.overflow_split(&mut curve), 1);

    let points = curve.channel(ChannelName::RotX).unwrap().points();
    assert_eq!(points.len(), 3);
    assert!((points[1].time - 1.75).abs() < 1e-9);
    assert_eq!(points[1].value, 9.0);
    assert_eq!(points[1].value - points[0].value, 9.0);
    assert_eq!(points[2].value - points[1].value, 3.0);

    // The split channel is now out of step with RotY and RotZ.
    assert_eq!(kinds(&curve), vec![ViolationKind::CountMismatch]);
    assert_eq!(engine.union_merge(&mut curve, &ChannelGroup::ALL), 2);
    assert!(kinds(&curve).is_empty());
}

#[test]
fn scenario_collapse_triple() {
    let mut curve = Curve::new().with_channel(
        ChannelName::LocX,
        linear(&[(1.0, 0.0), (1.0, 1.0), (1.0, 2.0)]),
    );
    let repeats: Vec<_> = scan(&curve)
        .into_iter()
        .filter(|v| v.kind == ViolationKind::RepeatedTime)
        .collect();
    assert_eq!(repeats.len(), 1);

    let engine = RepairEngine::new(&Options::default());
    assert_eq!(engine.collapse_duplicates(&mut curve), 1);

    let channel = curve.channel(ChannelName::LocX).unwrap();
    assert_eq!(channel.times(), vec![1.0, 1.0]);
    assert!(!kinds(&curve).contains(&ViolationKind::RepeatedTime));
}

#[test]
fn scenario_collapsed_triple_settles_with_siblings() {
    let curve = Curve::new()
        .with_channel(ChannelName::LocX, linear(&[(1.0, 0.0), (1.0, 1.0), (1.0, 2.0)]))
        .with_channel(ChannelName::LocY, linear(&[(1.0, 3.0)]))
        .with_channel(ChannelName::LocZ, linear(&[(1.0, 0.0)]));
    let mut scene = Scene::new().with_curve("Hop", curve);
    let options = Options::default();

    let mut session =
        Session::start(&options, RepairPlan::from_options(["Hop"], &options), &scene).unwrap();
    assert_eq!(session.run(&mut scene).unwrap(), SessionState::Clean);

    let counts = session.summary().curves[0].counts;
    assert_eq!(counts.repeat, 1);
    // LocY and LocZ each gain a second key at t=1.
    assert_eq!(counts.union, 2);

    let curve = scene.curve("Hop").unwrap();
    assert!(scan(curve).is_empty());
    for name in [ChannelName::LocX, ChannelName::LocY, ChannelName::LocZ] {
        assert_eq!(curve.channel(name).unwrap().times(), vec![1.0, 1.0]);
    }
}

#[test]
fn scenario_session_repairs_mixed_curve() {
    let curve = Curve::new()
        .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (4.0, 4.0)]))
        .with_channel(ChannelName::LocY, linear(&[(0.0, 0.0), (2.0, 1.0), (4.0, 0.0)]))
        .with_channel(ChannelName::RotZ, linear(&[(0.0, 0.0), (4.0, 20.0)]))
        .with_channel(ChannelName::ScaleX, stepped(&[(0.0, 1.0), (4.0, 2.0)]));
    let mut scene = Scene::new().with_curve("Jump", curve);
    let options = Options::default();

    let plan = RepairPlan::from_options(["Jump"], &options);
    assert_eq!(plan.ops(), &[RepairOp::Repeat, RepairOp::Overflow, RepairOp::Union]);

    let mut session = Session::start(&options, plan, &scene).unwrap();
    assert!(session.violations() > 0);
    let state = session.run(&mut scene).unwrap();
    assert_eq!(state, SessionState::Clean);
    assert_eq!(session.passes().len(), 1);

    let curve = scene.curve("Jump").unwrap();
    assert!(scan(curve).is_empty());
    for group in [ChannelGroup::Position, ChannelGroup::Rotation, ChannelGroup::Scale] {
        let present = curve.present_in(group);
        assert_eq!(present.len(), 3);
        let times = present[0].1.times();
        assert!(present.iter().all(|(_, channel)| channel.times() == times));
    }
}

#[test]
fn scenario_intersection_drops_partial_group() {
    let mut curve = Curve::new()
        .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (1.0, 1.0)]))
        .with_channel(ChannelName::ScaleX, linear(&[(0.0, 1.0), (2.0, 1.0)]))
        .with_channel(ChannelName::ScaleY, linear(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]))
        .with_channel(ChannelName::ScaleZ, linear(&[(0.0, 1.0), (2.0, 3.0)]));

    let engine = RepairEngine::new(&Options::default());
    // LocX dropped (2 keys + 1), ScaleY loses its middle key.
    assert_eq!(engine.intersection_trim(&mut curve, &ChannelGroup::ALL), 4);
    assert!(!curve.has_channel(ChannelName::LocX));
    assert_eq!(curve.channel(ChannelName::ScaleY).unwrap().times(), vec![0.0, 2.0]);
    assert!(kinds(&curve).is_empty());
}
