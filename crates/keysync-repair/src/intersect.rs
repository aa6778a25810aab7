//! Simultaneity by removal: keep only key times shared by the whole group.

use keysync_anim::{fp_equal, ChannelGroup, Curve};

/// Makes a group complete and simultaneous by removing keys.
///
/// A partial group, or a complete group whose channels share no key time,
/// is dropped entirely; dropping a channel counts its keys plus one.
/// Otherwise every key whose time is not shared by all channels is deleted,
/// counting one per key. The group is staged and committed as a whole.
pub fn intersection_trim_group(curve: &mut Curve, group: ChannelGroup) -> usize {
    let present = curve.present_in(group);
    if present.is_empty() {
        return 0;
    }

    let intersection: Vec<f64> = if present.len() < group.channels().len() {
        Vec::new()
    } else {
        let mut times = present[0].1.times();
        times.dedup_by(|later, kept| fp_equal(*kept, *later));
        times.retain(|&time| present.iter().all(|(_, channel)| channel.has_time(time)));
        times
    };

    if intersection.is_empty() {
        let dropped: Vec<_> = present
            .iter()
            .map(|(name, channel)| (*name, channel.len()))
            .collect();
        let mut fixes = 0;
        for (name, len) in dropped {
            curve.remove_channel(name);
            fixes += len + 1;
        }
        return fixes;
    }

    let mut staged = Vec::new();
    for (name, channel) in &present {
        let doomed: Vec<usize> = channel
            .points()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, point)| !intersection.iter().any(|&time| fp_equal(time, point.time)))
            .map(|(index, _)| index)
            .collect();
        if doomed.is_empty() {
            continue;
        }
        let mut trimmed = (*channel).clone();
        for index in &doomed {
            trimmed.remove(*index);
        }
        staged.push((*name, trimmed, doomed.len()));
    }

    let mut fixes = 0;
    for (name, channel, removed) in staged {
        curve.set_channel(name, channel);
        fixes += removed;
    }
    fixes
}

/// Runs [`intersection_trim_group`] over each of `groups`.
pub fn intersection_trim(curve: &mut Curve, groups: &[ChannelGroup]) -> usize {
    groups
        .iter()
        .map(|&group| intersection_trim_group(curve, group))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysync_anim::{Channel, ChannelName, Extrapolation, Interpolation, Keyframe};
    use pretty_assertions::assert_eq;

    fn linear(points: &[(f64, f64)]) -> Channel {
        Channel::from_points(
            Interpolation::Linear,
            Extrapolation::Constant,
            points.iter().map(|&(t, v)| Keyframe::new(t, v)),
        )
    }

    #[test]
    fn test_partial_group_dropped() {
        let mut curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]))
            .with_channel(ChannelName::RotX, linear(&[(0.0, 0.0)]))
            .with_channel(ChannelName::RotY, linear(&[(0.0, 0.0)]))
            .with_channel(ChannelName::RotZ, linear(&[(0.0, 0.0)]));
        assert_eq!(intersection_trim_group(&mut curve, ChannelGroup::Position), 4);
        assert!(!curve.has_channel(ChannelName::LocX));
        assert!(curve.has_channel(ChannelName::RotX));
    }

    #[test]
    fn test_trims_to_shared_times() {
        let mut curve = Curve::new()
            .with_channel(ChannelName::ScaleX, linear(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]))
            .with_channel(ChannelName::ScaleY, linear(&[(0.0, 1.0), (2.0, 1.0), (3.0, 1.0)]))
            .with_channel(ChannelName::ScaleZ, linear(&[(0.0, 1.0), (1.0, 1.0), (3.0, 1.0)]));
        assert_eq!(intersection_trim_group(&mut curve, ChannelGroup::Scale), 4);
        for name in [ChannelName::ScaleX, ChannelName::ScaleY, ChannelName::ScaleZ] {
            assert_eq!(curve.channel(name).unwrap().times(), vec![0.0, 3.0]);
        }
    }

    #[test]
    fn test_disjoint_group_dropped() {
        let mut curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0)]))
            .with_channel(ChannelName::LocY, linear(&[(1.0, 0.0)]))
            .with_channel(ChannelName::LocZ, linear(&[(2.0, 0.0), (3.0, 0.0)]));
        assert_eq!(intersection_trim_group(&mut curve, ChannelGroup::Position), 7);
        assert!(!curve.is_animated());
    }

    #[test]
    fn test_idempotent() {
        let mut curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0), (1.0, 1.0)]))
            .with_channel(ChannelName::LocY, linear(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]))
            .with_channel(ChannelName::LocZ, linear(&[(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(intersection_trim(&mut curve, &ChannelGroup::ALL), 1);
        assert_eq!(intersection_trim(&mut curve, &ChannelGroup::ALL), 0);
    }

    #[test]
    fn test_only_listed_groups_trimmed() {
        let mut curve = Curve::new()
            .with_channel(ChannelName::LocX, linear(&[(0.0, 0.0)]))
            .with_channel(ChannelName::ScaleX, linear(&[(0.0, 1.0)]));
        assert_eq!(intersection_trim(&mut curve, &[ChannelGroup::Scale]), 2);
        assert!(curve.has_channel(ChannelName::LocX));
        assert!(!curve.has_channel(ChannelName::ScaleX));
    }
}
