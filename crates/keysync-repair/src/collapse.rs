//! Repeated-time removal.

use keysync_anim::{fp_equal, Channel, Curve};

/// Deletes the middle key of every run of three keys sharing one time.
///
/// Walks from the second-to-last key toward index 1, so a deletion never
/// shifts a key that is still to be visited. A run of `n` keys at one time
/// keeps its first and last key. Returns the number of keys deleted.
pub fn collapse_channel(channel: &mut Channel) -> usize {
    if channel.len() < 3 {
        return 0;
    }
    let mut fixes = 0;
    for index in (1..channel.len() - 1).rev() {
        let points = channel.points();
        if fp_equal(points[index + 1].time, points[index].time)
            && fp_equal(points[index].time, points[index - 1].time)
        {
            channel.remove(index);
            fixes += 1;
        }
    }
    fixes
}

/// Runs [`collapse_channel`] over every channel of the curve.
pub fn collapse_duplicates(curve: &mut Curve) -> usize {
    let names: Vec<_> = curve.channels().map(|(name, _)| name).collect();
    let mut fixes = 0;
    for name in names {
        if let Some(channel) = curve.channel_mut(name) {
            fixes += collapse_channel(channel);
        }
    }
    fixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysync_anim::{ChannelName, Extrapolation, Interpolation, Keyframe};
    use pretty_assertions::assert_eq;

    fn channel(points: &[(f64, f64)]) -> Channel {
        Channel::from_points(
            Interpolation::Linear,
            Extrapolation::Constant,
            points.iter().map(|&(t, v)| Keyframe::new(t, v)),
        )
    }

    #[test]
    fn test_triple_loses_middle() {
        let mut ch = channel(&[(1.0, 0.0), (1.0, 5.0), (1.0, 9.0)]);
        assert_eq!(collapse_channel(&mut ch), 1);
        assert_eq!(ch.points(), &[Keyframe::new(1.0, 0.0), Keyframe::new(1.0, 9.0)]);
    }

    #[test]
    fn test_long_run_keeps_ends() {
        let mut ch = channel(&[(0.0, 0.0), (2.0, 1.0), (2.0, 2.0), (2.0, 3.0), (2.0, 4.0), (3.0, 0.0)]);
        assert_eq!(collapse_channel(&mut ch), 2);
        assert_eq!(ch.times(), vec![0.0, 2.0, 2.0, 3.0]);
        assert_eq!(ch.points()[1].value, 1.0);
        assert_eq!(ch.points()[2].value, 4.0);
    }

    #[test]
    fn test_pairs_are_kept() {
        let mut ch = channel(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)]);
        assert_eq!(collapse_channel(&mut ch), 0);
        assert_eq!(ch.len(), 4);
    }

    #[test]
    fn test_idempotent() {
        let mut curve = Curve::new()
            .with_channel(ChannelName::LocX, channel(&[(1.0, 0.0), (1.0, 0.0), (1.0, 0.0)]))
            .with_channel(ChannelName::QuatW, channel(&[(4.0, 1.0), (4.0, 1.0), (4.0, 1.0), (5.0, 1.0)]));
        assert_eq!(collapse_duplicates(&mut curve), 2);
        assert_eq!(collapse_duplicates(&mut curve), 0);
    }
}
