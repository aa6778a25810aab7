//! Simultaneity by addition: every channel of a group gets every key time.

use keysync_anim::{
    fp_equal, Channel, ChannelGroup, Curve, Extrapolation, Interpolation, Keyframe,
};

/// Sorted union of key times, merged within epsilon.
///
/// Each time carries the largest number of keys any one channel holds
/// there, so a repeated pair in one channel is mirrored in its siblings.
pub(crate) fn union_times<'a>(
    channels: impl IntoIterator<Item = &'a Channel>,
) -> Vec<(f64, usize)> {
    let mut runs: Vec<(f64, usize)> = channels.into_iter().flat_map(key_runs).collect();
    runs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, usize)> = Vec::with_capacity(runs.len());
    for (time, count) in runs {
        match merged.last_mut() {
            Some((kept, most)) if fp_equal(*kept, time) => *most = (*most).max(count),
            _ => merged.push((time, count)),
        }
    }
    merged
}

/// Consecutive keys of one channel grouped by time.
fn key_runs(channel: &Channel) -> Vec<(f64, usize)> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for point in channel.points() {
        match runs.last_mut() {
            Some((time, count)) if fp_equal(*time, point.time) => *count += 1,
            _ => runs.push((point.time, 1)),
        }
    }
    runs
}

/// Makes a group complete and simultaneous by adding keys.
///
/// Absent channels are created holding the group default at every union
/// time; present but empty channels are seeded the same way. Other present
/// channels get a key, valued by their own interpolation, wherever they hold
/// fewer keys at a union time than the union does. No key is ever removed.
/// The group is staged and committed as a whole.
///
/// Counts one per created channel, one per synthesized key and one per
/// inserted key.
pub fn union_merge_group(curve: &mut Curve, group: ChannelGroup) -> usize {
    let union = union_times(curve.present_in(group).into_iter().map(|(_, channel)| channel));
    if union.is_empty() {
        return 0;
    }

    let mut fixes = 0;
    let mut staged = Vec::new();
    for (&name, &default) in group.channels().iter().zip(group.defaults()) {
        let existing = curve.channel(name);
        let mut merged = match existing {
            Some(channel) => channel.clone(),
            None => {
                fixes += 1;
                Channel::from_points(
                    Interpolation::Constant,
                    Extrapolation::Constant,
                    std::iter::empty(),
                )
            }
        };
        // Sampled from the channel as it was before any insertion.
        let source = existing.filter(|channel| !channel.is_empty());

        let mut inserted = 0;
        for &(time, most) in &union {
            let have = merged.keys_at(time);
            if have >= most {
                continue;
            }
            let value = source.map_or(default, |channel| channel.evaluate(time));
            for _ in have..most {
                merged.insert(Keyframe::new(time, value));
                inserted += 1;
            }
        }
        if inserted == 0 {
            continue;
        }
        fixes += inserted;
        staged.push((name, merged));
    }

    for (name, channel) in staged {
        curve.set_channel(name, channel);
    }
    fixes
}

/// Runs [`union_merge_group`] over each of `groups`.
pub fn union_merge(curve: &mut Curve, groups: &[ChannelGroup]) -> usize {
    groups
        .iter()
        .map(|&group| union_merge_group(curve, group))
        .sum()
}
