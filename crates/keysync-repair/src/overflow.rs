//! Rotation overflow subdivision.

use crate::root::find_time;
use keysync_anim::{
    fp_equal, Channel, ChannelGroup, Curve, Keyframe, ROTATION_BOUNDARY_STEP, SAFE_ROTATION_DELTA,
};

/// Boundary values strictly between `from` and `to`, ordered from `from`.
///
/// Boundaries are the multiples of [`ROTATION_BOUNDARY_STEP`] (90 degrees in
/// the encoded unit).
pub(crate) fn boundary_values(from: f64, to: f64) -> Vec<f64> {
    let step = ROTATION_BOUNDARY_STEP;
    let (first, last, direction) = if from <= to {
        (
            ((from / step).floor() + 1.0) * step,
            ((to / step).ceil() - 1.0) * step,
            1.0,
        )
    } else {
        (
            ((from / step).ceil() - 1.0) * step,
            ((to / step).floor() + 1.0) * step,
            -1.0,
        )
    };
    if (last - first) * direction < 0.0 {
        return Vec::new();
    }
    let count = ((last - first).abs() / step).round() as usize + 1;
    (0..count)
        .map(|j| first + direction * step * j as f64)
        .collect()
}

/// Subdivides every segment whose value delta exceeds the safe threshold.
///
/// Each boundary crossing gets a key at the time the channel reaches the
/// boundary value. Crossings are located on the unmodified channel and
/// inserted afterwards, so the channel's shape is preserved. A crossing that
/// lands on a segment endpoint is skipped; this is always the case for
/// constant interpolation, which never passes through the boundary.
///
/// Returns the number of keys inserted.
pub fn split_channel(channel: &mut Channel) -> usize {
    if channel.len() < 2 {
        return 0;
    }

    let snapshot = channel.clone();
    let points = snapshot.points();
    let mut inserts = Vec::new();
    for index in (0..points.len() - 1).rev() {
        let (start, end) = (points[index], points[index + 1]);
        if (end.value - start.value).abs() <= SAFE_ROTATION_DELTA {
            continue;
        }
        for value in boundary_values(start.value, end.value) {
            let time = find_time(&snapshot, value, start.time, end.time);
            if fp_equal(time, start.time) || fp_equal(time, end.time) {
                continue;
            }
            inserts.push(Keyframe::new(time, value));
        }
    }

    for key in &inserts {
        channel.insert(*key);
    }
    inserts.len()
}

/// Runs [`split_channel`] over every present rotation channel.
///
/// Quaternion channels are not checked.
pub fn overflow_split(curve: &mut Curve) -> usize {
    let mut fixes = 0;
    for &name in ChannelGroup::Rotation.channels() {
        if let Some(channel) = curve.channel_mut(name) {
            fixes += split_channel(channel);
        }
    }
    fixes
}
