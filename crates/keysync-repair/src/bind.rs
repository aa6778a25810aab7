//! Bind pose synchronization.

use keysync_anim::{radians_to_encoded, Channel, ChannelGroup, Curve, LivePose};
use keysync_lint::{bind_state, BindState};

/// Brings a live pose and its curve into agreement at `reference_frame`.
///
/// The curve wins where a keyed channel exists: the pose component is
/// overwritten with the channel's value. Empty channels are left alone. Where a channel is absent and the pose differs
/// from the group default, the channel is created with a single constant
/// key holding the pose value. Quaternion channels are left alone.
///
/// Returns the number of components corrected.
pub fn bind_sync(pose: &mut LivePose, curve: &mut Curve, reference_frame: f64) -> usize {
    let mut fixes = 0;
    for group in ChannelGroup::POSED {
        for &name in group.channels() {
            match bind_state(curve, pose, name, reference_frame) {
                Some(BindState::Mismatch { curve_value, .. }) => {
                    if let Some(component) = pose.component_mut(name) {
                        *component = curve_value;
                        fixes += 1;
                    }
                }
                Some(BindState::Unkeyed { pose_value }) => {
                    let value = if name.is_rotation() {
                        radians_to_encoded(pose_value)
                    } else {
                        pose_value
                    };
                    curve.set_channel(name, Channel::constant_key(reference_frame, value));
                    fixes += 1;
                }
                Some(BindState::InSync) | None => {}
            }
        }
    }
    fixes
}
