//! keysync Animation Curve Library
//!
//! This crate provides the data model shared by the keysync diagnostics and
//! repair crates: the thirteen fixed transform channels, the four channel
//! groups, keyframe channels with evaluation, curves (animation sets), live
//! object poses, and the JSON scene document exchanged with the authoring tool.
//!
//! # Example
//!
//! ```
//! use keysync_anim::{Channel, ChannelName, Curve, Interpolation, Keyframe};
//!
//! let mut curve = Curve::new();
//! curve.set_channel(
//!     ChannelName::LocX,
//!     Channel::from_points(
//!         Interpolation::Linear,
//!         Default::default(),
//!         vec![Keyframe::new(1.0, 0.0), Keyframe::new(3.0, 4.0)],
//!     ),
//! );
//!
//! let loc_x = curve.channel(ChannelName::LocX).unwrap();
//! assert_eq!(loc_x.evaluate(2.0), 2.0);
//! ```
//!
//! # Modules
//!
//! - [`group`]: Channel names and channel groups with their default values
//! - [`channel`]: Keyframes, interpolation/extrapolation modes, evaluation
//! - [`curve`]: Named-channel collections
//! - [`pose`]: Live object transforms and the compact angle encoding
//! - [`scene`]: The scene document (curve store plus objects)
//! - [`options`]: Persisted repair toggles
//! - [`tolerance`]: Fixed epsilon and rotation thresholds
//! - [`hash`]: Scene content hashing

pub mod channel;
pub mod curve;
pub mod error;
pub mod group;
pub mod hash;
pub mod options;
pub mod pose;
pub mod scene;
pub mod tolerance;

pub use channel::{Channel, Extrapolation, Interpolation, Keyframe};
pub use curve::{Curve, GroupPresence};
pub use error::{AnimError, AnimResult};
pub use group::{ChannelGroup, ChannelName};
pub use hash::scene_hash;
pub use options::{Options, OPTIONS_VERSION};
pub use pose::{encoded_to_radians, radians_to_encoded, reduce_radians, LivePose};
pub use scene::{Scene, SceneObject, SCENE_VERSION};
pub use tolerance::{fp_equal, EPSILON, ROTATION_BOUNDARY_STEP, SAFE_ROTATION_DELTA};
