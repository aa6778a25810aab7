//! Repair engine for keysync.
//!
//! Restores the channel-group invariants reported by `keysync-lint`:
//!
//! - [`collapse`]: removes the middle key of repeated-time triples
//! - [`overflow`]: subdivides rotation segments wider than 90 degrees
//! - [`union`]: completes groups and aligns key times by adding keys
//! - [`intersect`]: aligns key times by removing keys, dropping partial groups
//! - [`bind`]: brings live poses and curves into agreement at the reference frame
//!
//! Every operation returns a modification count and is a no-op on input that
//! already satisfies its invariant. [`RepairEngine::apply`] runs a
//! [`RepairPlan`] once; a [`Session`] repeats passes until the selection is
//! clean.
//!
//! # Example
//!
//! ```
//! use keysync_anim::{Channel, ChannelName, Curve, Options, Scene};
//! use keysync_repair::{RepairPlan, Session, SessionState};
//!
//! let mut scene = Scene::new().with_curve(
//!     "Walk",
//!     Curve::new().with_channel(ChannelName::LocX, Channel::constant_key(0.0, 2.0)),
//! );
//! let options = Options::default();
//! let plan = RepairPlan::from_options(["Walk"], &options);
//!
//! let mut session = Session::start(&options, plan, &scene).unwrap();
//! assert_eq!(session.run(&mut scene).unwrap(), SessionState::Clean);
//! assert!(scene.curve("Walk").unwrap().has_channel(ChannelName::LocY));
//! ```

pub mod bind;
pub mod collapse;
pub mod engine;
pub mod error;
pub mod intersect;
pub mod overflow;
pub mod plan;
pub mod root;
pub mod session;
pub mod summary;
pub mod union;

pub use engine::RepairEngine;
pub use error::{RepairError, RepairResult};
pub use plan::{RepairOp, RepairPlan};
pub use root::{find_time, ROOT_ITERATIONS};
pub use session::{PassRecord, Session, SessionState};
pub use summary::{CurveRepair, OpCounts, RepairSummary};
