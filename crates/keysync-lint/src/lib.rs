//! Channel-group diagnostics for keysync.
//!
//! Scans curves for the cross-channel problems that block export to the game
//! runtime: partially defined groups, channels whose keyframe times disagree,
//! repeated key times, rotation deltas beyond the safe 90 degree step, and
//! bind poses that drifted away from the curve at the reference frame.
//!
//! Diagnostics never mutate anything; the repair crate consumes the report.
//!
//! # Example
//!
//! ```
//! use keysync_anim::{Channel, ChannelName, Curve};
//! use keysync_lint::{scan, ViolationKind};
//!
//! let curve = Curve::new().with_channel(ChannelName::LocX, Channel::constant_key(1.0, 0.0));
//! let violations = scan(&curve);
//!
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].kind, ViolationKind::MissingChannel);
//! ```

pub mod export;
pub mod report;
pub mod scan;
pub mod violation;

pub use export::{export_gate, partition_exportable};
pub use report::{BindReport, CheckReport, CheckSummary, CurveReport};
pub use scan::{bind_state, scan, scan_bind, BindState, Diagnostics};
pub use violation::{Violation, ViolationDetail, ViolationKind};
