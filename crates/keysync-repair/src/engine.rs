//! The repair engine.

use crate::bind::bind_sync;
use crate::collapse::collapse_duplicates;
use crate::error::RepairResult;
use crate::intersect::intersection_trim;
use crate::overflow::overflow_split;
use crate::plan::{RepairOp, RepairPlan};
use crate::summary::{OpCounts, RepairSummary};
use crate::union::union_merge;
use keysync_anim::{ChannelGroup, Curve, LivePose, Options, Scene};

/// Applies repairs with one invocation's options.
#[derive(Debug, Clone, Copy)]
pub struct RepairEngine {
    options: Options,
}

impl RepairEngine {
    /// Creates an engine for the given options.
    pub fn new(options: &Options) -> Self {
        Self { options: *options }
    }

    /// Returns the options this engine was configured with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Collapses repeated key times in every channel.
    pub fn collapse_duplicates(&self, curve: &mut Curve) -> usize {
        collapse_duplicates(curve)
    }

    /// Completes each of `groups` by adding keys.
    pub fn union_merge(&self, curve: &mut Curve, groups: &[ChannelGroup]) -> usize {
        union_merge(curve, groups)
    }

    /// Completes each of `groups` by removing keys or whole channels.
    pub fn intersection_trim(&self, curve: &mut Curve, groups: &[ChannelGroup]) -> usize {
        intersection_trim(curve, groups)
    }

    /// Subdivides rotation overflows.
    pub fn overflow_split(&self, curve: &mut Curve) -> usize {
        overflow_split(curve)
    }

    /// Synchronizes a pose with its curve at the configured reference frame.
    pub fn bind_sync(&self, pose: &mut LivePose, curve: &mut Curve) -> usize {
        bind_sync(pose, curve, self.options.reference_frame)
    }

    /// Runs one keyframe-level operation on a curve.
    ///
    /// Group-level operations only visit `groups`. [`RepairOp::Bind`] needs
    /// a pose and is a no-op here.
    pub fn run(&self, op: RepairOp, curve: &mut Curve, groups: &[ChannelGroup]) -> usize {
        match op {
            RepairOp::Repeat => self.collapse_duplicates(curve),
            RepairOp::Overflow => self.overflow_split(curve),
            RepairOp::Union => self.union_merge(curve, groups),
            RepairOp::Intersect => self.intersection_trim(curve, groups),
            RepairOp::Bind => 0,
        }
    }

    /// Applies a plan to the scene once.
    ///
    /// Every selected curve is checked before anything is touched. Bind sync
    /// runs last, once per object referencing the curve.
    pub fn apply(&self, scene: &mut Scene, plan: &RepairPlan) -> RepairResult<RepairSummary> {
        plan.validate(scene)?;

        let mut summary = RepairSummary::default();
        for name in plan.curves() {
            let mut counts = OpCounts::default();
            {
                let curve = scene.curve_mut(name)?;
                for &op in plan.ops() {
                    counts.record(op, self.run(op, curve, plan.groups()));
                }
            }

            if plan.runs(RepairOp::Bind) {
                let objects: Vec<String> = scene
                    .objects_using(name)
                    .map(|object| object.name.clone())
                    .collect();
                for object in objects {
                    if let Some((pose, curve)) = scene.bind_pair_mut(&object)? {
                        counts.record(RepairOp::Bind, self.bind_sync(pose, curve));
                    }
                }
            }
            summary.add(name, counts);
        }
        Ok(summary)
    }
}
