//! Operator selections: which repairs to run on which curves.

use crate::error::{RepairError, RepairResult};
use keysync_anim::{ChannelGroup, Options, Scene};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A repair operation. Variants are declared in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairOp {
    /// Collapse repeated key times.
    Repeat,
    /// Subdivide rotation overflows.
    Overflow,
    /// Union merge every group.
    Union,
    /// Intersection trim every group.
    Intersect,
    /// Synchronize bind poses.
    Bind,
}

impl RepairOp {
    /// All operations in application order.
    pub const ALL: [RepairOp; 5] = [
        RepairOp::Repeat,
        RepairOp::Overflow,
        RepairOp::Union,
        RepairOp::Intersect,
        RepairOp::Bind,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairOp::Repeat => "repeat",
            RepairOp::Overflow => "overflow",
            RepairOp::Union => "union",
            RepairOp::Intersect => "intersect",
            RepairOp::Bind => "bind",
        }
    }

    /// Returns true if the options enable this operation.
    pub fn enabled_by(&self, options: &Options) -> bool {
        match self {
            RepairOp::Repeat => options.repeat_removal,
            RepairOp::Overflow => options.overflow_split,
            RepairOp::Union => options.union_merge,
            RepairOp::Intersect => options.intersection_trim,
            RepairOp::Bind => options.bind_sync,
        }
    }
}

impl fmt::Display for RepairOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairOp {
    type Err = RepairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepairOp::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RepairError::UnknownOperation(s.to_string()))
    }
}

/// The curves selected for repair and the operations to run on them.
///
/// Union merge and intersection trim only touch the plan's groups, which
/// default to all four.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairPlan {
    curves: Vec<String>,
    ops: Vec<RepairOp>,
    groups: Vec<ChannelGroup>,
}

impl RepairPlan {
    /// Creates a plan. Duplicate curves are dropped and operations are put
    /// into application order.
    pub fn new<S: Into<String>>(
        curves: impl IntoIterator<Item = S>,
        ops: impl IntoIterator<Item = RepairOp>,
    ) -> Self {
        let mut selected: Vec<String> = Vec::new();
        for curve in curves {
            let curve = curve.into();
            if !selected.contains(&curve) {
                selected.push(curve);
            }
        }
        let mut ops: Vec<RepairOp> = ops.into_iter().collect();
        ops.sort();
        ops.dedup();
        Self {
            curves: selected,
            ops,
            groups: ChannelGroup::ALL.to_vec(),
        }
    }

    /// Builder method to restrict the group-level repairs to `groups`.
    ///
    /// An empty list keeps every group.
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = ChannelGroup>) -> Self {
        let mut groups: Vec<ChannelGroup> = groups.into_iter().collect();
        if !groups.is_empty() {
            groups.sort();
            groups.dedup();
            self.groups = groups;
        }
        self
    }

    /// Creates a plan running every operation the options enable.
    pub fn from_options<S: Into<String>>(curves: impl IntoIterator<Item = S>, options: &Options) -> Self {
        Self::new(
            curves,
            RepairOp::ALL.into_iter().filter(|op| op.enabled_by(options)),
        )
    }

    pub fn curves(&self) -> &[String] {
        &self.curves
    }

    pub fn ops(&self) -> &[RepairOp] {
        &self.ops
    }

    pub fn groups(&self) -> &[ChannelGroup] {
        &self.groups
    }

    /// Returns true if the plan runs `op`.
    pub fn runs(&self, op: RepairOp) -> bool {
        self.ops.contains(&op)
    }

    /// Returns true if there is nothing to do.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() || self.ops.is_empty()
    }

    /// Fails on the first selected curve the scene does not contain.
    pub fn validate(&self, scene: &Scene) -> RepairResult<()> {
        match self.curves.iter().find(|name| !scene.curves.contains_key(*name)) {
            Some(name) => Err(RepairError::UnknownCurve(name.clone())),
            None => Ok(()),
        }
    }
}
