//! Modification counts reported back to the operator.

use crate::plan::RepairOp;
use serde::{Deserialize, Serialize};

/// Modifications made to one curve, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCounts {
    pub repeat: usize,
    pub overflow: usize,
    pub union: usize,
    pub intersect: usize,
    pub bind: usize,
}

impl OpCounts {
    /// Adds `count` modifications to `op`.
    pub fn record(&mut self, op: RepairOp, count: usize) {
        match op {
            RepairOp::Repeat => self.repeat += count,
            RepairOp::Overflow => self.overflow += count,
            RepairOp::Union => self.union += count,
            RepairOp::Intersect => self.intersect += count,
            RepairOp::Bind => self.bind += count,
        }
    }

    /// Returns the modifications made by `op`.
    pub fn get(&self, op: RepairOp) -> usize {
        match op {
            RepairOp::Repeat => self.repeat,
            RepairOp::Overflow => self.overflow,
            RepairOp::Union => self.union,
            RepairOp::Intersect => self.intersect,
            RepairOp::Bind => self.bind,
        }
    }

    pub fn total(&self) -> usize {
        self.repeat + self.overflow + self.union + self.intersect + self.bind
    }

    fn merge(&mut self, other: &OpCounts) {
        for op in RepairOp::ALL {
            self.record(op, other.get(op));
        }
    }
}

/// Modifications made to one curve (and the objects bound to it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveRepair {
    pub curve: String,
    pub counts: OpCounts,
}

/// Result of applying a plan once, or of a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairSummary {
    /// Total modifications.
    pub modifications: usize,
    /// Per-curve breakdown in plan order.
    pub curves: Vec<CurveRepair>,
}

impl RepairSummary {
    /// Records a curve's counts, merging with an earlier entry for it.
    pub fn add(&mut self, curve: &str, counts: OpCounts) {
        self.modifications += counts.total();
        match self.curves.iter_mut().find(|entry| entry.curve == curve) {
            Some(entry) => entry.counts.merge(&counts),
            None => self.curves.push(CurveRepair {
                curve: curve.to_string(),
                counts,
            }),
        }
    }

    /// Merges another summary into this one.
    pub fn merge(&mut self, other: &RepairSummary) {
        for entry in &other.curves {
            self.add(&entry.curve, entry.counts);
        }
    }
}
