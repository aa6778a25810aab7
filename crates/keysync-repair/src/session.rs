//! The scan, repair, re-scan loop.
//!
//! A session starts from a scan and alternates repair passes with re-scans
//! until the selection is clean, a pass makes no modification, or the pass
//! budget from the options runs out.

use crate::engine::RepairEngine;
use crate::error::RepairResult;
use crate::plan::{RepairOp, RepairPlan};
use crate::summary::RepairSummary;
use keysync_anim::{Options, Scene};
use keysync_lint::Diagnostics;
use serde::{Deserialize, Serialize};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Violations were counted; a repair pass is next.
    Scanned,
    /// A repair pass ran; a re-scan is next.
    Repaired,
    /// No violation remains in the selection.
    Clean,
    /// A pass made no modification but violations remain.
    Stalled,
    /// The pass budget ran out with violations remaining.
    Exhausted,
}

impl SessionState {
    /// Returns true if the session cannot advance.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Clean | SessionState::Stalled | SessionState::Exhausted
        )
    }
}

/// One repair pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    /// 1-based pass number.
    pub pass: u32,
    /// Violations in the selection before the pass.
    pub violations_before: usize,
    /// What the pass changed.
    pub summary: RepairSummary,
    /// Violations after the pass; set by the re-scan.
    pub violations_after: Option<usize>,
}

/// Drives repair passes over a plan's curves.
#[derive(Debug)]
pub struct Session {
    diagnostics: Diagnostics,
    engine: RepairEngine,
    plan: RepairPlan,
    max_passes: u32,
    state: SessionState,
    violations: usize,
    passes: Vec<PassRecord>,
}

impl Session {
    /// Validates the plan and performs the initial scan.
    pub fn start(options: &Options, plan: RepairPlan, scene: &Scene) -> RepairResult<Self> {
        plan.validate(scene)?;
        let diagnostics = Diagnostics::new(options);
        let violations = count_violations(&diagnostics, &plan, scene)?;
        Ok(Self {
            diagnostics,
            engine: RepairEngine::new(options),
            plan,
            max_passes: options.max_passes,
            state: SessionState::Scanned,
            violations,
            passes: Vec::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Violations counted by the latest scan.
    pub fn violations(&self) -> usize {
        self.violations
    }

    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    pub fn plan(&self) -> &RepairPlan {
        &self.plan
    }

    /// Advances by one transition and returns the new state.
    pub fn step(&mut self, scene: &mut Scene) -> RepairResult<SessionState> {
        self.state = match self.state {
            SessionState::Scanned => {
                if self.violations == 0 {
                    SessionState::Clean
                } else if self.passes.len() as u32 >= self.max_passes {
                    SessionState::Exhausted
                } else {
                    let summary = self.engine.apply(scene, &self.plan)?;
                    let modifications = summary.modifications;
                    self.passes.push(PassRecord {
                        pass: self.passes.len() as u32 + 1,
                        violations_before: self.violations,
                        summary,
                        violations_after: None,
                    });
                    if modifications == 0 {
                        SessionState::Stalled
                    } else {
                        SessionState::Repaired
                    }
                }
            }
            SessionState::Repaired => {
                self.violations = count_violations(&self.diagnostics, &self.plan, scene)?;
                if let Some(record) = self.passes.last_mut() {
                    record.violations_after = Some(self.violations);
                }
                SessionState::Scanned
            }
            terminal => terminal,
        };
        Ok(self.state)
    }

    /// Steps until a terminal state is reached.
    pub fn run(&mut self, scene: &mut Scene) -> RepairResult<SessionState> {
        while !self.state.is_terminal() {
            self.step(scene)?;
        }
        Ok(self.state)
    }

    /// Total modifications across all passes.
    pub fn summary(&self) -> RepairSummary {
        let mut total = RepairSummary::default();
        for record in &self.passes {
            total.merge(&record.summary);
        }
        total
    }
}

/// Violations the plan is responsible for: structural violations of its
/// curves, plus bind desyncs of their objects when bind sync is planned.
fn count_violations(diagnostics: &Diagnostics, plan: &RepairPlan, scene: &Scene) -> RepairResult<usize> {
    let mut count = 0;
    for name in plan.curves() {
        let curve = scene.curve(name)?;
        count += diagnostics.scan(curve).len();
        if plan.runs(RepairOp::Bind) {
            for object in scene.objects_using(name) {
                count += diagnostics.scan_bind(curve, &object.pose).len();
            }
        }
    }
    Ok(count)
}
