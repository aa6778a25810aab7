//! Check report types for structured output.

use crate::violation::Violation;
use serde::{Deserialize, Serialize};

/// Violations found in one curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    /// Curve name.
    pub curve: String,
    /// Structural violations in scan order.
    pub violations: Vec<Violation>,
    /// True if no violation blocks export.
    pub exportable: bool,
}

impl CurveReport {
    /// Creates a report from a scan result.
    pub fn new(curve: impl Into<String>, violations: Vec<Violation>) -> Self {
        let exportable = !violations.iter().any(|v| v.kind.blocks_export());
        Self {
            curve: curve.into(),
            violations,
            exportable,
        }
    }

    /// Returns true if the curve has no violations.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Bind desyncs found for one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindReport {
    /// Object name.
    pub object: String,
    /// Curve the object references.
    pub curve: String,
    /// One violation per out-of-sync component.
    pub violations: Vec<Violation>,
}

impl BindReport {
    pub fn new(object: impl Into<String>, curve: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            object: object.into(),
            curve: curve.into(),
            violations,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Summary statistics for a check run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Number of animated curves scanned.
    pub curves_scanned: usize,
    /// Number of curves with at least one structural violation.
    pub broken_curves: usize,
    /// Number of curves an exporter would reject.
    pub blocked_curves: usize,
    /// Total structural violations.
    pub violation_count: usize,
    /// Total out-of-sync pose components.
    pub bind_desyncs: usize,
}

/// Complete check report for a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// True if nothing was found.
    pub ok: bool,
    /// Reports for curves with violations, by curve name.
    pub curves: Vec<CurveReport>,
    /// Reports for objects with bind desyncs.
    pub binds: Vec<BindReport>,
    /// Summary statistics.
    pub summary: CheckSummary,
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self {
            ok: true,
            curves: Vec::new(),
            binds: Vec::new(),
            summary: CheckSummary::default(),
        }
    }

    /// Adds a scanned curve; clean curves only count towards the summary.
    pub fn add_curve(&mut self, report: CurveReport) {
        self.summary.curves_scanned += 1;
        if report.is_clean() {
            return;
        }
        self.summary.broken_curves += 1;
        self.summary.violation_count += report.violations.len();
        if !report.exportable {
            self.summary.blocked_curves += 1;
        }
        self.ok = false;
        self.curves.push(report);
    }

    /// Adds a bind scan; clean objects are dropped.
    pub fn add_bind(&mut self, report: BindReport) {
        if report.is_clean() {
            return;
        }
        self.summary.bind_desyncs += report.violations.len();
        self.ok = false;
        self.binds.push(report);
    }

    /// Returns the names of curves with structural violations.
    pub fn broken_curves(&self) -> Vec<String> {
        self.curves.iter().map(|report| report.curve.clone()).collect()
    }

    /// Returns the names of curves referenced by out-of-sync objects.
    pub fn desynced_curves(&self) -> Vec<String> {
        let mut names: Vec<String> = self.binds.iter().map(|report| report.curve.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}
