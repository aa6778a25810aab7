//! Colored console output shared by the commands.

use colored::{ColoredString, Colorize};
use keysync_lint::{BindReport, CheckReport, CurveReport, Violation};
use keysync_repair::{PassRecord, RepairOp, RepairSummary, SessionState};

/// Blocking violations are marked with a red `x`, the rest with a yellow `!`.
fn mark(violation: &Violation) -> ColoredString {
    if violation.kind.blocks_export() {
        "x".red()
    } else {
        "!".yellow()
    }
}

pub(crate) fn print_warning(message: &str) {
    println!("  {} {}", "!".yellow(), message);
}

pub(crate) fn print_violation(violation: &Violation) {
    println!(
        "    {} {}: {}",
        mark(violation),
        violation.kind.code().dimmed(),
        violation.message()
    );
}

pub(crate) fn print_curve_report(report: &CurveReport) {
    let status = if report.exportable {
        "exportable".green()
    } else {
        "blocked".red()
    };
    println!("  {} ({})", report.curve.bold(), status);
    for violation in &report.violations {
        print_violation(violation);
    }
}

pub(crate) fn print_bind_report(report: &BindReport) {
    println!("  {} {}", report.object.bold(), format!("({})", report.curve).dimmed());
    for violation in &report.violations {
        print_violation(violation);
    }
}

/// Prints every section of a check report that has content.
pub(crate) fn print_check_report(report: &CheckReport) {
    if !report.curves.is_empty() {
        println!("\n{}", "Curves:".cyan().bold());
        for curve in &report.curves {
            print_curve_report(curve);
        }
    }
    if !report.binds.is_empty() {
        println!("\n{}", "Bind poses:".cyan().bold());
        for bind in &report.binds {
            print_bind_report(bind);
        }
    }
}

/// Prints per-curve modification counts.
pub(crate) fn print_repair_summary(summary: &RepairSummary) {
    for entry in &summary.curves {
        let parts: Vec<String> = RepairOp::ALL
            .into_iter()
            .filter(|op| entry.counts.get(*op) > 0)
            .map(|op| format!("{} {}", op, entry.counts.get(op)))
            .collect();
        let detail = if parts.is_empty() {
            "no changes".to_string()
        } else {
            parts.join(", ")
        };
        println!("  {} {}", entry.curve.bold(), detail.dimmed());
    }
}

pub(crate) fn print_passes(passes: &[PassRecord]) {
    for record in passes {
        let after = record
            .violations_after
            .map(|count| count.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {}: {} violation(s) -> {} modification(s) -> {} violation(s)",
            "pass".dimmed(),
            record.pass,
            record.violations_before,
            record.summary.modifications,
            after
        );
    }
}

pub(crate) fn state_label(state: SessionState) -> ColoredString {
    match state {
        SessionState::Clean => "clean".green(),
        SessionState::Stalled => "stalled".yellow(),
        SessionState::Exhausted => "exhausted".yellow(),
        SessionState::Scanned => "scanned".normal(),
        SessionState::Repaired => "repaired".normal(),
    }
}

/// Prints the first 16 hex digits of a hash.
pub(crate) fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(16)]
}
