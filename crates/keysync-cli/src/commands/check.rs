//! Check command implementation
//!
//! Scans every animated curve and every bound object of a scene and reports
//! violations keyed by curve and object name.

use anyhow::{Context, Result};
use colored::Colorize;
use keysync_lint::{partition_exportable, CheckReport, Diagnostics};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{warning_codes, CheckOutput, JsonError, JsonWarning, RejectedCurve};
use super::reporting;
use crate::input::{load_options, load_scene, LoadedScene};

/// Run the check command
///
/// # Arguments
/// * `scene_path` - Path to the scene document
/// * `options_path` - Options file (reference frame); defaults apply if absent
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the scene is consistent, 1 otherwise
pub fn run(scene_path: &str, options_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(scene_path, options_path)
    } else {
        run_human(scene_path, options_path)
    }
}

fn run_human(scene_path: &str, options_path: Option<&str>) -> Result<ExitCode> {
    println!("{} {}", "Checking:".cyan().bold(), scene_path);

    let loaded_options = load_options(options_path);
    if let Some(ref warning) = loaded_options.warning {
        reporting::print_warning(warning);
    }

    let LoadedScene {
        scene,
        source_hash,
        scene_hash,
    } = load_scene(Path::new(scene_path))
        .with_context(|| format!("Failed to load scene file: {}", scene_path))?;
    println!(
        "{} {} {} {}",
        "Source:".dimmed(),
        reporting::short_hash(&source_hash),
        "Scene:".dimmed(),
        reporting::short_hash(&scene_hash)
    );

    let report = Diagnostics::new(&loaded_options.options).check_scene(&scene);
    reporting::print_check_report(&report);

    let (exportable, rejected) = partition_exportable(&scene);
    println!(
        "\n{} {} exportable, {} rejected",
        "Export:".cyan().bold(),
        exportable.len(),
        rejected.len()
    );

    print_outcome(&report);
    Ok(exit_code(&report))
}

fn print_outcome(report: &CheckReport) {
    if report.ok {
        println!(
            "\n{} Scene is consistent ({} animated curve(s))",
            "SUCCESS".green().bold(),
            report.summary.curves_scanned
        );
    } else {
        println!(
            "\n{} {} curve(s) with {} violation(s), {} bind desync(s)",
            "FAILED".red().bold(),
            report.summary.broken_curves,
            report.summary.violation_count,
            report.summary.bind_desyncs
        );
    }
}

fn exit_code(report: &CheckReport) -> ExitCode {
    if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run_json(scene_path: &str, options_path: Option<&str>) -> Result<ExitCode> {
    let loaded_options = load_options(options_path);
    let warnings: Vec<JsonWarning> = loaded_options
        .warning
        .iter()
        .map(|message| JsonWarning::new(warning_codes::OPTIONS_FALLBACK, message.clone()))
        .collect();

    let loaded = match load_scene(Path::new(scene_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = JsonError::from_anyhow(&e).with_file(scene_path);
            let output = CheckOutput::failure(vec![error], warnings);
            print_json(&output)?;
            return Ok(ExitCode::from(1));
        }
    };

    let report = Diagnostics::new(&loaded_options.options).check_scene(&loaded.scene);
    let (exportable, rejected) = partition_exportable(&loaded.scene);
    let code = exit_code(&report);

    let output = CheckOutput {
        success: report.ok,
        errors: Vec::new(),
        warnings,
        source_hash: Some(loaded.source_hash),
        scene_hash: Some(loaded.scene_hash),
        report: Some(report),
        exportable,
        rejected: rejected
            .into_iter()
            .map(|(curve, blocking)| RejectedCurve { curve, blocking })
            .collect(),
    };
    print_json(&output)?;
    Ok(code)
}

fn print_json(output: &CheckOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize check output")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BROKEN: &str = r#"{
        "version": 1,
        "curves": {
            "Walk": { "channels": { "LocX": { "points": [ { "time": 1.0, "value": 0.0 } ] } } }
        }
    }"#;

    #[test]
    fn test_check_broken_scene_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(&path, BROKEN).unwrap();
        let options = dir.path().join("keysync.json");

        let code = run(path.to_str().unwrap(), options.to_str(), false).unwrap();
        assert_eq!(code, ExitCode::from(1));
        let code = run(path.to_str().unwrap(), options.to_str(), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_check_missing_scene_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.json");
        assert!(run(path.to_str().unwrap(), None, false).is_err());
        // JSON mode reports the failure in the document instead.
        assert_eq!(run(path.to_str().unwrap(), None, true).unwrap(), ExitCode::from(1));
    }
}
