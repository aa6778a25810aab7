//! Options command implementation
//!
//! Shows the effective options and where they came from.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::{warning_codes, JsonWarning, OptionsOutput};
use super::reporting;
use crate::input::{load_options, LoadedOptions};

/// Run the options command
///
/// # Returns
/// Always exit code 0; an unusable options file only produces a warning
pub fn run(options_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let loaded = load_options(options_path);
    if json_output {
        run_json(loaded)
    } else {
        run_human(&loaded);
        Ok(ExitCode::SUCCESS)
    }
}

fn run_human(loaded: &LoadedOptions) {
    println!(
        "{} {} ({})",
        "Options:".cyan().bold(),
        loaded.path.display(),
        loaded.source.as_str()
    );
    if let Some(ref warning) = loaded.warning {
        reporting::print_warning(warning);
    }

    let options = &loaded.options;
    let toggles = [
        ("repeat_removal", options.repeat_removal),
        ("overflow_split", options.overflow_split),
        ("union_merge", options.union_merge),
        ("intersection_trim", options.intersection_trim),
        ("bind_sync", options.bind_sync),
    ];
    for (name, enabled) in toggles {
        let value = if enabled { "on".green() } else { "off".dimmed() };
        println!("  {:<18} {}", name, value);
    }
    println!("  {:<18} {}", "reference_frame", options.reference_frame);
    println!("  {:<18} {}", "max_passes", options.max_passes);
}

fn run_json(loaded: LoadedOptions) -> Result<ExitCode> {
    let output = OptionsOutput {
        success: true,
        warnings: loaded
            .warning
            .into_iter()
            .map(|message| JsonWarning::new(warning_codes::OPTIONS_FALLBACK, message))
            .collect(),
        path: loaded.path.display().to_string(),
        source: loaded.source.as_str().to_string(),
        options: loaded.options,
    };
    let json =
        serde_json::to_string_pretty(&output).context("Failed to serialize options output")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
