//! Fix command implementation
//!
//! Selects curves, runs the enabled repairs in a scan, repair, re-scan loop
//! and writes the repaired scene back.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use keysync_anim::{scene_hash, ChannelGroup, Options, Scene};
use keysync_lint::Diagnostics;
use keysync_repair::{PassRecord, RepairOp, RepairPlan, RepairSummary, Session, SessionState};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{error_codes, warning_codes, FixOutput, JsonError, JsonWarning};
use super::reporting;
use crate::input::{load_options, load_scene, options_path};

/// Per-invocation overrides of the option toggles.
///
/// `None` keeps the value from the options file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub repeat: Option<bool>,
    pub overflow: Option<bool>,
    pub union: Option<bool>,
    pub intersect: Option<bool>,
    pub bind: Option<bool>,
}

impl Toggles {
    /// Folds an `--x` / `--no-x` flag pair into an override.
    pub fn flag(on: bool, off: bool) -> Option<bool> {
        match (on, off) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }

    /// Applies the overrides on top of loaded options.
    pub fn apply(&self, options: &Options) -> Options {
        let mut options = *options;
        if let Some(value) = self.repeat {
            options.repeat_removal = value;
        }
        if let Some(value) = self.overflow {
            options.overflow_split = value;
        }
        if let Some(value) = self.union {
            options.union_merge = value;
        }
        if let Some(value) = self.intersect {
            options.intersection_trim = value;
        }
        if let Some(value) = self.bind {
            options.bind_sync = value;
        }
        options
    }
}

/// Arguments of the fix command.
#[derive(Debug, Clone)]
pub struct FixArgs<'a> {
    /// Scene document to repair
    pub scene: &'a str,
    /// Where to write the result (default: in place)
    pub out: Option<&'a str>,
    /// Curves selected by name
    pub curves: &'a [String],
    /// Select every curve with a violation
    pub all: bool,
    /// Toggle overrides
    pub toggles: Toggles,
    /// Operation names to run instead of the enabled toggles
    pub only: &'a [String],
    /// Group names the union and intersection repairs are limited to
    pub groups: &'a [String],
    /// Options file
    pub options: Option<&'a str>,
    /// Persist the effective toggles to the options file
    pub save_options: bool,
}

/// Operations and groups requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlanFilter {
    ops: Vec<RepairOp>,
    groups: Vec<ChannelGroup>,
}

impl PlanFilter {
    /// Parses `--only` and `--group`, failing on the first unknown name.
    ///
    /// Without `--only`, the operations enabled by `options` run.
    fn parse(args: &FixArgs<'_>, options: &Options) -> Result<Self> {
        let ops = if args.only.is_empty() {
            RepairOp::ALL
                .into_iter()
                .filter(|op| op.enabled_by(options))
                .collect()
        } else {
            args.only
                .iter()
                .map(|name| name.parse::<RepairOp>())
                .collect::<Result<Vec<_>, _>>()
                .context("Invalid --only value")?
        };
        let groups = args
            .groups
            .iter()
            .map(|name| name.parse::<ChannelGroup>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --group value")?;
        Ok(Self { ops, groups })
    }

    fn plan(&self, curves: Vec<String>) -> RepairPlan {
        RepairPlan::new(curves, self.ops.iter().copied()).with_groups(self.groups.iter().copied())
    }
}

/// Everything a finished repair session produced.
#[derive(Debug)]
struct FixOutcome {
    scene: Scene,
    selected: Vec<String>,
    state: SessionState,
    summary: RepairSummary,
    passes: Vec<PassRecord>,
    remaining: usize,
    hash_before: String,
    hash_after: String,
}

/// Run the fix command
///
/// # Returns
/// Exit code: 0 if the selection ended clean, 1 otherwise
pub fn run(args: &FixArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn run_human(args: &FixArgs<'_>) -> Result<ExitCode> {
    println!("{} {}", "Fixing:".cyan().bold(), args.scene);

    if args.curves.is_empty() && !args.all {
        bail!("No curves selected; pass --curve NAME or --all");
    }

    let loaded_options = load_options(args.options);
    if let Some(ref warning) = loaded_options.warning {
        reporting::print_warning(warning);
    }
    let options = args.toggles.apply(&loaded_options.options);
    let filter = PlanFilter::parse(args, &options)?;
    if args.save_options {
        save_options(&options, args.options)?;
        println!("{} {}", "Saved options:".dimmed(), options_path(args.options).display());
    }

    let outcome = execute(args, &options, &filter)?;
    let template = filter.plan(Vec::new());
    let ops: Vec<String> = template.ops().iter().map(|op| op.to_string()).collect();
    let groups: Vec<String> = template.groups().iter().map(|group| group.to_string()).collect();
    println!(
        "{} {}",
        "Selected:".dimmed(),
        if outcome.selected.is_empty() {
            "-".to_string()
        } else {
            outcome.selected.join(", ")
        }
    );
    println!("{} {}", "Operations:".dimmed(), ops.join(", "));
    println!("{} {}", "Groups:".dimmed(), groups.join(", "));

    if !outcome.summary.curves.is_empty() {
        println!("\n{}", "Repairs:".cyan().bold());
        reporting::print_repair_summary(&outcome.summary);
    }
    if !outcome.passes.is_empty() {
        println!("\n{}", "Passes:".cyan().bold());
        reporting::print_passes(&outcome.passes);
    }

    println!("\nMade {} modifications.", outcome.summary.modifications);

    if let Some(path) = write_scene(&outcome, args)? {
        println!(
            "{} {} ({})",
            "Wrote:".dimmed(),
            path.display(),
            reporting::short_hash(&outcome.hash_after)
        );
    }

    if outcome.state == SessionState::Clean {
        println!(
            "\n{} Selection is {}",
            "SUCCESS".green().bold(),
            reporting::state_label(outcome.state)
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} {} violation(s) remain ({})",
            "FAILED".red().bold(),
            outcome.remaining,
            reporting::state_label(outcome.state)
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(args: &FixArgs<'_>) -> Result<ExitCode> {
    let loaded_options = load_options(args.options);
    let warnings: Vec<JsonWarning> = loaded_options
        .warning
        .iter()
        .map(|message| JsonWarning::new(warning_codes::OPTIONS_FALLBACK, message.clone()))
        .collect();

    if args.curves.is_empty() && !args.all {
        let error = JsonError::new(
            error_codes::NO_SELECTION,
            "No curves selected; pass --curve NAME or --all",
        );
        print_json(&FixOutput::failure(vec![error], warnings))?;
        return Ok(ExitCode::from(1));
    }

    let options = args.toggles.apply(&loaded_options.options);
    let filter = match PlanFilter::parse(args, &options) {
        Ok(filter) => filter,
        Err(e) => {
            print_json(&FixOutput::failure(vec![JsonError::from_anyhow(&e)], warnings))?;
            return Ok(ExitCode::from(1));
        }
    };

    if args.save_options {
        if let Err(e) = save_options(&options, args.options) {
            let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e));
            print_json(&FixOutput::failure(vec![error], warnings))?;
            return Ok(ExitCode::from(1));
        }
    }

    let outcome = match execute(args, &options, &filter) {
        Ok(outcome) => outcome,
        Err(e) => {
            let error = JsonError::from_anyhow(&e).with_file(args.scene);
            print_json(&FixOutput::failure(vec![error], warnings))?;
            return Ok(ExitCode::from(1));
        }
    };

    let written = match write_scene(&outcome, args) {
        Ok(path) => path,
        Err(e) => {
            let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e));
            print_json(&FixOutput::failure(vec![error], warnings))?;
            return Ok(ExitCode::from(1));
        }
    };

    let success = outcome.state == SessionState::Clean;
    let output = FixOutput {
        success,
        errors: Vec::new(),
        warnings,
        options: Some(options),
        selected: outcome.selected,
        state: Some(outcome.state),
        modifications: outcome.summary.modifications,
        summary: Some(outcome.summary),
        passes: outcome.passes,
        remaining: outcome.remaining,
        hash_before: Some(outcome.hash_before),
        hash_after: Some(outcome.hash_after),
        written: written.map(|path| path.display().to_string()),
    };
    print_json(&output)?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads the scene, selects curves and runs the repair session.
fn execute(args: &FixArgs<'_>, options: &Options, filter: &PlanFilter) -> Result<FixOutcome> {
    let loaded = load_scene(Path::new(args.scene))
        .with_context(|| format!("Failed to load scene file: {}", args.scene))?;
    let mut scene = loaded.scene;

    let selected = if args.all {
        select_broken(&scene, options)
    } else {
        args.curves.to_vec()
    };

    let plan = filter.plan(selected.clone());
    let mut session = Session::start(options, plan, &scene).context("Failed to start repair")?;
    let state = session.run(&mut scene).context("Repair failed")?;
    let hash_after = scene_hash(&scene).context("Failed to hash scene")?;

    Ok(FixOutcome {
        selected,
        state,
        summary: session.summary(),
        passes: session.passes().to_vec(),
        remaining: session.violations(),
        hash_before: loaded.scene_hash,
        hash_after,
        scene,
    })
}

/// Curves with structural violations, plus curves of desynced objects when
/// bind sync is enabled.
fn select_broken(scene: &Scene, options: &Options) -> Vec<String> {
    let report = Diagnostics::new(options).check_scene(scene);
    let mut selected = report.broken_curves();
    if options.bind_sync {
        for curve in report.desynced_curves() {
            if !selected.contains(&curve) {
                selected.push(curve);
            }
        }
    }
    selected
}

/// Writes the scene to `--out`, or in place if anything changed.
fn write_scene(outcome: &FixOutcome, args: &FixArgs<'_>) -> Result<Option<PathBuf>> {
    let target = match args.out {
        Some(out) => PathBuf::from(out),
        None if outcome.summary.modifications > 0 => PathBuf::from(args.scene),
        None => return Ok(None),
    };
    outcome
        .scene
        .save(&target)
        .with_context(|| format!("Failed to write scene file: {}", target.display()))?;
    Ok(Some(target))
}

fn save_options(options: &Options, path: Option<&str>) -> Result<()> {
    let path = options_path(path);
    options
        .save(&path)
        .with_context(|| format!("Failed to write options file: {}", path.display()))
}

fn print_json(output: &FixOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize fix output")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flag_pairs() {
        assert_eq!(Toggles::flag(false, false), None);
        assert_eq!(Toggles::flag(true, false), Some(true));
        assert_eq!(Toggles::flag(false, true), Some(false));
    }

    #[test]
    fn test_toggles_override_options() {
        let toggles = Toggles {
            union: Some(false),
            intersect: Some(true),
            ..Toggles::default()
        };
        let options = toggles.apply(&Options::default());
        assert!(!options.union_merge);
        assert!(options.intersection_trim);
        assert!(options.repeat_removal);
    }

    fn args_with<'a>(only: &'a [String], groups: &'a [String]) -> FixArgs<'a> {
        FixArgs {
            scene: "scene.json",
            out: None,
            curves: &[],
            all: true,
            toggles: Toggles::default(),
            only,
            groups,
            options: None,
            save_options: false,
        }
    }

    #[test]
    fn test_filter_defaults_to_enabled_ops() {
        let filter = PlanFilter::parse(&args_with(&[], &[]), &Options::default()).unwrap();
        assert_eq!(filter.ops, vec![RepairOp::Repeat, RepairOp::Overflow, RepairOp::Union]);
        assert_eq!(filter.plan(vec!["Walk".to_string()]).groups(), &ChannelGroup::ALL);
    }

    #[test]
    fn test_filter_parses_names() {
        let only = vec!["intersect".to_string(), "Repeat".to_string()];
        let groups = vec!["scale".to_string(), "Loc".to_string()];
        let filter = PlanFilter::parse(&args_with(&only, &groups), &Options::default()).unwrap();
        let plan = filter.plan(vec!["Walk".to_string()]);
        assert_eq!(plan.ops(), &[RepairOp::Repeat, RepairOp::Intersect]);
        assert_eq!(plan.groups(), &[ChannelGroup::Position, ChannelGroup::Scale]);
    }

    #[test]
    fn test_filter_rejects_unknown_names() {
        let bad_op = vec!["smooth".to_string()];
        let err = PlanFilter::parse(&args_with(&bad_op, &[]), &Options::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("smooth"));

        let bad_group = vec!["color".to_string()];
        let err = PlanFilter::parse(&args_with(&[], &bad_group), &Options::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("color"));
    }
}
