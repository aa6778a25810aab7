//! keysync CLI - Command-line interface for animation curve consistency
//!
//! This binary provides commands for checking scenes, repairing curves and
//! inspecting the persisted repair options.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
use keysync_cli::commands;
use keysync_cli::commands::fix::{FixArgs, Toggles};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            scene,
            options,
            json,
        } => commands::check::run(&scene, options.as_deref(), json),
        Commands::Fix {
            scene,
            out,
            curve,
            all,
            repeat,
            no_repeat,
            overflow,
            no_overflow,
            union,
            no_union,
            intersect,
            no_intersect,
            bind,
            no_bind,
            only,
            group,
            options,
            save_options,
            json,
        } => {
            let args = FixArgs {
                scene: &scene,
                out: out.as_deref(),
                curves: &curve,
                all,
                toggles: Toggles {
                    repeat: Toggles::flag(repeat, no_repeat),
                    overflow: Toggles::flag(overflow, no_overflow),
                    union: Toggles::flag(union, no_union),
                    intersect: Toggles::flag(intersect, no_intersect),
                    bind: Toggles::flag(bind, no_bind),
                },
                only: &only,
                groups: &group,
                options: options.as_deref(),
                save_options,
            };
            commands::fix::run(&args, json)
        }
        Commands::Options { options, json } => commands::options::run(options.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
