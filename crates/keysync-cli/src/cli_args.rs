//! CLI argument definitions for the keysync command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// keysync - Animation channel-group consistency checker and repairer
#[derive(Parser)]
#[command(name = "keysync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan a scene for channel-group violations and bind-pose desyncs
    Check {
        /// Path to the scene file
        #[arg(short, long)]
        scene: String,

        /// Options file (default: keysync.json)
        #[arg(long)]
        options: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Repair selected curves until they scan clean or stop improving
    Fix {
        /// Path to the scene file
        #[arg(short, long)]
        scene: String,

        /// Write the repaired scene here instead of in place
        #[arg(short, long)]
        out: Option<String>,

        /// Curve to repair (repeatable)
        #[arg(short, long = "curve")]
        curve: Vec<String>,

        /// Repair every curve with a violation
        #[arg(long, conflicts_with = "curve")]
        all: bool,

        /// Collapse repeated keys
        #[arg(long, overrides_with = "no_repeat")]
        repeat: bool,
        /// Skip repeated-key removal
        #[arg(long, overrides_with = "repeat")]
        no_repeat: bool,

        /// Split rotation segments that overflow
        #[arg(long, overrides_with = "no_overflow")]
        overflow: bool,
        /// Skip overflow splitting
        #[arg(long, overrides_with = "overflow")]
        no_overflow: bool,

        /// Merge group key times by union
        #[arg(long, overrides_with = "no_union")]
        union: bool,
        /// Skip union merging
        #[arg(long, overrides_with = "union")]
        no_union: bool,

        /// Trim group key times to their intersection
        #[arg(long, overrides_with = "no_intersect")]
        intersect: bool,
        /// Skip intersection trimming
        #[arg(long, overrides_with = "intersect")]
        no_intersect: bool,

        /// Synchronize live poses with the reference frame
        #[arg(long, overrides_with = "no_bind")]
        bind: bool,
        /// Skip bind synchronization
        #[arg(long, overrides_with = "bind")]
        no_bind: bool,

        /// Run only this operation, ignoring the toggles (repeatable:
        /// repeat, overflow, union, intersect, bind)
        #[arg(long = "only", value_name = "OP")]
        only: Vec<String>,

        /// Limit union and intersection to this group (repeatable:
        /// position, rotation, scale, quaternion)
        #[arg(short, long = "group", value_name = "GROUP")]
        group: Vec<String>,

        /// Options file (default: keysync.json)
        #[arg(long)]
        options: Option<String>,

        /// Save the effective toggles back to the options file
        #[arg(long)]
        save_options: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the effective repair options
    Options {
        /// Options file (default: keysync.json)
        #[arg(long)]
        options: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
