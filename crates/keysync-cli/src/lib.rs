//! keysync CLI library.
//!
//! This crate provides the command implementations behind the `keysync`
//! binary: scene and options loading, the `check` report, the `fix` repair
//! loop, and the `options` printer.

pub mod commands;
pub mod input;
