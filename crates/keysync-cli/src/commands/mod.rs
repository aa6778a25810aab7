//! CLI command implementations

pub mod check;
pub mod fix;
pub mod json_output;
pub mod options;

mod reporting;
