//! keysync End-to-End Test Infrastructure
//!
//! This crate holds the cross-crate tests of the diagnostics and repair
//! pipeline:
//!
//! - **Properties**: proptest checks of the scan and repair guarantees
//! - **Scenarios**: hand-built curves with exact expected repairs
//! - **CLI**: the `fix` command run against scene files on disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p keysync-tests
//! ```

pub mod fixtures;
