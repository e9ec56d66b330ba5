//! Filesystem side of the scaffolding pipeline.
//!
//! The materializer copies template fragments, the pruner removes what does
//! not apply, and the templater rewrites and renames config files. Each works
//! on absolute paths produced by the planner.

pub mod materializer;
pub mod pruner;
pub mod templater;

pub use materializer::{copy_directory, copy_file, move_directory};
pub use pruner::remove;
pub use templater::{rewrite, write_rendered};
