//! One-shot operational procedures run from the command line.

pub mod cleanup;
pub mod migrate;
pub mod seed;
pub mod wipe;
