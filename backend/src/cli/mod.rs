//! Command-line tooling for VetPath.

pub mod sample_data;
pub mod seed;

pub use seed::{run as run_seed, seed_store, SeedCli, SeedReport};
