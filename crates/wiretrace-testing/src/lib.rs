//! Testing infrastructure for wiretrace integration tests.
//!
//! - `TestWorld`: isolated recorder directories plus a config file for CLI runs
//! - `assertions`: JSON checks for CLI and view output
//! - `fixtures`: sample exchanges and recorder file writers

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
