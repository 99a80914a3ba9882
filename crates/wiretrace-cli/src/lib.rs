// wiretrace CLI: reads recorder directories, hands raw exchanges to the
// engine and renders the results as plain text or JSON

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod store;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
