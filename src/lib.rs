pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod report;
pub mod rules;
pub mod scaffold;
pub mod scanner;

pub use engine::{ValidateOptions, validate};
pub use error::{AocsError, Result};
pub use report::Summary;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
