//! The `settings` module is a simple utility that requires manual
//! verification.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
