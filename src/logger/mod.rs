//! The `logger` module is a simple utility that requires manual
//! verification.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
