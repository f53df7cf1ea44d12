//! Session logging module
//!
//! The transcript records what a run did; retention keeps the log directory
//! bounded. Diagnostics go through `tracing` and are configured in `main`.

pub mod retention;
pub mod session;

pub use retention::*;
pub use session::*;
