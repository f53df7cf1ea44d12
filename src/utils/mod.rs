//! Utility functions module
//!
//! Timestamp formatting, the ANSI palette, and result-set rendering helpers.

pub mod datetime;
pub mod format;

pub use datetime::*;
pub use format::*;
