//! sqlpal - MySQL script runner
//!
//! A command-line tool for running SQL scripts against a MySQL database,
//! with colored session transcripts, log rotation, and credentials kept
//! out of the source.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logs;
pub mod query;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, SqlpalError};
