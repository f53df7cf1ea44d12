//! Configuration management module
//!
//! This module handles configuration loading, validation, and persistence
//! from multiple sources including environment variables, configuration
//! files, and default values, plus credential handling.

pub mod credentials;
pub mod settings;

pub use credentials::*;
pub use settings::*;
