//! Query execution module
//!
//! Statement splitting and execution, result-set types, and script running.

pub mod executor;
pub mod result;
pub mod script;

pub use executor::*;
pub use result::*;
pub use script::*;
