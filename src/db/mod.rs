//! Database connection module

pub mod connection;

pub use connection::*;
