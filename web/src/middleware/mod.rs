//! Middleware components.

pub mod path;

pub use path::PathForwarding;
