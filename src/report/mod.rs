//! Terminal reporting for page builds.

pub mod format;

pub use format::*;
