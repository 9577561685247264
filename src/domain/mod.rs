//! Domain types used throughout the site pipeline.
//!
//! This module defines:
//!
//! - the generic parsed row (`CsvRow`)
//! - the three record shapes (`Program`, `Event`, `NewsItem`)
//! - the display lookups keyed off CSV enum columns (`ProgramLevel`, `NewsKind`)

pub mod types;

pub use types::*;
