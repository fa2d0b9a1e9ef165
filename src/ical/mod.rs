//! This module handles the generation of iCal files
//!
//! It is a wrapper around the `ics` crate, that is given already validated and encoded properties.

mod builder;
pub use builder::build_from;
