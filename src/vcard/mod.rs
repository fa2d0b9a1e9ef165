//! This module handles the generation of vCard files
//!
//! No third-party crate in our stack writes vCards, so the (small) subset of RFC 2426 this crate needs is written here.

mod builder;
pub use builder::build_from;

/// The vCard version this crate generates
pub const VCARD_VERSION: &str = "3.0";
