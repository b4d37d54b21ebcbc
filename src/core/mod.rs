//! Core data structures for slipway.
//!
//! This module contains the foundational types used throughout the
//! configuration pass:
//! - Compiler identity (vendor id + version)
//! - Flag strings per build mode, with provenance records

pub mod compiler;
pub mod flags;

pub use compiler::{CompilerIdentity, CompilerVendor};
pub use flags::{BuildMode, FlagEntry, FlagScope, FlagSet, FlagSource};
