//! Slipway - A configure-time toolchain resolver for Fortran projects
//!
//! This crate provides the core library functionality for Slipway,
//! including compiler probing, feature toggle resolution, and
//! vendor-specific flag profiles.

pub mod configure;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Slipway unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides canned probes, fake compiler scripts,
/// and prebuilt toolchain fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::configure::{
    ConfigureContext, ConfigureError, EnvFlags, FortranSettings, ResolvedFortran,
};
pub use crate::core::flags::{BuildMode, FlagSet};
pub use crate::util::context::GlobalContext;
