//! High-level operations.
//!
//! This module contains the implementation of Slipway commands.

pub mod configure;
pub mod doctor;

pub use configure::{configure, ConfigureOptions, ConfigureReport};
pub use doctor::{doctor, format_report, CheckResult, DoctorOptions, DoctorReport};
