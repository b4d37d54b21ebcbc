//! Build-directory configuration pass.
//!
//! This module implements the two configuration resolvers: the optional
//! Fortran toolchain toggle and the compiler family flag profiles. Both
//! mutate an explicit `ResolvedFortran` threaded through them; there is
//! no ambient configuration state.

pub mod context;
pub mod errors;
pub mod probe;
pub mod profile;
pub mod resolved;
pub mod toggle;

pub use context::{ConfigureContext, EnvFlags, FortranSettings};
pub use errors::ConfigureError;
pub use probe::{parse_banner, CompilerProbe, FortranToolchain, ToolchainProbe};
pub use profile::{apply_vendor_profile, vendor_profile, FamilyProfile};
pub use resolved::{ResolvedFortran, StoredResolution};
pub use toggle::resolve_fortran_support;
