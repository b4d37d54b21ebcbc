//! Compiler family default flag profiles.
//!
//! Second of the two configuration resolvers. Fills in fixed default
//! flags for recognized compiler families, unless the environment has
//! already decided the flags.

use crate::configure::context::EnvFlags;
use crate::configure::resolved::ResolvedFortran;
use crate::core::compiler::CompilerVendor;
use crate::core::flags::{FlagEntry, FlagScope, FlagSource};

/// Fixed default flags for one compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyProfile {
    /// Appended to the general flag string
    pub warnings: &'static str,
    /// Replaces the release-mode flag string
    pub release: &'static str,
    /// Replaces the debug-mode flag string
    pub debug: &'static str,
}

const GNU_PROFILE: FamilyProfile = FamilyProfile {
    warnings: "-Wall -Wextra",
    release: "-O3 -funroll-all-loops",
    debug: "-O0 -g3",
};

/// Default flag profile for a compiler family, if one is defined.
///
/// Families without a profile are deliberately left alone; their flags
/// come only from the override tiers. Absence is not an error.
pub fn vendor_profile(vendor: CompilerVendor) -> Option<&'static FamilyProfile> {
    match vendor {
        CompilerVendor::Gnu => Some(&GNU_PROFILE),
        _ => None,
    }
}

/// Apply the family default profile to `state`.
///
/// Skipped entirely when `FCFLAGS` is present; the environment always
/// wins over computed defaults. Unrecognized families are a silent
/// no-op.
pub fn apply_vendor_profile(env: &EnvFlags, state: &mut ResolvedFortran) {
    if env.fcflags.is_some() {
        tracing::debug!("FCFLAGS is set; skipping compiler family defaults");
        return;
    }

    let Some(vendor) = state.vendor() else {
        return;
    };

    let Some(profile) = vendor_profile(vendor) else {
        tracing::debug!("no default flag profile for {} Fortran", vendor);
        return;
    };

    state.flags.append_general(profile.warnings);
    state.flags.set_release(profile.release);
    state.flags.set_debug(profile.debug);

    state.provenance.push(FlagEntry::new(
        FlagScope::General,
        profile.warnings,
        FlagSource::VendorDefault,
    ));
    state.provenance.push(FlagEntry::new(
        FlagScope::Release,
        profile.release,
        FlagSource::VendorDefault,
    ));
    state.provenance.push(FlagEntry::new(
        FlagScope::Debug,
        profile.debug,
        FlagSource::VendorDefault,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn gnu_state() -> ResolvedFortran {
        ResolvedFortran {
            enabled: true,
            compiler: Some(PathBuf::from("/usr/bin/gfortran")),
            compiler_id: Some("GNU".to_string()),
            compiler_version: Some("13.2".to_string()),
            ..ResolvedFortran::default()
        }
    }

    #[test]
    fn test_gnu_profile_applied() {
        let mut state = gnu_state();
        apply_vendor_profile(&EnvFlags::default(), &mut state);

        assert_eq!(state.flags.general, "-Wall -Wextra");
        assert_eq!(state.flags.release, "-O3 -funroll-all-loops");
        assert_eq!(state.flags.debug, "-O0 -g3");
        assert_eq!(state.provenance.len(), 3);
        assert!(state
            .provenance
            .iter()
            .all(|e| e.source == FlagSource::VendorDefault));
    }

    #[test]
    fn test_gnu_warnings_append_to_existing() {
        let mut state = gnu_state();
        state.flags.set_general("-fopenmp");
        apply_vendor_profile(&EnvFlags::default(), &mut state);

        assert_eq!(state.flags.general, "-fopenmp -Wall -Wextra");
    }

    #[test]
    fn test_skipped_when_fcflags_present() {
        let mut state = gnu_state();
        state.flags.set_general("-O2");
        apply_vendor_profile(&EnvFlags::with_fcflags("-O2"), &mut state);

        assert_eq!(state.flags.general, "-O2");
        assert!(state.flags.release.is_empty());
        assert!(state.flags.debug.is_empty());
        assert!(state.provenance.is_empty());
    }

    #[test]
    fn test_other_family_is_silent_noop() {
        let mut state = gnu_state();
        state.compiler_id = Some("OtherFamily".to_string());
        let before = state.clone();

        apply_vendor_profile(&EnvFlags::default(), &mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_intel_has_no_profile_yet() {
        assert!(vendor_profile(CompilerVendor::Intel).is_none());
        assert!(vendor_profile(CompilerVendor::IntelLlvm).is_none());
        assert!(vendor_profile(CompilerVendor::Gnu).is_some());
    }

    #[test]
    fn test_no_identity_is_noop() {
        let mut state = ResolvedFortran::default();
        apply_vendor_profile(&EnvFlags::default(), &mut state);
        assert_eq!(state, ResolvedFortran::default());
    }
}
