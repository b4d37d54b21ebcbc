//! Optional Fortran toolchain toggle.
//!
//! First of the two configuration resolvers. Decides whether Fortran
//! support is on, verifies the probed toolchain is usable, resolves the
//! module output directory, and merges the general flag string from its
//! override sources.

use crate::configure::context::ConfigureContext;
use crate::configure::errors::ConfigureError;
use crate::configure::probe::ToolchainProbe;
use crate::configure::resolved::ResolvedFortran;
use crate::core::flags::{FlagEntry, FlagScope, FlagSource};

/// Resolve Fortran support into `state`.
///
/// Disabled support is a clean no-op: flag state and module directory
/// are left untouched. Enabled support verifies the probed toolchain
/// before touching any state, so a fatal error never leaves a
/// half-resolved record behind.
///
/// The general flag string resolves first-match-wins across the
/// override tiers: `FCFLAGS` replaces the whole string outright,
/// otherwise configured extra flags are appended to whatever is already
/// there.
pub fn resolve_fortran_support(
    ctx: &ConfigureContext,
    probe: &dyn ToolchainProbe,
    state: &mut ResolvedFortran,
) -> Result<(), ConfigureError> {
    if !ctx.settings.enabled {
        state.enabled = false;
        if let Some(extra) = &ctx.settings.extra_fcflags {
            tracing::debug!("Fortran support disabled; ignoring extra flags '{}'", extra);
        }
        return Ok(());
    }

    let toolchain = probe.probe(ctx);

    // Both guard checks run before any state mutation.
    let Some(identity) = toolchain.identity else {
        return Err(ConfigureError::MissingCompilerIdentity {
            compiler: toolchain.compiler,
        });
    };
    let Some(compiler) = toolchain.compiler else {
        return Err(ConfigureError::MissingCompilerIdentity { compiler: None });
    };
    if !toolchain.works {
        return Err(ConfigureError::CompilerNotWorking {
            compiler,
            identity,
            detail: toolchain.works_detail,
        });
    }

    tracing::debug!("Fortran compiler verified: {} ({})", compiler.display(), identity);

    state.enabled = true;
    state.compiler = Some(compiler);
    state.compiler_id = Some(identity.id);
    state.compiler_version = Some(identity.version);
    state.module_dir = Some(ctx.module_dir());

    if let Some(fcflags) = &ctx.env.fcflags {
        // Environment wins outright; extra flags are shadowed.
        state.flags.set_general(fcflags);
        state.provenance.push(FlagEntry::new(
            FlagScope::General,
            fcflags,
            FlagSource::Environment,
        ));
        tracing::info!("FCFLAGS is set to '{}'", fcflags);
    } else if let Some(extra) = &ctx.settings.extra_fcflags {
        state.flags.append_general(extra);
        state.provenance.push(FlagEntry::new(
            FlagScope::General,
            extra,
            FlagSource::ExtraFlags,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::configure::context::{EnvFlags, FortranSettings};
    use crate::configure::probe::FortranToolchain;
    use crate::test_support::{
        broken_gnu_toolchain, identityless_toolchain, working_gnu_toolchain, CannedProbe,
        UnreachableProbe,
    };

    fn ctx(settings: FortranSettings, env: EnvFlags) -> ConfigureContext {
        ConfigureContext::new("build", settings, env)
    }

    #[test]
    fn test_disabled_is_untouched_noop() {
        let ctx = ctx(
            FortranSettings::new()
                .with_enabled(false)
                .with_extra_fcflags("-fopenmp"),
            EnvFlags::default(),
        );
        let mut state = ResolvedFortran::default();

        // The probe must never run when support is off.
        resolve_fortran_support(&ctx, &UnreachableProbe, &mut state).unwrap();

        assert_eq!(state, ResolvedFortran::default());
    }

    #[test]
    fn test_missing_identity_aborts() {
        let ctx = ctx(FortranSettings::new(), EnvFlags::default());
        let probe = CannedProbe::new(identityless_toolchain());
        let mut state = ResolvedFortran::default();

        let err = resolve_fortran_support(&ctx, &probe, &mut state).unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::MissingCompilerIdentity { compiler: Some(_) }
        ));
        assert_eq!(state, ResolvedFortran::default());
    }

    #[test]
    fn test_no_compiler_aborts() {
        let ctx = ctx(FortranSettings::new(), EnvFlags::default());
        let probe = CannedProbe::new(FortranToolchain::default());
        let mut state = ResolvedFortran::default();

        let err = resolve_fortran_support(&ctx, &probe, &mut state).unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::MissingCompilerIdentity { compiler: None }
        ));
    }

    #[test]
    fn test_broken_compiler_aborts_before_mutation() {
        let ctx = ctx(
            FortranSettings::new().with_extra_fcflags("-fopenmp"),
            EnvFlags::default(),
        );
        let probe = CannedProbe::new(broken_gnu_toolchain("internal compiler error"));
        let mut state = ResolvedFortran::default();
        state.flags.set_general("-cpp");

        let err = resolve_fortran_support(&ctx, &probe, &mut state).unwrap_err();
        match err {
            ConfigureError::CompilerNotWorking { detail, .. } => {
                assert_eq!(detail.as_deref(), Some("internal compiler error"));
            }
            other => panic!("expected CompilerNotWorking, got {:?}", other),
        }

        assert_eq!(state.flags.general, "-cpp");
        assert!(state.module_dir.is_none());
        assert!(!state.enabled);
    }

    #[test]
    fn test_resolves_toolchain_and_module_dir() {
        let ctx = ctx(FortranSettings::new(), EnvFlags::default());
        let probe = CannedProbe::new(working_gnu_toolchain());
        let mut state = ResolvedFortran::default();

        resolve_fortran_support(&ctx, &probe, &mut state).unwrap();

        assert!(state.enabled);
        assert_eq!(state.compiler_id.as_deref(), Some("GNU"));
        assert_eq!(state.compiler_version.as_deref(), Some("13.2"));
        assert_eq!(
            state.module_dir,
            Some(PathBuf::from("build").join("include").join("fortran"))
        );
        assert!(state.flags.is_empty());
        assert!(state.provenance.is_empty());
    }

    #[test]
    fn test_extra_flags_append_once() {
        let ctx = ctx(
            FortranSettings::new().with_extra_fcflags("-fopenmp"),
            EnvFlags::default(),
        );
        let probe = CannedProbe::new(working_gnu_toolchain());
        let mut state = ResolvedFortran::default();
        state.flags.set_general("-cpp");

        resolve_fortran_support(&ctx, &probe, &mut state).unwrap();

        assert_eq!(state.flags.general, "-cpp -fopenmp");
        assert_eq!(state.provenance.len(), 1);
        assert_eq!(state.provenance[0].source, FlagSource::ExtraFlags);
    }

    #[test]
    fn test_extra_flags_into_empty_base() {
        let ctx = ctx(
            FortranSettings::new().with_extra_fcflags("-fopenmp"),
            EnvFlags::default(),
        );
        let probe = CannedProbe::new(working_gnu_toolchain());
        let mut state = ResolvedFortran::default();

        resolve_fortran_support(&ctx, &probe, &mut state).unwrap();

        assert_eq!(state.flags.general, "-fopenmp");
    }

    #[test]
    fn test_environment_replaces_not_appends() {
        let ctx = ctx(
            FortranSettings::new().with_extra_fcflags("-fopenmp"),
            EnvFlags::with_fcflags("-O2 -ffast-math"),
        );
        let probe = CannedProbe::new(working_gnu_toolchain());
        let mut state = ResolvedFortran::default();
        state.flags.set_general("-cpp");

        resolve_fortran_support(&ctx, &probe, &mut state).unwrap();

        assert_eq!(state.flags.general, "-O2 -ffast-math");
        assert_eq!(state.provenance.len(), 1);
        assert_eq!(state.provenance[0].source, FlagSource::Environment);
    }
}
