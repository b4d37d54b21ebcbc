//! Build-directory configuration.
//!
//! Runs the toolchain toggle and the family flag profiles against one
//! build directory, then persists the resolution record consumed by
//! later build stages.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use crate::configure::{
    apply_vendor_profile, resolve_fortran_support, ConfigureContext, EnvFlags, FortranSettings,
    ResolvedFortran, StoredResolution, ToolchainProbe,
};
use crate::util::config::load_config;
use crate::util::diagnostic;
use crate::util::fs::ensure_dir;
use crate::util::shell::Status;
use crate::util::{GlobalContext, Shell};

/// Options for the configure command.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Build directory to configure (relative paths resolve against cwd)
    pub build_dir: PathBuf,

    /// Override the enable toggle from the command line
    pub enabled: Option<bool>,

    /// Extra flags from the command line, overriding config
    pub extra_fcflags: Option<String>,

    /// Fortran compiler chosen on the command line
    pub fc: Option<PathBuf>,

    /// Resolve and report without writing anything
    pub show: bool,
}

/// Outcome of a configuration pass.
#[derive(Debug, Clone)]
pub struct ConfigureReport {
    /// The resolution the pass produced
    pub resolved: ResolvedFortran,

    /// Fingerprint of the resolution
    pub fingerprint: String,

    /// False when an up-to-date record was left in place
    pub changed: bool,

    /// Where the record lives
    pub output_path: PathBuf,
}

/// Run a configuration pass for one build directory.
///
/// Settings merge config-file values with command-line overrides; the
/// environment is an explicit input so callers decide where it comes
/// from. With `show` set the pass resolves and reports but creates
/// nothing on disk.
pub fn configure(
    ctx: &GlobalContext,
    shell: &Shell,
    probe: &dyn ToolchainProbe,
    env: EnvFlags,
    options: ConfigureOptions,
) -> Result<ConfigureReport> {
    let start = Instant::now();

    let build_dir = if options.build_dir.is_absolute() {
        options.build_dir.clone()
    } else {
        ctx.cwd().join(&options.build_dir)
    };

    shell.status(Status::Configuring, build_dir.display());

    let config = load_config(&ctx.config_path(), &ctx.project_config_path());
    let mut settings = FortranSettings::from_config(&config);
    if let Some(enabled) = options.enabled {
        settings = settings.with_enabled(enabled);
    }
    if let Some(extra) = &options.extra_fcflags {
        settings = settings.with_extra_fcflags(extra);
    }
    if let Some(fc) = &options.fc {
        settings = settings.with_compiler(fc);
    }

    if let Some(extra) = &settings.extra_fcflags {
        if !settings.enabled {
            diagnostic::emit(
                &diagnostic::unused_extra_flags_warning(extra),
                shell.use_color(),
            );
        } else if let Some(fcflags) = &env.fcflags {
            diagnostic::emit(
                &diagnostic::shadowed_extra_flags_warning(extra, fcflags),
                shell.use_color(),
            );
        }
    }

    let configure_ctx = ConfigureContext::new(build_dir, settings, env);

    if configure_ctx.settings.enabled {
        shell.status(Status::Probing, "Fortran toolchain");
    }

    let mut resolved = ResolvedFortran::default();
    resolve_fortran_support(&configure_ctx, probe, &mut resolved)?;
    apply_vendor_profile(&configure_ctx.env, &mut resolved);

    if resolved.enabled {
        shell.status(
            Status::Resolved,
            format!(
                "{} Fortran {} ({})",
                resolved.compiler_id.as_deref().unwrap_or("unknown"),
                resolved.compiler_version.as_deref().unwrap_or("unknown"),
                resolved
                    .compiler
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
        );
    } else {
        shell.status(Status::Skipped, "Fortran support disabled");
    }

    let stored = StoredResolution::new(resolved);
    let output_path = configure_ctx.resolved_path();

    if options.show {
        return Ok(ConfigureReport {
            resolved: stored.fortran,
            fingerprint: stored.fingerprint,
            changed: false,
            output_path,
        });
    }

    // Skip the rewrite when the recorded resolution is unchanged.
    let fresh = match StoredResolution::load(&output_path) {
        Ok(prev) => prev.is_compatible() && prev.fingerprint == stored.fingerprint,
        Err(_) => false,
    };

    let changed = if fresh {
        shell.status(
            Status::Skipped,
            format!("{} is up to date", output_path.display()),
        );
        false
    } else {
        ensure_dir(configure_ctx.build_dir())?;
        if let Some(module_dir) = &stored.fortran.module_dir {
            ensure_dir(module_dir)?;
        }
        stored.save(&output_path)?;
        shell.status(Status::Written, output_path.display());
        true
    };

    shell.status(
        Status::Finished,
        format!("configuration in {:.2}s", start.elapsed().as_secs_f64()),
    );

    Ok(ConfigureReport {
        resolved: stored.fortran,
        fingerprint: stored.fingerprint,
        changed,
        output_path,
    })
}
