//! `slipway flags` command

use anyhow::{Context, Result};

use crate::cli::FlagsArgs;
use crate::GlobalOptions;
use slipway::configure::StoredResolution;
use slipway::core::flags::FlagScope;
use slipway::util::GlobalContext;
use slipway::BuildMode;

pub fn execute(args: FlagsArgs, _global_opts: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let build_dir = if args.build_dir.is_absolute() {
        args.build_dir.clone()
    } else {
        ctx.cwd().join(&args.build_dir)
    };
    let record_path = build_dir.join("fortran.toml");

    let stored = StoredResolution::load(&record_path).with_context(|| {
        format!(
            "no resolution record in `{}`\n\
             help: Run `slipway configure {}` first",
            build_dir.display(),
            args.build_dir.display()
        )
    })?;

    if args.json {
        let payload = serde_json::json!({
            "enabled": stored.fortran.enabled,
            "mode": args.mode.as_str(),
            "effective": stored.fortran.flags.effective(args.mode),
            "flags": stored.fortran.flags,
            "provenance": stored.fortran.provenance,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if !stored.fortran.enabled {
        println!("# Fortran support is disabled in `{}`", build_dir.display());
        return Ok(());
    }

    if let (Some(id), Some(version)) = (&stored.fortran.compiler_id, &stored.fortran.compiler_version)
    {
        println!("# Compiler: {} Fortran {}", id, version);
    }

    // Print flags for the chosen mode with provenance
    println!("# Fortran flags ({} mode):", args.mode);

    let mode_scope = match args.mode {
        BuildMode::Release => FlagScope::Release,
        BuildMode::Debug => FlagScope::Debug,
    };

    for entry in stored
        .fortran
        .provenance
        .iter()
        .filter(|e| e.scope == FlagScope::General || e.scope == mode_scope)
    {
        println!("  {}    # from: {}", entry.value, entry.source.describe());
    }

    println!();
    println!("# Effective: {}", stored.fortran.flags.effective(args.mode));

    Ok(())
}
