//! `slipway toolchain` command

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::{ToolchainArgs, ToolchainCommands, ToolchainOverrideArgs};
use crate::GlobalOptions;
use slipway::configure::parse_banner;
use slipway::util::config::{load_config, Config};
use slipway::util::process::{find_executable, find_fortran_compiler};
use slipway::util::shell::Status;
use slipway::util::GlobalContext;
use slipway::{EnvFlags, FortranSettings};

pub fn execute(args: ToolchainArgs, global_opts: &GlobalOptions) -> Result<()> {
    match args.command {
        ToolchainCommands::Show => show_toolchain(),
        ToolchainCommands::Override(override_args) => {
            override_toolchain(override_args, global_opts)
        }
    }
}

fn show_toolchain() -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = load_config(&ctx.config_path(), &ctx.project_config_path());
    let settings = FortranSettings::from_config(&config);

    println!("Toolchain:");
    println!();

    // An explicit choice is shown as missing rather than silently
    // replaced; discovery only runs when nothing was chosen.
    match &settings.compiler {
        Some(chosen) => {
            let resolved = if chosen.exists() {
                Some(chosen.clone())
            } else {
                find_executable(&chosen.to_string_lossy())
            };

            match resolved {
                Some(fc) => print_compiler(&fc)?,
                None => println!("  FC:      {} (configured, but missing)", chosen.display()),
            }
        }
        None => match find_fortran_compiler() {
            Some(fc) => print_compiler(&fc)?,
            None => println!("  FC:      not found"),
        },
    }

    println!();
    println!("  Enabled: {}", settings.enabled);
    if let Some(extra) = &settings.extra_fcflags {
        println!("  Extra:   {}", extra);
    }

    println!();

    // Environment variables
    println!("Environment:");
    let env = EnvFlags::capture();
    if let Some(fc) = &env.fc {
        println!("  FC={}", fc);
    }
    if let Some(fcflags) = &env.fcflags {
        println!("  FCFLAGS={}", fcflags);
    }

    Ok(())
}

fn print_compiler(fc: &Path) -> Result<()> {
    println!("  FC:      {}", fc.display());

    // Try to get version
    let output = std::process::Command::new(fc).arg("--version").output();

    if let Ok(output) = output {
        let stdout = String::from_utf8_lossy(&output.stdout);
        if let Some(first_line) = stdout.lines().next() {
            println!("           {}", first_line.trim());
        }
        match parse_banner(&stdout) {
            Some(identity) => println!(
                "           detected as {} Fortran {}",
                identity.id, identity.version
            ),
            None => println!("           (banner not recognized)"),
        }
    }

    Ok(())
}

fn override_toolchain(args: ToolchainOverrideArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;

    if args.fc.is_none() && args.extra_fc_flags.is_none() && !args.disable && !args.enable {
        bail!("nothing to override; pass --fc, --extra-fc-flags, --enable, or --disable");
    }

    let ctx = GlobalContext::new()?;
    let path = ctx.project_config_path();

    let mut config = Config::load_or_default(&path);

    if let Some(fc) = args.fc {
        config.fortran.fc = Some(fc);
    }
    if let Some(extra) = args.extra_fc_flags {
        config.fortran.extra_fcflags = Some(extra);
    }
    if args.disable {
        config.fortran.enabled = Some(false);
    } else if args.enable {
        config.fortran.enabled = Some(true);
    }

    config.save(&path)?;
    shell.status(Status::Written, path.display());

    Ok(())
}
