//! Slipway CLI - A configure-time toolchain resolver for Fortran projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slipway::util::shell::{ColorChoice, Shell};
use slipway::ConfigureError;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Options shared by every subcommand.
pub struct GlobalOptions {
    pub shell: Shell,
    pub verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        // Configuration aborts carry structured diagnostics with help
        // text; everything else renders as a plain error chain.
        match e.downcast::<ConfigureError>() {
            Ok(configure) => eprintln!("{:?}", miette::Report::new(configure)),
            Err(other) => eprintln!("error: {:#}", other),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let global_opts = GlobalOptions {
        shell: Shell::from_flags(cli.quiet, cli.verbose, color),
        verbose: cli.verbose,
    };

    // Execute command
    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, &global_opts),
        Commands::Flags(args) => commands::flags::execute(args, &global_opts),
        Commands::Doctor(args) => commands::doctor::execute(args, &global_opts),
        Commands::Toolchain(args) => commands::toolchain::execute(args, &global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
