//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use slipway::BuildMode;

/// Slipway - A configure-time toolchain resolver for Fortran projects
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the Fortran toolchain for a build directory
    Configure(ConfigureArgs),

    /// Show resolved Fortran flags and where each one came from
    Flags(FlagsArgs),

    /// Check the health of the Fortran environment
    Doctor(DoctorArgs),

    /// Toolchain management
    Toolchain(ToolchainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Build directory to configure
    #[arg(default_value = "build")]
    pub build_dir: PathBuf,

    /// Fortran compiler to use (overrides config and FC)
    #[arg(long, value_name = "PATH")]
    pub fc: Option<PathBuf>,

    /// Extra flags appended to the general Fortran flag string
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub extra_fc_flags: Option<String>,

    /// Configure without Fortran support
    #[arg(long)]
    pub no_fortran: bool,

    /// Resolve and print the record without writing anything
    #[arg(long)]
    pub show: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Build directory holding the resolution record
    #[arg(default_value = "build")]
    pub build_dir: PathBuf,

    /// Build mode to show effective flags for
    #[arg(long, default_value = "debug")]
    pub mode: BuildMode,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ToolchainArgs {
    #[command(subcommand)]
    pub command: ToolchainCommands,
}

#[derive(Subcommand)]
pub enum ToolchainCommands {
    /// Show current toolchain configuration
    Show,

    /// Override the toolchain for this project
    Override(ToolchainOverrideArgs),
}

#[derive(Args)]
pub struct ToolchainOverrideArgs {
    /// Fortran compiler path or name
    #[arg(long, value_name = "PATH")]
    pub fc: Option<PathBuf>,

    /// Extra flags appended to the general Fortran flag string
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub extra_fc_flags: Option<String>,

    /// Disable Fortran support for this project
    #[arg(long, conflicts_with = "enable")]
    pub disable: bool,

    /// Re-enable Fortran support for this project
    #[arg(long)]
    pub enable: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
