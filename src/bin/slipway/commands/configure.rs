//! `slipway configure` command

use anyhow::Result;

use crate::cli::ConfigureArgs;
use crate::GlobalOptions;
use slipway::configure::CompilerProbe;
use slipway::ops::{configure, ConfigureOptions};
use slipway::util::GlobalContext;
use slipway::EnvFlags;

pub fn execute(args: ConfigureArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;

    let ctx = GlobalContext::new()?;

    let opts = ConfigureOptions {
        build_dir: args.build_dir,
        enabled: args.no_fortran.then_some(false),
        extra_fcflags: args.extra_fc_flags,
        fc: args.fc,
        show: args.show,
    };

    let report = configure(&ctx, shell, &CompilerProbe, EnvFlags::capture(), opts)?;

    if args.show {
        // The record that a non-show run would have written, on stdout.
        let record = toml::to_string_pretty(&report.resolved)?;
        print!("{}", record);
    }

    Ok(())
}
