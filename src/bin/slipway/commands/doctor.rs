//! `slipway doctor` command

use anyhow::Result;

use crate::cli::DoctorArgs;
use crate::GlobalOptions;
use slipway::ops::{doctor, format_report, DoctorOptions};
use slipway::util::diagnostic;
use slipway::util::shell::Status;
use slipway::util::GlobalContext;
use slipway::EnvFlags;

pub fn execute(args: DoctorArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let env = EnvFlags::capture();

    let shell = &global_opts.shell;
    shell.status(Status::Checking, "Fortran toolchain health");

    // An active FCFLAGS override changes what configure would produce;
    // surface it up front, on stderr.
    if let Some(value) = &env.fcflags {
        diagnostic::emit(&diagnostic::fcflags_override_warning(value), shell.use_color());
    }

    let options = DoctorOptions {
        verbose: global_opts.verbose,
    };

    let report = doctor(&ctx, &env, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let output = format_report(&report, global_opts.verbose);
        print!("{}", output);
    }

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
