//! Configuration error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::compiler::CompilerIdentity;

/// Fatal error while resolving Fortran support.
///
/// Both variants abort configuration; there is no degraded mode once
/// Fortran support is requested.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigureError {
    /// No compiler was found, or the one found reports an
    /// unrecognizable identity.
    #[error("{}", missing_identity_message(.compiler))]
    #[diagnostic(
        code(slipway::configure::missing_compiler_identity),
        help(
            "install a Fortran compiler (gfortran, flang, ifx) or set FC to one; \
             pass --no-fortran to configure without Fortran support"
        )
    )]
    MissingCompilerIdentity { compiler: Option<PathBuf> },

    /// The compiler identified itself but failed to compile a trivial
    /// test program.
    #[error(
        "Fortran compiler `{}` ({}) is not able to compile a simple test program{}",
        .compiler.display(),
        .identity,
        .detail.as_ref().map(|d| format!(":\n{}", d)).unwrap_or_default()
    )]
    #[diagnostic(
        code(slipway::configure::compiler_not_working),
        help("check that the compiler installation is complete and on a supported host")
    )]
    CompilerNotWorking {
        compiler: PathBuf,
        identity: CompilerIdentity,
        detail: Option<String>,
    },
}

fn missing_identity_message(compiler: &Option<PathBuf>) -> String {
    match compiler {
        Some(path) => format!(
            "unable to determine the identity of Fortran compiler `{}`",
            path.display()
        ),
        None => "no Fortran compiler found".to_string(),
    }
}
