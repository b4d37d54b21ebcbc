//! Test fixtures for common test scenarios.
//!
//! Pre-built toolchain signals and resolution records matching what the
//! probe and the configure pipeline produce on a healthy GNU host.

use std::path::{Path, PathBuf};

use crate::configure::probe::FortranToolchain;
use crate::configure::resolved::ResolvedFortran;
use crate::core::compiler::CompilerIdentity;
use crate::core::flags::{FlagEntry, FlagScope, FlagSet, FlagSource};

/// Version banners as real compilers print them.
pub mod banners {
    pub const GNU: &str = "GNU Fortran (GCC) 13.2.0";
    pub const INTEL_LLVM: &str = "ifx (IFX) 2024.0.0 20231017";
    pub const INTEL_CLASSIC: &str = "ifort (IFORT) 2021.10.0 20230609";
    pub const FLANG: &str = "flang-new version 18.1.8";
    pub const NAG: &str = "NAG Fortran Compiler Release 7.1(Hanzomon) Build 7145";
    pub const UNKNOWN: &str = "Mystery Fortran Translator 1.0";
}

/// A verified GNU toolchain.
pub fn working_gnu_toolchain() -> FortranToolchain {
    working_toolchain("GNU", "13.2")
}

/// A verified toolchain with the given identity.
pub fn working_toolchain(id: &str, version: &str) -> FortranToolchain {
    FortranToolchain::working("/usr/bin/fake-fc", CompilerIdentity::new(id, version))
}

/// A compiler that was found but whose banner is unrecognizable.
pub fn identityless_toolchain() -> FortranToolchain {
    FortranToolchain {
        compiler: Some(PathBuf::from("/usr/bin/mystery-fc")),
        identity: None,
        works: false,
        works_detail: None,
    }
}

/// A GNU compiler that fails its works-check with `detail` on stderr.
pub fn broken_gnu_toolchain(detail: &str) -> FortranToolchain {
    FortranToolchain {
        compiler: Some(PathBuf::from("/usr/bin/broken-fc")),
        identity: Some(CompilerIdentity::new("GNU", "13.2")),
        works: false,
        works_detail: Some(detail.to_string()),
    }
}

/// A fully resolved GNU record, as the configure pipeline leaves it
/// when no overrides are in play.
pub fn resolved_gnu(build_dir: &Path) -> ResolvedFortran {
    ResolvedFortran {
        enabled: true,
        compiler: Some(PathBuf::from("/usr/bin/gfortran")),
        compiler_id: Some("GNU".to_string()),
        compiler_version: Some("13.2".to_string()),
        module_dir: Some(build_dir.join("include").join("fortran")),
        flags: FlagSet {
            general: "-Wall -Wextra".to_string(),
            release: "-O3 -funroll-all-loops".to_string(),
            debug: "-O0 -g3".to_string(),
        },
        provenance: vec![
            FlagEntry::new(
                FlagScope::General,
                "-Wall -Wextra",
                FlagSource::VendorDefault,
            ),
            FlagEntry::new(
                FlagScope::Release,
                "-O3 -funroll-all-loops",
                FlagSource::VendorDefault,
            ),
            FlagEntry::new(FlagScope::Debug, "-O0 -g3", FlagSource::VendorDefault),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configure::probe::parse_banner;

    #[test]
    fn test_banners_match_parser() {
        assert_eq!(parse_banner(banners::GNU).unwrap().id, "GNU");
        assert_eq!(parse_banner(banners::INTEL_LLVM).unwrap().id, "IntelLLVM");
        assert_eq!(parse_banner(banners::INTEL_CLASSIC).unwrap().id, "Intel");
        assert_eq!(parse_banner(banners::FLANG).unwrap().id, "Flang");
        assert_eq!(parse_banner(banners::NAG).unwrap().id, "NAG");
        assert!(parse_banner(banners::UNKNOWN).is_none());
    }

    #[test]
    fn test_resolved_gnu_is_self_consistent() {
        let resolved = resolved_gnu(Path::new("build"));
        assert!(resolved.enabled);
        assert_eq!(
            resolved.module_dir,
            Some(PathBuf::from("build").join("include").join("fortran"))
        );
        // Fingerprint must be stable for the canned record.
        assert_eq!(resolved.fingerprint(), resolved_gnu(Path::new("build")).fingerprint());
    }
}
