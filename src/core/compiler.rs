//! Fortran compiler identity types.
//!
//! The probe reports identity as a vendor id string plus a version
//! (mirroring the id strings build generators expose, e.g. `GNU` or
//! `IntelLLVM`). `CompilerVendor` is the typed view used when picking a
//! default flag profile.

/// Known Fortran compiler vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerVendor {
    /// GNU Fortran (gfortran)
    Gnu,
    /// Intel classic (ifort)
    Intel,
    /// Intel LLVM-based (ifx)
    IntelLlvm,
    /// LLVM Flang (flang-new / flang)
    Flang,
    /// NAG Fortran
    Nag,
    /// Cray Fortran
    Cray,
    /// Identified by the host but not a vendor this tool knows.
    Unknown,
}

impl CompilerVendor {
    /// Get the vendor id string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerVendor::Gnu => "GNU",
            CompilerVendor::Intel => "Intel",
            CompilerVendor::IntelLlvm => "IntelLLVM",
            CompilerVendor::Flang => "Flang",
            CompilerVendor::Nag => "NAG",
            CompilerVendor::Cray => "Cray",
            CompilerVendor::Unknown => "unknown",
        }
    }

    /// Resolve a vendor from an identity id string.
    ///
    /// Ids that match no known vendor map to `Unknown`; callers treat
    /// those as a no-op when selecting default profiles.
    pub fn from_id(id: &str) -> Self {
        match id {
            "GNU" => CompilerVendor::Gnu,
            "Intel" => CompilerVendor::Intel,
            "IntelLLVM" => CompilerVendor::IntelLlvm,
            "Flang" | "LLVMFlang" => CompilerVendor::Flang,
            "NAG" => CompilerVendor::Nag,
            "Cray" => CompilerVendor::Cray,
            _ => CompilerVendor::Unknown,
        }
    }
}

impl std::fmt::Display for CompilerVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a detected Fortran compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerIdentity {
    /// Vendor id string (e.g. "GNU")
    pub id: String,
    /// Compiler version, normalized to major.minor
    pub version: String,
}

impl CompilerIdentity {
    pub fn new(id: &str, version: &str) -> Self {
        CompilerIdentity {
            id: id.to_string(),
            version: version.to_string(),
        }
    }

    /// Typed vendor view of the identity id.
    pub fn vendor(&self) -> CompilerVendor {
        CompilerVendor::from_id(&self.id)
    }
}

impl std::fmt::Display for CompilerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}
