//! Resolved Fortran support and its on-disk record.
//!
//! `fortran.toml` in the build directory is the canonical record of a
//! configuration pass. A fingerprint over the resolution lets repeated
//! passes skip the rewrite when nothing changed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::compiler::CompilerVendor;
use crate::core::flags::{FlagEntry, FlagSet};
use crate::util::hash::Fingerprint;

/// Result of resolving Fortran support for one build directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFortran {
    /// Whether Fortran support ended up enabled.
    pub enabled: bool,

    /// Verified compiler path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<PathBuf>,

    /// Compiler family id (`GNU`, `IntelLLVM`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_id: Option<String>,

    /// Compiler version as `major.minor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,

    /// Directory that receives compiled module files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_dir: Option<PathBuf>,

    /// Resolved flag sets.
    #[serde(default)]
    pub flags: FlagSet,

    /// Where each flag decision came from, in application order.
    #[serde(rename = "flag", default, skip_serializing_if = "Vec::is_empty")]
    pub provenance: Vec<FlagEntry>,
}

impl ResolvedFortran {
    /// Compiler family parsed back from the recorded id.
    pub fn vendor(&self) -> Option<CompilerVendor> {
        self.compiler_id.as_deref().map(CompilerVendor::from_id)
    }

    /// Fingerprint over the semantic fields of the resolution.
    ///
    /// Provenance is derived from the same inputs and excluded.
    pub fn fingerprint(&self) -> String {
        let mut f = Fingerprint::new();
        f.update_bool(self.enabled);
        f.update_opt(self.compiler.as_ref().and_then(|p| p.to_str()));
        f.update_opt(self.compiler_id.as_deref());
        f.update_opt(self.compiler_version.as_deref());
        f.update_opt(self.module_dir.as_ref().and_then(|p| p.to_str()));
        f.update_str(&self.flags.general);
        f.update_str(&self.flags.release);
        f.update_str(&self.flags.debug);
        f.finish_short()
    }
}

/// On-disk form of a resolution, paired with its fingerprint.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredResolution {
    /// Record format version
    pub version: u32,

    /// Fingerprint of the contained resolution
    pub fingerprint: String,

    /// The resolution itself
    pub fortran: ResolvedFortran,
}

impl StoredResolution {
    pub fn new(fortran: ResolvedFortran) -> Self {
        let fingerprint = fortran.fingerprint();
        StoredResolution {
            version: 1,
            fingerprint,
            fortran,
        }
    }

    /// Load a stored resolution from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read resolution record: {}", path.display()))?;

        toml::from_str(&content).with_context(|| "failed to parse resolution record")
    }

    /// Save the stored resolution to a path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        // Add header comment
        let with_header = format!(
            "# This file is automatically generated by slipway.\n\
             # It is not intended for manual editing.\n\n\
             {content}"
        );

        std::fs::write(path, with_header)
            .with_context(|| format!("failed to write resolution record: {}", path.display()))?;

        Ok(())
    }

    /// Check if the record format is one this build understands.
    pub fn is_compatible(&self) -> bool {
        self.version == 1
    }
}
