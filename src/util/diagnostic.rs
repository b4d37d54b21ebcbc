//! User-friendly diagnostic messages.
//!
//! Warnings produced during resolution (an active `FCFLAGS` override,
//! extra flags that will never apply) are reported through `Diagnostic`
//! so every message carries its context lines and suggested fixes. The
//! two fatal configuration errors live in `configure::errors` instead.

use std::fmt;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
                Severity::Note => "\x1b[1;36mnote\x1b[0m",
                Severity::Help => "\x1b[1;32mhelp\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Note => "note",
                Severity::Help => "help",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            for suggestion in &self.suggestions {
                output.push_str(&format!("{}: {}\n", help_prefix, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Warning for an active `FCFLAGS` override.
pub fn fcflags_override_warning(value: &str) -> Diagnostic {
    Diagnostic::warning(format!("FCFLAGS is set to '{}'", value))
        .with_context("the environment value replaces configured extra flags and vendor defaults")
        .with_suggestion("unset FCFLAGS to use the configured flag sources")
}

/// Warning for extra flags shadowed by an `FCFLAGS` override.
pub fn shadowed_extra_flags_warning(extra: &str, fcflags: &str) -> Diagnostic {
    Diagnostic::warning(format!("extra flags '{}' are shadowed by FCFLAGS", extra))
        .with_context(format!(
            "FCFLAGS='{}' replaces every configured flag source",
            fcflags
        ))
        .with_suggestion("unset FCFLAGS to apply the configured extra flags")
}

/// Warning for extra flags that will never apply while support is disabled.
pub fn unused_extra_flags_warning(extra: &str) -> Diagnostic {
    Diagnostic::warning(format!(
        "Fortran support is disabled; extra flags '{}' will not be applied",
        extra
    ))
    .with_suggestion("enable support (drop --no-fortran, or set `enabled = true` under [fortran])")
}
