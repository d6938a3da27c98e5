//! Error adapter for converting TrellisError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use trellis::{ExtensionKind, TrellisError};

/// Adapter giving a [`TrellisError`] a diagnostic code and help text.
pub struct Reportable<'a>(pub &'a TrellisError);

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            TrellisError::InvalidGroup(_) => "trellis::invalid_group",
            TrellisError::DuplicateId { .. } => "trellis::duplicate_id",
            TrellisError::UnknownExtension { .. } => "trellis::unknown_extension",
            TrellisError::Listener { .. } => "trellis::listener",
            TrellisError::Layout(_) => "trellis::layout",
            TrellisError::Format(_) => "trellis::format",
            TrellisError::Config(_) => "trellis::config",
            TrellisError::Io(_) => "trellis::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: String = match self.0 {
            TrellisError::InvalidGroup(_) => {
                "elements must be listed under `nodes` or `edges`".to_string()
            }
            TrellisError::DuplicateId { .. } => {
                "give the element a different id, or omit it to have one generated".to_string()
            }
            TrellisError::UnknownExtension { kind, .. } => {
                let builtins = match kind {
                    ExtensionKind::Renderer => "headless",
                    ExtensionKind::Layout => "grid, preset",
                    ExtensionKind::Format => "json",
                };
                format!("built-in {kind}s: {builtins}")
            }
            TrellisError::Format(_) => "check that the input matches the selected format".to_string(),
            TrellisError::Config(_) => "see `trellis --help` for configuration locations".to_string(),
            TrellisError::Listener { .. }
            | TrellisError::Layout(_)
            | TrellisError::Io(_) => return None,
        };
        Some(Box::new(help))
    }
}

/// Convert a [`TrellisError`] into a list of reportable errors.
pub fn to_reportables(err: &TrellisError) -> Vec<Reportable<'_>> {
    vec![Reportable(err)]
}
