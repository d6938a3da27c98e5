//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`]. Creation and
//! resolution errors are programmer or configuration errors: they are reported
//! synchronously and never retried.

use std::io;

use thiserror::Error;

use trellis_core::group::{Group, InvalidGroup};

use crate::extension::ExtensionKind;

/// Error type returned by element listeners.
pub type ListenerError = Box<dyn std::error::Error>;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error(transparent)]
    InvalidGroup(#[from] InvalidGroup),

    #[error("can not create element: an element in group `{}` already has id `{id}`", .group.plural())]
    DuplicateId { group: Group, id: String },

    #[error("no {kind} named `{name}` is registered")]
    UnknownExtension { kind: ExtensionKind, name: String },

    #[error("listener for `{event}` failed: {source}")]
    Listener {
        event: String,
        #[source]
        source: ListenerError,
    },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TrellisError {
    /// Create a new `UnknownExtension` error.
    pub fn unknown_extension(kind: ExtensionKind, name: impl Into<String>) -> Self {
        Self::UnknownExtension {
            kind,
            name: name.into(),
        }
    }
}
