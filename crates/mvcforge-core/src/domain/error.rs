//! Domain layer errors.
//!
//! Three families, kept distinguishable so callers (and tests) can assert
//! on them individually:
//!
//! - [`DomainError::Validation`]: a prerequisite is missing or an input is
//!   unusable; nothing has been written.
//! - [`DomainError::Conflict`]: the thing being generated already exists;
//!   the target file is untouched.
//! - [`DomainError::Parse`]: an existing file does not match the shape
//!   this engine generates; never auto-repaired.

use std::fmt;
use thiserror::Error;

/// Errors raised by the naming/resolution/synthesis/merge pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing prerequisite or invalid input. Fatal for the command.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The generated unit already exists.
    #[error("the {kind} '{name}' already exists")]
    Conflict { kind: ConflictKind, name: String },

    /// An existing file does not match the expected generated shape.
    #[error("cannot parse {what}: {reason}")]
    Parse { what: String, reason: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(kind: ConflictKind, name: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            name: name.into(),
        }
    }

    pub fn parse(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            reason: reason.into(),
        }
    }

    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(msg) => vec![
                format!("Input problem: {msg}"),
                "Check the command arguments and the project path".into(),
            ],
            Self::Conflict { kind, name } => vec![
                format!("A {kind} named '{name}' is already present"),
                "Pick a different name, or edit the existing one by hand".into(),
            ],
            Self::Parse { what, .. } => vec![
                format!("{what} does not look like a file generated by this tool"),
                "Hand-restructured files cannot be merged automatically".into(),
            ],
        }
    }
}

/// What kind of generated unit collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Module,
    Controller,
    ActionMethod,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Module => "module",
            Self::Controller => "controller",
            Self::ActionMethod => "action method",
        };
        f.write_str(s)
    }
}
