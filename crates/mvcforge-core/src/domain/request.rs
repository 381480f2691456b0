//! Raw scaffolding input.
//!
//! A [`ScaffoldRequest`] captures exactly what the user typed, before any
//! convention transform runs. It is immutable once built; everything derived
//! from it lives in [`crate::domain::resolve::ResolvedNames`].

use serde::Serialize;
use std::path::PathBuf;

/// Raw user input for a scaffolding command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldRequest {
    /// Project root. Defaults to `.` when the user gives no path.
    pub path: PathBuf,
    /// Raw module identifier, exactly as typed.
    pub module: Option<String>,
    /// Raw controller identifier.
    pub controller: Option<String>,
    /// Raw action identifier.
    pub action: Option<String>,
    /// Literal mode: keep user casing, only normalise separators.
    pub ignore_conventions: bool,
    /// Suppress all generated doc comments.
    pub no_docblocks: bool,
    /// Skip config registration (controller creation only).
    pub no_config: bool,
    /// Register a literal route for the new controller.
    pub single_route: bool,
}

impl ScaffoldRequest {
    /// Request rooted at `path` with no identifiers and default flags.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let mut path = path.into();
        if path.as_os_str().is_empty() {
            path = PathBuf::from(".");
        }
        Self {
            path,
            module: None,
            controller: None,
            action: None,
            ignore_conventions: false,
            no_docblocks: false,
            no_config: false,
            single_route: false,
        }
    }

    pub fn module(mut self, name: impl Into<String>) -> Self {
        self.module = Some(name.into());
        self
    }

    pub fn controller(mut self, name: impl Into<String>) -> Self {
        self.controller = Some(name.into());
        self
    }

    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.action = Some(name.into());
        self
    }

    pub fn ignore_conventions(mut self, flag: bool) -> Self {
        self.ignore_conventions = flag;
        self
    }

    pub fn no_docblocks(mut self, flag: bool) -> Self {
        self.no_docblocks = flag;
        self
    }

    pub fn no_config(mut self, flag: bool) -> Self {
        self.no_config = flag;
        self
    }

    pub fn single_route(mut self, flag: bool) -> Self {
        self.single_route = flag;
        self
    }
}
