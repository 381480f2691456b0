//! One handler module per subcommand.

pub mod action;
pub mod completions;
pub mod controller;
pub mod module;
pub mod project;
