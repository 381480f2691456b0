//! Application services - use case orchestration.

pub mod bootstrap;
pub mod scaffold;

pub use bootstrap::{BootstrapService, ProjectReport};
pub use scaffold::{
    ActionReport, ConfigRegistration, ControllerReport, ModuleReport, ScaffoldService,
};
