//! Application layer for mvcforge.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ScaffoldService, BootstrapService)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ActionReport, BootstrapService, ConfigRegistration, ControllerReport, ModuleReport,
    ProjectReport, ScaffoldService,
};

pub use ports::{ArchiveExtractor, CachedArchive, Filesystem, SkeletonCache, SkeletonSource};

pub use error::ApplicationError;
