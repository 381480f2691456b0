//! mvcforge core - hexagonal architecture implementation.
//!
//! This crate provides the domain and application layers for the mvcforge
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          mvcforge-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Services             │
//! │  (ScaffoldService, BootstrapService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, SkeletonSource, Cache, …)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    mvcforge-adapters (Infrastructure)   │
//! │ (LocalFilesystem, GithubSkeletonSource) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (naming, resolve, source, config)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mvcforge_core::{
//!     application::ScaffoldService,
//!     domain::ScaffoldRequest,
//! };
//!
//! let service = ScaffoldService::new(filesystem);
//! let report = service.create_module(&ScaffoldRequest::at(".").module("Blog"))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ActionReport, BootstrapService, ConfigRegistration, ControllerReport, ModuleReport,
        ProjectReport, ScaffoldService,
        ports::{ArchiveExtractor, CachedArchive, Filesystem, SkeletonCache, SkeletonSource},
    };
    pub use crate::domain::{ConflictKind, DocPolicy, DomainError, ScaffoldRequest, resolve};
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
