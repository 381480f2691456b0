//! Core domain layer for mvcforge.
//!
//! Pure business logic with no I/O: naming transforms, request/resolution
//! types, PHP source synthesis and merging, and config document handling.
//! Everything that touches a disk or the network goes through the ports
//! defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **No external crates**: only std + thiserror + serde derives

pub mod config;
pub mod error;
pub mod naming;
pub mod request;
pub mod resolve;
pub mod source;

pub use config::{
    PhpEntry, PhpKey, PhpValue, add_invokable_entry, add_literal_route, add_module_entry,
    initial_module_config, parse_config_document,
};
pub use error::{ConflictKind, DomainError};
pub use request::ScaffoldRequest;
pub use resolve::{
    ActionNames, ControllerNames, ModuleNames, ResolvedNames, SOURCE_EXT, VIEW_EXT, resolve,
};
pub use source::{
    ClassDoc, ClassModel, DocBlock, DocPolicy, DocTag, MethodModel, MethodNode, ParsedClassFile,
    VerbatimMethod, Visibility, merge_method, parse_class_file, render_class_file,
    render_config_file, render_view_script,
};
