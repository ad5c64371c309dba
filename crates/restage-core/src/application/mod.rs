//! Application layer for Restage.
//!
//! This layer contains:
//! - **Lifecycle**: run orchestration driven by the template host
//! - **Strategies**: the three restructuring behaviors
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! parsing logic itself. All parsing lives in `crate::domain`.

pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod strategies;

// Re-export the lifecycle surface
pub use lifecycle::{
    Lifecycle, RunKind, VAR_DESTINATION_DIR, VAR_METADATA, VAR_SAFE_PROJECT_NAME,
    VAR_WORKSPACE_DIR,
};

// Re-export strategies
pub use strategies::{AssetInjector, DestinationPolicy, DirectoryRelocator, Strategy, TreeCleanup};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, GroupContainer, GroupHandle, ProjectHandle, WorkspaceGraph};

pub use error::ApplicationError;
