//! Restage Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Restage
//! workspace-restructuring tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! After a template host materializes a new project into a workspace tree,
//! Restage reads the declarative metadata attached to the template,
//! validates it against the chosen strategy's preconditions, and performs
//! the filesystem and logical-grouping mutations the template engine itself
//! cannot express.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Template Host (external)       │
//! │  run_started → [generates] → run_finished │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           Lifecycle<Strategy>           │
//! │    Builds RunState, gates on validity   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │     (Filesystem, WorkspaceGraph)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    restage-adapters (Infrastructure)    │
//! │  (LocalFilesystem, MemoryWorkspace, …)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (RunState, MetadataParser, paths)      │
//! │        No External I/O                  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use restage_core::application::{
//!     DestinationPolicy, DirectoryRelocator, Lifecycle, RunKind,
//! };
//!
//! # fn wire(workspace: Box<dyn restage_core::application::WorkspaceGraph>,
//! #         filesystem: Box<dyn restage_core::application::Filesystem>,
//! #         variables: std::collections::HashMap<String, String>) {
//! // 1. Pick a strategy for the template
//! let strategy = DirectoryRelocator::new(DestinationPolicy::StripDuplicateSegment);
//!
//! // 2. Wire the lifecycle with injected adapters
//! let mut lifecycle = Lifecycle::new(strategy, workspace, filesystem);
//!
//! // 3. Drive it in host order
//! let params = vec!["/templates/Base.zip".to_string()];
//! lifecycle.run_started(&variables, RunKind::AsNewProject, &params).unwrap();
//! // … host generates files …
//! lifecycle.run_finished().unwrap();
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AssetInjector, DestinationPolicy, DirectoryRelocator, Lifecycle, RunKind, Strategy,
        TreeCleanup,
        ports::{Filesystem, GroupContainer, GroupHandle, ProjectHandle, WorkspaceGraph},
    };
    pub use crate::domain::{AssetRecord, DirectiveMap, RunState};
    pub use crate::error::{RestageError, RestageResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
