// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Restage.
//!
//! This module contains pure logic with no I/O. All filesystem and
//! workspace-graph concerns are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable data**: `RunState` is built once per run, read-only after
//! - **Parsing is total**: every metadata payload maps to typed directives
//!   or a single, fatal format error
//!
// Public API - what the world sees
pub mod error;
pub mod metadata;
pub mod paths;
pub mod run_state;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use metadata::{
    AssetRecord, DirectiveMap, METADATA_NS, PHYSICAL_ROOT, parse_asset_records, parse_directives,
};
pub use paths::{index_of_all, safe_group_path, strip_workspace_segment};
pub use run_state::RunState;
