//! Workspace-graph adapters.
//!
//! Only the in-memory flavor lives here; the production workspace graph is
//! the template host's own object model, reached through the
//! `WorkspaceGraph` port.

mod memory;

pub use memory::{AddedProject, MemoryWorkspace};
