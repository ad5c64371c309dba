//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `restage-adapters` implement
//! the filesystem port and ship an in-memory workspace graph; the production
//! workspace graph lives inside the template host.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by strategies, implemented by
//!   infrastructure
//!   - `Filesystem`: File operations
//!   - `WorkspaceGraph`: Project/grouping queries and mutations
//!
//! - **Driving (Input) Ports**: Called by the host, implemented by the
//!   lifecycle (see `crate::application::lifecycle`)

pub mod output;

pub use output::{Filesystem, GroupContainer, GroupHandle, ProjectHandle, WorkspaceGraph};
