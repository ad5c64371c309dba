//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the strategies need from the outside world.
//! The `restage-adapters` crate provides the filesystem implementations and
//! an in-memory workspace graph; hosts provide the production graph.

use std::path::Path;

use crate::error::RestageResult;

/// Opaque handle to a project registered in the workspace.
///
/// Handles are name-addressed: the host resolves them, the strategies only
/// pass them back. A handle is valid for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle(String);

impl ProjectHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Opaque handle to a logical grouping in the workspace's organizational
/// tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHandle(String);

impl GroupHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Capability to add projects into a logical grouping.
///
/// Obtained from a [`GroupHandle`] via [`WorkspaceGraph::as_group_container`];
/// the conversion is explicit because not every grouping node a host exposes
/// can contain projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupContainer(String);

impl GroupContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `restage_adapters::filesystem::LocalFilesystem` (production)
/// - `restage_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> RestageResult<()>;

    /// Copy a file, overwriting any existing destination.
    ///
    /// The destination's parent directory must already exist.
    fn copy_file(&self, source: &Path, destination: &Path) -> RestageResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> RestageResult<()>;
}

/// Port onto the host's workspace object graph.
///
/// Implemented by:
/// - the template host (production)
/// - `restage_adapters::workspace::MemoryWorkspace` (testing)
///
/// ## Design Notes
///
/// Queries return `Option` - an unresolvable name is an ordinary outcome the
/// strategies handle per their own edge-case policy, never a panic. Only
/// mutations the host actively rejects surface as errors.
#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceGraph: Send + Sync {
    /// Find a top-level project by its (safe) name.
    fn find_project(&self, name: &str) -> Option<ProjectHandle>;

    /// Find a logical grouping by its display name.
    fn find_group(&self, name: &str) -> Option<GroupHandle>;

    /// Convert a grouping into a container capable of holding projects.
    fn as_group_container(&self, group: &GroupHandle) -> RestageResult<GroupContainer>;

    /// Remove a project from the workspace's top-level registration.
    fn remove_from_workspace(&self, project: ProjectHandle) -> RestageResult<()>;

    /// Instantiate a template into a grouping at a physical destination.
    fn add_from_template(
        &self,
        container: &GroupContainer,
        template_path: &Path,
        destination: &Path,
        project_name: &str,
    ) -> RestageResult<()>;

    /// Register an existing file as a member of a grouping.
    fn register_file_in_group(&self, group: &GroupHandle, file_path: &Path) -> RestageResult<()>;
}
