//! In-memory workspace graph for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tracing::debug;

use restage_core::{
    application::{
        ApplicationError,
        ports::{GroupContainer, GroupHandle, ProjectHandle, WorkspaceGraph},
    },
    error::RestageResult,
};

/// A project instantiated into a grouping via `add_from_template`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedProject {
    pub template_path: PathBuf,
    pub destination: PathBuf,
    pub project_name: String,
}

#[derive(Debug, Default, Clone)]
struct GroupRecord {
    projects: Vec<AddedProject>,
    files: Vec<PathBuf>,
}

#[derive(Debug, Default)]
struct MemoryWorkspaceInner {
    /// Top-level project registrations, by safe name.
    projects: HashMap<String, PathBuf>,
    /// Logical groupings, by display name.
    groups: HashMap<String, GroupRecord>,
}

/// In-memory workspace graph for testing.
///
/// Clones share the same graph, so a test can hand a clone to a lifecycle
/// and keep inspecting the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspace {
    inner: Arc<RwLock<MemoryWorkspaceInner>>,
}

impl MemoryWorkspace {
    /// Create a new empty workspace graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a top-level project (builder-style testing helper).
    pub fn with_project(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.inner
            .write()
            .unwrap()
            .projects
            .insert(name.into(), path.into());
        self
    }

    /// Seed an empty logical grouping (builder-style testing helper).
    pub fn with_group(self, name: impl Into<String>) -> Self {
        self.inner
            .write()
            .unwrap()
            .groups
            .entry(name.into())
            .or_default();
        self
    }

    /// Whether a top-level project with this name is registered.
    pub fn has_project(&self, name: &str) -> bool {
        self.inner.read().unwrap().projects.contains_key(name)
    }

    /// Projects instantiated into a grouping, in insertion order.
    pub fn group_projects(&self, group: &str) -> Vec<AddedProject> {
        self.inner
            .read()
            .unwrap()
            .groups
            .get(group)
            .map(|g| g.projects.clone())
            .unwrap_or_default()
    }

    /// Files registered into a grouping, in insertion order.
    pub fn group_files(&self, group: &str) -> Vec<PathBuf> {
        self.inner
            .read()
            .unwrap()
            .groups
            .get(group)
            .map(|g| g.files.clone())
            .unwrap_or_default()
    }
}

impl WorkspaceGraph for MemoryWorkspace {
    fn find_project(&self, name: &str) -> Option<ProjectHandle> {
        let inner = self.inner.read().ok()?;
        inner
            .projects
            .contains_key(name)
            .then(|| ProjectHandle::new(name))
    }

    fn find_group(&self, name: &str) -> Option<GroupHandle> {
        let inner = self.inner.read().ok()?;
        inner.groups.contains_key(name).then(|| GroupHandle::new(name))
    }

    fn as_group_container(&self, group: &GroupHandle) -> RestageResult<GroupContainer> {
        let inner = lock_read(&self.inner)?;

        if inner.groups.contains_key(group.name()) {
            Ok(GroupContainer::new(group.name()))
        } else {
            Err(mutation_error(format!(
                "grouping '{}' is gone",
                group.name()
            )))
        }
    }

    fn remove_from_workspace(&self, project: ProjectHandle) -> RestageResult<()> {
        let mut inner = lock_write(&self.inner)?;

        if inner.projects.remove(project.name()).is_none() {
            return Err(mutation_error(format!(
                "project '{}' is not registered",
                project.name()
            )));
        }

        debug!(project = project.name(), "removed from workspace");
        Ok(())
    }

    fn add_from_template(
        &self,
        container: &GroupContainer,
        template_path: &Path,
        destination: &Path,
        project_name: &str,
    ) -> RestageResult<()> {
        let mut inner = lock_write(&self.inner)?;

        let Some(group) = inner.groups.get_mut(container.name()) else {
            return Err(mutation_error(format!(
                "grouping '{}' is gone",
                container.name()
            )));
        };

        group.projects.push(AddedProject {
            template_path: template_path.to_path_buf(),
            destination: destination.to_path_buf(),
            project_name: project_name.to_string(),
        });

        debug!(
            project = project_name,
            group = container.name(),
            "added from template"
        );
        Ok(())
    }

    fn register_file_in_group(&self, group: &GroupHandle, file_path: &Path) -> RestageResult<()> {
        let mut inner = lock_write(&self.inner)?;

        let Some(record) = inner.groups.get_mut(group.name()) else {
            return Err(mutation_error(format!("grouping '{}' is gone", group.name())));
        };

        record.files.push(file_path.to_path_buf());
        Ok(())
    }
}

fn lock_read(
    inner: &Arc<RwLock<MemoryWorkspaceInner>>,
) -> RestageResult<std::sync::RwLockReadGuard<'_, MemoryWorkspaceInner>> {
    inner
        .read()
        .map_err(|_| mutation_error("workspace lock poisoned".to_string()))
}

fn lock_write(
    inner: &Arc<RwLock<MemoryWorkspaceInner>>,
) -> RestageResult<std::sync::RwLockWriteGuard<'_, MemoryWorkspaceInner>> {
    inner
        .write()
        .map_err(|_| mutation_error("workspace lock poisoned".to_string()))
}

fn mutation_error(reason: String) -> restage_core::error::RestageError {
    ApplicationError::WorkspaceMutation { reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_projects_and_groups_resolve() {
        let ws = MemoryWorkspace::new()
            .with_project("Acme.Core", "/ws/Acme/Acme.Core")
            .with_group("Libs");

        assert!(ws.find_project("Acme.Core").is_some());
        assert!(ws.find_project("Ghost").is_none());
        assert!(ws.find_group("Libs").is_some());
        assert!(ws.find_group("Ghost").is_none());
    }

    #[test]
    fn remove_unregisters_project() {
        let ws = MemoryWorkspace::new().with_project("Acme.Core", "/p");
        let handle = ws.find_project("Acme.Core").unwrap();

        ws.remove_from_workspace(handle).unwrap();
        assert!(!ws.has_project("Acme.Core"));
    }

    #[test]
    fn remove_of_unknown_project_is_rejected() {
        let ws = MemoryWorkspace::new();
        assert!(
            ws.remove_from_workspace(ProjectHandle::new("Ghost"))
                .is_err()
        );
    }

    #[test]
    fn add_from_template_lands_in_group() {
        let ws = MemoryWorkspace::new().with_group("Libs");
        let group = ws.find_group("Libs").unwrap();
        let container = ws.as_group_container(&group).unwrap();

        ws.add_from_template(
            &container,
            Path::new("/t/Lib.zip"),
            Path::new("/ws/Acme/Acme.Core"),
            "Acme.Core",
        )
        .unwrap();

        let added = ws.group_projects("Libs");
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].project_name, "Acme.Core");
    }

    #[test]
    fn registered_files_are_listed_in_order() {
        let ws = MemoryWorkspace::new().with_group("Build");
        let group = ws.find_group("Build").unwrap();

        ws.register_file_in_group(&group, Path::new("/ws/a.proj"))
            .unwrap();
        ws.register_file_in_group(&group, Path::new("/ws/b.proj"))
            .unwrap();

        assert_eq!(
            ws.group_files("Build"),
            vec![PathBuf::from("/ws/a.proj"), PathBuf::from("/ws/b.proj")]
        );
    }
}
