//! Directory relocation strategy.
//!
//! Hosts generate every new project under their default destination. Some
//! templates want the project elsewhere: either with the redundant
//! workspace-name segment stripped out of the default path, or under an
//! explicit directory named by the template. Both variants share the same
//! machinery and differ only in how the destination is computed, so they are
//! one strategy parameterized by [`DestinationPolicy`].

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::{Filesystem, WorkspaceGraph};
use crate::domain::{RunState, strip_workspace_segment};
use crate::error::RestageResult;

use super::Strategy;

/// Directive key naming the sibling template package to expand from.
const KEY_TEMPLATE: &str = "template";

/// Directive key naming the logical grouping the project belongs under.
const KEY_SOLUTION_FOLDER: &str = "solutionFolder";

/// Directive key naming the custom directory, relative to the workspace
/// root.
const KEY_CUSTOM_PROJECT_DIR: &str = "customProjectDir";

const REQUIRED_STRIP: &[&str] = &[KEY_TEMPLATE, KEY_SOLUTION_FOLDER];
const REQUIRED_CUSTOM: &[&str] = &[KEY_TEMPLATE, KEY_SOLUTION_FOLDER, KEY_CUSTOM_PROJECT_DIR];

/// How the relocated project's physical destination is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationPolicy {
    /// Strip the second of exactly three occurrences of the workspace base
    /// name from the host's default destination path.
    StripDuplicateSegment,
    /// Join `workspace_root / customProjectDir / project_name`, then delete
    /// the original generation directory once the project is re-added.
    CustomRelativeDir,
}

/// Moves a just-generated project to a non-default location and re-parents
/// it into a logical grouping.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryRelocator {
    policy: DestinationPolicy,
}

impl DirectoryRelocator {
    pub fn new(policy: DestinationPolicy) -> Self {
        Self { policy }
    }

    /// Computes the relocated destination, or `None` when the run state
    /// lacks the directive the policy needs.
    fn destination(&self, state: &RunState) -> Option<PathBuf> {
        match self.policy {
            DestinationPolicy::StripDuplicateSegment => {
                let default = state.destination_path.to_string_lossy();
                Some(PathBuf::from(strip_workspace_segment(
                    &default,
                    &state.workspace_name,
                )))
            }
            DestinationPolicy::CustomRelativeDir => {
                let custom_dir = state.directive(KEY_CUSTOM_PROJECT_DIR)?;
                Some(
                    state
                        .workspace_root
                        .join(custom_dir)
                        .join(&state.project_name),
                )
            }
        }
    }
}

impl Strategy for DirectoryRelocator {
    fn name(&self) -> &'static str {
        "directory-relocator"
    }

    fn required_directives(&self) -> &'static [&'static str] {
        match self.policy {
            DestinationPolicy::StripDuplicateSegment => REQUIRED_STRIP,
            DestinationPolicy::CustomRelativeDir => REQUIRED_CUSTOM,
        }
    }

    /// Swaps in the more specific sibling template package before the host
    /// expands files from it.
    fn prepare(&self, state: &mut RunState) {
        let Some(template) = state.directive(KEY_TEMPLATE).map(str::to_owned) else {
            return;
        };

        state.template_path = match state.template_path.parent() {
            Some(parent) => parent.join(&template),
            None => PathBuf::from(&template),
        };
    }

    #[instrument(skip_all, fields(policy = ?self.policy, project = %state.project_name))]
    fn finish(
        &self,
        state: &RunState,
        workspace: &dyn WorkspaceGraph,
        filesystem: &dyn Filesystem,
    ) -> RestageResult<()> {
        let Some(destination) = self.destination(state) else {
            return Ok(());
        };

        // Idempotence/collision guard: a populated destination means this
        // run was already processed or would clobber foreign files.
        if filesystem.exists(&destination) {
            debug!(
                destination = %destination.display(),
                "destination already exists, skipping relocation"
            );
            return Ok(());
        }

        let Some(group_name) = state.directive(KEY_SOLUTION_FOLDER) else {
            return Ok(());
        };

        let Some(project) = workspace.find_project(&state.project_name) else {
            warn!("generated project not found in workspace, skipping relocation");
            return Ok(());
        };

        let group = workspace.find_group(group_name);

        workspace.remove_from_workspace(project)?;

        // Lossy edge case: the project is already gone from its default
        // location and there is nowhere to re-add it.
        let Some(group) = group else {
            warn!(
                group = group_name,
                "logical grouping not found; project removed but not re-added"
            );
            return Ok(());
        };

        let container = workspace.as_group_container(&group)?;
        workspace.add_from_template(
            &container,
            &state.template_path,
            &destination,
            &state.project_name,
        )?;

        if self.policy == DestinationPolicy::CustomRelativeDir {
            // The relocation itself has succeeded; the leftover generation
            // directory is transient scaffolding.
            if let Err(error) = filesystem.remove_dir_all(&state.destination_path) {
                warn!(%error, "could not remove original generation directory");
            }
        }

        info!(
            destination = %destination.display(),
            group = group_name,
            "project relocated"
        );
        Ok(())
    }
}
