//! Residual-tree cleanup strategy.

use tracing::{debug, instrument};

use crate::application::ports::{Filesystem, WorkspaceGraph};
use crate::domain::RunState;
use crate::error::RestageResult;

use super::Strategy;

/// Deletes the self-named subdirectory some hosts leave under the workspace
/// root after generation.
///
/// Cleanup is best-effort and non-propagating: a locked handle, a permission
/// problem, or an already-absent directory must never fail the overall
/// generation. Failures are logged at debug level and swallowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeCleanup;

impl TreeCleanup {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for TreeCleanup {
    fn name(&self) -> &'static str {
        "tree-cleanup"
    }

    fn requires_valid_run(&self) -> bool {
        false
    }

    #[instrument(skip_all, fields(workspace = %state.workspace_name))]
    fn finish(
        &self,
        state: &RunState,
        _workspace: &dyn WorkspaceGraph,
        filesystem: &dyn Filesystem,
    ) -> RestageResult<()> {
        let target = state.self_named_subdir();

        if let Err(error) = filesystem.remove_dir_all(&target) {
            debug!(%error, target = %target.display(), "cleanup skipped");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use uuid::Uuid;

    use crate::application::error::ApplicationError;
    use crate::application::ports::output::{MockFilesystem, MockWorkspaceGraph};

    use super::*;

    fn state() -> RunState {
        RunState {
            run_id: Uuid::new_v4(),
            workspace_root: PathBuf::from("/ws/Acme"),
            workspace_name: "Acme".into(),
            template_path: PathBuf::from("/templates/Base.zip"),
            destination_path: PathBuf::from("/ws/Acme/Acme/Acme.Core"),
            project_name: "Acme.Core".into(),
            metadata: None,
            is_valid: true,
        }
    }

    #[test]
    fn deletes_self_named_subdirectory() {
        let mut fs = MockFilesystem::new();
        fs.expect_remove_dir_all()
            .times(1)
            .withf(|path| path == Path::new("/ws/Acme/Acme"))
            .returning(|_| Ok(()));

        TreeCleanup::new()
            .finish(&state(), &MockWorkspaceGraph::new(), &fs)
            .unwrap();
    }

    #[test]
    fn delete_failures_are_swallowed() {
        let mut fs = MockFilesystem::new();
        fs.expect_remove_dir_all().returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        TreeCleanup::new()
            .finish(&state(), &MockWorkspaceGraph::new(), &fs)
            .unwrap();
    }

    #[test]
    fn has_no_required_directives_and_is_ungated() {
        let cleanup = TreeCleanup::new();
        assert!(cleanup.required_directives().is_empty());
        assert!(!cleanup.requires_valid_run());
    }
}
