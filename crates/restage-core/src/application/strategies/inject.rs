//! Shared-asset injection strategy.
//!
//! Shared files (build scripts, editor settings, license stubs) ship inside
//! the template package two levels above the per-project template root.
//! Each asset record names a physical destination, a logical grouping, and
//! a file; records process independently and in order, so one unresolvable
//! grouping or missing source never blocks the rest.

use tracing::{debug, instrument, trace, warn};

use crate::application::ports::{Filesystem, WorkspaceGraph};
use crate::domain::{RunState, parse_asset_records, safe_group_path};
use crate::error::RestageResult;

use super::Strategy;

/// Directive key whose raw value carries the asset-record list.
const KEY_SOLUTION_ITEMS: &str = "solutionItems";

/// File extension of a template package.
const TEMPLATE_PACKAGE_EXT: &str = ".zip";

/// Copies shared template files into the workspace and registers them into
/// logical groupings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetInjector;

impl AssetInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for AssetInjector {
    fn name(&self) -> &'static str {
        "asset-injector"
    }

    /// The asset-list directive is checked lazily at finish time, so the
    /// strategy itself carries no preconditions.
    fn prepare(&self, state: &mut RunState) {
        // The shared-assets package root sits two directory levels above
        // the per-project template root.
        let grandparent = state
            .template_path
            .parent()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf());

        if let Some(grandparent) = grandparent {
            state.template_path = grandparent;
        }
    }

    #[instrument(skip_all, fields(workspace = %state.workspace_name))]
    fn finish(
        &self,
        state: &RunState,
        workspace: &dyn WorkspaceGraph,
        filesystem: &dyn Filesystem,
    ) -> RestageResult<()> {
        let Some(raw) = state.directive(KEY_SOLUTION_ITEMS) else {
            trace!("no asset-list directive, nothing to inject");
            return Ok(());
        };

        let records = parse_asset_records(raw)?;

        if records.is_empty() {
            trace!("asset list is empty, nothing to inject");
            return Ok(());
        }

        for record in &records {
            let Some(group) = workspace.find_group(&record.logical_group) else {
                warn!(
                    group = %record.logical_group,
                    file = %record.file_name,
                    "logical grouping not found, skipping record"
                );
                continue;
            };

            let package_dir = format!(
                "{}{}",
                safe_group_path(&record.logical_group),
                TEMPLATE_PACKAGE_EXT
            );
            let source = state
                .template_path
                .join(&package_dir)
                .join(&record.file_name);

            if !filesystem.exists(&source) {
                warn!(
                    source = %source.display(),
                    "source file not found in template package, skipping record"
                );
                continue;
            }

            let destination = if record.targets_workspace_root() {
                state.workspace_root.join(&record.file_name)
            } else {
                state
                    .workspace_root
                    .join(&record.physical_folder)
                    .join(&record.file_name)
            };

            if let Some(parent) = destination.parent() {
                if !filesystem.exists(parent) {
                    filesystem.create_dir_all(parent)?;
                }
            }

            filesystem.copy_file(&source, &destination)?;
            workspace.register_file_in_group(&group, &destination)?;

            debug!(
                destination = %destination.display(),
                group = %record.logical_group,
                "asset injected"
            );
        }

        Ok(())
    }
}
