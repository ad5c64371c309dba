//! Restructuring strategies.
//!
//! A strategy is the single piece of destructive behavior a lifecycle
//! invokes when the host reports generation finished. Three exist:
//!
//! - [`DirectoryRelocator`] - move a generated project's physical directory
//!   and re-parent it into a logical grouping
//! - [`TreeCleanup`] - best-effort delete of residual scaffolding
//! - [`AssetInjector`] - copy shared template files into the workspace and
//!   register them into groupings
//!
//! Validation is data, not inheritance: each strategy declares the directive
//! keys it requires, and the lifecycle evaluates the predicate against the
//! run state. A strategy with an empty key set is always valid.

mod cleanup;
mod inject;
mod relocate;

pub use cleanup::TreeCleanup;
pub use inject::AssetInjector;
pub use relocate::{DestinationPolicy, DirectoryRelocator};

use crate::application::ports::{Filesystem, WorkspaceGraph};
use crate::domain::RunState;
use crate::error::RestageResult;

/// One restructuring behavior, selected per template.
pub trait Strategy: Send + Sync {
    /// Short name for log output.
    fn name(&self) -> &'static str;

    /// Directive keys that must be present for this strategy to run.
    fn required_directives(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether `finish` is gated on the validity flag.
    ///
    /// Cleanup returns `false`: it has no preconditions and always runs.
    fn requires_valid_run(&self) -> bool {
        true
    }

    /// Hook invoked after validation succeeds, before the host expands any
    /// files. Strategies use it to rewrite the template path.
    fn prepare(&self, _state: &mut RunState) {}

    /// The strategy's destructive behavior, invoked exactly once per run.
    fn finish(
        &self,
        state: &RunState,
        workspace: &dyn WorkspaceGraph,
        filesystem: &dyn Filesystem,
    ) -> RestageResult<()>;
}
