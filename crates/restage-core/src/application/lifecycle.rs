//! Run lifecycle - the driving port implemented by this crate.
//!
//! The template host calls the lifecycle methods on its own thread in a
//! fixed order and blocks on each call:
//!
//! 1. [`Lifecycle::run_started`] - build the [`RunState`], parse metadata,
//!    validate, let the strategy rewrite the template path
//! 2. per-file hooks (pass-through no-ops)
//! 3. host generates files
//! 4. [`Lifecycle::run_finished`] - invoke the strategy, gated by validity
//!
//! Exactly one `RunState` is live at a time; `run_finished` consumes it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, WorkspaceGraph};
use crate::application::strategies::Strategy;
use crate::domain::{RunState, parse_directives};
use crate::error::RestageResult;

/// Host variable carrying the workspace root directory.
///
/// Solution-style hosts publish these under the `$...$` template-variable
/// names; the literals are kept for wire compatibility with existing
/// template packages.
pub const VAR_WORKSPACE_DIR: &str = "$solutiondirectory$";

/// Host variable carrying the raw metadata payload.
pub const VAR_METADATA: &str = "$wizarddata$";

/// Host variable carrying the default destination directory.
pub const VAR_DESTINATION_DIR: &str = "$destinationdirectory$";

/// Host variable carrying the sanitized project name.
pub const VAR_SAFE_PROJECT_NAME: &str = "$safeprojectname$";

/// What kind of generation run the host is performing.
///
/// Carried through for log context; no strategy branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    AsNewProject,
    AsNewItem,
    AsMultiProject,
}

/// Sequences one generation event over an injected strategy and ports.
pub struct Lifecycle<S: Strategy> {
    strategy: S,
    workspace: Box<dyn WorkspaceGraph>,
    filesystem: Box<dyn Filesystem>,
    state: Option<RunState>,
}

impl<S: Strategy> Lifecycle<S> {
    /// Create a lifecycle with the given strategy and port adapters.
    pub fn new(
        strategy: S,
        workspace: Box<dyn WorkspaceGraph>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            strategy,
            workspace,
            filesystem,
            state: None,
        }
    }

    /// Begin a run: resolve host variables, parse metadata, validate.
    ///
    /// `custom_params[0]` is the template package path. A missing required
    /// variable or an empty parameter list is fatal - the host contract
    /// guarantees their presence.
    #[instrument(skip_all, fields(strategy = self.strategy.name(), kind = ?run_kind))]
    pub fn run_started(
        &mut self,
        variables: &HashMap<String, String>,
        run_kind: RunKind,
        custom_params: &[String],
    ) -> RestageResult<()> {
        let workspace_root = PathBuf::from(required_var(variables, VAR_WORKSPACE_DIR)?);
        let workspace_name = workspace_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let destination_path = PathBuf::from(required_var(variables, VAR_DESTINATION_DIR)?);
        let project_name = required_var(variables, VAR_SAFE_PROJECT_NAME)?.to_string();

        let metadata = parse_directives(variables.get(VAR_METADATA).map(String::as_str))?;

        let template_path = custom_params
            .first()
            .map(PathBuf::from)
            .ok_or(ApplicationError::MissingTemplateParameter)?;

        let mut state = RunState {
            run_id: Uuid::new_v4(),
            workspace_root,
            workspace_name,
            template_path,
            destination_path,
            project_name,
            metadata,
            is_valid: false,
        };

        state.is_valid = state.has_directives(self.strategy.required_directives());

        if state.is_valid {
            self.strategy.prepare(&mut state);
        }

        info!(
            run_id = %state.run_id,
            project = %state.project_name,
            valid = state.is_valid,
            "run started"
        );

        self.state = Some(state);
        Ok(())
    }

    /// Executes before each generated file is opened. Pass-through.
    pub fn before_opening_file(&self, _path: &Path) {}

    /// Executes when the host finishes creating the project. Pass-through.
    pub fn project_finished_generating(&self, _project_name: &str) {}

    /// Executes when the host creates a project item. Pass-through.
    pub fn project_item_finished_generating(&self, _path: &Path) {}

    /// Whether a generated item should be added to the project. Always
    /// true.
    pub fn should_add_project_item(&self, _path: &Path) -> bool {
        true
    }

    /// Finish the run: invoke the strategy's destructive behavior, gated by
    /// the validity flag. Consumes the run state either way.
    pub fn run_finished(&mut self) -> RestageResult<()> {
        let state = self.state.take().ok_or(ApplicationError::RunNotStarted)?;

        if state.is_valid || !self.strategy.requires_valid_run() {
            self.strategy
                .finish(&state, self.workspace.as_ref(), self.filesystem.as_ref())
        } else {
            debug!(
                run_id = %state.run_id,
                strategy = self.strategy.name(),
                "run invalid, skipping strategy"
            );
            Ok(())
        }
    }

    /// The live run state, if a run has started and not yet finished.
    pub fn state(&self) -> Option<&RunState> {
        self.state.as_ref()
    }
}

fn required_var<'a>(
    variables: &'a HashMap<String, String>,
    key: &'static str,
) -> Result<&'a str, ApplicationError> {
    variables
        .get(key)
        .map(String::as_str)
        .ok_or(ApplicationError::MissingHostVariable { key })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::application::ports::output::{MockFilesystem, MockWorkspaceGraph};
    use crate::application::strategies::{DestinationPolicy, DirectoryRelocator};
    use crate::error::{ErrorCategory, RestageError};

    use super::*;

    /// Minimal strategy recording whether `finish` ran.
    struct ProbeStrategy {
        required: &'static [&'static str],
        gated: bool,
        ran: Arc<AtomicBool>,
    }

    impl Strategy for ProbeStrategy {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn required_directives(&self) -> &'static [&'static str] {
            self.required
        }

        fn requires_valid_run(&self) -> bool {
            self.gated
        }

        fn finish(
            &self,
            _state: &RunState,
            _workspace: &dyn WorkspaceGraph,
            _filesystem: &dyn Filesystem,
        ) -> RestageResult<()> {
            self.ran.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn variables(metadata: Option<&str>) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(VAR_WORKSPACE_DIR.to_string(), "/ws/Acme".to_string());
        vars.insert(
            VAR_DESTINATION_DIR.to_string(),
            "/ws/Acme/Acme/Acme.Core".to_string(),
        );
        vars.insert(VAR_SAFE_PROJECT_NAME.to_string(), "Acme.Core".to_string());
        if let Some(raw) = metadata {
            vars.insert(VAR_METADATA.to_string(), raw.to_string());
        }
        vars
    }

    fn probe_lifecycle(
        required: &'static [&'static str],
        gated: bool,
    ) -> (Lifecycle<ProbeStrategy>, Arc<AtomicBool>) {
        let ran = Arc::new(AtomicBool::new(false));
        let strategy = ProbeStrategy {
            required,
            gated,
            ran: Arc::clone(&ran),
        };
        let lifecycle = Lifecycle::new(
            strategy,
            Box::new(MockWorkspaceGraph::new()),
            Box::new(MockFilesystem::new()),
        );
        (lifecycle, ran)
    }

    #[test]
    fn missing_host_variable_is_fatal() {
        let (mut lifecycle, _) = probe_lifecycle(&[], true);
        let mut vars = variables(None);
        vars.remove(VAR_DESTINATION_DIR);

        let err = lifecycle
            .run_started(&vars, RunKind::AsNewProject, &["/t/Base.zip".into()])
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn missing_template_param_is_fatal() {
        let (mut lifecycle, _) = probe_lifecycle(&[], true);

        let err = lifecycle
            .run_started(&variables(None), RunKind::AsNewProject, &[])
            .unwrap_err();

        assert!(matches!(
            err,
            RestageError::Application(ApplicationError::MissingTemplateParameter)
        ));
    }

    #[test]
    fn malformed_metadata_is_fatal() {
        let (mut lifecycle, _) = probe_lifecycle(&[], true);

        let err = lifecycle
            .run_started(
                &variables(Some("<wizardData><broken")),
                RunKind::AsNewProject,
                &["/t/Base.zip".into()],
            )
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn run_state_is_resolved_from_variables() {
        let (mut lifecycle, _) = probe_lifecycle(&[], true);
        lifecycle
            .run_started(
                &variables(None),
                RunKind::AsNewProject,
                &["/t/Base.zip".into()],
            )
            .unwrap();

        let state = lifecycle.state().unwrap();
        assert_eq!(state.workspace_name, "Acme");
        assert_eq!(state.project_name, "Acme.Core");
        assert_eq!(state.template_path, PathBuf::from("/t/Base.zip"));
        assert!(state.metadata.is_none());
        assert!(state.is_valid);
    }

    #[test]
    fn missing_required_directive_invalidates_and_skips() {
        let (mut lifecycle, ran) = probe_lifecycle(&["template"], true);
        lifecycle
            .run_started(
                &variables(Some("<wizardData><entry name=\"other\">x</entry></wizardData>")),
                RunKind::AsNewProject,
                &["/t/Base.zip".into()],
            )
            .unwrap();

        let state = lifecycle.state().unwrap();
        assert!(!state.is_valid);
        // Invalid runs never reach the strategy's prepare hook either.
        assert_eq!(state.template_path, PathBuf::from("/t/Base.zip"));

        lifecycle.run_finished().unwrap();
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn ungated_strategy_runs_even_when_invalid() {
        let (mut lifecycle, ran) = probe_lifecycle(&["template"], false);
        lifecycle
            .run_started(
                &variables(None),
                RunKind::AsNewProject,
                &["/t/Base.zip".into()],
            )
            .unwrap();

        assert!(!lifecycle.state().unwrap().is_valid);

        lifecycle.run_finished().unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn run_finished_consumes_the_state() {
        let (mut lifecycle, _) = probe_lifecycle(&[], true);
        lifecycle
            .run_started(
                &variables(None),
                RunKind::AsNewProject,
                &["/t/Base.zip".into()],
            )
            .unwrap();

        lifecycle.run_finished().unwrap();

        assert!(lifecycle.state().is_none());
        assert!(matches!(
            lifecycle.run_finished().unwrap_err(),
            RestageError::Application(ApplicationError::RunNotStarted)
        ));
    }

    #[test]
    fn run_finished_before_run_started_is_an_error() {
        let (mut lifecycle, _) = probe_lifecycle(&[], true);
        assert!(matches!(
            lifecycle.run_finished().unwrap_err(),
            RestageError::Application(ApplicationError::RunNotStarted)
        ));
    }

    #[test]
    fn hooks_are_passthrough() {
        let (lifecycle, _) = probe_lifecycle(&[], true);
        lifecycle.before_opening_file(Path::new("/ws/a.rs"));
        lifecycle.project_item_finished_generating(Path::new("/ws/a.rs"));
        lifecycle.project_finished_generating("Acme.Core");
        assert!(lifecycle.should_add_project_item(Path::new("/ws/a.rs")));
    }

    #[test]
    fn valid_relocator_rewrites_template_path_on_start() {
        let strategy = DirectoryRelocator::new(DestinationPolicy::StripDuplicateSegment);
        let mut lifecycle = Lifecycle::new(
            strategy,
            Box::new(MockWorkspaceGraph::new()),
            Box::new(MockFilesystem::new()),
        );

        lifecycle
            .run_started(
                &variables(Some(
                    "<wizardData>\
                     <entry name=\"template\">Lib.zip</entry>\
                     <entry name=\"solutionFolder\">Libs</entry>\
                     </wizardData>",
                )),
                RunKind::AsNewProject,
                &["/t/Base.zip".into()],
            )
            .unwrap();

        let state = lifecycle.state().unwrap();
        assert!(state.is_valid);
        assert_eq!(state.template_path, PathBuf::from("/t/Lib.zip"));
    }
}
