//! Per-invocation run context.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use super::metadata::DirectiveMap;

/// Context for one generation event.
///
/// Built once by the lifecycle when the run starts, read-only afterwards,
/// and dropped when the run finishes. Exactly one `RunState` is live per
/// lifecycle at any time; it carries no identity beyond the single run
/// (`run_id` exists only to correlate log output).
///
/// Invariant: `workspace_root` must exist on disk by the time a strategy
/// consumes the state; the host has already generated files there.
#[derive(Debug, Clone, Serialize)]
pub struct RunState {
    /// Correlation id for tracing spans.
    pub run_id: Uuid,
    /// Absolute path of the enclosing workspace.
    pub workspace_root: PathBuf,
    /// Base name of the workspace directory.
    pub workspace_name: String,
    /// Template package root. Strategies may rewrite this before the host
    /// expands files from it.
    pub template_path: PathBuf,
    /// Where the host physically generated the new project tree.
    pub destination_path: PathBuf,
    /// Safe, host-sanitized name of the generated project.
    pub project_name: String,
    /// Parsed metadata directives; `None` when the template supplies none.
    pub metadata: Option<DirectiveMap>,
    /// Set exactly once by validation; gates destructive work.
    pub is_valid: bool,
}

impl RunState {
    /// Looks up a directive value, if metadata is present and carries the
    /// key.
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key).map(String::as_str)
    }

    /// True when metadata is present and contains every one of `keys`.
    ///
    /// An empty key set is vacuously satisfied, with or without metadata.
    pub fn has_directives(&self, keys: &[&str]) -> bool {
        if keys.is_empty() {
            return true;
        }

        match &self.metadata {
            Some(map) => keys.iter().all(|k| map.contains_key(*k)),
            None => false,
        }
    }

    /// The transient, self-named subdirectory some hosts create under the
    /// workspace root.
    pub fn self_named_subdir(&self) -> PathBuf {
        self.workspace_root.join(&self.workspace_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::DirectiveMap;

    fn state_with(metadata: Option<DirectiveMap>) -> RunState {
        RunState {
            run_id: Uuid::new_v4(),
            workspace_root: PathBuf::from("/ws/Acme"),
            workspace_name: "Acme".into(),
            template_path: PathBuf::from("/templates/Library.zip"),
            destination_path: PathBuf::from("/ws/Acme/Acme/Acme.Core"),
            project_name: "Acme.Core".into(),
            metadata,
            is_valid: false,
        }
    }

    #[test]
    fn directive_lookup_without_metadata_is_none() {
        let state = state_with(None);
        assert_eq!(state.directive("template"), None);
    }

    #[test]
    fn directive_lookup_finds_values() {
        let mut map = DirectiveMap::new();
        map.insert("template".into(), "Web.zip".into());
        let state = state_with(Some(map));

        assert_eq!(state.directive("template"), Some("Web.zip"));
        assert_eq!(state.directive("missing"), None);
    }

    #[test]
    fn empty_required_set_is_always_satisfied() {
        assert!(state_with(None).has_directives(&[]));
    }

    #[test]
    fn required_keys_need_metadata() {
        assert!(!state_with(None).has_directives(&["template"]));

        let mut map = DirectiveMap::new();
        map.insert("template".into(), "Web.zip".into());
        map.insert("solutionFolder".into(), "Libs".into());
        let state = state_with(Some(map));

        assert!(state.has_directives(&["template", "solutionFolder"]));
        assert!(!state.has_directives(&["template", "customProjectDir"]));
    }

    #[test]
    fn self_named_subdir_joins_root_and_name() {
        let state = state_with(None);
        assert_eq!(state.self_named_subdir(), PathBuf::from("/ws/Acme/Acme"));
    }
}
