//! Pure path derivations used by the restructuring strategies.
//!
//! Everything here is string surgery on host-provided paths. No I/O.

/// Byte offsets of every non-overlapping occurrence of `needle` in
/// `haystack`, scanning left to right.
pub fn index_of_all(haystack: &str, needle: &str) -> Vec<usize> {
    let mut indices = Vec::new();

    if needle.is_empty() {
        return indices;
    }

    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let at = from + found;
        indices.push(at);
        from = at + needle.len();
    }

    indices
}

/// Strips the redundant workspace-name segment out of a default destination
/// path.
///
/// Template hosts generate new projects under
/// `<parent>/<workspace>/<workspace>/<project>`, which buries the project one
/// directory deeper than wanted when the project name itself repeats the
/// workspace name. The reduction applies if and only if the workspace base
/// name occurs exactly three times in the path: the second occurrence is
/// removed. Any other occurrence count returns the path unchanged.
pub fn strip_workspace_segment(path: &str, workspace_name: &str) -> String {
    let indices = index_of_all(path, workspace_name);

    if indices.len() == 3 {
        let at = indices[1];
        let mut reduced = path.to_string();
        reduced.replace_range(at..at + workspace_name.len(), "");
        reduced
    } else {
        path.to_string()
    }
}

/// Derives the template-package directory name for a logical group.
///
/// Group names are display names and may contain spaces and dots; the
/// package directory on disk carries neither.
pub fn safe_group_path(group_name: &str) -> String {
    group_name.replace(' ', "").replace('.', "")
}
