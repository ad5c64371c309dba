//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{
        Arc, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use restage_core::{
    application::{ApplicationError, ports::Filesystem},
    error::RestageResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand a clone to a lifecycle
/// and keep inspecting the original.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    fail_removals: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
            fail_removals: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed a file, creating parent directories implicitly (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();

        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }

        inner.files.insert(path, content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Make every subsequent `remove_dir_all` fail (testing helper for
    /// best-effort-delete contracts).
    pub fn fail_removals(&self) {
        self.fail_removals.store(true, Ordering::SeqCst);
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> RestageResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> RestageResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_error(source))?;

        let Some(content) = inner.files.get(source).cloned() else {
            return Err(ApplicationError::FilesystemError {
                path: source.to_path_buf(),
                reason: "Source file does not exist".into(),
            }
            .into());
        };

        // Ensure parent exists
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: destination.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(destination.to_path_buf(), content);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> RestageResult<()> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Removal rejected".into(),
            }
            .into());
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_error(path))?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

fn lock_error(path: &Path) -> restage_core::error::RestageError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Filesystem lock poisoned".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_files_and_parents_exist() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/a/b/c.txt", "x");

        assert!(fs.exists(Path::new("/a/b/c.txt")));
        assert!(fs.exists(Path::new("/a/b")));
        assert!(fs.exists(Path::new("/a")));
    }

    #[test]
    fn copy_requires_existing_source_and_parent() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/src/in.txt", "x");

        assert!(
            fs.copy_file(Path::new("/src/gone.txt"), Path::new("/src/out.txt"))
                .is_err()
        );
        assert!(
            fs.copy_file(Path::new("/src/in.txt"), Path::new("/nowhere/out.txt"))
                .is_err()
        );

        fs.copy_file(Path::new("/src/in.txt"), Path::new("/src/out.txt"))
            .unwrap();
        assert_eq!(fs.read_file(Path::new("/src/out.txt")).unwrap(), "x");
    }

    #[test]
    fn copy_overwrites() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/d/new.txt", "new");
        fs.seed_file("/d/old.txt", "old");

        fs.copy_file(Path::new("/d/new.txt"), Path::new("/d/old.txt"))
            .unwrap();
        assert_eq!(fs.read_file(Path::new("/d/old.txt")).unwrap(), "new");
    }

    #[test]
    fn remove_dir_all_removes_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/ws/sub/a.txt", "a");
        fs.seed_file("/ws/keep.txt", "k");

        fs.remove_dir_all(Path::new("/ws/sub")).unwrap();

        assert!(!fs.exists(Path::new("/ws/sub/a.txt")));
        assert!(!fs.exists(Path::new("/ws/sub")));
        assert!(fs.exists(Path::new("/ws/keep.txt")));
    }

    #[test]
    fn removal_failures_can_be_forced() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/ws/a.txt", "a");
        fs.fail_removals();

        assert!(fs.remove_dir_all(Path::new("/ws")).is_err());
        assert!(fs.exists(Path::new("/ws/a.txt")));
    }
}
