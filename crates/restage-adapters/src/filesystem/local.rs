//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use restage_core::{application::ports::Filesystem, error::RestageResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> RestageResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> RestageResult<()> {
        // std::fs::copy overwrites an existing destination.
        std::fs::copy(source, destination)
            .map(|_| ())
            .map_err(|e| map_io_error(source, e, "copy file"))
    }

    fn remove_dir_all(&self, path: &Path) -> RestageResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> restage_core::error::RestageError {
    use restage_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
