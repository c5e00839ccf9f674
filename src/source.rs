//! Document source: existence check and full read.

use crate::error::{LoadError, Result};
use std::path::Path;

/// Where documents are read from.
pub trait DocumentSource {
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole document.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Local filesystem source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
    }
}
