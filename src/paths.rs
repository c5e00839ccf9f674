//! Discovery of the configuration document for the command line.
//!
//! Search order when no file is given explicitly:
//! 1. `YAMLENV_FILE` environment variable
//! 2. `./yamlenv.yaml`, then `./yamlenv.yml`
//! 3. `<user config dir>/yamlenv/config.yaml`

use std::path::{Path, PathBuf};

/// Environment variable naming an explicit document.
pub const FILE_ENV_VAR: &str = "YAMLENV_FILE";

/// File names looked up in the working directory.
pub const LOCAL_FILE_NAMES: &[&str] = &["yamlenv.yaml", "yamlenv.yml"];

/// Candidate document locations, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct DocumentPaths {
    /// Path from `YAMLENV_FILE`
    pub explicit: Option<PathBuf>,
    /// Directory searched for [`LOCAL_FILE_NAMES`]
    pub working_dir: Option<PathBuf>,
    /// User-level configuration directory
    pub user_dir: Option<PathBuf>,
}

impl DocumentPaths {
    /// Discover locations from the environment and platform defaults.
    pub fn discover() -> Self {
        let explicit = std::env::var(FILE_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            explicit,
            working_dir: Some(PathBuf::from(".")),
            user_dir: dirs::config_dir().map(|d| d.join("yamlenv")),
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(working_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            explicit: None,
            working_dir,
            user_dir,
        }
    }

    /// Pick the document to load.
    ///
    /// `cli_file` always wins. An explicit `YAMLENV_FILE` is returned even if
    /// it does not exist, so the load falls back to environment-only mode
    /// instead of silently picking another file.
    pub fn resolve(&self, cli_file: Option<&Path>) -> Option<PathBuf> {
        if let Some(file) = cli_file {
            return Some(file.to_path_buf());
        }
        if let Some(ref explicit) = self.explicit {
            return Some(explicit.clone());
        }

        if let Some(ref dir) = self.working_dir {
            if let Some(found) = LOCAL_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
            {
                return Some(found);
            }
        }

        self.user_dir
            .as_ref()
            .map(|dir| dir.join("config.yaml"))
            .filter(|path| path.is_file())
    }
}
