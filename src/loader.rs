//! Document loader: parse, flatten, render, merge and apply.
//!
//! A load runs to completion in memory before anything is written, so an
//! error at any stage leaves the environment untouched.

use crate::env::{Environment, FlatMap, ProcessEnv, check_variable};
use crate::error::{LoadError, Result};
use crate::flatten::flatten;
use crate::merge::{MergeOutcome, Precedence, merge};
use crate::node::Node;
use crate::parser::{DocumentParser, YamlParser};
use crate::render::render;
use crate::source::{DocumentSource, FsSource};
use crate::validate::{NoValidation, Validator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options of a flattening load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Leading segment added to every variable name (empty for none).
    pub prefix: String,
    pub precedence: Precedence,
}

/// What a single load did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Document that was loaded, `None` in environment-only mode.
    pub document: Option<PathBuf>,
    /// Rendered values the document provided.
    pub candidates: FlatMap,
    pub outcome: MergeOutcome,
}

impl LoadReport {
    /// The document's keys with their effective values.
    pub fn document_values(&self) -> FlatMap {
        self.candidates
            .keys()
            .filter_map(|k| Some((k.clone(), self.outcome.effective.get(k)?.clone())))
            .collect()
    }
}

/// Loads configuration documents into an [`Environment`].
pub struct ConfigLoader {
    options: LoadOptions,
    parser: Box<dyn DocumentParser>,
    source: Box<dyn DocumentSource>,
    validator: Box<dyn Validator>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ConfigLoader {
    /// YAML documents from the filesystem, no prefix, existing values win.
    pub fn new() -> Self {
        Self {
            options: LoadOptions::default(),
            parser: Box::new(YamlParser),
            source: Box::new(FsSource),
            validator: Box::new(NoValidation),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.options.precedence = precedence;
        self
    }

    /// Shorthand for [`Self::with_precedence`] from an override flag.
    pub fn with_override(self, override_existing: bool) -> Self {
        self.with_precedence(override_existing.into())
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_parser(mut self, parser: impl DocumentParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_source(mut self, source: impl DocumentSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load `path` into `env` and return the effective configuration.
    ///
    /// A missing or absent path returns the current snapshot unchanged.
    pub fn load<E: Environment + ?Sized>(&self, path: Option<&Path>, env: &mut E) -> Result<FlatMap> {
        self.load_report(path, env).map(|report| report.outcome.effective)
    }

    /// Like [`Self::load`], returning the full report.
    pub fn load_report<E: Environment + ?Sized>(
        &self,
        path: Option<&Path>,
        env: &mut E,
    ) -> Result<LoadReport> {
        let Some(path) = path.filter(|p| self.source.exists(p)) else {
            debug!(path = ?path, "No document found, using environment only");
            return Ok(LoadReport {
                outcome: MergeOutcome {
                    writes: FlatMap::new(),
                    effective: env.get_all(),
                },
                ..Default::default()
            });
        };

        let root = self.read_document(path)?;
        let mut report = self.apply_report(&root, env)?;
        report.document = Some(path.to_path_buf());
        info!(
            document = %path.display(),
            candidates = report.candidates.len(),
            written = report.outcome.writes.len(),
            precedence = %self.options.precedence,
            "Loaded configuration document"
        );
        Ok(report)
    }

    /// Load an already parsed tree into `env`.
    pub fn apply<E: Environment + ?Sized>(&self, root: &Node, env: &mut E) -> Result<FlatMap> {
        self.apply_report(root, env)
            .map(|report| report.outcome.effective)
    }

    fn apply_report<E: Environment + ?Sized>(&self, root: &Node, env: &mut E) -> Result<LoadReport> {
        self.validate(root)?;
        let candidates = self.candidates(root)?;
        let outcome = merge(&env.get_all(), candidates.clone(), self.options.precedence);
        if !outcome.writes.is_empty() {
            env.set_many(&outcome.writes);
        }
        Ok(LoadReport {
            document: None,
            candidates,
            outcome,
        })
    }

    /// Flatten and render `root` without touching any environment.
    ///
    /// Every entry is checked to be storable as an environment variable.
    pub fn candidates(&self, root: &Node) -> Result<FlatMap> {
        flatten(root, &self.options.prefix)?
            .into_iter()
            .map(|(key, node)| {
                let value = render(&key, node)?;
                if let Some(reason) = check_variable(&key, &value) {
                    return Err(LoadError::InvalidVariable { key, reason });
                }
                Ok((key, value))
            })
            .collect()
    }

    /// Parse `path` into a typed tree; no environment is read or written.
    pub fn load_structured(&self, path: &Path) -> Result<Node> {
        let root = self.read_document(path)?;
        self.validate(&root)?;
        Ok(root)
    }

    /// Variables in `env` that fall under this loader's prefix.
    pub fn load_from_env<E: Environment + ?Sized>(&self, env: &E) -> FlatMap {
        let mut all = env.get_all();
        if self.options.prefix.is_empty() {
            return all;
        }
        let head = format!("{}_", self.options.prefix.to_uppercase());
        all.retain(|key, _| key.starts_with(&head));
        all
    }

    fn read_document(&self, path: &Path) -> Result<Node> {
        let content = self.source.read(path)?;
        self.parser.parse(&content)
    }

    fn validate(&self, root: &Node) -> Result<()> {
        let errors = self.validator.validate(root);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoadError::Validation(errors))
        }
    }
}

/// Load `path` into the process environment.
///
/// With `override_existing` unset, variables that are already set keep
/// their values. Returns the effective configuration.
pub fn load_config(path: Option<&Path>, prefix: &str, override_existing: bool) -> Result<FlatMap> {
    ConfigLoader::new()
        .with_prefix(prefix)
        .with_override(override_existing)
        .load(path, &mut ProcessEnv)
}

/// Parse `path` into its typed tree without touching the environment.
pub fn load_structured(path: &Path) -> Result<Node> {
    ConfigLoader::new().load_structured(path)
}
