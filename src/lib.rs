//! yamlenv library
//!
//! Projects a YAML configuration document into environment variables.
//! Nested keys are flattened into upper-cased, `_`-joined names, values are
//! rendered to strings, and variables that are already set win unless the
//! load overrides them.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let effective = yamlenv::load_config(Some(Path::new("config.yaml")), "MYAPP", false)?;
//! println!("{:?}", effective.get("MYAPP_DATABASE_HOST"));
//! # Ok::<(), yamlenv::LoadError>(())
//! ```

pub mod cli;
pub mod env;
pub mod error;
pub mod flatten;
pub mod format;
pub mod loader;
pub mod merge;
pub mod node;
pub mod parser;
pub mod paths;
pub mod render;
pub mod source;
pub mod validate;

pub use env::{Environment, FlatMap, MemoryEnv, ProcessEnv};
pub use error::{ErrorCode, LoadError, Result};
pub use loader::{ConfigLoader, LoadOptions, LoadReport, load_config, load_structured};
pub use merge::Precedence;
pub use node::Node;
