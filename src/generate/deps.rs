//! Dependency-resolution descriptor.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// File name of the dependency descriptor in the generators root.
pub const DEPS_FILE: &str = "dependencies.json";

/// A declared dependency resolved to a concrete location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// Resolved version
    pub version: String,

    /// Root directory of the resolved package
    pub root: PathBuf,
}

/// Mapping of a package's declared dependencies to resolved locations.
///
/// The base recipe declares no dependencies, so the mapping is empty;
/// the file is still written so the driver sees a complete set of
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepsDescriptor {
    /// The package the descriptor belongs to.
    pub package: String,

    /// Declared dependencies, keyed by package name.
    #[serde(default)]
    pub dependencies: BTreeMap<String, ResolvedDependency>,
}

impl DepsDescriptor {
    /// Create an empty descriptor for a package.
    pub fn new(package: impl Into<String>) -> Self {
        DepsDescriptor {
            package: package.into(),
            dependencies: BTreeMap::new(),
        }
    }

    /// Record a resolved dependency.
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>, root: PathBuf) {
        self.dependencies.insert(
            name.into(),
            ResolvedDependency {
                version: version.into(),
                root,
            },
        );
    }

    /// Render the descriptor as pretty-printed JSON.
    pub fn render(&self) -> Result<String, RecipeError> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| RecipeError::Generate {
                path: PathBuf::from(DEPS_FILE),
                source: io::Error::new(io::ErrorKind::InvalidData, e),
            })?;
        json.push('\n');
        Ok(json)
    }

    /// Write the descriptor into a generators directory.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, RecipeError> {
        let path = dir.join(DEPS_FILE);
        let contents = self.render()?;
        std::fs::write(&path, contents).map_err(|source| RecipeError::Generate {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
