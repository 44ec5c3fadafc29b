//! Recipe.toml manifest parsing and schema.
//!
//! The manifest is the declarative surface of a recipe: identity
//! metadata, the boolean option schema with defaults, the source
//! subtrees exported into a build context, and the library names
//! exposed to downstream consumers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::core::metadata::{PackageMetadata, PackageType};
use crate::util::fs::{copy_file_with_parents, glob_files};

/// Canonical manifest file name.
pub const MANIFEST_FILE: &str = "Recipe.toml";

/// The parsed Recipe.toml manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeManifest {
    /// Package metadata from the `[package]` section.
    pub package: PackageMetadata,

    /// Boolean option defaults from the `[options]` section. Every
    /// declared option offers the {true, false} domain.
    #[serde(default)]
    pub options: BTreeMap<String, bool>,

    /// Source export declaration from the `[export]` section.
    #[serde(default)]
    pub export: ExportManifest,

    /// Consumer contract from the `[package-info]` section.
    #[serde(default, rename = "package-info")]
    pub package_info: PackageInfoManifest,
}

/// Declared source subtrees copied into a build context.
///
/// This is a manifest, not a runtime interface: the lifecycle hooks
/// build in-tree and never consult it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportManifest {
    /// Glob patterns relative to the recipe root.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ExportManifest {
    /// Copy the declared subtrees from `source_root` into `dest`,
    /// preserving relative paths.
    pub fn copy_to(&self, source_root: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        let files = glob_files(source_root, &self.sources)?;
        let mut copied = Vec::with_capacity(files.len());

        for file in files {
            let rel = file.strip_prefix(source_root).with_context(|| {
                format!(
                    "exported file {} escapes recipe root {}",
                    file.display(),
                    source_root.display()
                )
            })?;
            let target = dest.join(rel);
            copy_file_with_parents(&file, &target)?;
            copied.push(target);
        }

        Ok(copied)
    }
}

/// Library names this package exposes for linking.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInfoManifest {
    #[serde(default)]
    pub libs: Vec<String>,
}

impl RecipeManifest {
    /// Load and validate a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let manifest: RecipeManifest = toml::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))?;

        manifest.validate()?;
        Ok(manifest)
    }

    /// Locate the manifest in a recipe root directory.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        path.is_file().then_some(path)
    }

    /// Check manifest invariants that the schema alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.package.name.is_empty() {
            bail!("package name must not be empty");
        }
        if self.package_info.libs.iter().any(|l| l.is_empty()) {
            bail!("package-info libs must not contain empty names");
        }
        Ok(())
    }

    /// The bundled recipe for the CFL commons C library.
    ///
    /// Mirrors the repository's own Recipe.toml so the library is usable
    /// without a manifest on disk.
    pub fn cfl_library() -> Self {
        let mut options = BTreeMap::new();
        options.insert("shared".to_string(), false);
        options.insert("fPIC".to_string(), true);

        RecipeManifest {
            package: PackageMetadata {
                name: "cfl-library".to_string(),
                version: Version::new(1, 9, 0),
                license: Some("ASF 2.0".to_string()),
                authors: vec!["Fabio Uggeri fabiouggeri@gmail.com".to_string()],
                homepage: Some("https://github.com/fabiouggeri/cfl-library".to_string()),
                description: Some(
                    "Commons functions library is a set of functions commonly used in my C \
                     projects. The goal is to be an abstraction and simplification layer."
                        .to_string(),
                ),
                topics: vec!["c".to_string(), "commons".to_string(), "library".to_string()],
                package_type: PackageType::Library,
            },
            options,
            export: ExportManifest {
                sources: vec![
                    "CMakeLists.txt".to_string(),
                    "cfl-headers/**".to_string(),
                    "cfl-lib/**".to_string(),
                ],
            },
            package_info: PackageInfoManifest {
                libs: vec!["cfl-lib".to_string()],
            },
        }
    }
}
