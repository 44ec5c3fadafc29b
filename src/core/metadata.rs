//! Package identity metadata.

use semver::Version;
use serde::{Deserialize, Serialize};

/// How the packaged artifact is consumed by downstream projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    /// A linkable library (static archive or shared object).
    #[default]
    Library,
    /// A standalone executable.
    Application,
    /// Headers only, nothing to link.
    HeaderOnly,
}

/// Identity metadata for a packaged library.
///
/// Immutable once declared. Used for reporting and consumer-facing
/// output, never for decision logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name
    pub name: String,

    /// Package version (semver)
    pub version: Version,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Authors
    #[serde(default)]
    pub authors: Vec<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Topic tags
    #[serde(default)]
    pub topics: Vec<String>,

    /// How the artifact is consumed downstream
    #[serde(default, rename = "package-type")]
    pub package_type: PackageType,
}

impl PackageMetadata {
    /// Create metadata with the required fields; optional fields start
    /// empty.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        PackageMetadata {
            name: name.into(),
            version,
            license: None,
            authors: Vec::new(),
            homepage: None,
            description: None,
            topics: Vec::new(),
            package_type: PackageType::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults() {
        let meta = PackageMetadata::new("cfl-library", Version::new(1, 9, 0));
        assert_eq!(meta.name, "cfl-library");
        assert_eq!(meta.version.to_string(), "1.9.0");
        assert_eq!(meta.package_type, PackageType::Library);
        assert!(meta.topics.is_empty());
    }
}
