//! Build layout resolution.
//!
//! The layout is the process-local directory structure one recipe run
//! uses: an out-of-source build tree, a root for generated driver
//! inputs, and an install staging area. It is computed once per run
//! from settings and the declared package type, and is not persisted
//! across runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::metadata::PackageType;
use crate::core::settings::Settings;
use crate::error::RecipeError;

/// Directory structure for a single recipe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Root of the recipe's source tree.
    pub source_root: PathBuf,

    /// Out-of-source build tree handed to the external driver.
    pub build_root: PathBuf,

    /// Where generated driver inputs are written.
    pub generators_root: PathBuf,

    /// Install staging area populated by the package hook.
    pub install_root: PathBuf,
}

impl Layout {
    /// Compute the layout for `settings` rooted at `source_root` and
    /// create its directories.
    ///
    /// The paths are a pure function of settings and package type;
    /// directory creation is the only fallible part and propagates the
    /// environment's I/O error unchanged.
    pub fn resolve(
        source_root: &Path,
        settings: &Settings,
        package_type: PackageType,
    ) -> Result<Self, RecipeError> {
        let build_root = source_root
            .join("build")
            .join(settings.build_type.as_str());
        let generators_root = build_root.join("generators");
        let install_root = build_root.join("package");

        let layout = Layout {
            source_root: source_root.to_path_buf(),
            build_root,
            generators_root,
            install_root,
        };

        for dir in [
            &layout.build_root,
            &layout.generators_root,
            &layout.install_root,
        ] {
            create_dir(dir)?;
        }

        for staging in staging_dirs(package_type) {
            create_dir(&layout.install_root.join(staging))?;
        }

        Ok(layout)
    }
}

/// Install staging subdirectories expected for a package type.
fn staging_dirs(package_type: PackageType) -> &'static [&'static str] {
    match package_type {
        PackageType::Library => &["lib", "include"],
        PackageType::Application => &["bin"],
        PackageType::HeaderOnly => &["include"],
    }
}

fn create_dir(path: &Path) -> Result<(), RecipeError> {
    fs::create_dir_all(path).map_err(|source| RecipeError::Layout {
        path: path.to_path_buf(),
        source,
    })
}
