//! Drydock - a recipe-driven build and package pipeline for CMake-based
//! C libraries.
//!
//! This crate models a package recipe: identity metadata, a declared
//! option schema, environment-provided settings, and an ordered
//! lifecycle (option normalization, layout resolution, driver-input
//! generation, build, install, consumer metadata export) driven against
//! an external build system through the [`driver::BuildDriver`] seam.

pub mod core;
pub mod driver;
pub mod error;
pub mod generate;
pub mod layout;
pub mod recipe;
pub mod util;

pub use crate::core::manifest::{RecipeManifest, MANIFEST_FILE};
pub use crate::core::metadata::{PackageMetadata, PackageType};
pub use crate::core::options::{OptionMap, OptionValue};
pub use crate::core::settings::{Arch, BuildType, Compiler, Os, Settings};
pub use crate::driver::{BuildDriver, CMakeDriver, DriverContext, DriverError};
pub use crate::error::RecipeError;
pub use crate::layout::Layout;
pub use crate::recipe::{PackageInfo, Recipe, Stage};
