//! Generated build driver inputs.
//!
//! The generation hook writes two artifacts into the layout's
//! generators root: a dependency-resolution descriptor and a toolchain
//! descriptor. Both are deterministic for a given settings/option
//! state, so re-running generation overwrites with identical content.

pub mod deps;
pub mod toolchain;

pub use deps::{DepsDescriptor, ResolvedDependency, DEPS_FILE};
pub use toolchain::{ToolchainDescriptor, TOOLCHAIN_FILE};
