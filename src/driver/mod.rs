//! External build driver seam.
//!
//! The recipe treats the underlying build system as a black box behind
//! a uniform configure/build/install interface. [`CMakeDriver`] is the
//! real implementation; lifecycle tests substitute scripted drivers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::settings::{BuildType, Settings};
use crate::layout::Layout;

mod cmake;

pub use cmake::CMakeDriver;

/// Inputs handed to every driver operation.
#[derive(Debug, Clone)]
pub struct DriverContext {
    /// Source tree the driver configures from.
    pub source_dir: PathBuf,

    /// Out-of-source build tree.
    pub build_dir: PathBuf,

    /// Directory holding the generated driver inputs.
    pub generators_dir: PathBuf,

    /// Install staging prefix.
    pub install_dir: PathBuf,

    /// Debug or release build.
    pub build_type: BuildType,

    /// Parallel job count, when the driver supports it.
    pub jobs: Option<usize>,

    /// Verbose driver output.
    pub verbose: bool,
}

impl DriverContext {
    /// Build a context from a resolved layout.
    pub fn new(layout: &Layout, settings: &Settings) -> Self {
        DriverContext {
            source_dir: layout.source_root.clone(),
            build_dir: layout.build_root.clone(),
            generators_dir: layout.generators_root.clone(),
            install_dir: layout.install_root.clone(),
            build_type: settings.build_type,
            jobs: None,
            verbose: false,
        }
    }

    /// Set the parallel job count.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Error from an external driver operation.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver tool is not installed.
    #[error("{tool} not found. {install_hint}")]
    NotFound { tool: String, install_hint: String },

    /// The driver executable could not be spawned.
    #[error("failed to invoke `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The driver ran and reported failure. The diagnostics are the
    /// driver's own output, unmodified.
    #[error("{diagnostics}")]
    Failed { diagnostics: String },
}

impl DriverError {
    /// Diagnostic payload handed through to the recipe error.
    pub fn diagnostics(&self) -> String {
        self.to_string()
    }
}

/// Uniform configure/build/install interface over an external build
/// system.
pub trait BuildDriver {
    /// Driver name for logs and error context.
    fn name(&self) -> &str;

    /// Configure the build tree from the generated inputs.
    fn configure(&self, ctx: &DriverContext) -> Result<(), DriverError>;

    /// Run the build.
    fn build(&self, ctx: &DriverContext) -> Result<(), DriverError>;

    /// Install build outputs into the staging prefix.
    fn install(&self, ctx: &DriverContext) -> Result<(), DriverError>;
}
