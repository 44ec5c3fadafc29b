//! Recipe error taxonomy.
//!
//! Every hook failure carries enough context (which hook, which state)
//! for the orchestrator to diagnose. The recipe performs no retries and
//! no partial-failure recovery; a failed hook halts the run and the
//! orchestrator decides whether to restart the whole lifecycle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::recipe::Stage;

/// Error raised by recipe lifecycle hooks.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// The option mapping violates a platform constraint.
    ///
    /// Normalization is designed to make this unreachable.
    #[error("invalid option state: {reason}")]
    InvalidOptionState { reason: String },

    /// An option name outside the declared schema was used.
    #[error("unknown option `{name}`")]
    UnknownOption { name: String },

    /// A value outside an option's enumerated domain was selected.
    #[error("value `{value}` is not in the domain of option `{name}`")]
    ValueNotInDomain { name: String, value: String },

    /// Option selections were changed after normalization froze them.
    #[error("options are frozen after normalization (current stage: {stage})")]
    OptionsFrozen { stage: Stage },

    /// The environment could not supply the build layout.
    #[error("failed to set up build layout at {path}")]
    Layout {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A generated descriptor could not be written.
    #[error("failed to write generated file {path}")]
    Generate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external build driver reported a failed build.
    ///
    /// The diagnostic payload is the driver's output, passed through
    /// verbatim. The recipe does not interpret compiler errors.
    #[error("build failed:\n{diagnostics}")]
    BuildFailure { diagnostics: String },

    /// The external driver's install step failed. Same pass-through
    /// policy as [`RecipeError::BuildFailure`].
    #[error("install failed:\n{diagnostics}")]
    PackageFailure { diagnostics: String },

    /// A lifecycle hook was invoked out of order.
    #[error("hook `{hook}` invoked in stage {actual}, expected {expected}")]
    HookOrder {
        hook: &'static str,
        expected: Stage,
        actual: Stage,
    },
}
