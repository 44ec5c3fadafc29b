//! Recipe lifecycle and stage machine.
//!
//! A [`Recipe`] is the configuration object for one build-and-package
//! run of a native library. The orchestrator owns the instance, may
//! adjust option selections before normalization, and then calls the
//! hooks in lifecycle order:
//!
//! normalize_options -> resolve_layout -> generate -> build -> package
//! -> package_info
//!
//! Hooks verify the current stage and reject out-of-order invocation
//! instead of relying on caller discipline. There is no retry and no
//! backward transition; a failed hook halts the run and the
//! orchestrator restarts the whole lifecycle if it wants another
//! attempt.

use std::fmt;
use std::path::Path;

use crate::core::manifest::{ExportManifest, RecipeManifest};
use crate::core::metadata::PackageMetadata;
use crate::core::options::{OptionMap, OptionValue, FPIC, SHARED};
use crate::core::settings::{Os, Settings};
use crate::driver::{BuildDriver, DriverContext};
use crate::error::RecipeError;
use crate::generate::{DepsDescriptor, ToolchainDescriptor};
use crate::layout::Layout;

/// Lifecycle stage of a recipe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Options seeded with defaults, nothing normalized yet.
    Uninitialized,
    /// Option mapping normalized and frozen.
    Normalized,
    /// Build layout resolved and created.
    LayoutReady,
    /// Driver inputs written to the generators root.
    Generated,
    /// External driver reported a successful build.
    Built,
    /// Install staging populated; terminal state for a run.
    Packaged,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Uninitialized => "uninitialized",
            Stage::Normalized => "normalized",
            Stage::LayoutReady => "layout-ready",
            Stage::Generated => "generated",
            Stage::Built => "built",
            Stage::Packaged => "packaged",
        };
        f.write_str(name)
    }
}

/// Link-time artifact names exposed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Library names to link against.
    pub libs: Vec<String>,
}

/// A build-and-package recipe for one native library.
pub struct Recipe {
    metadata: PackageMetadata,
    settings: Settings,
    options: OptionMap,
    export: ExportManifest,
    libs: Vec<String>,
    stage: Stage,
    layout: Option<Layout>,
    jobs: Option<usize>,
    verbose: bool,
}

impl Recipe {
    /// Instantiate a recipe from its manifest and the
    /// environment-provided settings.
    ///
    /// Option defaults from the manifest seed the mapping; the
    /// orchestrator may overwrite selections until normalization
    /// freezes them.
    pub fn new(manifest: RecipeManifest, settings: Settings) -> Self {
        let mut options = OptionMap::new();
        for (name, default) in &manifest.options {
            options.declare_bool(name, *default);
        }

        Recipe {
            metadata: manifest.package,
            settings,
            options,
            export: manifest.export,
            libs: manifest.package_info.libs,
            stage: Stage::Uninitialized,
            layout: None,
            jobs: None,
            verbose: false,
        }
    }

    /// Set the parallel job count passed to the driver.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Request verbose driver output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Identity metadata.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Environment-provided settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current option state.
    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    /// Declared source export manifest.
    pub fn export(&self) -> &ExportManifest {
        &self.export
    }

    /// Declared link-time library names.
    ///
    /// Static declared data, identical for every option permutation.
    pub fn declared_libs(&self) -> &[String] {
        &self.libs
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Resolved layout, once `resolve_layout` has run.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Select an option value before normalization.
    pub fn set_option(&mut self, name: &str, value: OptionValue) -> Result<(), RecipeError> {
        if self.stage != Stage::Uninitialized {
            return Err(RecipeError::OptionsFrozen { stage: self.stage });
        }
        self.options.set(name, value)
    }

    /// Normalize the option mapping for the target platform.
    ///
    /// Runs once, before any other hook. Afterwards the mapping is
    /// frozen for the remainder of the run and satisfies the platform
    /// invariant: `fPIC` is absent on Windows and absent whenever
    /// `shared` is true.
    pub fn normalize_options(&mut self) -> Result<(), RecipeError> {
        self.expect_stage(Stage::Uninitialized, "normalize_options")?;

        normalize(&mut self.options, self.settings.os);
        verify_option_state(&self.options, self.settings.os)?;

        tracing::debug!("options normalized: {}", describe_options(&self.options));
        self.stage = Stage::Normalized;
        Ok(())
    }

    /// Resolve and create the build layout under `source_root`.
    pub fn resolve_layout(&mut self, source_root: &Path) -> Result<&Layout, RecipeError> {
        self.expect_stage(Stage::Normalized, "resolve_layout")?;

        let layout = Layout::resolve(source_root, &self.settings, self.metadata.package_type)?;
        tracing::debug!("build root: {}", layout.build_root.display());

        self.stage = Stage::LayoutReady;
        Ok(self.layout.insert(layout))
    }

    /// Write the dependency and toolchain descriptors for the frozen
    /// settings/option state.
    ///
    /// Idempotent in content: unchanged state produces byte-identical
    /// files.
    pub fn generate(&mut self) -> Result<(), RecipeError> {
        self.expect_stage(Stage::LayoutReady, "generate")?;
        let layout = self.require_layout("generate")?;

        let deps = DepsDescriptor::new(&self.metadata.name);
        let deps_path = deps.write(&layout.generators_root)?;
        tracing::debug!("wrote {}", deps_path.display());

        let toolchain = ToolchainDescriptor::from_state(&self.settings, &self.options);
        let toolchain_path = toolchain.write(&layout.generators_root)?;
        tracing::debug!("wrote {}", toolchain_path.display());

        self.stage = Stage::Generated;
        Ok(())
    }

    /// Run the external driver's configure and build steps.
    ///
    /// Succeeds iff the driver reports success; driver diagnostics are
    /// carried through verbatim on failure.
    pub fn build(&mut self, driver: &dyn BuildDriver) -> Result<(), RecipeError> {
        self.expect_stage(Stage::Generated, "build")?;
        let ctx = self.driver_context("build")?;

        tracing::info!(
            "building {} {} with {}",
            self.metadata.name,
            self.metadata.version,
            driver.name()
        );

        driver
            .configure(&ctx)
            .and_then(|()| driver.build(&ctx))
            .map_err(|e| RecipeError::BuildFailure {
                diagnostics: e.diagnostics(),
            })?;

        self.stage = Stage::Built;
        Ok(())
    }

    /// Run the external driver's install step into the staging area.
    pub fn package(&mut self, driver: &dyn BuildDriver) -> Result<(), RecipeError> {
        self.expect_stage(Stage::Built, "package")?;
        let ctx = self.driver_context("package")?;

        tracing::info!(
            "packaging {} into {}",
            self.metadata.name,
            ctx.install_dir.display()
        );

        driver.install(&ctx).map_err(|e| RecipeError::PackageFailure {
            diagnostics: e.diagnostics(),
        })?;

        self.stage = Stage::Packaged;
        Ok(())
    }

    /// Consumer metadata export: the library names downstream packages
    /// link against.
    ///
    /// Pure query on declared data; never inspects the filesystem.
    /// Valid only after a successful package step.
    pub fn package_info(&self) -> Result<PackageInfo, RecipeError> {
        self.expect_stage(Stage::Packaged, "package_info")?;

        Ok(PackageInfo {
            libs: self.libs.clone(),
        })
    }

    fn expect_stage(&self, expected: Stage, hook: &'static str) -> Result<(), RecipeError> {
        if self.stage != expected {
            return Err(RecipeError::HookOrder {
                hook,
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    fn require_layout(&self, hook: &'static str) -> Result<&Layout, RecipeError> {
        match &self.layout {
            Some(layout) => Ok(layout),
            None => Err(RecipeError::HookOrder {
                hook,
                expected: Stage::LayoutReady,
                actual: self.stage,
            }),
        }
    }

    fn driver_context(&self, hook: &'static str) -> Result<DriverContext, RecipeError> {
        let layout = self.require_layout(hook)?;
        Ok(DriverContext::new(layout, &self.settings)
            .with_jobs(self.jobs)
            .with_verbose(self.verbose))
    }
}

/// Apply the platform rules to an option mapping.
///
/// On Windows, `fPIC` is not an offered choice at all; for shared
/// builds, a selected `fPIC` value is dropped. Both removals are
/// idempotent, so applying the rules to an already-normalized mapping
/// changes nothing.
fn normalize(options: &mut OptionMap, os: Os) {
    if os == Os::Windows {
        options.remove(FPIC);
    }

    if options.get_bool(SHARED) == Some(true) {
        options.unset(FPIC);
    }
}

/// Check the platform invariant on a mapping.
///
/// Normalization makes a violation unreachable; the check keeps the
/// invariant testable.
fn verify_option_state(options: &OptionMap, os: Os) -> Result<(), RecipeError> {
    if options.get(FPIC).is_some() {
        if os == Os::Windows {
            return Err(RecipeError::InvalidOptionState {
                reason: format!("`{}` selected on Windows", FPIC),
            });
        }
        if options.get_bool(SHARED) == Some(true) {
            return Err(RecipeError::InvalidOptionState {
                reason: format!("`{}` selected for a shared build", FPIC),
            });
        }
    }
    Ok(())
}

fn describe_options(options: &OptionMap) -> String {
    let parts: Vec<String> = options
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    parts.join(", ")
}
