//! End-to-end lifecycle tests.
//!
//! These drive the full hook sequence with a scripted driver standing
//! in for CMake, so no toolchain is required.

use std::cell::RefCell;
use std::fs;

use tempfile::TempDir;

use drydock::driver::{BuildDriver, DriverContext, DriverError};
use drydock::{
    Arch, BuildType, Compiler, OptionValue, Os, Recipe, RecipeError, RecipeManifest, Settings,
    Stage,
};

/// Driver that records calls and fails where scripted.
#[derive(Default)]
struct ScriptedDriver {
    fail_build: Option<String>,
    fail_install: Option<String>,
    calls: RefCell<Vec<&'static str>>,
}

impl ScriptedDriver {
    fn failing_build(diagnostics: &str) -> Self {
        ScriptedDriver {
            fail_build: Some(diagnostics.to_string()),
            ..Default::default()
        }
    }

    fn failing_install(diagnostics: &str) -> Self {
        ScriptedDriver {
            fail_install: Some(diagnostics.to_string()),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl BuildDriver for ScriptedDriver {
    fn name(&self) -> &str {
        "scripted"
    }

    fn configure(&self, _ctx: &DriverContext) -> Result<(), DriverError> {
        self.calls.borrow_mut().push("configure");
        Ok(())
    }

    fn build(&self, _ctx: &DriverContext) -> Result<(), DriverError> {
        self.calls.borrow_mut().push("build");
        match &self.fail_build {
            Some(diagnostics) => Err(DriverError::Failed {
                diagnostics: diagnostics.clone(),
            }),
            None => Ok(()),
        }
    }

    fn install(&self, _ctx: &DriverContext) -> Result<(), DriverError> {
        self.calls.borrow_mut().push("install");
        match &self.fail_install {
            Some(diagnostics) => Err(DriverError::Failed {
                diagnostics: diagnostics.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn linux_settings() -> Settings {
    Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release, Arch::X86_64)
}

fn windows_settings() -> Settings {
    Settings::new(Os::Windows, Compiler::Msvc, BuildType::Release, Arch::X86_64)
}

fn cfl_recipe(settings: Settings) -> Recipe {
    Recipe::new(RecipeManifest::cfl_library(), settings)
}

#[test]
fn linux_default_options_build_static_with_pic() {
    let tmp = TempDir::new().unwrap();
    let driver = ScriptedDriver::default();
    let mut recipe = cfl_recipe(linux_settings());

    recipe.normalize_options().unwrap();
    assert_eq!(recipe.options().get_bool("shared"), Some(false));
    assert_eq!(recipe.options().get_bool("fPIC"), Some(true));

    recipe.resolve_layout(tmp.path()).unwrap();
    recipe.generate().unwrap();

    let generators = tmp.path().join("build/Release/generators");
    let toolchain = fs::read_to_string(generators.join("toolchain.cmake")).unwrap();
    assert!(toolchain.contains("set(BUILD_SHARED_LIBS OFF)"));
    assert!(toolchain.contains("set(CMAKE_POSITION_INDEPENDENT_CODE ON)"));

    let deps = fs::read_to_string(generators.join("dependencies.json")).unwrap();
    assert!(deps.contains("\"dependencies\": {}"));

    recipe.build(&driver).unwrap();
    recipe.package(&driver).unwrap();
    assert_eq!(driver.calls(), vec!["configure", "build", "install"]);

    let info = recipe.package_info().unwrap();
    assert_eq!(info.libs, vec!["cfl-lib"]);
    assert_eq!(recipe.stage(), Stage::Packaged);
}

#[test]
fn shared_build_drops_fpic_from_descriptor() {
    let tmp = TempDir::new().unwrap();
    let driver = ScriptedDriver::default();
    let mut recipe = cfl_recipe(linux_settings());

    recipe
        .set_option("shared", OptionValue::Bool(true))
        .unwrap();
    recipe.normalize_options().unwrap();

    assert_eq!(recipe.options().get_bool("shared"), Some(true));
    assert_eq!(recipe.options().get("fPIC"), None);

    recipe.resolve_layout(tmp.path()).unwrap();
    recipe.generate().unwrap();

    let toolchain = fs::read_to_string(
        tmp.path()
            .join("build/Release/generators/toolchain.cmake"),
    )
    .unwrap();
    assert!(toolchain.contains("set(BUILD_SHARED_LIBS ON)"));
    assert!(!toolchain.contains("CMAKE_POSITION_INDEPENDENT_CODE"));

    recipe.build(&driver).unwrap();
    recipe.package(&driver).unwrap();

    // The consumer contract does not vary by build variant.
    assert_eq!(recipe.package_info().unwrap().libs, vec!["cfl-lib"]);
}

#[test]
fn windows_ignores_requested_fpic() {
    let mut recipe = cfl_recipe(windows_settings());

    // Explicitly requested, still withdrawn by normalization.
    recipe.set_option("fPIC", OptionValue::Bool(true)).unwrap();
    recipe.normalize_options().unwrap();

    assert_eq!(recipe.options().get("fPIC"), None);
    assert!(!recipe.options().is_declared("fPIC"));
    assert_eq!(recipe.options().get_bool("shared"), Some(false));
}

#[test]
fn windows_descriptor_carries_no_pic_variable() {
    let tmp = TempDir::new().unwrap();
    let mut recipe = cfl_recipe(windows_settings());

    recipe.normalize_options().unwrap();
    recipe.resolve_layout(tmp.path()).unwrap();
    recipe.generate().unwrap();

    let toolchain = fs::read_to_string(
        tmp.path()
            .join("build/Release/generators/toolchain.cmake"),
    )
    .unwrap();
    assert!(!toolchain.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
    assert!(toolchain.contains("set(CMAKE_C_COMPILER cl)"));
}

#[test]
fn build_failure_carries_driver_diagnostics_verbatim() {
    let tmp = TempDir::new().unwrap();
    let driver = ScriptedDriver::failing_build("cc1: error: unrecognized option '-mfoo'");
    let mut recipe = cfl_recipe(linux_settings());

    recipe.normalize_options().unwrap();
    recipe.resolve_layout(tmp.path()).unwrap();
    recipe.generate().unwrap();

    let err = recipe.build(&driver).unwrap_err();
    match err {
        RecipeError::BuildFailure { diagnostics } => {
            assert_eq!(diagnostics, "cc1: error: unrecognized option '-mfoo'");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The run halts: install was never reached and package refuses to
    // run from the failed state.
    assert_eq!(driver.calls(), vec!["configure", "build"]);
    assert_eq!(recipe.stage(), Stage::Generated);
    assert!(matches!(
        recipe.package(&driver),
        Err(RecipeError::HookOrder { .. })
    ));
}

#[test]
fn install_failure_surfaces_as_package_failure() {
    let tmp = TempDir::new().unwrap();
    let driver = ScriptedDriver::failing_install("file INSTALL cannot copy");
    let mut recipe = cfl_recipe(linux_settings());

    recipe.normalize_options().unwrap();
    recipe.resolve_layout(tmp.path()).unwrap();
    recipe.generate().unwrap();
    recipe.build(&driver).unwrap();

    let err = recipe.package(&driver).unwrap_err();
    match err {
        RecipeError::PackageFailure { diagnostics } => {
            assert!(diagnostics.contains("INSTALL cannot copy"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        recipe.package_info(),
        Err(RecipeError::HookOrder { .. })
    ));
}

#[test]
fn debug_settings_generate_a_debug_tree() {
    let tmp = TempDir::new().unwrap();
    let mut recipe = cfl_recipe(linux_settings().with_build_type(BuildType::Debug));

    recipe.normalize_options().unwrap();
    recipe.resolve_layout(tmp.path()).unwrap();
    recipe.generate().unwrap();

    let toolchain = fs::read_to_string(
        tmp.path().join("build/Debug/generators/toolchain.cmake"),
    )
    .unwrap();
    assert!(toolchain.contains("set(CMAKE_BUILD_TYPE Debug)"));
}

#[test]
fn regeneration_with_unchanged_state_is_byte_identical() {
    let tmp_a = TempDir::new().unwrap();
    let tmp_b = TempDir::new().unwrap();

    for tmp in [&tmp_a, &tmp_b] {
        let mut recipe = cfl_recipe(linux_settings());
        recipe.normalize_options().unwrap();
        recipe.resolve_layout(tmp.path()).unwrap();
        recipe.generate().unwrap();
    }

    let read = |tmp: &TempDir, name: &str| {
        fs::read_to_string(tmp.path().join("build/Release/generators").join(name)).unwrap()
    };

    assert_eq!(
        read(&tmp_a, "toolchain.cmake"),
        read(&tmp_b, "toolchain.cmake")
    );
    assert_eq!(
        read(&tmp_a, "dependencies.json"),
        read(&tmp_b, "dependencies.json")
    );
}
