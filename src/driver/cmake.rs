//! CMake build driver.
//!
//! Drives an existing CMake project through configure, build, and
//! install. Diagnostics from failed invocations are passed through
//! verbatim; this module never interprets compiler errors.

use std::path::PathBuf;

use crate::driver::{BuildDriver, DriverContext, DriverError};
use crate::generate::TOOLCHAIN_FILE;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Driver wrapping the `cmake` command-line tool.
pub struct CMakeDriver {
    program: PathBuf,
}

impl CMakeDriver {
    /// Locate CMake on the PATH.
    pub fn locate() -> Result<Self, DriverError> {
        match find_cmake() {
            Some(program) => Ok(CMakeDriver { program }),
            None => Err(DriverError::NotFound {
                tool: "cmake".to_string(),
                install_hint: cmake_install_hint(),
            }),
        }
    }

    /// Use an explicit CMake executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        CMakeDriver {
            program: program.into(),
        }
    }

    fn configure_args(ctx: &DriverContext) -> Vec<String> {
        let mut args = Vec::new();

        args.push("-S".to_string());
        args.push(ctx.source_dir.display().to_string());
        args.push("-B".to_string());
        args.push(ctx.build_dir.display().to_string());

        // The toolchain descriptor carries build type, compiler, and
        // the normalized option values.
        args.push(format!(
            "-DCMAKE_TOOLCHAIN_FILE={}",
            ctx.generators_dir.join(TOOLCHAIN_FILE).display()
        ));

        // Single-config generators also want the build type directly.
        args.push(format!("-DCMAKE_BUILD_TYPE={}", ctx.build_type.as_str()));

        args.push(format!(
            "-DCMAKE_INSTALL_PREFIX={}",
            ctx.install_dir.display()
        ));

        args
    }

    fn build_args(ctx: &DriverContext) -> Vec<String> {
        let mut args = vec!["--build".to_string(), ctx.build_dir.display().to_string()];

        args.push("--config".to_string());
        args.push(ctx.build_type.as_str().to_string());

        args.push("--parallel".to_string());
        if let Some(jobs) = ctx.jobs {
            args.push(jobs.to_string());
        }

        if ctx.verbose {
            args.push("--verbose".to_string());
        }

        args
    }

    fn install_args(ctx: &DriverContext) -> Vec<String> {
        vec![
            "--install".to_string(),
            ctx.build_dir.display().to_string(),
            "--config".to_string(),
            ctx.build_type.as_str().to_string(),
            "--prefix".to_string(),
            ctx.install_dir.display().to_string(),
        ]
    }

    fn run(&self, args: &[String]) -> Result<(), DriverError> {
        let cmd = ProcessBuilder::new(&self.program).args(args);
        tracing::debug!("running: {}", cmd.display_command());

        let output = cmd.exec().map_err(|e| DriverError::Spawn {
            program: self.program.display().to_string(),
            source: std::io::Error::other(e.to_string()),
        })?;

        if !output.status.success() {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
            if diagnostics.trim().is_empty() {
                diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
            }
            return Err(DriverError::Failed { diagnostics });
        }

        Ok(())
    }
}

impl BuildDriver for CMakeDriver {
    fn name(&self) -> &str {
        "cmake"
    }

    fn configure(&self, ctx: &DriverContext) -> Result<(), DriverError> {
        self.run(&Self::configure_args(ctx))
    }

    fn build(&self, ctx: &DriverContext) -> Result<(), DriverError> {
        self.run(&Self::build_args(ctx))
    }

    fn install(&self, ctx: &DriverContext) -> Result<(), DriverError> {
        self.run(&Self::install_args(ctx))
    }
}

/// Platform-specific CMake install hint.
fn cmake_install_hint() -> String {
    #[cfg(target_os = "linux")]
    {
        "Install CMake: apt install cmake, dnf install cmake, or https://cmake.org/download/"
            .to_string()
    }
    #[cfg(target_os = "macos")]
    {
        "Install CMake: brew install cmake or https://cmake.org/download/".to_string()
    }
    #[cfg(target_os = "windows")]
    {
        "Install CMake: winget install cmake or https://cmake.org/download/".to_string()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        "Install CMake from https://cmake.org/download/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::BuildType;
    use crate::driver::DriverContext;

    fn ctx() -> DriverContext {
        DriverContext {
            source_dir: PathBuf::from("/src"),
            build_dir: PathBuf::from("/src/build/Release"),
            generators_dir: PathBuf::from("/src/build/Release/generators"),
            install_dir: PathBuf::from("/src/build/Release/package"),
            build_type: BuildType::Release,
            jobs: None,
            verbose: false,
        }
    }

    #[test]
    fn test_configure_args_reference_generated_inputs() {
        let args = CMakeDriver::configure_args(&ctx());

        assert!(args.contains(&"-S".to_string()));
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
        assert!(args
            .iter()
            .any(|a| a.starts_with("-DCMAKE_TOOLCHAIN_FILE=") && a.ends_with("toolchain.cmake")));
        assert!(args
            .iter()
            .any(|a| a.starts_with("-DCMAKE_INSTALL_PREFIX=")));
    }

    #[test]
    fn test_build_args_respect_jobs() {
        let args = CMakeDriver::build_args(&ctx().with_jobs(Some(8)));

        let parallel = args.iter().position(|a| a == "--parallel").unwrap();
        assert_eq!(args[parallel + 1], "8");
    }

    #[test]
    fn test_install_args_target_staging_prefix() {
        let args = CMakeDriver::install_args(&ctx());

        assert_eq!(args[0], "--install");
        let prefix = args.iter().position(|a| a == "--prefix").unwrap();
        assert!(args[prefix + 1].ends_with("package"));
    }
}
