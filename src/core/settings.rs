//! Environment-provided build settings.
//!
//! Settings describe the build context the orchestrator runs in: target
//! operating system, compiler family, build type, and CPU architecture.
//! They are supplied before any lifecycle hook runs and are never
//! mutated by the recipe.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Freebsd,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::Macos => write!(f, "macos"),
            Os::Windows => write!(f, "windows"),
            Os::Freebsd => write!(f, "freebsd"),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl Compiler {
    /// Conventional executable name for this compiler family.
    pub fn executable(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang | Compiler::AppleClang => "clang",
            Compiler::Msvc => "cl",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compiler::Gcc => write!(f, "gcc"),
            Compiler::Clang => write!(f, "clang"),
            Compiler::AppleClang => write!(f, "apple-clang"),
            Compiler::Msvc => write!(f, "msvc"),
        }
    }
}

/// Build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    /// The name used in build system configuration and directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    #[serde(rename = "x86_64")]
    #[value(name = "x86_64")]
    X86_64,
    Aarch64,
    Arm,
    X86,
}

impl Arch {
    /// Processor name in the external build system's convention.
    pub fn processor(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Arm => "arm",
            Arch::X86 => "x86",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.processor())
    }
}

/// The full build context supplied by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Target operating system
    pub os: Os,

    /// Compiler family
    pub compiler: Compiler,

    /// Debug or release build
    pub build_type: BuildType,

    /// Target CPU architecture
    pub arch: Arch,
}

impl Settings {
    /// Create settings from explicit components.
    pub fn new(os: Os, compiler: Compiler, build_type: BuildType, arch: Arch) -> Self {
        Settings {
            os,
            compiler,
            build_type,
            arch,
        }
    }

    /// Detect settings for the running host.
    ///
    /// Uses Rust's compile-time platform constants as approximation,
    /// with the conventional default compiler per platform.
    pub fn host() -> Self {
        let os = match std::env::consts::OS {
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            "freebsd" => Os::Freebsd,
            _ => Os::Linux,
        };

        let compiler = match os {
            Os::Linux | Os::Freebsd => Compiler::Gcc,
            Os::Macos => Compiler::AppleClang,
            Os::Windows => Compiler::Msvc,
        };

        let arch = match std::env::consts::ARCH {
            "aarch64" => Arch::Aarch64,
            "arm" => Arch::Arm,
            "x86" => Arch::X86,
            _ => Arch::X86_64,
        };

        Settings {
            os,
            compiler,
            build_type: BuildType::Debug,
            arch,
        }
    }

    /// Set the operating system.
    pub fn with_os(mut self, os: Os) -> Self {
        self.os = os;
        self
    }

    /// Set the compiler family.
    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Set the build type.
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set the target architecture.
    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = arch;
        self
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {} ({})",
            self.os, self.arch, self.compiler, self.build_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_settings() {
        let settings = Settings::host();
        // The host compiler default must match the host OS convention.
        match settings.os {
            Os::Windows => assert_eq!(settings.compiler, Compiler::Msvc),
            Os::Macos => assert_eq!(settings.compiler, Compiler::AppleClang),
            Os::Linux | Os::Freebsd => assert_eq!(settings.compiler, Compiler::Gcc),
        }
    }

    #[test]
    fn test_build_type_names() {
        assert_eq!(BuildType::Debug.as_str(), "Debug");
        assert_eq!(BuildType::Release.as_str(), "Release");
    }

    #[test]
    fn test_settings_builders() {
        let settings = Settings::host()
            .with_os(Os::Windows)
            .with_compiler(Compiler::Msvc)
            .with_build_type(BuildType::Release)
            .with_arch(Arch::X86_64);

        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.build_type, BuildType::Release);
        assert_eq!(settings.to_string(), "windows-x86_64 msvc (Release)");
    }
}
