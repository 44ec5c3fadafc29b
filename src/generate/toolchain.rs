//! Toolchain descriptor in CMake variable conventions.

use std::path::{Path, PathBuf};

use crate::core::options::{OptionMap, FPIC, SHARED};
use crate::core::settings::Settings;
use crate::error::RecipeError;

/// File name of the toolchain descriptor in the generators root.
pub const TOOLCHAIN_FILE: &str = "toolchain.cmake";

/// Translation of settings and normalized options into the external
/// build system's variable conventions.
///
/// Variables are ordered deterministically so the rendered file is
/// byte-identical for identical input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDescriptor {
    variables: Vec<(String, String)>,
}

impl ToolchainDescriptor {
    /// Build the descriptor from the current, frozen settings and
    /// option state.
    pub fn from_state(settings: &Settings, options: &OptionMap) -> Self {
        let mut variables = Vec::new();

        variables.push((
            "CMAKE_BUILD_TYPE".to_string(),
            settings.build_type.as_str().to_string(),
        ));
        variables.push((
            "CMAKE_SYSTEM_PROCESSOR".to_string(),
            settings.arch.processor().to_string(),
        ));
        variables.push((
            "CMAKE_C_COMPILER".to_string(),
            settings.compiler.executable().to_string(),
        ));

        let shared = options.get_bool(SHARED).unwrap_or(false);
        variables.push(("BUILD_SHARED_LIBS".to_string(), on_off(shared)));

        // Emitted only when the option applies; an absent fPIC stays
        // absent in the descriptor.
        if let Some(fpic) = options.get_bool(FPIC) {
            variables.push((
                "CMAKE_POSITION_INDEPENDENT_CODE".to_string(),
                on_off(fpic),
            ));
        }

        ToolchainDescriptor { variables }
    }

    /// The translated variables in output order.
    pub fn variables(&self) -> &[(String, String)] {
        &self.variables
    }

    /// Value of a variable, if the descriptor carries it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render the descriptor as a CMake script.
    pub fn render(&self) -> String {
        let mut out = String::from("# Generated by drydock. Do not edit.\n");
        for (name, value) in &self.variables {
            out.push_str(&format!("set({} {})\n", name, value));
        }
        out
    }

    /// Write the descriptor into a generators directory.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, RecipeError> {
        let path = dir.join(TOOLCHAIN_FILE);
        std::fs::write(&path, self.render()).map_err(|source| RecipeError::Generate {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn on_off(value: bool) -> String {
    if value { "ON" } else { "OFF" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Arch, BuildType, Compiler, Os};

    fn linux_release() -> Settings {
        Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release, Arch::X86_64)
    }

    fn static_pic_options() -> OptionMap {
        let mut options = OptionMap::new();
        options.declare_bool(SHARED, false);
        options.declare_bool(FPIC, true);
        options
    }

    #[test]
    fn test_static_pic_descriptor() {
        let descriptor = ToolchainDescriptor::from_state(&linux_release(), &static_pic_options());

        assert_eq!(descriptor.get("CMAKE_BUILD_TYPE"), Some("Release"));
        assert_eq!(descriptor.get("BUILD_SHARED_LIBS"), Some("OFF"));
        assert_eq!(
            descriptor.get("CMAKE_POSITION_INDEPENDENT_CODE"),
            Some("ON")
        );
        assert_eq!(descriptor.get("CMAKE_C_COMPILER"), Some("gcc"));
    }

    #[test]
    fn test_absent_fpic_is_not_emitted() {
        let mut options = static_pic_options();
        options.set(SHARED, true.into()).unwrap();
        options.unset(FPIC);

        let descriptor = ToolchainDescriptor::from_state(&linux_release(), &options);

        assert_eq!(descriptor.get("BUILD_SHARED_LIBS"), Some("ON"));
        assert_eq!(descriptor.get("CMAKE_POSITION_INDEPENDENT_CODE"), None);
        assert!(!descriptor.render().contains("POSITION_INDEPENDENT"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = ToolchainDescriptor::from_state(&linux_release(), &static_pic_options());
        let b = ToolchainDescriptor::from_state(&linux_release(), &static_pic_options());

        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_render_is_a_cmake_script() {
        let descriptor = ToolchainDescriptor::from_state(&linux_release(), &static_pic_options());
        let rendered = descriptor.render();

        assert!(rendered.starts_with("# Generated by drydock"));
        assert!(rendered.contains("set(CMAKE_BUILD_TYPE Release)\n"));
        assert!(rendered.contains("set(BUILD_SHARED_LIBS OFF)\n"));
    }
}
