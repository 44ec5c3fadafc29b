//! Command implementations and shared helpers.

pub mod build;
pub mod clean;
pub mod generate;
pub mod info;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use drydock::{BuildType, OptionValue, RecipeManifest, Settings, MANIFEST_FILE};

use crate::cli::SettingsArgs;

/// Resolve the recipe root from an optional `--path`.
pub fn resolve_root(path: &Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Load the manifest from a recipe root.
pub fn load_manifest(root: &Path) -> Result<RecipeManifest> {
    match RecipeManifest::find(root) {
        Some(path) => RecipeManifest::load(&path),
        None => bail!(
            "no {} found in {}\n\
             help: run from a recipe root, or pass --path",
            MANIFEST_FILE,
            root.display()
        ),
    }
}

/// Build settings from host detection plus CLI overrides.
pub fn settings_from_args(args: &SettingsArgs) -> Settings {
    let mut settings = Settings::host();

    if let Some(os) = args.os {
        settings = settings.with_os(os);
    }
    if let Some(compiler) = args.compiler {
        settings = settings.with_compiler(compiler);
    }
    if let Some(arch) = args.arch {
        settings = settings.with_arch(arch);
    }
    if args.release {
        settings = settings.with_build_type(BuildType::Release);
    }

    settings
}

/// Parse repeated `name=value` option selections.
pub fn parse_options(raw: &[String]) -> Result<Vec<(String, OptionValue)>> {
    let mut parsed = Vec::with_capacity(raw.len());

    for entry in raw {
        let Some((name, value)) = entry.split_once('=') else {
            bail!(
                "invalid option `{}`\n\
                 help: use name=value, e.g. -o shared=true",
                entry
            );
        };

        let value = match value {
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            other => OptionValue::Str(other.to_string()),
        };

        parsed.push((name.to_string(), value));
    }

    Ok(parsed)
}
