//! Implementation of `drydock build`.

use anyhow::{Context, Result};

use drydock::{CMakeDriver, Recipe};

use crate::cli::BuildArgs;
use crate::commands::{load_manifest, parse_options, resolve_root, settings_from_args};

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let root = resolve_root(&args.path)?;
    let manifest = load_manifest(&root)?;
    let settings = settings_from_args(&args.settings);

    tracing::info!("settings: {}", settings);

    let mut recipe = Recipe::new(manifest, settings)
        .with_jobs(args.jobs)
        .with_verbose(verbose);

    for (name, value) in parse_options(&args.options)? {
        recipe
            .set_option(&name, value)
            .with_context(|| format!("invalid -o {}", name))?;
    }

    recipe.normalize_options()?;
    recipe.resolve_layout(&root)?;
    recipe.generate()?;

    let driver = CMakeDriver::locate()?;
    recipe.build(&driver)?;
    recipe.package(&driver)?;

    let info = recipe.package_info()?;
    println!(
        "packaged {} {} (libs: {})",
        recipe.metadata().name,
        recipe.metadata().version,
        info.libs.join(", ")
    );

    Ok(())
}
