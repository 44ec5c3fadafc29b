//! Implementation of `drydock generate`.

use anyhow::{Context, Result};

use drydock::Recipe;

use crate::cli::GenerateArgs;
use crate::commands::{load_manifest, parse_options, resolve_root, settings_from_args};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let root = resolve_root(&args.path)?;
    let manifest = load_manifest(&root)?;
    let settings = settings_from_args(&args.settings);

    let mut recipe = Recipe::new(manifest, settings);

    for (name, value) in parse_options(&args.options)? {
        recipe
            .set_option(&name, value)
            .with_context(|| format!("invalid -o {}", name))?;
    }

    recipe.normalize_options()?;
    let layout = recipe.resolve_layout(&root)?;
    let generators_root = layout.generators_root.clone();
    recipe.generate()?;

    println!("driver inputs written to {}", generators_root.display());

    Ok(())
}
