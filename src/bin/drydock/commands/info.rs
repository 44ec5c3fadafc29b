//! Implementation of `drydock info`.

use anyhow::Result;

use crate::cli::InfoArgs;
use crate::commands::{load_manifest, resolve_root};

pub fn execute(args: InfoArgs) -> Result<()> {
    let root = resolve_root(&args.path)?;
    let manifest = load_manifest(&root)?;

    let package = &manifest.package;
    println!("{} {}", package.name, package.version);

    if let Some(ref description) = package.description {
        println!("  {}", description);
    }
    if let Some(ref license) = package.license {
        println!("  license: {}", license);
    }
    if let Some(ref homepage) = package.homepage {
        println!("  homepage: {}", homepage);
    }
    if !package.topics.is_empty() {
        println!("  topics: {}", package.topics.join(", "));
    }

    if !manifest.options.is_empty() {
        println!("  options:");
        for (name, default) in &manifest.options {
            println!("    {} = {} (default)", name, default);
        }
    }

    println!("  libs: {}", manifest.package_info.libs.join(", "));

    Ok(())
}
