//! Implementation of `drydock clean`.

use anyhow::Result;

use drydock::util::fs::remove_dir_all_if_exists;
use drydock::BuildType;

use crate::cli::CleanArgs;
use crate::commands::resolve_root;

pub fn execute(args: CleanArgs) -> Result<()> {
    let root = resolve_root(&args.path)?;
    let build_type = if args.release {
        BuildType::Release
    } else {
        BuildType::Debug
    };

    let build_root = root.join("build").join(build_type.as_str());
    if build_root.exists() {
        tracing::info!("removing {}", build_root.display());
        remove_dir_all_if_exists(&build_root)?;
    } else {
        println!("nothing to clean in {}", build_root.display());
    }

    Ok(())
}
