//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use drydock::{Arch, Compiler, Os};

/// Drydock - a recipe-driven build and package pipeline for C libraries
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full lifecycle: normalize, generate, build, and package
    Build(BuildArgs),

    /// Write the driver inputs without building
    Generate(GenerateArgs),

    /// Show recipe metadata and the consumer contract
    Info(InfoArgs),

    /// Remove the build tree for a build type
    Clean(CleanArgs),
}

/// Settings overrides shared by build-like commands.
#[derive(Args)]
pub struct SettingsArgs {
    /// Target operating system (defaults to the host)
    #[arg(long)]
    pub os: Option<Os>,

    /// Compiler family (defaults to the host convention)
    #[arg(long)]
    pub compiler: Option<Compiler>,

    /// Target architecture (defaults to the host)
    #[arg(long)]
    pub arch: Option<Arch>,

    /// Build in release mode
    #[arg(short, long)]
    pub release: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Recipe root directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Option selection as name=value (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Recipe root directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Option selection as name=value (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Recipe root directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Recipe root directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Clean the release tree instead of debug
    #[arg(short, long)]
    pub release: bool,
}
