use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "swarmup")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Bootstrap a single-host Docker Swarm deployment",
    long_about = "Installs Docker if needed, activates swarm mode, writes the deployment \
                  files, builds the PHP-FPM image and deploys the stack.\n\n\
                  Running without a subcommand is the same as `swarmup up`."
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory the deployment files are written to and built from
    #[arg(short = 'C', long, global = true, env = "SWARMUP_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// TOML file overriding the stack name
    #[arg(long, global = true, env = "SWARMUP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full bootstrap: runtime, swarm, files, build, deploy
    Up(UpArgs),

    /// Only write the deployment files
    Files,

    /// Show runtime, swarm and file status without changing anything
    Status(StatusArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Up
// ============================================================================

#[derive(Args, Default)]
pub struct UpArgs {
    /// Skip specific stages (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',', conflicts_with = "only")]
    pub skip: Vec<Stage>,

    /// Only run specific stages (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub only: Vec<Stage>,

    /// List all available stages
    #[arg(long)]
    pub list_stages: bool,

    /// Dry run - show what would be done
    #[arg(long)]
    pub dry_run: bool,
}

/// Bootstrap stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    Runtime,
    Swarm,
    Files,
    Build,
    Deploy,
}

// ============================================================================
// Status
// ============================================================================

#[derive(Args, Default)]
pub struct StatusArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
