mod cli;
mod commands;
mod config;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, UpArgs};
use config::Settings;
use std::io::{self, Write};
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub workdir: PathBuf,
    pub settings: Settings,
}

impl Context {
    /// Resolve the working directory and load settings for a command that needs them
    fn from_cli(cli: &Cli) -> Result<Self> {
        let ctx = Self {
            verbose: cli.verbose,
            quiet: cli.quiet,
            workdir: config::resolve_workdir(cli.workdir.as_deref())?,
            settings: Settings::load(cli.config.as_deref())?,
        };
        log::debug!("verbosity {}, workdir {}", ctx.verbose, ctx.workdir.display());
        Ok(ctx)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    dispatch(cli, &mut io::stdout())
}

fn dispatch(mut cli: Cli, out: &mut dyn Write) -> Result<()> {
    let command = cli
        .command
        .take()
        .unwrap_or_else(|| Command::Up(UpArgs::default()));

    match command {
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "swarmup", out);
            Ok(())
        }
        Command::Up(args) => commands::up::run(&Context::from_cli(&cli)?, args),
        Command::Files => commands::files::run(&Context::from_cli(&cli)?),
        Command::Status(args) => commands::status::run(&Context::from_cli(&cli)?, args),
    }
}
