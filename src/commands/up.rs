//! Up command - the full bootstrap pipeline
//!
//! runtime → swarm → files → build → deploy. Each stage runs only when the
//! previous one did not abort; nothing is rolled back on failure.

use anyhow::Result;
use colored::Colorize;
use swarmkit::{
    BuildSpec, Host, RuntimeOutcome, Shell, SwarmAction, SwarmOutcome, SystemShell, assets, image,
    runtime, shell, stack, swarm,
};

use crate::Context as AppContext;
use crate::cli::{Stage, UpArgs};
use crate::ui;

/// All stages in execution order
pub const STAGES: [Stage; 5] = [
    Stage::Runtime,
    Stage::Swarm,
    Stage::Files,
    Stage::Build,
    Stage::Deploy,
];

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::Swarm => "swarm",
            Self::Files => "files",
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Runtime => "Check Docker installation",
            Self::Swarm => "Activate Docker Swarm",
            Self::Files => "Write deployment files",
            Self::Build => "Build PHP-FPM image",
            Self::Deploy => "Deploy stack",
        }
    }
}

pub fn run(ctx: &AppContext, args: UpArgs) -> Result<()> {
    if args.list_stages {
        list_stages();
        return Ok(());
    }

    let shell = SystemShell::new();
    execute(ctx, &shell, &|| Host::detect(&shell), &args)
}

fn list_stages() {
    ui::header("Bootstrap Stages");
    for stage in STAGES {
        println!("  {:<10} {}", stage.name().bold(), stage.description().dimmed());
    }
}

fn determine_stages(args: &UpArgs) -> Vec<Stage> {
    if !args.only.is_empty() {
        return STAGES
            .iter()
            .filter(|s| args.only.contains(s))
            .copied()
            .collect();
    }

    STAGES
        .iter()
        .filter(|s| !args.skip.contains(s))
        .copied()
        .collect()
}

fn execute(
    ctx: &AppContext,
    shell: &dyn Shell,
    detect_host: &dyn Fn() -> Host,
    args: &UpArgs,
) -> Result<()> {
    let stages = determine_stages(args);
    if stages.is_empty() {
        note(ctx, Note::Info("No stages selected - nothing to do".to_string()));
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("swarmup - Swarm Bootstrap");
        ui::kv("Working directory", &ctx.workdir.display().to_string());
        println!();
    }

    let total = stages.len();
    for (i, stage) in stages.iter().enumerate() {
        // A dry run prints its plan even with --quiet
        if args.dry_run {
            ui::step(i + 1, total, stage.description());
            for line in preview(ctx, *stage) {
                ui::dim(&line);
            }
            continue;
        }

        if !ctx.quiet {
            ui::step(i + 1, total, stage.description());
        }
        log::debug!("Running stage {}", stage.name());
        match stage {
            Stage::Runtime => ensure_runtime(ctx, shell, detect_host)?,
            Stage::Swarm => ensure_swarm(ctx, shell)?,
            Stage::Files => write_files(ctx)?,
            Stage::Build => build_image(ctx, shell)?,
            Stage::Deploy => deploy_stack(ctx, shell)?,
        }
    }

    Ok(())
}

/// Status line printed by a stage
#[derive(Debug, Clone, PartialEq, Eq)]
enum Note {
    Info(String),
    Success(String),
    Warn(String),
    Detail(String),
}

impl Note {
    /// Warnings survive --quiet, everything else is progress chatter
    fn shown(&self, quiet: bool) -> bool {
        !quiet || matches!(self, Self::Warn(_))
    }

    fn print(&self) {
        match self {
            Self::Info(msg) => ui::info(msg),
            Self::Success(msg) => ui::success(msg),
            Self::Warn(msg) => ui::warn(msg),
            Self::Detail(msg) => ui::dim(msg),
        }
    }
}

fn note(ctx: &AppContext, line: Note) {
    if line.shown(ctx.quiet) {
        line.print();
    }
}

/// Print the hint for a library error and hand it on to `main`
fn reported(err: swarmkit::Error) -> anyhow::Error {
    ui::hint(&err);
    err.into()
}

fn ensure_runtime(
    ctx: &AppContext,
    shell: &dyn Shell,
    detect_host: &dyn Fn() -> Host,
) -> Result<()> {
    let outcome = runtime::ensure(shell, || {
        note(ctx, Note::Warn("Docker not found! Installing...".to_string()));
        detect_host()
    })
    .map_err(reported)?;

    for line in runtime_notes(&outcome) {
        note(ctx, line);
    }
    Ok(())
}

fn runtime_notes(outcome: &RuntimeOutcome) -> Vec<Note> {
    match outcome {
        RuntimeOutcome::AlreadyInstalled { version } => vec![Note::Success(format!(
            "Docker is already installed ({version})"
        ))],
        RuntimeOutcome::Installed { exit, .. } if exit.success => {
            vec![Note::Success("Docker installed successfully!".to_string())]
        }
        RuntimeOutcome::Installed { plan, exit } => vec![Note::Warn(format!(
            "{} exited with code {} - continuing anyway",
            plan,
            exit.code_or_signal()
        ))],
    }
}

fn ensure_swarm(ctx: &AppContext, shell: &dyn Shell) -> Result<()> {
    let outcome = swarm::ensure(shell).map_err(reported)?;
    for line in swarm_notes(&outcome) {
        note(ctx, line);
    }
    Ok(())
}

fn swarm_notes(outcome: &SwarmOutcome) -> Vec<Note> {
    let mut notes = vec![match outcome.action {
        SwarmAction::Nothing => {
            Note::Success("Docker Swarm is already active and this node is a manager.".to_string())
        }
        SwarmAction::Reinit => {
            Note::Info("This node was not a Docker Swarm manager; ran swarm init.".to_string())
        }
        SwarmAction::Init => Note::Info("Docker Swarm was not active; ran swarm init.".to_string()),
    }];

    match outcome.init_exit {
        Some(exit) if exit.success => {
            notes.push(Note::Success("Docker Swarm initialized.".to_string()));
        }
        Some(exit) => notes.push(Note::Warn(format!(
            "docker swarm init exited with code {} - continuing anyway",
            exit.code_or_signal()
        ))),
        None => {}
    }
    notes
}

pub(crate) fn write_files(ctx: &AppContext) -> Result<()> {
    let written = assets::materialize(&ctx.workdir).map_err(reported)?;
    for path in &written {
        note(ctx, Note::Detail(path.display().to_string()));
    }
    note(ctx, Note::Success("Docker files created!".to_string()));
    Ok(())
}

fn build_image(ctx: &AppContext, shell: &dyn Shell) -> Result<()> {
    let spec = BuildSpec::default();
    note(ctx, Note::Info(format!("Building image {}...", spec.tag.bold())));
    image::build(shell, &ctx.workdir, &spec).map_err(reported)?;
    note(ctx, Note::Success(format!("Image {} built", spec.tag)));
    Ok(())
}

fn deploy_stack(ctx: &AppContext, shell: &dyn Shell) -> Result<()> {
    let spec = ctx.settings.deploy_spec();
    let outcome = stack::deploy(shell, &ctx.workdir, &spec).map_err(reported)?;
    if outcome.exit.success {
        note(
            ctx,
            Note::Success(format!("Services started! (stack {})", spec.stack_name)),
        );
    } else {
        note(
            ctx,
            Note::Warn(format!(
                "docker stack deploy exited with code {} - services may not be running",
                outcome.exit.code_or_signal()
            )),
        );
    }
    Ok(())
}

fn preview(ctx: &AppContext, stage: Stage) -> Vec<String> {
    match stage {
        Stage::Runtime => vec![
            "Would run: docker --version".to_string(),
            "Would install Docker with the host package manager if missing".to_string(),
        ],
        Stage::Swarm => vec![
            "Would run: docker info".to_string(),
            "Would run: docker swarm init (unless this node is already a manager)".to_string(),
        ],
        Stage::Files => swarmkit::ASSETS
            .iter()
            .map(|asset| format!("Would write: {}", asset.path_in(&ctx.workdir).display()))
            .collect(),
        Stage::Build => {
            let spec = BuildSpec::default();
            vec![format!("Would run: {}", shell::command_line("docker", &spec.args()))]
        }
        Stage::Deploy => {
            let spec = ctx.settings.deploy_spec();
            vec![format!("Would run: {}", shell::command_line("docker", &spec.args()))]
        }
    }
}
