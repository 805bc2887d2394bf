use anyhow::Result;
use serde::Serialize;
use swarmkit::{AssetState, RuntimePresence, Shell, SwarmStatus, SystemShell, runtime, swarm};

use crate::Context;
use crate::cli::StatusArgs;
use crate::ui;

#[derive(Debug, Serialize)]
struct StatusReport {
    workdir: String,
    runtime: RuntimeReport,
    swarm: SwarmReport,
    files: Vec<FileReport>,
}

#[derive(Debug, Serialize)]
struct RuntimeReport {
    installed: bool,
    version: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Serialize)]
struct SwarmReport {
    active: bool,
    manager: bool,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    name: &'static str,
    state: &'static str,
}

pub fn run(ctx: &Context, args: StatusArgs) -> Result<()> {
    let shell = SystemShell::new();
    let report = collect(ctx, &shell);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn collect(ctx: &Context, shell: &dyn Shell) -> StatusReport {
    let runtime = match runtime::probe(shell) {
        RuntimePresence::Present { version } => RuntimeReport {
            installed: true,
            version: Some(version),
            path: runtime::locate().map(|p| p.display().to_string()),
        },
        RuntimePresence::Absent => RuntimeReport {
            installed: false,
            version: None,
            path: None,
        },
    };

    // Querying the engine without a runtime only produces noise
    let swarm = if runtime.installed {
        swarm_report(swarm::status(shell))
    } else {
        swarm_report(Ok(SwarmStatus::default()))
    };

    let files = swarmkit::assets::inspect(&ctx.workdir)
        .into_iter()
        .map(|(asset, state)| FileReport {
            name: asset.name,
            state: state_label(state),
        })
        .collect();

    StatusReport {
        workdir: ctx.workdir.display().to_string(),
        runtime,
        swarm,
        files,
    }
}

fn swarm_report(status: swarmkit::Result<SwarmStatus>) -> SwarmReport {
    match status {
        Ok(status) => SwarmReport {
            active: status.active,
            manager: status.is_manager(),
            error: None,
        },
        Err(e) => SwarmReport {
            active: false,
            manager: false,
            error: Some(e.to_string()),
        },
    }
}

fn state_label(state: AssetState) -> &'static str {
    match state {
        AssetState::Current => "current",
        AssetState::Drifted => "modified",
        AssetState::Missing => "missing",
    }
}

fn print_report(report: &StatusReport) {
    ui::header("swarmup Status");
    ui::kv("Working directory", &report.workdir);

    ui::section("Runtime");
    let rt = &report.runtime;
    ui::check(rt.installed, "docker", rt.version.as_deref().unwrap_or("not installed"));
    if let Some(path) = &rt.path {
        ui::kv("Path", path);
    }

    ui::section("Swarm");
    let sw = &report.swarm;
    if let Some(error) = &sw.error {
        ui::check(false, "swarm", error);
    } else {
        ui::check(sw.active, "active", "");
        ui::check(sw.manager, "manager", "");
    }

    ui::section("Files");
    for file in &report.files {
        ui::check(file.state == "current", file.name, file.state);
    }

    let pending = report.files.iter().filter(|f| f.state != "current").count();
    println!();
    if !rt.installed || !sw.manager || pending > 0 {
        ui::info("Run 'swarmup up' to bring everything in place");
    } else {
        ui::success("Everything is in place");
    }
}
