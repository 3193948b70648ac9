use super::app::App;
use super::args::Commands;
use super::context::ensure_host;
use crate::domain::Tool;
use crate::error::DevError;
use crate::output;
use anyhow::Result;

/// Required tools present and daemon reachable.
fn preflight(app: &App, tools: &[Tool]) -> Result<()> {
    for tool in tools {
        app.dependencies().require(*tool)?;
    }
    app.system().ensure_daemon()
}

pub fn start(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::DevStart.name())?;
    preflight(app, &[Tool::Docker, Tool::DevContainerCli])?;

    output::step(format!(
        "Starting dev container for {}",
        app.settings().workspace.display()
    ));
    app.devcontainers().up(false)?;
    output::success("Dev container is up. Use 'devbench devshell' to enter it.");
    Ok(())
}

pub fn rebuild(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::DevRebuild.name())?;
    preflight(app, &[Tool::Docker, Tool::DevContainerCli])?;

    output::step("Rebuilding dev container without cache");
    app.devcontainers().up(true)?;
    output::success("Dev container rebuilt");
    Ok(())
}

pub fn stop(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::DevStop.name())?;
    preflight(app, &[Tool::Docker])?;

    match app.devcontainers().stop()? {
        0 => output::warning("No running dev container for this workspace"),
        n => output::success(format!("Stopped {n} container(s)")),
    }
    Ok(())
}

pub fn clean(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::DevClean.name())?;
    preflight(app, &[Tool::Docker])?;

    match app.devcontainers().clean()? {
        0 => output::info("Nothing to clean"),
        n => output::success(format!("Removed {n} container(s) and their volumes")),
    }
    Ok(())
}

pub fn logs(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::DevLogs.name())?;
    preflight(app, &[Tool::Docker])?;

    let container = app.devcontainers().discover().inspect_err(print_discovery_tips)?;
    output::step(format!("Following logs of {} (Ctrl+C to stop)", container.id));
    app.devcontainers().logs(&container)
}

pub fn shell(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::DevShell.name())?;
    preflight(app, &[Tool::Docker])?;

    let container = app.devcontainers().discover().inspect_err(print_discovery_tips)?;
    output::step(format!(
        "Opening {} in {}",
        app.settings().shell,
        container.id
    ));
    app.devcontainers().shell(&container)
}

fn print_discovery_tips(err: &anyhow::Error) {
    if !matches!(
        err.downcast_ref::<DevError>(),
        Some(DevError::NoRunningContainer { .. })
    ) {
        return;
    }

    output::hint("Start it with 'devbench devstart'");
    output::hint("List running containers with 'docker ps'");
    output::hint("Pass --workspace-folder if the container belongs to another folder");
}
