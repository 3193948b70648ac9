use super::app::App;
use crate::domain::Tool;
use crate::output;
use anyhow::Result;

/// `check-docker`: non-zero when docker is missing or its daemon is down.
pub fn check(app: &App) -> Result<()> {
    output::header("Checking Docker");

    let docker = app.dependencies().require(Tool::Docker)?;
    output::success(format!(
        "Docker installed ({})",
        docker.version.as_deref().unwrap_or("version unknown")
    ));

    app.system().ensure_daemon()?;
    output::success("Docker daemon is running");

    Ok(())
}
