use crate::domain::{CommandRunner, Invocation};
use crate::error::DevError;
use crate::infra::Settings;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

const LOCAL_FOLDER_LABEL: &str = "devcontainer.local_folder";
const CONFIG_FILE_LABEL: &str = "devcontainer.config_file";

/// A running container found by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMatch {
    pub id: String,
    /// The `docker ps --filter` expression that found it
    pub filter: String,
}

/// Filters probed by discovery, in priority order.
pub fn discovery_filters(settings: &Settings) -> Vec<String> {
    let workspace = settings.workspace.display();
    let name = settings.workspace_name();

    vec![
        format!("label={LOCAL_FOLDER_LABEL}={workspace}"),
        format!(
            "label={CONFIG_FILE_LABEL}={}",
            settings.devcontainer_config().display()
        ),
        format!("ancestor=vsc-{name}"),
        format!("name={name}"),
    ]
}

/// Dev container lifecycle on top of the `devcontainer` CLI and `docker`
pub struct DevContainerService {
    runner: Arc<dyn CommandRunner>,
    settings: Settings,
}

impl DevContainerService {
    pub fn new(runner: Arc<dyn CommandRunner>, settings: Settings) -> Self {
        Self { runner, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `devcontainer up`; with `rebuild` the old container goes and the image
    /// is built without cache.
    pub fn up(&self, rebuild: bool) -> Result<()> {
        let workspace = self.settings.workspace.to_string_lossy().into_owned();
        let mut args = vec!["up".to_string(), "--workspace-folder".to_string(), workspace];

        if rebuild {
            args.push("--remove-existing-container".to_string());
            args.push("--build-no-cache".to_string());
        }

        self.passthrough(&Invocation::new("devcontainer", args))
    }

    /// Stops every running container of this workspace. Returns how many.
    pub fn stop(&self) -> Result<usize> {
        let ids = self.list(&self.workspace_label(), false)?;
        if ids.is_empty() {
            return Ok(0);
        }

        self.passthrough(&Invocation::new(
            "docker",
            ["stop".to_string()].into_iter().chain(ids.iter().cloned()),
        ))?;
        Ok(ids.len())
    }

    /// Removes every container of this workspace, running or not, with its
    /// anonymous volumes. Returns how many.
    pub fn clean(&self) -> Result<usize> {
        let ids = self.list(&self.workspace_label(), true)?;
        if ids.is_empty() {
            return Ok(0);
        }

        self.passthrough(&Invocation::new(
            "docker",
            ["rm", "-f", "-v"]
                .into_iter()
                .map(String::from)
                .chain(ids.iter().cloned()),
        ))?;
        Ok(ids.len())
    }

    /// Single pass over the discovery filters; the first hit wins.
    pub fn discover(&self) -> Result<ContainerMatch> {
        for filter in discovery_filters(&self.settings) {
            let ids = self.list(&filter, false)?;

            if let Some(id) = ids.into_iter().next() {
                info!("found dev container {id} with filter {filter}");
                return Ok(ContainerMatch { id, filter });
            }
            debug!("no running container for {filter}");
        }

        Err(DevError::NoRunningContainer {
            workspace: self.settings.workspace.clone(),
        }
        .into())
    }

    pub fn logs(&self, container: &ContainerMatch) -> Result<()> {
        self.passthrough(&Invocation::new(
            "docker",
            ["logs", "-f", container.id.as_str()],
        ))
    }

    pub fn shell(&self, container: &ContainerMatch) -> Result<()> {
        self.passthrough(&Invocation::new(
            "docker",
            [
                "exec",
                "-it",
                container.id.as_str(),
                self.settings.shell.as_str(),
            ],
        ))
    }

    fn workspace_label(&self) -> String {
        format!(
            "label={LOCAL_FOLDER_LABEL}={}",
            self.settings.workspace.display()
        )
    }

    /// Container ids matching `filter`, one per line of `docker ps -q`.
    fn list(&self, filter: &str, include_stopped: bool) -> Result<Vec<String>> {
        let mut args = vec!["ps", "-q"];
        if include_stopped {
            args.push("-a");
        }
        args.extend(["--filter", filter]);

        let cmd = Invocation::new("docker", args);
        let output = self.runner.capture(&cmd)?;

        if !output.success() {
            return Err(DevError::ToolFailed {
                command: cmd.to_string(),
                code: output.outcome.code,
            }
            .into());
        }

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Runs attached to the terminal inside the workspace; a non-zero exit
    /// becomes `ToolFailed` with the same code.
    fn passthrough(&self, cmd: &Invocation) -> Result<()> {
        let outcome = self.runner.run(cmd, Some(&self.settings.workspace))?;

        if outcome.success() {
            return Ok(());
        }

        Err(DevError::ToolFailed {
            command: cmd.to_string(),
            code: outcome.code,
        }
        .into())
    }
}
