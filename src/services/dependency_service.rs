use crate::domain::{CommandRunner, Invocation, Tool, ToolStatus};
use crate::error::DevError;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

const UNKNOWN_VERSION: &str = "version unknown";

/// Presence and version probes for the required tools
pub struct DependencyService {
    runner: Arc<dyn CommandRunner>,
}

impl DependencyService {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn check(&self, tool: Tool) -> ToolStatus {
        let Some(path) = self.runner.locate(tool.program()) else {
            debug!("{} not found on PATH", tool.program());
            return ToolStatus {
                tool,
                version: None,
            };
        };
        debug!("{tool} resolved to {}", path.display());

        let probe = Invocation::new(tool.program(), tool.version_args().iter().copied());
        let version = match self.runner.capture(&probe) {
            Ok(output) if output.success() => Some(
                output
                    .first_line()
                    .unwrap_or(UNKNOWN_VERSION)
                    .to_string(),
            ),
            _ if tool.requires_version_probe() => None,
            _ => Some(UNKNOWN_VERSION.to_string()),
        };

        ToolStatus { tool, version }
    }

    pub fn check_all(&self) -> Vec<ToolStatus> {
        Tool::ALL.iter().map(|tool| self.check(*tool)).collect()
    }

    pub fn is_installed(&self, tool: Tool) -> bool {
        self.check(tool).is_installed()
    }

    /// Fails with `MissingTool` when `tool` is absent.
    pub fn require(&self, tool: Tool) -> Result<ToolStatus> {
        let status = self.check(tool);
        if status.is_installed() {
            return Ok(status);
        }

        Err(DevError::MissingTool {
            tool: tool.display_name().to_string(),
            hint: tool.install_hint().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRunner;

    #[test]
    fn reports_version_of_present_tool() {
        let mock = Arc::new(MockRunner::new());
        mock.add_tool("node", "v20.11.1\n");
        let service = DependencyService::new(mock.clone());

        let status = service.check(Tool::Node);
        assert_eq!(status.version.as_deref(), Some("v20.11.1"));
        assert!(mock.get_commands().contains(&"node --version".to_string()));
    }

    #[test]
    fn missing_tool_is_not_probed() {
        let mock = Arc::new(MockRunner::new());
        let service = DependencyService::new(mock.clone());

        assert!(!service.check(Tool::DevContainerCli).is_installed());
        assert!(mock.get_commands().is_empty());
    }

    #[test]
    fn compose_needs_successful_probe() {
        let mock = Arc::new(MockRunner::new());
        mock.add_tool("docker", "Docker version 27.0.3");
        mock.respond("docker compose version", 1, "");
        let service = DependencyService::new(mock.clone());

        assert!(service.is_installed(Tool::Docker));
        assert!(!service.is_installed(Tool::DockerCompose));

        mock.respond("docker compose version", 0, "Docker Compose version v2.27.1");
        assert_eq!(
            service.check(Tool::DockerCompose).version.as_deref(),
            Some("Docker Compose version v2.27.1")
        );
    }

    #[test]
    fn failing_version_command_still_counts_as_present() {
        let mock = Arc::new(MockRunner::new());
        mock.add_program("devcontainer");
        mock.respond("devcontainer --version", 2, "");
        let service = DependencyService::new(mock);

        assert_eq!(
            service.check(Tool::DevContainerCli).version.as_deref(),
            Some(UNKNOWN_VERSION)
        );
    }

    #[test]
    fn check_all_covers_every_tool_in_order() {
        let mock = Arc::new(MockRunner::new());
        let service = DependencyService::new(mock);

        let tools: Vec<Tool> = service.check_all().iter().map(|s| s.tool).collect();
        assert_eq!(tools, Tool::ALL.to_vec());
    }

    #[test]
    fn require_reports_missing_tool() {
        let mock = Arc::new(MockRunner::new());
        let service = DependencyService::new(mock);

        let err = service.require(Tool::Docker).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DevError>(),
            Some(DevError::MissingTool { tool, .. }) if tool == "Docker"
        ));
        assert!(err.to_string().contains("install-deps"));
    }
}
