use std::fmt;

/// External tools devbench depends on, in installation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Node,
    Docker,
    DockerCompose,
    DevContainerCli,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::Node,
        Tool::Docker,
        Tool::DockerCompose,
        Tool::DevContainerCli,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Node => "Node.js",
            Self::Docker => "Docker",
            Self::DockerCompose => "Docker Compose",
            Self::DevContainerCli => "Dev Container CLI",
        }
    }

    /// Program looked up on PATH.
    pub fn program(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Docker | Self::DockerCompose => "docker",
            Self::DevContainerCli => "devcontainer",
        }
    }

    pub fn version_args(self) -> &'static [&'static str] {
        match self {
            Self::DockerCompose => &["compose", "version"],
            _ => &["--version"],
        }
    }

    /// Compose is a docker subcommand: being on PATH is not enough.
    pub fn requires_version_probe(self) -> bool {
        matches!(self, Self::DockerCompose)
    }

    /// A failed install of a critical tool aborts `install-deps`.
    pub fn is_critical(self) -> bool {
        !matches!(self, Self::DockerCompose)
    }

    pub fn install_hint(self) -> &'static str {
        match self {
            Self::Node => "Install Node.js LTS from https://nodejs.org",
            Self::Docker => "Install Docker from https://docs.docker.com/get-docker/",
            Self::DockerCompose => {
                "Install the Compose plugin from https://docs.docker.com/compose/install/"
            }
            Self::DevContainerCli => "Install it with 'npm install -g @devcontainers/cli'",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Result of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub tool: Tool,
    /// `None` when the tool is missing
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_installed(&self) -> bool {
        self.version.is_some()
    }
}
