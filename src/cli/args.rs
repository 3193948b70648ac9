use crate::infra::config::{DEFAULT_SHELL, SHELL_ENV, WORKSPACE_ENV};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "devbench",
    version,
    about = "Set up, run and tear down the project's dev container",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Folder holding .devcontainer/ (default: current directory)
    #[arg(long, global = true, env = WORKSPACE_ENV, value_name = "DIR")]
    pub workspace_folder: Option<String>,

    /// Shell started by devshell
    #[arg(long, global = true, env = SHELL_ENV, default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Show available commands
    Help,
    /// Report which required tools are installed
    CheckDeps,
    /// Install missing tools with the platform package manager
    InstallDeps,
    /// Check that Docker is installed and its daemon is running
    CheckDocker,
    /// Start the dev container
    #[command(name = "devstart")]
    DevStart,
    /// Stop the dev container
    #[command(name = "devstop")]
    DevStop,
    /// Rebuild the dev container from scratch
    #[command(name = "devrebuild")]
    DevRebuild,
    /// Follow the dev container logs
    #[command(name = "devlogs")]
    DevLogs,
    /// Open a shell in the dev container
    #[command(name = "devshell")]
    DevShell,
    /// Remove the dev container and its volumes
    #[command(name = "devclean")]
    DevClean,
}

impl Commands {
    pub const ALL: [Commands; 10] = [
        Commands::Help,
        Commands::CheckDeps,
        Commands::InstallDeps,
        Commands::CheckDocker,
        Commands::DevStart,
        Commands::DevStop,
        Commands::DevRebuild,
        Commands::DevLogs,
        Commands::DevShell,
        Commands::DevClean,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::CheckDeps => "check-deps",
            Self::InstallDeps => "install-deps",
            Self::CheckDocker => "check-docker",
            Self::DevStart => "devstart",
            Self::DevStop => "devstop",
            Self::DevRebuild => "devrebuild",
            Self::DevLogs => "devlogs",
            Self::DevShell => "devshell",
            Self::DevClean => "devclean",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Help => "Show this help",
            Self::CheckDeps => "Report which required tools are installed",
            Self::InstallDeps => "Install missing tools (Docker, Compose, Node.js, Dev Container CLI)",
            Self::CheckDocker => "Check that the Docker daemon is running",
            Self::DevStart => "Start the dev container",
            Self::DevStop => "Stop the dev container",
            Self::DevRebuild => "Rebuild the dev container without cache",
            Self::DevLogs => "Follow the dev container logs",
            Self::DevShell => "Open a shell in the dev container",
            Self::DevClean => "Remove the dev container and its volumes",
        }
    }

    /// Commands that must never run inside the dev container.
    pub fn is_host_only(self) -> bool {
        !matches!(self, Self::Help | Self::CheckDeps | Self::CheckDocker)
    }
}
