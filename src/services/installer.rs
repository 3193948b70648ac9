use crate::domain::{CommandRunner, Invocation, OsCategory, Tool};
use crate::error::DevError;
use crate::output;
use crate::services::{DependencyService, SystemService};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

const DOCKER_CONVENIENCE_SCRIPT: &str = "curl -fsSL https://get.docker.com | sh";
const DEVCONTAINER_PACKAGE: &str = "@devcontainers/cli";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxPackageManager {
    Apt,
    Dnf,
    Pacman,
}

impl LinuxPackageManager {
    /// Probed in this order; the first one on PATH wins.
    pub const PRIORITY: [Self; 3] = [Self::Apt, Self::Dnf, Self::Pacman];

    pub fn program(self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
        }
    }

    fn install(self, packages: &[&str]) -> Vec<Invocation> {
        match self {
            Self::Apt => vec![
                Invocation::new("apt-get", ["update"]),
                Invocation::new(
                    "apt-get",
                    ["install", "-y"].iter().chain(packages).copied(),
                ),
            ],
            Self::Dnf => vec![Invocation::new(
                "dnf",
                ["install", "-y"].iter().chain(packages).copied(),
            )],
            Self::Pacman => vec![Invocation::new(
                "pacman",
                ["-Sy", "--noconfirm"].iter().chain(packages).copied(),
            )],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsPackageManager {
    Winget,
    Chocolatey,
}

/// Platform install handler, resolved once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    Linux {
        manager: LinuxPackageManager,
        sudo: Option<&'static str>,
    },
    MacOs,
    Windows(WindowsPackageManager),
}

impl Toolchain {
    /// Commands installing `tool`. Empty when the platform bundles it elsewhere.
    pub fn recipe(&self, tool: Tool) -> Vec<Invocation> {
        match self {
            Self::Linux { manager, sudo } => linux_recipe(tool, *manager, *sudo),
            Self::MacOs => macos_recipe(tool),
            Self::Windows(manager) => windows_recipe(tool, *manager),
        }
    }

    pub fn post_install_note(&self, tool: Tool) -> Option<&'static str> {
        match (self, tool) {
            (Self::Linux { .. }, Tool::Docker) => Some(
                "Run 'sudo usermod -aG docker $USER' and log in again to use docker without sudo.",
            ),
            (Self::MacOs | Self::Windows(_), Tool::Docker) => {
                Some("Launch Docker Desktop once to finish the installation.")
            }
            _ => None,
        }
    }
}

fn linux_recipe(
    tool: Tool,
    manager: LinuxPackageManager,
    sudo: Option<&'static str>,
) -> Vec<Invocation> {
    let commands = match (tool, manager) {
        (Tool::Node, _) => manager.install(&["nodejs", "npm"]),
        (Tool::Docker, LinuxPackageManager::Pacman) => manager.install(&["docker"]),
        (Tool::Docker, _) => vec![Invocation::new("sh", ["-c", DOCKER_CONVENIENCE_SCRIPT])],
        (Tool::DockerCompose, LinuxPackageManager::Pacman) => manager.install(&["docker-compose"]),
        (Tool::DockerCompose, _) => manager.install(&["docker-compose-plugin"]),
        (Tool::DevContainerCli, _) => vec![Invocation::new(
            "npm",
            ["install", "-g", DEVCONTAINER_PACKAGE],
        )],
    };

    commands.into_iter().map(|cmd| cmd.prefixed(sudo)).collect()
}

fn macos_recipe(tool: Tool) -> Vec<Invocation> {
    let cmd = match tool {
        Tool::Node => Invocation::new("brew", ["install", "node"]),
        Tool::Docker => Invocation::new("brew", ["install", "--cask", "docker"]),
        Tool::DockerCompose => Invocation::new("brew", ["install", "docker-compose"]),
        Tool::DevContainerCli => {
            Invocation::new("npm", ["install", "-g", DEVCONTAINER_PACKAGE])
        }
    };
    vec![cmd]
}

fn windows_recipe(tool: Tool, manager: WindowsPackageManager) -> Vec<Invocation> {
    let package = match (tool, manager) {
        (Tool::Node, WindowsPackageManager::Winget) => "OpenJS.NodeJS.LTS",
        (Tool::Node, WindowsPackageManager::Chocolatey) => "nodejs-lts",
        (Tool::Docker, WindowsPackageManager::Winget) => "Docker.DockerDesktop",
        (Tool::Docker, WindowsPackageManager::Chocolatey) => "docker-desktop",
        (Tool::DockerCompose, _) => return Vec::new(),
        (Tool::DevContainerCli, _) => {
            return vec![Invocation::new(
                "npm.cmd",
                ["install", "-g", DEVCONTAINER_PACKAGE],
            )];
        }
    };

    let cmd = match manager {
        WindowsPackageManager::Winget => Invocation::new(
            "winget",
            [
                "install",
                "-e",
                "--id",
                package,
                "--accept-source-agreements",
                "--accept-package-agreements",
            ],
        ),
        WindowsPackageManager::Chocolatey => Invocation::new("choco", ["install", "-y", package]),
    };
    vec![cmd]
}

/// What an `install-deps` run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub installed: Vec<Tool>,
    pub already_present: Vec<Tool>,
    pub warnings: Vec<String>,
}

impl InstallReport {
    /// Every step succeeded without warnings.
    pub fn succeeded(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Installs missing tools with the host's package manager
pub struct Installer {
    runner: Arc<dyn CommandRunner>,
    system: Arc<SystemService>,
    dependencies: Arc<DependencyService>,
}

impl Installer {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        system: Arc<SystemService>,
        dependencies: Arc<DependencyService>,
    ) -> Self {
        Self {
            runner,
            system,
            dependencies,
        }
    }

    pub fn install_missing(&self) -> Result<InstallReport> {
        let os = self.system.detect_os();
        output::info(format!("Platform: {os}"));

        if let OsCategory::Unsupported(name) = &os {
            output::error(format!("Automatic installation is not available on {name}"));
            for tool in Tool::ALL {
                output::hint(format!("{tool}: {}", tool.install_hint()));
            }
            return Err(DevError::UnsupportedPlatform { name: name.clone() }.into());
        }

        let mut report = InstallReport::default();
        let mut missing = Vec::new();

        for status in self.dependencies.check_all() {
            match &status.version {
                Some(version) => {
                    output::success(format!("{} already installed ({version})", status.tool));
                    report.already_present.push(status.tool);
                }
                None => missing.push(status.tool),
            }
        }

        if missing.is_empty() {
            return Ok(report);
        }

        let toolchain = self.prepare(&os)?;

        for tool in missing {
            // the Docker script ships the compose plugin, for instance
            if self.dependencies.is_installed(tool) {
                output::success(format!("{tool} is now available"));
                report.already_present.push(tool);
                continue;
            }

            self.install_tool(&toolchain, tool, &mut report)?;
        }

        Ok(report)
    }

    fn prepare(&self, os: &OsCategory) -> Result<Toolchain> {
        match os {
            OsCategory::Linux => self.prepare_linux(),
            OsCategory::MacOs => self.prepare_macos(),
            OsCategory::Windows => self.prepare_windows(),
            OsCategory::Unsupported(name) => {
                Err(DevError::UnsupportedPlatform { name: name.clone() }.into())
            }
        }
    }

    fn prepare_linux(&self) -> Result<Toolchain> {
        let manager = LinuxPackageManager::PRIORITY
            .into_iter()
            .find(|manager| self.runner.locate(manager.program()).is_some())
            .ok_or_else(|| DevError::UnsupportedPlatform {
                name: "Linux without apt-get, dnf or pacman".to_string(),
            })?;

        output::info(format!("Using {} for system packages", manager.program()));

        Ok(Toolchain::Linux {
            manager,
            sudo: self.system.elevation_prefix(),
        })
    }

    fn prepare_macos(&self) -> Result<Toolchain> {
        match self.runner.capture(&Invocation::new("brew", ["--version"])) {
            Ok(output) if output.success() => {
                output::success(format!(
                    "Homebrew found ({})",
                    output.first_line().unwrap_or("version unknown")
                ));
                Ok(Toolchain::MacOs)
            }
            _ => {
                output::error("Homebrew is not installed");
                Err(DevError::MissingPrerequisite {
                    name: "Homebrew".to_string(),
                    hint: "Install it from https://brew.sh and run install-deps again.".to_string(),
                }
                .into())
            }
        }
    }

    fn prepare_windows(&self) -> Result<Toolchain> {
        let manager = if self.runner.locate("winget").is_some() {
            WindowsPackageManager::Winget
        } else if self.runner.locate("choco").is_some() {
            WindowsPackageManager::Chocolatey
        } else {
            return Err(DevError::MissingPrerequisite {
                name: "winget or Chocolatey".to_string(),
                hint: "Install App Installer from the Microsoft Store or Chocolatey from https://chocolatey.org/install.".to_string(),
            }
            .into());
        };

        info!("using {manager:?} for Windows packages");
        Ok(Toolchain::Windows(manager))
    }

    fn install_tool(
        &self,
        toolchain: &Toolchain,
        tool: Tool,
        report: &mut InstallReport,
    ) -> Result<()> {
        let recipe = toolchain.recipe(tool);

        if recipe.is_empty() {
            let message =
                format!("{tool} ships with Docker Desktop; start Docker Desktop and run check-deps");
            output::warning(&message);
            report.warnings.push(message);
            return Ok(());
        }

        if tool == Tool::DevContainerCli && self.runner.locate("npm").is_none() {
            return self.fail(
                tool,
                "npm is not on PATH yet; open a new terminal and run install-deps again",
                report,
            );
        }

        output::step(format!("Installing {tool}..."));

        if let Err(err) = self.run_recipe(&recipe) {
            return self.fail(tool, &format!("{err:#}"), report);
        }

        report.installed.push(tool);
        if self.dependencies.is_installed(tool) {
            output::success(format!("{tool} installed"));
        } else {
            let message = format!("{tool} was installed but is not on PATH yet; open a new terminal");
            output::warning(&message);
            report.warnings.push(message);
        }

        if let Some(note) = toolchain.post_install_note(tool) {
            output::hint(note);
        }

        Ok(())
    }

    fn run_recipe(&self, recipe: &[Invocation]) -> Result<()> {
        for cmd in recipe {
            info!("running `{cmd}`");
            let outcome = self.runner.run(cmd, None)?;

            if !outcome.success() {
                return Err(DevError::ToolFailed {
                    command: cmd.to_string(),
                    code: outcome.code,
                }
                .into());
            }
        }
        Ok(())
    }

    fn fail(&self, tool: Tool, reason: &str, report: &mut InstallReport) -> Result<()> {
        if tool.is_critical() {
            output::error(format!("Failed to install {tool}: {reason}"));
            output::hint(tool.install_hint());
            return Err(DevError::InstallFailed {
                tool: tool.display_name().to_string(),
            }
            .into());
        }

        let message = format!("Could not install {tool}: {reason}");
        output::warning(&message);
        output::hint(tool.install_hint());
        report.warnings.push(message);
        Ok(())
    }
}
