use super::args::Commands;
use super::context::RuntimeContext;
use super::{deps, docker, help, lifecycle};
use crate::domain::CommandRunner;
use crate::infra::{Settings, SystemRunner};
use crate::services::{DependencyService, DevContainerService, Installer, SystemService};
use anyhow::Result;
use std::sync::Arc;

/// Everything a command handler needs, wired once per invocation.
pub struct App {
    context: RuntimeContext,
    system: Arc<SystemService>,
    dependencies: Arc<DependencyService>,
    installer: Installer,
    devcontainers: DevContainerService,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(
            settings,
            Arc::new(SystemRunner::new()),
            RuntimeContext::detect(),
        )
    }

    pub fn with_runner(
        settings: Settings,
        runner: Arc<dyn CommandRunner>,
        context: RuntimeContext,
    ) -> Self {
        let system = Arc::new(SystemService::new(runner.clone()));
        let dependencies = Arc::new(DependencyService::new(runner.clone()));
        let installer = Installer::new(runner.clone(), system.clone(), dependencies.clone());
        let devcontainers = DevContainerService::new(runner, settings);

        Self {
            context,
            system,
            dependencies,
            installer,
            devcontainers,
        }
    }

    pub fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Help => {
                help::print();
                Ok(())
            }
            Commands::CheckDeps => deps::check(self),
            Commands::InstallDeps => deps::install(self),
            Commands::CheckDocker => docker::check(self),
            Commands::DevStart => lifecycle::start(self),
            Commands::DevStop => lifecycle::stop(self),
            Commands::DevRebuild => lifecycle::rebuild(self),
            Commands::DevLogs => lifecycle::logs(self),
            Commands::DevShell => lifecycle::shell(self),
            Commands::DevClean => lifecycle::clean(self),
        }
    }

    pub fn context(&self) -> RuntimeContext {
        self.context
    }

    pub fn system(&self) -> &SystemService {
        &self.system
    }

    pub fn dependencies(&self) -> &DependencyService {
        &self.dependencies
    }

    pub fn installer(&self) -> &Installer {
        &self.installer
    }

    pub fn devcontainers(&self) -> &DevContainerService {
        &self.devcontainers
    }

    pub fn settings(&self) -> &Settings {
        self.devcontainers.settings()
    }
}
