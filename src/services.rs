mod dependency_service;
mod devcontainer_service;
mod installer;
mod system_service;

pub use dependency_service::DependencyService;
pub use devcontainer_service::{ContainerMatch, DevContainerService, discovery_filters};
pub use installer::{
    InstallReport, Installer, LinuxPackageManager, Toolchain, WindowsPackageManager,
};
pub use system_service::SystemService;
