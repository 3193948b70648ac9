use crate::domain::{CommandRunner, Invocation, OsCategory};
use crate::error::DevError;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Host-level probes: platform, privileges, Docker daemon
pub struct SystemService {
    runner: Arc<dyn CommandRunner>,
}

impl SystemService {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Kernel name from `uname -s`, falling back to the compile-time target OS
    /// when `uname` is unavailable (native Windows shells).
    pub fn detect_os(&self) -> OsCategory {
        let uname = Invocation::new("uname", ["-s"]);

        let category = match self.runner.capture(&uname) {
            Ok(output) if output.success() => output
                .first_line()
                .map(OsCategory::from_kernel_name)
                .unwrap_or_else(|| OsCategory::from_target_os(std::env::consts::OS)),
            _ => OsCategory::from_target_os(std::env::consts::OS),
        };

        debug!("detected platform {category:?}");
        category
    }

    pub fn is_root(&self) -> bool {
        self.runner
            .capture(&Invocation::new("id", ["-u"]))
            .map(|output| output.success() && output.first_line() == Some("0"))
            .unwrap_or(false)
    }

    /// `sudo` when not root and `sudo` exists, nothing otherwise.
    pub fn elevation_prefix(&self) -> Option<&'static str> {
        if self.is_root() || self.runner.locate("sudo").is_none() {
            None
        } else {
            Some("sudo")
        }
    }

    pub fn daemon_reachable(&self) -> bool {
        let reachable = self
            .runner
            .capture(&Invocation::new("docker", ["info"]))
            .map(|output| output.success())
            .unwrap_or(false);

        debug!("docker daemon reachable: {reachable}");
        reachable
    }

    pub fn ensure_daemon(&self) -> Result<()> {
        if self.daemon_reachable() {
            return Ok(());
        }

        Err(DevError::DaemonUnreachable {
            remedy: self.detect_os().daemon_remedy().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRunner;

    #[test]
    fn detects_platform_from_uname() {
        let mock = Arc::new(MockRunner::new());
        mock.respond("uname -s", 0, "Darwin\n");
        let service = SystemService::new(mock.clone());

        assert_eq!(service.detect_os(), OsCategory::MacOs);
        assert_eq!(mock.get_commands(), vec!["uname -s".to_string()]);
    }

    #[test]
    fn falls_back_to_target_os_without_uname() {
        let mock = Arc::new(MockRunner::new());
        let service = SystemService::new(mock);

        assert_eq!(
            service.detect_os(),
            OsCategory::from_target_os(std::env::consts::OS)
        );
    }

    #[test]
    fn root_needs_no_sudo() {
        let mock = Arc::new(MockRunner::new());
        mock.add_program("sudo");
        mock.respond("id -u", 0, "0\n");
        let service = SystemService::new(mock);

        assert!(service.is_root());
        assert_eq!(service.elevation_prefix(), None);
    }

    #[test]
    fn regular_user_gets_sudo_when_available() {
        let mock = Arc::new(MockRunner::new());
        mock.respond("id -u", 0, "1000\n");
        let service = SystemService::new(mock.clone());
        assert_eq!(service.elevation_prefix(), None);

        mock.add_program("sudo");
        assert_eq!(service.elevation_prefix(), Some("sudo"));
    }

    #[test]
    fn unreachable_daemon_carries_platform_remedy() {
        let mock = Arc::new(MockRunner::new());
        mock.add_program("docker");
        mock.respond("docker info", 1, "");
        mock.respond("uname -s", 0, "Linux");
        let service = SystemService::new(mock);

        let err = service.ensure_daemon().unwrap_err();
        match err.downcast_ref::<DevError>() {
            Some(DevError::DaemonUnreachable { remedy }) => {
                assert!(remedy.contains("systemctl start docker"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reachable_daemon_passes() {
        let mock = Arc::new(MockRunner::new());
        mock.add_program("docker");
        let service = SystemService::new(mock);

        assert!(service.ensure_daemon().is_ok());
    }
}
