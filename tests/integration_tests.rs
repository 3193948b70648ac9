use devbench::DevError;
use devbench::cli::{App, Commands, RuntimeContext};
use devbench::error::exit_code_for;
use devbench::infra::Settings;
use devbench::test_support::MockRunner;
use std::path::PathBuf;
use std::sync::Arc;

fn app(mock: &Arc<MockRunner>, context: RuntimeContext) -> App {
    App::with_runner(
        Settings::new(PathBuf::from("/work/app"), "bash"),
        mock.clone(),
        context,
    )
}

fn dev_error(err: &anyhow::Error) -> &DevError {
    err.downcast_ref::<DevError>()
        .unwrap_or_else(|| panic!("not a DevError: {err:#}"))
}

#[test]
fn test_host_only_commands_blocked_inside_container() {
    let mock = Arc::new(MockRunner::new());
    mock.add_tool("docker", "Docker version 27.0.3");
    mock.add_tool("devcontainer", "0.62.0");
    let app = app(&mock, RuntimeContext::Container);

    for command in Commands::ALL.into_iter().filter(|c| c.is_host_only()) {
        let err = app.dispatch(command).unwrap_err();

        assert!(
            matches!(dev_error(&err), DevError::InsideContainer { command: name } if name == command.name()),
            "{} was not blocked",
            command.name()
        );
        assert_ne!(exit_code_for(&err), 0);
        assert!(
            mock.get_commands().is_empty(),
            "{} invoked {:?}",
            command.name(),
            mock.get_commands()
        );
    }
}

#[test]
fn test_check_deps_never_fails() {
    let mock = Arc::new(MockRunner::new());

    assert!(app(&mock, RuntimeContext::Host).dispatch(Commands::CheckDeps).is_ok());
    assert!(
        app(&mock, RuntimeContext::Container)
            .dispatch(Commands::CheckDeps)
            .is_ok()
    );

    mock.add_tool("docker", "Docker version 27.0.3");
    mock.set_fail_on("docker");
    assert!(app(&mock, RuntimeContext::Host).dispatch(Commands::CheckDeps).is_ok());
}

#[test]
fn test_check_deps_on_unsupported_platform_only_reports() {
    let mock = Arc::new(MockRunner::new());
    mock.respond("uname -s", 0, "SunOS");
    mock.add_tool("docker", "Docker version 27.0.3");

    assert!(app(&mock, RuntimeContext::Host).dispatch(Commands::CheckDeps).is_ok());
    assert!(!mock.get_commands().iter().any(|c| c.contains("install")));
}

#[test]
fn test_check_docker_exit_behaviour() {
    let mock = Arc::new(MockRunner::new());
    let app = app(&mock, RuntimeContext::Host);

    let err = app.dispatch(Commands::CheckDocker).unwrap_err();
    assert!(matches!(dev_error(&err), DevError::MissingTool { .. }));

    mock.add_tool("docker", "Docker version 27.0.3");
    mock.respond("docker info", 1, "");
    let err = app.dispatch(Commands::CheckDocker).unwrap_err();
    assert!(matches!(
        dev_error(&err),
        DevError::DaemonUnreachable { .. }
    ));
    assert_eq!(exit_code_for(&err), 1);

    mock.respond("docker info", 0, "Server Version: 27.0.3");
    assert!(app.dispatch(Commands::CheckDocker).is_ok());
}

#[test]
fn test_logs_and_shell_without_container_only_probe() {
    let mock = Arc::new(MockRunner::new());
    mock.add_tool("docker", "Docker version 27.0.3");
    let app = app(&mock, RuntimeContext::Host);

    for command in [Commands::DevLogs, Commands::DevShell] {
        mock.clear_commands();
        let err = app.dispatch(command).unwrap_err();

        assert!(matches!(
            dev_error(&err),
            DevError::NoRunningContainer { .. }
        ));
        assert_ne!(exit_code_for(&err), 0);

        let probes: Vec<String> = mock
            .get_commands()
            .into_iter()
            .filter(|c| c.starts_with("docker ps"))
            .collect();
        assert_eq!(probes.len(), 4);
        assert!(
            !mock
                .get_commands()
                .iter()
                .any(|c| c.starts_with("docker logs") || c.starts_with("docker exec"))
        );
    }
}

#[test]
fn test_help_needs_nothing() {
    let mock = Arc::new(MockRunner::new());

    assert!(app(&mock, RuntimeContext::Container).dispatch(Commands::Help).is_ok());
    assert!(mock.get_commands().is_empty());
}
