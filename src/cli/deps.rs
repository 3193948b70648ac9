use super::app::App;
use super::args::Commands;
use super::context::ensure_host;
use crate::output;
use anyhow::Result;

/// `check-deps`: report only, never fails.
pub fn check(app: &App) -> Result<()> {
    output::header("Checking dependencies");
    let os = app.system().detect_os();
    output::info(format!("Platform: {os}"));

    let statuses = app.dependencies().check_all();
    for status in &statuses {
        match &status.version {
            Some(version) => output::success(format!("{:<18} {version}", status.tool.display_name())),
            None => output::warning(format!("{:<18} not found", status.tool.display_name())),
        }
    }

    if statuses.iter().all(|s| s.is_installed()) {
        output::success("All dependencies are installed");
    } else if os.is_supported() {
        output::info("Run 'devbench install-deps' to install the missing tools");
    } else {
        output::info("Automatic installation is not available here. Install manually:");
        for status in statuses.iter().filter(|s| !s.is_installed()) {
            output::hint(format!("{}: {}", status.tool, status.tool.install_hint()));
        }
    }

    Ok(())
}

/// `install-deps`
pub fn install(app: &App) -> Result<()> {
    ensure_host(app.context(), Commands::InstallDeps.name())?;

    output::header("Installing dependencies");
    let report = app.installer().install_missing()?;

    if report.installed.is_empty() && report.succeeded() {
        output::success("All dependencies are already installed, nothing to do");
    } else if report.succeeded() {
        output::success("All dependencies installed successfully");
    } else {
        output::warning(format!(
            "Installation finished with {} warning(s)",
            report.warnings.len()
        ));
        for warning in &report.warnings {
            output::hint(warning);
        }
    }

    Ok(())
}
