use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const WORKSPACE_ENV: &str = "DEVBENCH_WORKSPACE";
pub const SHELL_ENV: &str = "DEVBENCH_SHELL";
pub const LOG_ENV: &str = "DEVBENCH_LOG";
pub const DEFAULT_SHELL: &str = "bash";

/// Where the dev container lives and how to enter it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Folder containing `.devcontainer/`, passed to the tooling as target context
    pub workspace: PathBuf,
    /// Shell started by `devshell`
    pub shell: String,
}

impl Settings {
    pub fn new(workspace: PathBuf, shell: impl Into<String>) -> Self {
        Self {
            workspace,
            shell: shell.into(),
        }
    }

    /// Builds settings from the raw CLI values, defaulting to the current directory.
    pub fn resolve(workspace: Option<&str>, shell: &str) -> Result<Self> {
        let cwd = std::env::current_dir().context("reading current directory")?;
        Self::resolve_from(workspace, shell, &cwd)
    }

    /// Same as [`Settings::resolve`] with relative folders anchored at `base`.
    /// The folder must exist.
    pub fn resolve_from(workspace: Option<&str>, shell: &str, base: &Path) -> Result<Self> {
        let workspace = match workspace {
            Some(raw) => resolve_workspace(raw, base)?,
            None => normalize(base),
        };

        let metadata = fs::metadata(&workspace)
            .with_context(|| format!("workspace folder {} is not accessible", workspace.display()))?;
        anyhow::ensure!(
            metadata.is_dir(),
            "workspace folder {} is not a directory",
            workspace.display()
        );

        Ok(Self::new(workspace, shell))
    }

    /// Last path component, used for name-based container discovery.
    pub fn workspace_name(&self) -> String {
        self.workspace
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "workspace".to_string())
    }

    pub fn devcontainer_config(&self) -> PathBuf {
        self.workspace.join(".devcontainer").join("devcontainer.json")
    }
}

/// Expands `~`/`$VAR`, anchors relative paths at `base` and normalizes the
/// result. The devcontainer CLI labels containers with the normalized path.
pub fn resolve_workspace(raw: &str, base: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("expanding workspace folder {raw:?}"))?;
    let path = PathBuf::from(expanded.as_ref());

    Ok(if path.is_absolute() {
        normalize(&path)
    } else {
        normalize(&base.join(path))
    })
}

/// Lexical cleanup: drops `.` and trailing separators, folds `..` into its
/// parent. Symlinks are left alone.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_workspace_is_anchored() {
        let base = Path::new("/home/dev");
        let resolved = resolve_workspace("projects/app", base).unwrap();
        assert_eq!(resolved, PathBuf::from("/home/dev/projects/app"));
    }

    #[test]
    fn absolute_workspace_is_kept() {
        let resolved = resolve_workspace("/srv/app", Path::new("/ignored")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/app"));
    }

    #[test]
    fn current_dir_segments_are_dropped() {
        let resolved = resolve_workspace(".", Path::new("/work/app")).unwrap();
        assert_eq!(resolved, PathBuf::from("/work/app"));

        let resolved = resolve_workspace("./src/./..", Path::new("/work/app")).unwrap();
        assert_eq!(resolved, PathBuf::from("/work/app"));
    }

    #[test]
    fn parent_segments_are_folded() {
        let resolved = resolve_workspace("../app", Path::new("/work/other")).unwrap();
        assert_eq!(resolved, PathBuf::from("/work/app"));

        let resolved = resolve_workspace("/../../work/app", Path::new("/")).unwrap();
        assert_eq!(resolved, PathBuf::from("/work/app"));
    }

    #[test]
    fn trailing_separator_is_dropped() {
        let resolved = resolve_workspace("/work/app/", Path::new("/")).unwrap();
        assert_eq!(resolved.to_string_lossy(), "/work/app");
    }

    #[test]
    fn resolve_from_accepts_existing_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve_from(Some("."), "zsh", temp_dir.path()).unwrap();
        assert_eq!(settings.workspace, normalize(temp_dir.path()));
        assert_eq!(settings.shell, "zsh");

        let settings = Settings::resolve_from(None, DEFAULT_SHELL, temp_dir.path()).unwrap();
        assert_eq!(settings.workspace, normalize(temp_dir.path()));
    }

    #[test]
    fn missing_workspace_folder_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = Settings::resolve_from(Some("missing"), DEFAULT_SHELL, temp_dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("workspace folder"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn file_as_workspace_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let err = Settings::resolve_from(Some("notes.txt"), DEFAULT_SHELL, temp_dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let result = resolve_workspace("$DEVBENCH_TEST_SURELY_UNSET_VAR/app", Path::new("/"));
        assert!(result.is_err());
    }

    #[test]
    fn workspace_name_and_config_path() {
        let settings = Settings::new(PathBuf::from("/work/my-app"), DEFAULT_SHELL);
        assert_eq!(settings.workspace_name(), "my-app");
        assert_eq!(
            settings.devcontainer_config(),
            PathBuf::from("/work/my-app/.devcontainer/devcontainer.json")
        );
    }
}
