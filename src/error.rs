use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the user by devbench commands.
#[derive(Debug, Error)]
pub enum DevError {
    #[error("{tool} is not installed. Run 'devbench install-deps' or: {hint}")]
    MissingTool { tool: String, hint: String },

    #[error("{name} is required to install dependencies. {hint}")]
    MissingPrerequisite { name: String, hint: String },

    #[error("Docker daemon is not reachable. {remedy}")]
    DaemonUnreachable { remedy: String },

    #[error(
        "'{command}' must run on the host, not inside the dev container. Exit the container first."
    )]
    InsideContainer { command: String },

    #[error("`{command}` exited with {}", describe_code(.code))]
    ToolFailed { command: String, code: Option<i32> },

    #[error("no running dev container found for {}", .workspace.display())]
    NoRunningContainer { workspace: PathBuf },

    #[error("failed to install {tool}")]
    InstallFailed { tool: String },

    #[error("unsupported platform: {name}")]
    UnsupportedPlatform { name: String },

    #[error("could not run {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

impl DevError {
    /// Process exit code for this failure. Tool failures keep the tool's own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ToolFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DevError>()
        .map(DevError::exit_code)
        .unwrap_or(1)
}
