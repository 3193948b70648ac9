use crate::domain::{CapturedOutput, CommandRunner, Invocation, Outcome};
use crate::error::DevError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs real processes on the host.
#[derive(Debug)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn capture(&self, cmd: &Invocation) -> Result<CapturedOutput> {
        debug!("capturing `{cmd}`");

        let output = command(cmd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DevError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        Ok(CapturedOutput {
            outcome: Outcome {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run(&self, cmd: &Invocation, cwd: Option<&Path>) -> Result<Outcome> {
        debug!("running `{cmd}` (cwd {:?})", cwd);

        let mut process = command(cmd);
        if let Some(dir) = cwd {
            process.current_dir(dir);
        }

        let status = process.status().map_err(|source| DevError::Spawn {
            program: cmd.program.clone(),
            source,
        })?;

        debug!("`{cmd}` finished with {:?}", status.code());
        Ok(Outcome {
            code: status.code(),
        })
    }
}

fn command(cmd: &Invocation) -> Command {
    let mut process = Command::new(&cmd.program);
    process.args(&cmd.args);
    process
}
