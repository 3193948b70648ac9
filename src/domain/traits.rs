use anyhow::Result;
use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};

/// An external command line: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs this invocation through another program, e.g. `sudo`.
    pub fn prefixed(self, prefix: Option<&str>) -> Self {
        match prefix {
            Some(wrapper) => {
                let mut args = Vec::with_capacity(self.args.len() + 1);
                args.push(self.program);
                args.extend(self.args);
                Self {
                    program: wrapper.to_string(),
                    args,
                }
            }
            None => self,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl Outcome {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub outcome: Outcome,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.outcome.success()
    }

    /// First non-empty stdout line, trimmed.
    pub fn first_line(&self) -> Option<&str> {
        self.stdout.lines().map(str::trim).find(|l| !l.is_empty())
    }
}

/// Port for every interaction with external programs
pub trait CommandRunner: Send + Sync + Debug {
    /// Locate a program on the command search path
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run a command and capture its output
    fn capture(&self, cmd: &Invocation) -> Result<CapturedOutput>;

    /// Run a command attached to the terminal, optionally inside `cwd`
    fn run(&self, cmd: &Invocation, cwd: Option<&Path>) -> Result<Outcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_command_line() {
        let cmd = Invocation::new("docker", ["logs", "-f", "abc123"]);
        assert_eq!(cmd.to_string(), "docker logs -f abc123");
    }

    #[test]
    fn prefix_moves_program_into_args() {
        let cmd = Invocation::new("apt-get", ["install", "-y", "nodejs"]).prefixed(Some("sudo"));
        assert_eq!(cmd.program, "sudo");
        assert_eq!(cmd.to_string(), "sudo apt-get install -y nodejs");

        let plain = Invocation::new("brew", ["install", "node"]).prefixed(None);
        assert_eq!(plain.to_string(), "brew install node");
    }

    #[test]
    fn first_line_skips_blank_output() {
        let output = CapturedOutput {
            outcome: Outcome::from_code(0),
            stdout: "\n  v20.11.1  \nextra\n".into(),
            stderr: String::new(),
        };
        assert_eq!(output.first_line(), Some("v20.11.1"));
        assert!(output.success());
    }

    #[test]
    fn signal_is_not_success() {
        assert!(!Outcome { code: None }.success());
        assert!(!Outcome::from_code(127).success());
    }
}
