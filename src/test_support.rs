use crate::domain::{CapturedOutput, CommandRunner, Invocation, Outcome};
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockResponse {
    code: Option<i32>,
    stdout: String,
}

/// In-memory `CommandRunner` that records every invocation.
///
/// Unknown commands succeed with empty output when their program is "installed"
/// and fail with status 127 otherwise. Scripted responses take precedence.
#[derive(Debug, Default)]
pub struct MockRunner {
    programs: RwLock<HashSet<String>>,
    responses: RwLock<HashMap<String, MockResponse>>,
    provides: RwLock<HashMap<String, Vec<String>>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `program` on the fake PATH.
    pub fn add_program(&self, program: &str) {
        self.programs.write().unwrap().insert(program.to_string());
    }

    /// Puts `program` on the fake PATH and answers `<program> --version`.
    pub fn add_tool(&self, program: &str, version: &str) {
        self.add_program(program);
        self.respond(&format!("{program} --version"), 0, version);
    }

    pub fn respond(&self, command_line: &str, code: i32, stdout: &str) {
        self.responses.write().unwrap().insert(
            command_line.to_string(),
            MockResponse {
                code: Some(code),
                stdout: stdout.to_string(),
            },
        );
    }

    /// After `command_line` succeeds, `program` is found on the fake PATH.
    pub fn on_success_provide(&self, command_line: &str, program: &str) {
        self.provides
            .write()
            .unwrap()
            .entry(command_line.to_string())
            .or_default()
            .push(program.to_string());
    }

    /// Every command line starting with `prefix` exits with status 1.
    pub fn set_fail_on(&self, prefix: &str) {
        *self.fail_on.write().unwrap() = Some(prefix.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn clear_commands(&self) {
        self.commands.write().unwrap().clear();
    }

    fn execute(&self, cmd: &Invocation) -> MockResponse {
        let line = cmd.to_string();
        self.commands.write().unwrap().push(line.clone());

        let failing = self
            .fail_on
            .read()
            .unwrap()
            .as_deref()
            .is_some_and(|prefix| line.starts_with(prefix));

        let response = if failing {
            MockResponse {
                code: Some(1),
                stdout: String::new(),
            }
        } else if let Some(scripted) = self.responses.read().unwrap().get(&line) {
            scripted.clone()
        } else if self.programs.read().unwrap().contains(&cmd.program) {
            MockResponse {
                code: Some(0),
                stdout: String::new(),
            }
        } else {
            MockResponse {
                code: Some(127),
                stdout: String::new(),
            }
        };

        if response.code == Some(0) {
            if let Some(programs) = self.provides.read().unwrap().get(&line) {
                let mut installed = self.programs.write().unwrap();
                installed.extend(programs.iter().cloned());
            }
        }

        response
    }
}

impl CommandRunner for MockRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.programs
            .read()
            .unwrap()
            .contains(program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }

    fn capture(&self, cmd: &Invocation) -> Result<CapturedOutput> {
        let response = self.execute(cmd);
        Ok(CapturedOutput {
            outcome: Outcome {
                code: response.code,
            },
            stdout: response.stdout,
            stderr: String::new(),
        })
    }

    fn run(&self, cmd: &Invocation, _cwd: Option<&Path>) -> Result<Outcome> {
        let response = self.execute(cmd);
        Ok(Outcome {
            code: response.code,
        })
    }
}
