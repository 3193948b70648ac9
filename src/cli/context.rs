use crate::error::DevError;
use std::env;

/// Variables set inside a dev container (by our `containerEnv` and by VS Code).
pub const CONTAINER_FLAGS: [&str; 2] = ["DEVCONTAINER", "REMOTE_CONTAINERS"];

/// Where devbench is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeContext {
    /// Running on the host machine
    Host,
    /// Running inside the managed dev container
    Container,
}

impl RuntimeContext {
    /// Detects the context from the process environment.
    pub fn detect() -> Self {
        Self::from_flags(CONTAINER_FLAGS.iter().map(|name| env::var(name).ok()))
    }

    /// Container as soon as any flag holds a truthy value.
    pub fn from_flags<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        if values.into_iter().flatten().any(|v| is_truthy(&v)) {
            Self::Container
        } else {
            Self::Host
        }
    }

    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host)
    }
}

impl std::fmt::Display for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host => write!(f, "Host"),
            Self::Container => write!(f, "Container"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

/// Blocks host-only commands inside the dev container.
pub fn ensure_host(context: RuntimeContext, command: &str) -> Result<(), DevError> {
    if context.is_host() {
        return Ok(());
    }

    Err(DevError::InsideContainer {
        command: command.to_string(),
    })
}
