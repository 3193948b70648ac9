pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;
pub mod output;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use cli::{App, Cli, Commands, RuntimeContext};
pub use domain::{CommandRunner, Invocation, OsCategory, Tool, ToolStatus};
pub use error::DevError;
pub use infra::{Settings, SystemRunner};
