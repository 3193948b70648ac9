pub mod platform;
pub mod tool;
pub mod traits;

pub use platform::OsCategory;
pub use tool::{Tool, ToolStatus};
pub use traits::{CapturedOutput, CommandRunner, Invocation, Outcome};
