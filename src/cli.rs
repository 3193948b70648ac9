pub mod app;
pub mod args;
pub mod context;
pub mod deps;
pub mod docker;
pub mod help;
pub mod lifecycle;

pub use app::App;
pub use args::{Cli, Commands};
pub use context::{RuntimeContext, ensure_host};
