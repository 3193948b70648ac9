pub mod config;
pub mod system_runner;

pub use config::Settings;
pub use system_runner::SystemRunner;
