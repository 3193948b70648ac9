//! Colored console output.
//!
//! Formatting is pure (`decorate`, `heading`); the printing wrappers send
//! warnings and errors to stderr and everything else to stdout. Colors follow
//! the `colored` crate rules, so `NO_COLOR` and non-TTY handling come for free.

use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Step,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn marker(self) -> ColoredString {
        match self {
            Self::Info => "ℹ".blue(),
            Self::Step => "▶".cyan(),
            Self::Success => "✔".green(),
            Self::Warning => "⚠".yellow(),
            Self::Error => "✖".red(),
        }
        .bold()
    }

    fn paint(self, message: &str) -> ColoredString {
        match self {
            Self::Info | Self::Step => message.normal(),
            Self::Success => message.green(),
            Self::Warning => message.yellow(),
            Self::Error => message.red(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Prefixes `message` with the severity marker and colors it.
pub fn decorate(severity: Severity, message: &str) -> String {
    format!("{} {}", severity.marker(), severity.paint(message))
}

pub fn heading(title: &str) -> String {
    title.bold().blue().to_string()
}

pub fn emit(severity: Severity, message: impl AsRef<str>) {
    let line = decorate(severity, message.as_ref());
    if severity.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info(message: impl AsRef<str>) {
    emit(Severity::Info, message);
}

pub fn step(message: impl AsRef<str>) {
    emit(Severity::Step, message);
}

pub fn success(message: impl AsRef<str>) {
    emit(Severity::Success, message);
}

pub fn warning(message: impl AsRef<str>) {
    emit(Severity::Warning, message);
}

pub fn error(message: impl AsRef<str>) {
    emit(Severity::Error, message);
}

pub fn header(title: impl AsRef<str>) {
    println!("\n{}", heading(title.as_ref()));
}

/// Indented hint line under a previous message.
pub fn hint(message: impl AsRef<str>) {
    eprintln!("   {}", message.as_ref().dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn decorates_each_severity_with_its_marker() {
        plain();
        assert_eq!(decorate(Severity::Info, "platform"), "ℹ platform");
        assert_eq!(decorate(Severity::Step, "installing"), "▶ installing");
        assert_eq!(decorate(Severity::Success, "done"), "✔ done");
        assert_eq!(decorate(Severity::Warning, "careful"), "⚠ careful");
        assert_eq!(decorate(Severity::Error, "failed"), "✖ failed");
    }

    #[test]
    fn heading_keeps_text() {
        plain();
        assert_eq!(heading("Checking dependencies"), "Checking dependencies");
    }

    #[test]
    fn only_problems_go_to_stderr() {
        assert!(Severity::Error.to_stderr());
        assert!(Severity::Warning.to_stderr());
        assert!(!Severity::Success.to_stderr());
        assert!(!Severity::Info.to_stderr());
    }
}
