use super::args::Commands;
use crate::output;
use colored::Colorize;

/// Command table shown by `help` and when no command is given.
pub fn render() -> String {
    let mut text = output::heading("devbench: dev container helper");
    text.push_str("\n\nUsage: devbench <command> [--workspace-folder DIR] [--shell PROGRAM] [-v]\n\nCommands:\n");

    for command in Commands::ALL {
        let name = format!("{:<14}", command.name());
        text.push_str(&format!("  {} {}\n", name.cyan(), command.summary()));
    }

    text.push_str("\nHost-only commands refuse to run inside the dev container.\n");
    text
}

pub fn print() {
    print!("{}", render());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_command() {
        colored::control::set_override(false);
        let help = render();

        for command in Commands::ALL {
            assert!(help.contains(command.name()), "{}", command.name());
        }
        assert!(help.contains("  devstart       Start the dev container"));
    }
}
