//! Interactive command grammar
//!
//! The watch loop reads one command per stdin line. Selection tokens are
//! resolved against the last rendered list (exact id first, then row
//! number) by the list controller.

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the detail view tailing the runtime log.
    Open(String),
    /// Open the detail view tailing the build log.
    Build(String),
    /// Return to the list view.
    Back,
    /// Submit the configured repository.
    Send,
    /// Request cancellation of the currently opened solution.
    Kill,
    /// Leave the console.
    Quit,
    Help,
}

/// Parse one input line; `None` means the line was not a known command.
pub fn parse(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }

    match (head, arg) {
        ("open", Some(token)) => Some(Command::Open(token.to_string())),
        ("build", Some(token)) => Some(Command::Build(token.to_string())),
        ("back", None) | ("list", None) => Some(Command::Back),
        ("send", None) => Some(Command::Send),
        ("kill", None) => Some(Command::Kill),
        ("quit", None) | ("exit", None) | ("q", None) => Some(Command::Quit),
        ("help", None) | ("?", None) => Some(Command::Help),
        _ => None,
    }
}

pub fn usage() -> &'static str {
    "commands:\n  \
     open <row|id>   watch a solution's runtime log\n  \
     build <row|id>  watch a solution's build log\n  \
     back            return to the solution list\n  \
     send            submit the configured repository\n  \
     kill            cancel the opened solution\n  \
     quit            leave the console"
}
