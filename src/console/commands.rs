//! Console command parsing

use std::str::FromStr;

/// A line typed at the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pause a running clock or resume a paused one
    Toggle,
    Status,
    Save,
    Load,
    /// Game completed by the named player
    Finish(String),
    Board,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "toggle" | "pause" | "resume" => Ok(Command::Toggle),
            "status" => Ok(Command::Status),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "finish" if rest.is_empty() => Err("finish needs a player name".to_string()),
            "finish" => Ok(Command::Finish(rest.to_string())),
            "board" | "leaderboard" => Ok(Command::Board),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

/// Help text listing every command
pub const HELP: &str = "toggle | status | save | load | finish <name> | board | quit";
