//! Command parsing for the interactive watchlist

use thiserror::Error;

/// Errors from parsing a line of user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Missing symbol for /{0}")]
    MissingSymbol(String),

    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("Enter a ticker symbol or a /command (try /help)")]
    NotASymbol,
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up a symbol and offer to add it
    Search { symbol: String },
    /// Stop tracking a symbol
    Remove { symbol: String },
    /// Refetch every tracked quote
    Refresh,
    /// Show the watchlist
    List,
    /// News and AI summary for a tracked symbol
    Analyze { symbol: String },
    Help,
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// A bare word is a search for that symbol.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let Some(rest) = input.strip_prefix('/') else {
            let mut words = input.split_whitespace();
            return match (words.next(), words.next()) {
                (Some(symbol), None) => Ok(Command::Search {
                    symbol: symbol.to_uppercase(),
                }),
                _ => Err(CommandError::NotASymbol),
            };
        };

        let mut parts = rest.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let symbol = parts.next().map(str::to_uppercase);

        let require_symbol = |name: &str| {
            symbol
                .clone()
                .ok_or_else(|| CommandError::MissingSymbol(name.to_string()))
        };

        match cmd.as_str() {
            "search" | "add" | "s" => Ok(Command::Search {
                symbol: require_symbol(&cmd)?,
            }),
            "remove" | "rm" | "r" => Ok(Command::Remove {
                symbol: require_symbol(&cmd)?,
            }),
            "analyze" | "a" => Ok(Command::Analyze {
                symbol: require_symbol(&cmd)?,
            }),
            "refresh" | "f" => Ok(Command::Refresh),
            "list" | "ls" | "l" => Ok(Command::List),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            "" => Err(CommandError::Empty),
            _ => Err(CommandError::Unknown(cmd)),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Watchlist Commands
==================

  /search <symbol>   Look up a stock and offer to add it (alias: /add, /s)
  /remove <symbol>   Stop tracking a stock (alias: /rm, /r)
  /refresh           Refresh every tracked quote (alias: /f)
  /list              Show the watchlist (alias: /ls, /l)
  /analyze <symbol>  Recent news and an AI summary (alias: /a)
  /help              Show this help
  /exit              Quit

Typing a bare ticker such as `aapl` searches for it.
"
    }
}

/// Whether a confirmation answer means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
