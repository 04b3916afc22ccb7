//! Command decoding
//!
//! A line of input becomes a [`Command`]: the first token picks the
//! [`Keyword`] (case-insensitive), the rest are arguments. Each keyword knows
//! how many arguments it needs, checked before anything is dispatched.
//!
//! # Grammar
//! ```text
//! home
//! create <name...>        words joined with '_'
//! edit <name...>          words joined with '_'
//! delete <name>           first word only
//! rename <old> <new...>   new name words joined with '_'
//! help
//! exit | quit | q
//! ```

use std::str::FromStr;

use thiserror::Error;

/// Command keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Home,
    Create,
    Edit,
    Delete,
    Rename,
    Help,
    Exit,
}

impl Keyword {
    /// Arguments required before the command can run
    pub fn min_args(self) -> usize {
        match self {
            Keyword::Home | Keyword::Help | Keyword::Exit => 0,
            Keyword::Create | Keyword::Edit | Keyword::Delete => 1,
            Keyword::Rename => 2,
        }
    }

    fn usage_error(self) -> CommandError {
        match self {
            Keyword::Rename => CommandError::RenameUsage,
            _ => CommandError::MissingName,
        }
    }
}

impl FromStr for Keyword {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Keyword::Home),
            "create" => Ok(Keyword::Create),
            "edit" => Ok(Keyword::Edit),
            "delete" => Ok(Keyword::Delete),
            "rename" => Ok(Keyword::Rename),
            "help" => Ok(Keyword::Help),
            "exit" | "quit" | "q" => Ok(Keyword::Exit),
            _ => Err(CommandError::Invalid(s.to_string())),
        }
    }
}

/// A decoded command with its arguments resolved to note names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Create { name: String },
    Edit { name: String },
    Delete { name: String },
    Rename { old: String, new: String },
    Help,
    Exit,
}

/// Reasons a line cannot be turned into a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command")]
    Invalid(String),

    #[error("Please provide a note name.")]
    MissingName,

    #[error("Please provide the old and new note names.")]
    RenameUsage,
}

impl Command {
    /// Decode a line of input.
    ///
    /// Blank lines decode to `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Ok(None);
        };

        let keyword: Keyword = first.parse()?;
        let args: Vec<&str> = tokens.collect();
        if args.len() < keyword.min_args() {
            return Err(keyword.usage_error());
        }

        let command = match keyword {
            Keyword::Home => Command::Home,
            Keyword::Create => Command::Create {
                name: join_name(&args),
            },
            Keyword::Edit => Command::Edit {
                name: join_name(&args),
            },
            Keyword::Delete => Command::Delete {
                name: args[0].to_string(),
            },
            Keyword::Rename => Command::Rename {
                old: args[0].to_string(),
                new: join_name(&args[1..]),
            },
            Keyword::Help => Command::Help,
            Keyword::Exit => Command::Exit,
        };

        Ok(Some(command))
    }
}

/// Multi-word names are stored with underscores
pub fn join_name(words: &[&str]) -> String {
    words.join("_")
}
