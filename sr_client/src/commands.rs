use std::{fmt, path::PathBuf};

/// A line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a phrase, sent exactly as typed after the command word.
    Phrase(String),
    /// Submit the image file at the path. No path means nothing was selected.
    Image(Option<PathBuf>),
    /// Reveal every chain once the game is over.
    Results,
    /// Ask the authority to clear a finished game.
    Restart,
    /// Fetch the phase and room summary right now.
    Status,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Phrase command without any text.
    MissingPhrase,
    /// A command that takes no argument was given one.
    UnexpectedArgument { command: String, argument: String },
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPhrase => {
                write!(f, "Phrase requires some text (e.g., 'phrase Fun in a box')")
            }
            Self::UnexpectedArgument { command, argument } => write!(
                f,
                "'{command}' doesn't take an argument, but got '{argument}'"
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of input into a [`Command`].
///
/// The command word is case-insensitive. Everything after it is the
/// argument, trimmed at both ends but otherwise untouched.
///
/// # Examples
///
/// ```
/// use sr_client::commands::{Command, parse_command};
/// use std::path::PathBuf;
///
/// assert_eq!(parse_command("results"), Ok(Command::Results));
/// assert_eq!(
///     parse_command("phrase Fun in a box"),
///     Ok(Command::Phrase("Fun in a box".to_string()))
/// );
/// assert_eq!(
///     parse_command("image ./cat.png"),
///     Ok(Command::Image(Some(PathBuf::from("./cat.png"))))
/// );
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (word, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "phrase" => {
            return if argument.is_empty() {
                Err(ParseError::MissingPhrase)
            } else {
                Ok(Command::Phrase(argument.to_string()))
            };
        }
        "image" | "draw" => {
            return Ok(Command::Image(
                (!argument.is_empty()).then(|| PathBuf::from(argument)),
            ));
        }
        "results" | "reveal" => Command::Results,
        "restart" => Command::Restart,
        "status" | "refresh" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    };

    if argument.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::UnexpectedArgument {
            command: word.to_string(),
            argument: argument.to_string(),
        })
    }
}
