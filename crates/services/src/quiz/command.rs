use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every action the quiz reacts to. UI buttons and the timer both send these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    Start,
    Next,
    Prev,
    /// Zero-based option index on the current question.
    Select(usize),
    Submit,
    Reset,
    Tick,
}

impl QuizCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuizCommand::Start => "start",
            QuizCommand::Next => "next",
            QuizCommand::Prev => "prev",
            QuizCommand::Select(_) => "select",
            QuizCommand::Submit => "submit",
            QuizCommand::Reset => "reset",
            QuizCommand::Tick => "tick",
        }
    }
}

impl fmt::Display for QuizCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizCommand::Select(option) => write!(f, "select {}", option + 1),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("select needs an option number")]
    MissingOption,
    #[error("invalid option number: {0}")]
    InvalidOption(String),
}

/// Parses the text form used by the terminal runner.
///
/// Option numbers are one-based (`select 1` picks the first option).
impl FromStr for QuizCommand {
    type Err = CommandParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandParseError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => QuizCommand::Start,
            "next" | "n" => QuizCommand::Next,
            "prev" | "p" => QuizCommand::Prev,
            "submit" => QuizCommand::Submit,
            "reset" => QuizCommand::Reset,
            "tick" => QuizCommand::Tick,
            "select" | "s" => {
                let raw = parts.next().ok_or(CommandParseError::MissingOption)?;
                let number: usize = raw
                    .parse()
                    .map_err(|_| CommandParseError::InvalidOption(raw.to_string()))?;
                if number == 0 {
                    return Err(CommandParseError::InvalidOption(raw.to_string()));
                }
                QuizCommand::Select(number - 1)
            }
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_name() {
        assert_eq!("start".parse::<QuizCommand>(), Ok(QuizCommand::Start));
        assert_eq!("next".parse::<QuizCommand>(), Ok(QuizCommand::Next));
        assert_eq!(" PREV ".parse::<QuizCommand>(), Ok(QuizCommand::Prev));
        assert_eq!("submit".parse::<QuizCommand>(), Ok(QuizCommand::Submit));
        assert_eq!("reset".parse::<QuizCommand>(), Ok(QuizCommand::Reset));
        assert_eq!("tick".parse::<QuizCommand>(), Ok(QuizCommand::Tick));
        assert_eq!("select 3".parse::<QuizCommand>(), Ok(QuizCommand::Select(2)));
        assert_eq!("s 1".parse::<QuizCommand>(), Ok(QuizCommand::Select(0)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<QuizCommand>(), Err(CommandParseError::Empty));
        assert_eq!(
            "jump".parse::<QuizCommand>(),
            Err(CommandParseError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "select".parse::<QuizCommand>(),
            Err(CommandParseError::MissingOption)
        );
        assert_eq!(
            "select 0".parse::<QuizCommand>(),
            Err(CommandParseError::InvalidOption("0".to_string()))
        );
        assert_eq!(
            "select x".parse::<QuizCommand>(),
            Err(CommandParseError::InvalidOption("x".to_string()))
        );
    }

    #[test]
    fn display_uses_one_based_options() {
        assert_eq!(QuizCommand::Select(0).to_string(), "select 1");
        assert_eq!(QuizCommand::Reset.to_string(), "reset");
    }
}
