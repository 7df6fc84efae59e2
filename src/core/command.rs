// core/command.rs

// Motion commands accepted by the controller and the error raised when a
// caller hands in something else.

use std::fmt;
use std::str::FromStr;

/// Motion command for one control cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advance one cell in the facing direction
    Forward,
    /// Step back one cell, keeping the heading
    Backward,
    /// Rotate 90° counter-clockwise in place
    Left,
    /// Rotate 90° clockwise in place
    Right,
}

/// Direction handed to the rotation motor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    Left,
    Right,
}

impl Command {
    /// Rotation the command asks for, if it is a turn
    pub fn rotation(self) -> Option<Rotation> {
        match self {
            Command::Left => Some(Rotation::Left),
            Command::Right => Some(Rotation::Right),
            Command::Forward | Command::Backward => None,
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Accepts the full names in any case, plus the one-letter forms `f`, `b`, `l`, `r`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "FORWARD" | "F" => Ok(Command::Forward),
            "BACKWARD" | "B" => Ok(Command::Backward),
            "LEFT" | "L" => Ok(Command::Left),
            "RIGHT" | "R" => Ok(Command::Right),
            _ => Err(CommandError::Unrecognized(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Command::Forward => "FORWARD",
            Command::Backward => "BACKWARD",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// Command rejection. Never retried internally; the caller decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Token is not one of FORWARD, BACKWARD, LEFT, RIGHT
    Unrecognized(String),
    /// `initialize` has not been called yet
    NotInitialized,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::Unrecognized(token) => write!(f, "Unrecognized command: {:?}", token),
            CommandError::NotInitialized => write!(f, "Robot not initialized"),
        }
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_tokens() {
        assert_eq!("FORWARD".parse(), Ok(Command::Forward));
        assert_eq!("backward".parse(), Ok(Command::Backward));
        assert_eq!(" l ".parse(), Ok(Command::Left));
        assert_eq!("r".parse(), Ok(Command::Right));
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert_eq!(
            "JUMP".parse::<Command>(),
            Err(CommandError::Unrecognized("JUMP".to_string()))
        );
        assert!("".parse::<Command>().is_err());
        assert!("forwards".parse::<Command>().is_err());
    }

    #[test]
    fn only_turns_carry_a_rotation() {
        assert_eq!(Command::Left.rotation(), Some(Rotation::Left));
        assert_eq!(Command::Right.rotation(), Some(Rotation::Right));
        assert_eq!(Command::Forward.rotation(), None);
        assert_eq!(Command::Backward.rotation(), None);
    }
}
