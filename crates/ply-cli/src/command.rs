//! Parsing of interactive session input.

use ply_core::{NotationError, Square};

/// One line of user input in an interactive game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a move in coordinate notation ("e2e4", "e7e8n").
    Move(String),
    /// Take back the last move.
    Undo,
    /// List every legal move.
    Moves,
    /// List the destinations of the piece on a square.
    Hint(Square),
    /// Start a new game.
    Reset,
    /// Print the board again.
    Board,
    /// Print the command summary.
    Help,
    /// Leave the session.
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parses a line of input.
    ///
    /// Anything that is not a keyword is taken to be a move; its text is
    /// checked when it is played.
    pub fn parse(input: &str) -> Result<Self, NotationError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd {
            "" => Ok(Command::Empty),
            "undo" | "u" => Ok(Command::Undo),
            "moves" => Ok(Command::Moves),
            "reset" | "new" => Ok(Command::Reset),
            "board" => Ok(Command::Board),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "hint" => {
                let square = parts.next().unwrap_or("");
                Ok(Command::Hint(Square::from_algebraic(square)?))
            }
            _ => Ok(Command::Move(cmd.to_string())),
        }
    }
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  <from><to>[q|r|b|n]  play a move, e.g. e2e4 or e7e8n
  undo                 take back the last move
  moves                list all legal moves
  hint <square>        list where the piece on <square> can go
  reset                start a new game
  board                print the board
  quit                 leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("undo").unwrap(), Command::Undo);
        assert_eq!(Command::parse("  moves \n").unwrap(), Command::Moves);
        assert_eq!(Command::parse("reset").unwrap(), Command::Reset);
        assert_eq!(Command::parse("board").unwrap(), Command::Board);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
    }

    #[test]
    fn test_parse_hint() {
        assert_eq!(
            Command::parse("hint g1").unwrap(),
            Command::Hint(Square::G1)
        );
        assert!(Command::parse("hint").is_err());
        assert!(Command::parse("hint z9").is_err());
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            Command::parse("e2e4\n").unwrap(),
            Command::Move("e2e4".to_string())
        );
        assert_eq!(
            Command::parse("e7e8n").unwrap(),
            Command::Move("e7e8n".to_string())
        );
    }
}
