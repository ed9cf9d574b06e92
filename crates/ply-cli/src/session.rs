//! Interactive game loop over any reader/writer pair.

use crate::command::{Command, HELP};
use crate::config::PlyConfig;
use crate::render::{render_board, render_status};
use ply_engine::GameState;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// A game played line by line.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    game: GameState,
    config: PlyConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, config: PlyConfig) -> Self {
        Self {
            reader,
            writer,
            game: GameState::new(),
            config,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.show_position()?;
        loop {
            write!(self.writer, "> ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                writeln!(self.writer)?;
                return Ok(());
            }

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.writer, "error: {}", e)?;
                    continue;
                }
            };
            debug!(?command, "session command");

            match command {
                Command::Quit => return Ok(()),
                Command::Empty => {}
                Command::Help => writeln!(self.writer, "{}", HELP)?,
                Command::Board => self.show_position()?,
                Command::Reset => {
                    self.game.reset();
                    self.show_position()?;
                }
                Command::Undo => match self.game.undo() {
                    Ok(m) => {
                        writeln!(self.writer, "took back {}", m)?;
                        self.show_position()?;
                    }
                    Err(e) => writeln!(self.writer, "error: {}", e)?,
                },
                Command::Moves => {
                    let mut moves: Vec<String> = self
                        .game
                        .legal_moves()
                        .iter()
                        .map(|m| m.to_algebraic())
                        .collect();
                    moves.sort();
                    writeln!(self.writer, "{}", moves.join(" "))?;
                }
                Command::Hint(square) => {
                    let mut targets = self.game.targets_from(square);
                    targets.sort();
                    let names: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                    writeln!(self.writer, "{}: {}", square, names.join(" "))?;
                }
                Command::Move(text) => match self.game.play(&text) {
                    Ok(m) => {
                        info!(mv = %m, "played");
                        self.show_position()?;
                    }
                    Err(e) => writeln!(self.writer, "error: {}", e)?,
                },
            }
        }
    }

    fn show_position(&mut self) -> io::Result<()> {
        write!(self.writer, "{}", render_board(self.game.board(), &self.config))?;
        writeln!(self.writer, "{}", render_status(&self.game))?;
        if self.config.show_hints && !self.game.is_game_over() {
            self.show_hints()?;
        }
        Ok(())
    }

    fn show_hints(&mut self) -> io::Result<()> {
        let moves = self.game.legal_moves();
        let mut froms: Vec<_> = moves.iter().map(|m| m.from()).collect();
        froms.sort();
        froms.dedup();
        for from in froms {
            let mut targets: Vec<_> = moves
                .iter()
                .filter(|m| m.from() == from)
                .map(|m| m.to())
                .collect();
            targets.sort();
            let names: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
            writeln!(self.writer, "  {}: {}", from, names.join(" "))?;
        }
        Ok(())
    }
}
