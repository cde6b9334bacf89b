// src/game.rs
// This module provides the Game session that owns the pouch, the board and
// the operator's selections for one caller, and exposes the draw operations
// the front-end invokes in manual and auto mode.

use chrono::{DateTime, Local};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::board::Board;
use crate::defs::{ball_label, is_valid_ball, Column, Mode, Number};
use crate::error::{BingoError, BingoResult};
use crate::logging::{log_info, log_warning};
use crate::pouch::Pouch;

pub struct Game<R: Rng = ThreadRng> {
    pouch: Pouch,
    board: Board,
    last_game: Option<Board>,
    mode: Mode,
    pattern_key: String,
    started_at: DateTime<Local>,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for Game<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Session drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            pouch: Pouch::new(),
            board: Board::new(),
            last_game: None,
            mode: Mode::Auto,
            pattern_key: "REGULAR".to_string(),
            started_at: Local::now(),
            rng,
        }
    }

    /// Draws a random ball from the pouch (auto mode).
    pub fn draw_next(&mut self) -> BingoResult<Number> {
        let number = match self.pouch.extract(&mut self.rng) {
            Ok(n) => n,
            Err(e) => {
                log_warning("Attempted to draw a ball from an empty pouch.");
                return Err(e);
            }
        };
        self.board.push(number);
        log_info(&format!("Drew ball: {}", ball_label(number)));
        Ok(number)
    }

    /// Records a ball drawn by hand (manual mode).
    pub fn mark_manual(&mut self, number: Number) -> BingoResult<Number> {
        if self.board.contains(number) {
            log_warning(&format!("Ball {} is already drawn. Ignoring input.", ball_label(number)));
            return Err(BingoError::invalid_ball(number, "is already drawn"));
        }
        let number = self.pouch.take(number).inspect_err(|e| log_warning(&e.to_string()))?;
        self.board.push(number);
        log_info(&format!("Successfully drew ball: {}", ball_label(number)));
        Ok(number)
    }

    /// Parses operator input such as `42`, `n42` or `N42` and records it.
    pub fn mark_manual_input(&mut self, input: &str) -> BingoResult<Number> {
        let number = parse_ball(input)?;
        self.mark_manual(number)
    }

    /// Drawn balls, most recent last.
    pub fn history(&self) -> &[Number] {
        self.board.get_numbers()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pouch(&self) -> &Pouch {
        &self.pouch
    }

    pub fn newest(&self) -> Option<Number> {
        self.board.newest()
    }

    pub fn is_pouch_empty(&self) -> bool {
        self.pouch.is_empty()
    }

    /// Starts a new round. The discarded round can be brought back with
    /// `restore_last_game`.
    pub fn reset(&mut self) {
        self.last_game = Some(std::mem::take(&mut self.board));
        self.pouch.refill();
        self.started_at = Local::now();
        log_info("Board has been reset.");
    }

    /// Reinstates the round discarded by the last reset.
    pub fn restore_last_game(&mut self) -> BingoResult<()> {
        match self.last_game.take() {
            Some(board) if !board.is_empty() => {
                self.pouch = Pouch::without(board.get_numbers());
                self.board = board;
                log_info("Restored the previous game state.");
                Ok(())
            }
            _ => {
                log_warning("No previous game state to restore.");
                Err(BingoError::NothingToRestore)
            }
        }
    }

    pub fn has_last_game(&self) -> bool {
        self.last_game.as_ref().is_some_and(|board| !board.is_empty())
    }

    /// Takes back the most recent ball and returns it to the pouch.
    pub fn undo_last(&mut self) -> BingoResult<Number> {
        match self.board.pop() {
            Some(number) => {
                self.pouch.put_back(number);
                log_info(&format!("Undo confirmed: {}", ball_label(number)));
                Ok(number)
            }
            None => {
                log_warning("No balls to undo.");
                Err(BingoError::NothingToUndo)
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            log_info(&format!("Switched to {} mode.", mode.as_str().to_lowercase()));
        }
    }

    pub fn pattern_key(&self) -> &str {
        &self.pattern_key
    }

    /// Selects the pattern for the round. Selecting the current one is a no-op.
    pub fn set_pattern(&mut self, key: &str) {
        if !self.pattern_key.eq_ignore_ascii_case(key) {
            self.pattern_key = key.to_string();
            log_info(&format!("Switched to pattern: {key}"));
        }
    }

    pub fn game_info(&self) -> String {
        format!(
            "Game[started={}, mode={}, pattern={}, drawn={}, pouch_len={}]",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.mode.as_str(),
            self.pattern_key,
            self.board.len(),
            self.pouch.len()
        )
    }
}

/// Reads a typed ball: a bare number or a letter followed by a number.
pub fn parse_ball(input: &str) -> BingoResult<Number> {
    let input = input.trim();
    let (letter, digits) = match input.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => (Some(first), input[1..].trim()),
        Some(_) => (None, input),
        None => return Err(BingoError::InvalidBall("empty input".to_string())),
    };

    let number: Number = digits
        .parse()
        .map_err(|_| BingoError::InvalidBall(format!("'{input}' is not a ball number")))?;
    if !is_valid_ball(number) {
        return Err(BingoError::invalid_ball(number, "is outside 1-75"));
    }

    if let Some(letter) = letter {
        match Column::from_letter(letter) {
            Some(column) if column.range().contains(&number) => {}
            Some(column) => {
                return Err(BingoError::InvalidBall(format!(
                    "{number} is not in the {} column",
                    column.letter()
                )));
            }
            None => {
                return Err(BingoError::InvalidBall(format!(
                    "'{letter}' is not a BINGO letter"
                )));
            }
        }
    }
    Ok(number)
}
