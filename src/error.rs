// src/error.rs
// Error taxonomy for the BINGO core and its tools.

use thiserror::Error;

use crate::defs::Number;

#[derive(Error, Debug)]
pub enum BingoError {
    /// Manual entry out of range or already drawn
    #[error("Invalid ball: {0}")]
    InvalidBall(String),

    /// Every ball of the round has been drawn
    #[error("All balls drawn! Reset to play again.")]
    ExhaustedPool,

    /// A pattern definition could not be turned into a mask
    #[error("Malformed pattern '{name}': {reason}")]
    MalformedPatternMask { name: String, reason: String },

    /// Unique batch request cannot be satisfied
    #[error("Card generation stalled: {0}")]
    CardGenerationStalled(String),

    #[error("Invalid card layout: {0}")]
    InvalidCardLayout(String),

    #[error("Malformed card file (card {card}): {reason}")]
    MalformedCardFile { card: usize, reason: String },

    #[error("Unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("No balls to undo")]
    NothingToUndo,

    #[error("No previous game state to restore")]
    NothingToRestore,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BingoError {
    pub fn invalid_ball(number: Number, reason: &str) -> Self {
        BingoError::InvalidBall(format!("{number} {reason}"))
    }

    pub fn malformed_pattern(name: &str, reason: impl Into<String>) -> Self {
        BingoError::MalformedPatternMask {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type BingoResult<T> = Result<T, BingoError>;
