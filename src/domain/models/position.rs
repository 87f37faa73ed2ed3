//! Board state adapter over `shakmaty`.
//!
//! A [`Position`] is an immutable-per-step value: applying a move produces a
//! new `Position` and never mutates the original, so a rejected candidate
//! leaves the board exactly as it was.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position as _};
use thiserror::Error;

/// Errors reconstructing a position from external state.
#[derive(Debug, Error)]
pub enum PositionError {
    /// The FEN string could not be parsed or describes an illegal setup.
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen {
        /// The offending FEN string.
        fen: String,
        /// Parser or setup diagnostic.
        reason: String,
    },
}

/// A candidate move that is not legal in the current position.
///
/// Covers unparseable SAN, ambiguous SAN, and moves that are well-formed but
/// not available to the side to move. All three consume one acquisition
/// attempt and nothing more.
#[derive(Debug, Error)]
#[error("illegal move '{text}': {reason}")]
pub struct IllegalMove {
    /// The rejected move text as received.
    pub text: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Accumulated SAN history in the ply-numbered wire format.
///
/// Each half-move is rendered as `"{n}. {san} "` with a 1-based ply number,
/// e.g. `"1. e4 2. e5 3. Nf3 "`. The inbound history may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanHistory {
    entries: Vec<String>,
}

impl SanHistory {
    /// Parse the wire format back into individual SAN entries.
    ///
    /// Ply-number tokens (anything ending in `.`) are separators, every
    /// other whitespace-delimited token is a SAN entry.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .split_whitespace()
            .filter(|token| !token.ends_with('.'))
            .map(ToString::to_string)
            .collect();
        Self { entries }
    }

    /// Number of plies recorded so far.
    pub fn ply_count(&self) -> usize {
        self.entries.len()
    }

    /// Render the wire format, including the trailing space after each ply.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, san)| format!("{}. {} ", i + 1, san))
            .collect()
    }

    fn with_ply(&self, san: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.push(san.to_string());
        Self { entries }
    }
}

/// One chess position plus the SAN history that led to it.
#[derive(Debug, Clone, Default)]
pub struct Position {
    board: Chess,
    history: SanHistory,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen() && self.history == other.history
    }
}

impl Eq for Position {}

impl Position {
    /// Reconstruct a position from a FEN string and an optional SAN history
    /// in the wire format.
    pub fn from_fen(fen: &str, san_history: Option<&str>) -> Result<Self, PositionError> {
        let parsed: Fen = fen.parse().map_err(|e| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })?;
        let board: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| PositionError::InvalidFen {
                fen: fen.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            board,
            history: san_history.map(SanHistory::parse).unwrap_or_default(),
        })
    }

    /// The standard initial position with an empty history.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Serialize the current board back to FEN.
    pub fn fen(&self) -> String {
        Fen::from_position(self.board.clone(), EnPassantMode::Legal).to_string()
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    /// `true` when it is White's move.
    pub fn white_to_move(&self) -> bool {
        self.board.turn() == Color::White
    }

    /// Single-letter side tag used in comment author ids (`w` / `b`).
    pub fn side_tag(&self) -> char {
        if self.white_to_move() {
            'w'
        } else {
            'b'
        }
    }

    /// Uppercase side name used to prefix fallback justifications.
    pub fn side_name(&self) -> &'static str {
        if self.white_to_move() {
            "WHITE"
        } else {
            "BLACK"
        }
    }

    /// `true` when no legal move exists (checkmate, stalemate, etc.).
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Rendered SAN history for this position.
    pub fn san_history(&self) -> String {
        self.history.render()
    }

    /// Number of plies played so far.
    pub fn ply_count(&self) -> usize {
        self.history.ply_count()
    }

    /// Validate and apply one SAN move, returning the successor position.
    ///
    /// The candidate must parse as standard notation, name a move available
    /// to the side to move, and yield a rules-consistent position. On any
    /// failure `self` is untouched and an [`IllegalMove`] describes the
    /// rejection.
    pub fn apply_san(&self, san: &str) -> Result<Self, IllegalMove> {
        let text = san.trim();
        let parsed: San = text.parse().map_err(|_| IllegalMove {
            text: text.to_string(),
            reason: "not valid standard notation".to_string(),
        })?;
        let mv = parsed.to_move(&self.board).map_err(|e| IllegalMove {
            text: text.to_string(),
            reason: e.to_string(),
        })?;
        let board = self.board.clone().play(&mv).map_err(|_| IllegalMove {
            text: text.to_string(),
            reason: "rejected by position".to_string(),
        })?;
        Ok(Self {
            board,
            history: self.history.with_ply(text),
        })
    }

    /// Apply a move given in UCI notation (the engine protocol's format),
    /// returning the successor position and the move rendered as SAN.
    pub fn apply_uci(&self, uci: &str) -> Result<(Self, String), IllegalMove> {
        let text = uci.trim();
        let parsed: UciMove = text.parse().map_err(|_| IllegalMove {
            text: text.to_string(),
            reason: "not valid UCI notation".to_string(),
        })?;
        let mv = parsed.to_move(&self.board).map_err(|e| IllegalMove {
            text: text.to_string(),
            reason: e.to_string(),
        })?;
        let san = SanPlus::from_move(self.board.clone(), &mv).to_string();
        let board = self.board.clone().play(&mv).map_err(|_| IllegalMove {
            text: text.to_string(),
            reason: "rejected by position".to_string(),
        })?;
        Ok((
            Self {
                board,
                history: self.history.with_ply(&san),
            },
            san,
        ))
    }
}
