//! Immutable board snapshots backed by `shakmaty`.
//!
//! `Position` is the only type in the crate that talks to the rules engine.
//! Everything else (history, status, the session) treats it as an opaque
//! value that can be compared, serialized, and asked for legal moves.

use std::fmt;

use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position as _, Role, Square};

use crate::error::GameError;

/// Standard starting arrangement.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

/// Piece a pawn turns into when it reaches the last rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    pub fn role(self) -> Role {
        match self {
            PromotionPiece::Queen => Role::Queen,
            PromotionPiece::Rook => Role::Rook,
            PromotionPiece::Bishop => Role::Bishop,
            PromotionPiece::Knight => Role::Knight,
        }
    }

    /// Parse the UCI suffix letter (`q`, `r`, `b`, `n`).
    pub fn from_char(c: char) -> Option<PromotionPiece> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }
}

/// A move as the board widget reports it: two squares and a promotion hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: PromotionPiece,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, promotion: PromotionPiece) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Build a request from square names such as `"e2"` and `"e4"`.
    pub fn parse(from: &str, to: &str, promotion: PromotionPiece) -> Result<Self, GameError> {
        let illegal = || GameError::IllegalMove {
            from: from.to_string(),
            to: to.to_string(),
        };
        let from_sq: Square = from.trim().parse().map_err(|_| illegal())?;
        let to_sq: Square = to.trim().parse().map_err(|_| illegal())?;
        Ok(Self::new(from_sq, to_sq, promotion))
    }

    /// Parse a UCI string (`"e2e4"`, `"a7a8n"`). A missing suffix falls back
    /// to `default_promotion`.
    pub fn from_uci(uci: &str, default_promotion: PromotionPiece) -> Result<Self, GameError> {
        let uci = uci.trim();
        let illegal = || GameError::IllegalMove {
            from: uci.get(..2).unwrap_or(uci).to_string(),
            to: uci.get(2..4).unwrap_or_default().to_string(),
        };
        if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
            return Err(illegal());
        }
        let promotion = match uci[4..].chars().next() {
            Some(c) => PromotionPiece::from_char(c).ok_or_else(illegal)?,
            None => default_promotion,
        };
        Self::parse(&uci[..2], &uci[2..4], promotion)
    }
}

/// What actually happened on the board after a move was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub side: Side,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
    pub san: String,
    pub uci: String,
}

impl fmt::Display for AppliedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.san, self.uci)
    }
}

/// Full board state. Never mutated; every transition yields a new value.
///
/// Equality is FEN equality, which includes the move counters. Use
/// [`Position::repetition_key`] to compare positions for repetition.
#[derive(Clone)]
pub struct Position {
    chess: Chess,
    fen: String,
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_chess(Chess::default())
    }

    /// Parse a FEN string. Anything malformed or not a legal setup is
    /// rejected with `InvalidNotation`.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed = Fen::from_ascii(fen.trim().as_bytes())
            .map_err(|e| GameError::InvalidNotation(e.to_string()))?;
        let chess: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::InvalidNotation(e.to_string()))?;
        Ok(Self::from_chess(chess))
    }

    fn from_chess(chess: Chess) -> Self {
        let fen = Fen::from_position(chess.clone(), EnPassantMode::Legal).to_string();
        Self { chess, fen }
    }

    #[inline]
    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// FEN without the halfmove clock and fullmove number.
    pub fn repetition_key(&self) -> &str {
        let mut cut = self.fen.len();
        for (seen, (i, _)) in self.fen.match_indices(' ').enumerate() {
            if seen == 3 {
                cut = i;
                break;
            }
        }
        &self.fen[..cut]
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.chess.turn().into()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.chess.halfmoves()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.chess.legal_moves().into_iter().collect()
    }

    /// Legal moves in UCI notation, castling written as the king's move.
    pub fn legal_moves_uci(&self) -> Vec<String> {
        self.chess
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .collect()
    }

    /// Resolve a widget request against the legal moves of this position.
    ///
    /// Castling is matched by the king's destination square. The promotion
    /// hint only matters when the move is actually a promotion.
    pub fn find_move(&self, request: &MoveRequest) -> Option<Move> {
        let hint = request.promotion.role();
        self.chess.legal_moves().into_iter().find(|m| {
            let squares_match = match m.to_uci(CastlingMode::Standard) {
                UciMove::Normal { from, to, .. } => from == request.from && to == request.to,
                _ => false,
            };
            squares_match && m.promotion().is_none_or(|role| role == hint)
        })
    }

    /// Apply a widget request. Fails without side effects if no legal move
    /// matches.
    pub fn play(&self, request: &MoveRequest) -> Result<(Position, AppliedMove), GameError> {
        let mv = self
            .find_move(request)
            .ok_or_else(|| GameError::IllegalMove {
                from: request.from.to_string(),
                to: request.to.to_string(),
            })?;
        self.play_move(&mv)
    }

    /// Apply a move produced by the rules engine, re-checking legality.
    pub fn play_move(&self, mv: &Move) -> Result<(Position, AppliedMove), GameError> {
        if !self.chess.is_legal(mv) {
            return Err(GameError::IllegalMove {
                from: mv.from().map(|s| s.to_string()).unwrap_or_default(),
                to: mv.to().to_string(),
            });
        }

        let uci = mv.to_uci(CastlingMode::Standard);
        let (from, to) = match &uci {
            UciMove::Normal { from, to, .. } => (*from, *to),
            _ => (mv.from().unwrap_or(mv.to()), mv.to()),
        };
        let applied = AppliedMove {
            side: self.side_to_move(),
            from,
            to,
            promotion: mv.promotion(),
            san: SanPlus::from_move(self.chess.clone(), mv).to_string(),
            uci: uci.to_string(),
        };

        let mut next = self.chess.clone();
        next.play_unchecked(mv);
        Ok((Self::from_chess(next), applied))
    }

    pub fn is_checkmate(&self) -> bool {
        self.chess.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.chess.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.chess.is_insufficient_material()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.chess.halfmoves() >= 100
    }

    /// Draws the engine can see from a single snapshot. Repetition needs the
    /// game record and is handled in `status`.
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.is_insufficient_material() || self.is_fifty_move_draw()
    }

    /// Variant-specific end condition; never set for standard chess.
    pub fn is_variant_end(&self) -> bool {
        self.chess.is_variant_end()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw() || self.is_variant_end()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen == other.fen
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Position").field(&self.fen).finish()
    }
}

impl fmt::Display for Position {
    /// Eight ranks of piece letters, rank 8 first, `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placement = self.fen.split(' ').next().unwrap_or_default();
        for (i, rank) in placement.split('/').enumerate() {
            write!(f, "{} ", 8 - i)?;
            for c in rank.chars() {
                match c.to_digit(10) {
                    Some(n) => {
                        for _ in 0..n {
                            f.write_str(" .")?;
                        }
                    }
                    None => write!(f, " {}", c)?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move())
    }
}
