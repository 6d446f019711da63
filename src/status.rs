use std::fmt;

use crate::position::{Position, Side};

/// Why a drawn game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMove,
    Threefold,
}

/// Terminal classification of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    /// `winner` is the side that delivered mate (the side NOT to move).
    Checkmate { winner: Side },
    Draw(DrawReason),
    /// Game ended by a rule outside checkmate/draw.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay { to_move: Side },
    Over(TerminalReason),
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Over(_))
    }

    pub fn terminal_reason(self) -> Option<TerminalReason> {
        match self {
            GameStatus::Over(reason) => Some(reason),
            GameStatus::InPlay { .. } => None,
        }
    }
}

impl fmt::Display for GameStatus {
    /// The status line shown under the board.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InPlay { to_move } => write!(f, "{} to move", to_move),
            GameStatus::Over(TerminalReason::Checkmate { winner }) => {
                write!(f, "Game Over! {} wins by checkmate!", winner)
            }
            GameStatus::Over(TerminalReason::Draw(_)) => f.write_str("Game Over! The game is a draw."),
            GameStatus::Over(TerminalReason::Other) => f.write_str("Game Over! The game is over."),
        }
    }
}

pub fn is_draw_by_threefold(repetitions: usize) -> bool {
    repetitions >= 3
}

/// Classify `pos`, given how many times its repetition key has occurred in
/// the game so far (the current occurrence included).
///
/// Priority (highest → lowest):
///  1) `Checkmate`
///  2) `Stalemate`
///  3) `InsufficientMaterial`
///  4) `FiftyMove`            (halfmove clock ≥ 100)
///  5) `Threefold`
///  6) `Other` / `InPlay`
pub fn position_status(pos: &Position, repetitions: usize) -> GameStatus {
    if pos.is_checkmate() {
        return GameStatus::Over(TerminalReason::Checkmate {
            winner: pos.side_to_move().opposite(),
        });
    }
    if pos.is_stalemate() {
        return GameStatus::Over(TerminalReason::Draw(DrawReason::Stalemate));
    }
    if pos.is_insufficient_material() {
        return GameStatus::Over(TerminalReason::Draw(DrawReason::InsufficientMaterial));
    }
    if pos.is_fifty_move_draw() {
        return GameStatus::Over(TerminalReason::Draw(DrawReason::FiftyMove));
    }
    if is_draw_by_threefold(repetitions) {
        return GameStatus::Over(TerminalReason::Draw(DrawReason::Threefold));
    }
    if pos.is_variant_end() {
        return GameStatus::Over(TerminalReason::Other);
    }
    GameStatus::InPlay {
        to_move: pos.side_to_move(),
    }
}
