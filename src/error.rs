use crate::position::Side;

/// Every way a session operation can be refused.
///
/// None of these are faults: the caller decides what feedback to give
/// (snap the dragged piece back, grey out a button, print a message).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Malformed squares, wrong side to move, or a move the rules forbid.
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    #[error("game is already over")]
    GameOver,

    /// A computer reply is pending; the human has to wait for it.
    #[error("waiting for the computer opponent to move")]
    AwaitingOpponent,

    #[error("not enough history to undo")]
    UndoUnavailable,

    #[error("no legal moves for {0}")]
    NoLegalMoves(Side),

    #[error("invalid FEN: {0}")]
    InvalidNotation(String),
}
