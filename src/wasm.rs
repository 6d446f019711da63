use wasm_bindgen::prelude::*;

use crate::Instant;
use crate::config::SessionConfig;
use crate::session::GameSession;

/// Browser-facing game handle. The page renders `fen()` with its board
/// widget and forwards drops to `on_piece_drop`.
#[wasm_bindgen]
pub struct ChessGame {
    session: GameSession,
}

#[wasm_bindgen]
impl ChessGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChessGame {
        console_error_panic_hook::set_once();

        ChessGame {
            session: GameSession::new(SessionConfig::default()),
        }
    }

    /// Build from a TOML config string. Throws on the JS side if it does
    /// not parse.
    pub fn with_config(toml: &str) -> Result<ChessGame, JsError> {
        console_error_panic_hook::set_once();

        let config = SessionConfig::from_toml_str(toml).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ChessGame {
            session: GameSession::new(config),
        })
    }

    /// Current position as FEN. The widget re-renders when this changes.
    pub fn fen(&self) -> String {
        self.session.fen().to_string()
    }

    /// Drop handler. Returns false to snap the piece back.
    pub fn on_piece_drop(&mut self, from: &str, to: &str) -> bool {
        self.session.attempt_move(from, to).is_ok()
    }

    /// Schedule the computer reply if one is owed. Returns milliseconds until
    /// `poll_opponent` should be called.
    pub fn schedule_opponent(&mut self) -> Option<u32> {
        let now = Instant::now();
        self.session
            .maybe_trigger(now)
            .map(|due| u32::try_from(due.saturating_duration_since(now).as_millis()).unwrap_or(u32::MAX))
    }

    /// Play the computer reply if it is due. Returns true if the board changed.
    pub fn poll_opponent(&mut self) -> bool {
        self.session.poll(Instant::now()).is_some()
    }

    pub fn set_computer_opponent(&mut self, enabled: bool) {
        self.session.set_opponent_enabled(enabled);
    }

    pub fn computer_opponent(&self) -> bool {
        self.session.opponent_enabled()
    }

    /// "Player vs Computer" or "Player vs Player".
    pub fn mode_label(&self) -> String {
        if self.session.opponent_enabled() {
            "Player vs Computer".to_string()
        } else {
            "Player vs Player".to_string()
        }
    }

    pub fn repeat_move(&mut self) -> bool {
        self.session.undo().is_ok()
    }

    pub fn can_repeat(&self) -> bool {
        self.session.can_undo()
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn new_game(&mut self) {
        self.session.new_game();
    }

    /// Replace the game with a FEN position. Returns true on success.
    pub fn load_fen(&mut self, fen: &str) -> bool {
        self.session.load_fen(fen).is_ok()
    }

    pub fn status_text(&self) -> String {
        self.session.status().to_string()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_terminal()
    }

    /// Whose turn it is: "white" or "black"
    pub fn side_to_move(&self) -> String {
        self.session.side_to_move().to_string().to_lowercase()
    }

    pub fn history_len(&self) -> usize {
        self.session.history().len()
    }

    /// Legal moves for a specific square (e.g., "e2")
    /// Returns JSON array: ["e2e4", "e2e3"] or empty array
    pub fn legal_moves_for_square(&self, square: &str) -> String {
        let square = square.trim();
        if square.len() != 2 {
            return "[]".to_string();
        }

        let moves: Vec<String> = self
            .session
            .position()
            .legal_moves_uci()
            .into_iter()
            .filter(|m| m.starts_with(square))
            .map(|m| format!("\"{}\"", m))
            .collect();

        format!("[{}]", moves.join(","))
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}
