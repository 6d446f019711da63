//! The turn sequencer: one owned game, its history, and the computer reply.
//!
//! Every state transition goes through [`GameSession`]. Time never advances
//! on its own here; callers pass `now` into [`GameSession::maybe_trigger`]
//! and [`GameSession::poll`] and own the real timer.

use shakmaty::Move;
use tracing::{debug, info, instrument, warn};

use crate::Instant;
use crate::config::{SessionConfig, UndoPolicy};
use crate::error::GameError;
use crate::history::History;
use crate::opponent::{MoveSelector, OpponentScheduler, RandomSelector};
use crate::position::{AppliedMove, MoveRequest, Position, Side};
use crate::status::{GameStatus, TerminalReason, position_status};

pub struct GameSession {
    config: SessionConfig,
    start: Position,
    current: Position,
    history: History,
    opponent_pending: bool,
    scheduler: OpponentScheduler,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// New game from the standard position with an OS-seeded opponent.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_selector(config, Box::new(RandomSelector::from_os_rng()))
    }

    pub fn with_selector(config: SessionConfig, selector: Box<dyn MoveSelector>) -> Self {
        let scheduler = OpponentScheduler::new(config.opponent_delay());
        Self {
            config,
            start: Position::startpos(),
            current: Position::startpos(),
            history: History::new(),
            opponent_pending: false,
            scheduler,
            selector,
        }
    }

    // ---- Read accessors ----

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.current
    }

    /// Position the current game started from.
    pub fn start_position(&self) -> &Position {
        &self.start
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn fen(&self) -> &str {
        self.current.fen()
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.current.side_to_move()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.current.legal_moves()
    }

    pub fn opponent_enabled(&self) -> bool {
        self.config.opponent_enabled
    }

    /// A computer reply is owed (set by a human move, cleared when consumed).
    pub fn opponent_pending(&self) -> bool {
        self.opponent_pending
    }

    pub fn opponent_due(&self) -> Option<Instant> {
        self.scheduler.due()
    }

    /// Occurrences of the current repetition key in the start position plus
    /// the history. The current position is always the newest history entry,
    /// or the start position when the history is empty, so it is counted.
    pub fn repetitions(&self) -> usize {
        let key = self.current.repetition_key();
        usize::from(self.start.repetition_key() == key) + self.history.count_key(key)
    }

    pub fn status(&self) -> GameStatus {
        position_status(&self.current, self.repetitions())
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        self.status().terminal_reason()
    }

    pub fn can_undo(&self) -> bool {
        match self.config.undo {
            UndoPolicy::Repeat => self.history.len() > 1,
            UndoPolicy::Takeback => !self.history.is_empty(),
        }
    }

    // ---- Moves ----

    /// Human move from widget square names, using the configured promotion.
    pub fn attempt_move(&mut self, from: &str, to: &str) -> Result<AppliedMove, GameError> {
        let request = MoveRequest::parse(from, to, self.config.promotion)?;
        self.attempt(request)
    }

    /// Human move. On success, arms the computer reply when opponent mode is on.
    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to))]
    pub fn attempt(&mut self, request: MoveRequest) -> Result<AppliedMove, GameError> {
        self.check_human_turn()?;
        let applied = self.apply(&request)?;
        self.arm_opponent();
        Ok(applied)
    }

    /// Play a uniformly selected legal move on the human's behalf. Same turn
    /// rules as [`GameSession::attempt`], including arming the reply.
    #[instrument(skip(self))]
    pub fn random_move(&mut self) -> Result<AppliedMove, GameError> {
        self.check_human_turn()?;
        let applied = self.play_random()?;
        self.arm_opponent();
        Ok(applied)
    }

    fn check_human_turn(&self) -> Result<(), GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.opponent_pending || self.scheduler.is_scheduled() {
            debug!("rejected: opponent to move");
            return Err(GameError::AwaitingOpponent);
        }
        Ok(())
    }

    fn arm_opponent(&mut self) {
        if self.config.opponent_enabled {
            self.opponent_pending = true;
            debug!("opponent reply pending");
        }
    }

    fn play_random(&mut self) -> Result<AppliedMove, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        let moves = self.current.legal_moves();
        let side = self.side_to_move();
        let idx = self
            .selector
            .select(moves.len())
            .ok_or(GameError::NoLegalMoves(side))?;
        let mv = moves.get(idx).ok_or(GameError::NoLegalMoves(side))?;
        let (next, applied) = self.current.play_move(mv)?;
        self.commit(next, &applied);
        Ok(applied)
    }

    fn apply(&mut self, request: &MoveRequest) -> Result<AppliedMove, GameError> {
        if self.is_terminal() {
            debug!("rejected: game over");
            return Err(GameError::GameOver);
        }
        let (next, applied) = self.current.play(request).inspect_err(|e| debug!(%e, "rejected"))?;
        self.commit(next, &applied);
        Ok(applied)
    }

    fn commit(&mut self, next: Position, applied: &AppliedMove) {
        self.history.push(next.clone());
        self.current = next;
        info!(side = %applied.side, mv = %applied.san, ply = self.history.len(), "move applied");
        if let GameStatus::Over(reason) = self.status() {
            info!(?reason, "game over");
        }
    }

    // ---- Undo / reset ----

    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), GameError> {
        if !self.can_undo() {
            debug!(policy = ?self.config.undo, len = self.history.len(), "undo unavailable");
            return Err(GameError::UndoUnavailable);
        }
        let target = match self.history.back(1) {
            Some(p) => p.clone(),
            // Takeback with a single entry goes back to where the game began.
            None => self.start.clone(),
        };
        self.history.pop();
        self.current = target;
        self.cancel_opponent();
        info!(len = self.history.len(), "undo");
        Ok(())
    }

    /// Back to the standard start position with an empty history.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.restart(Position::startpos());
        info!("reset");
    }

    pub fn new_game(&mut self) {
        self.reset();
    }

    /// Start over from a FEN position. Leaves everything untouched if the
    /// string does not parse.
    #[instrument(skip(self))]
    pub fn load_fen(&mut self, fen: &str) -> Result<(), GameError> {
        let position = Position::from_fen(fen).inspect_err(|e| warn!(%e, "load rejected"))?;
        self.restart(position);
        info!(fen = self.current.fen(), "position loaded");
        Ok(())
    }

    fn restart(&mut self, position: Position) {
        self.start = position.clone();
        self.current = position;
        self.history.clear();
        self.cancel_opponent();
    }

    // ---- Computer opponent ----

    pub fn set_opponent_enabled(&mut self, enabled: bool) {
        if self.config.opponent_enabled == enabled {
            return;
        }
        self.config.opponent_enabled = enabled;
        if !enabled {
            self.cancel_opponent();
        }
        info!(enabled, "opponent mode changed");
    }

    /// Schedule the computer reply if one is owed. Returns when it is due.
    pub fn maybe_trigger(&mut self, now: Instant) -> Option<Instant> {
        if !self.config.opponent_enabled || !self.opponent_pending {
            return None;
        }
        if self.is_terminal() {
            return None;
        }
        let was_scheduled = self.scheduler.is_scheduled();
        let due = self.scheduler.schedule(now);
        if !was_scheduled {
            debug!(delay_ms = self.scheduler.delay().as_millis() as u64, "opponent reply scheduled");
        }
        Some(due)
    }

    /// Fire the computer reply if it is due at `now`.
    ///
    /// Legality is derived from the live position at this moment. The
    /// pending flag is cleared whether or not a move was played.
    #[instrument(skip(self, now))]
    pub fn poll(&mut self, now: Instant) -> Option<AppliedMove> {
        if !self.scheduler.take_due(now) {
            return None;
        }
        let owed = self.config.opponent_enabled && self.opponent_pending;
        self.opponent_pending = false;
        if !owed {
            return None;
        }

        match self.play_random() {
            Ok(applied) => Some(applied),
            Err(e) => {
                debug!(%e, "opponent did not move");
                None
            }
        }
    }

    fn cancel_opponent(&mut self) {
        if self.scheduler.cancel() {
            debug!("scheduled opponent reply cancelled");
        }
        self.opponent_pending = false;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
