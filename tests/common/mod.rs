//! Shared helpers for the integration tests.
#![allow(dead_code)]

use chess_master::config::SessionConfig;
use chess_master::opponent::{MoveSelector, RandomSelector};
use chess_master::session::GameSession;

pub const FOOLS_MATE: &[(&str, &str)] = &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")];

/// Always picks the first candidate.
pub struct FirstMove;

impl MoveSelector for FirstMove {
    fn select(&mut self, count: usize) -> Option<usize> {
        (count > 0).then_some(0)
    }
}

/// Never picks anything.
pub struct Refuse;

impl MoveSelector for Refuse {
    fn select(&mut self, _count: usize) -> Option<usize> {
        None
    }
}

pub fn session(config: SessionConfig) -> GameSession {
    GameSession::with_selector(config, Box::new(FirstMove))
}

pub fn seeded_session(config: SessionConfig, seed: u64) -> GameSession {
    GameSession::with_selector(config, Box::new(RandomSelector::seeded(seed)))
}

pub fn vs_computer() -> SessionConfig {
    SessionConfig {
        opponent_enabled: true,
        ..SessionConfig::default()
    }
}

pub fn play_all(session: &mut GameSession, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        session
            .attempt_move(from, to)
            .unwrap_or_else(|e| panic!("{}{} rejected: {}", from, to, e));
    }
}
