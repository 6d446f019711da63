//! tests/session_tests.rs
//! Turn sequencing: accepted/rejected moves, history bookkeeping, reset, load.
mod common;

use chess_master::config::SessionConfig;
use chess_master::error::GameError;
use chess_master::position::{Position, PromotionPiece, START_FEN, Side};
use chess_master::status::{DrawReason, TerminalReason};
use common::{FOOLS_MATE, play_all, seeded_session, session};
use shakmaty::Role;

#[test]
fn starts_from_standard_position() {
    let s = session(SessionConfig::default());
    assert_eq!(s.fen(), START_FEN);
    assert_eq!(s.side_to_move(), Side::White);
    assert!(s.history().is_empty());
    assert!(!s.is_terminal());
    assert_eq!(s.legal_moves().len(), 20);
}

#[test]
fn accepted_moves_alternate_sides_and_grow_history() {
    let mut s = session(SessionConfig::default());
    let line = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "b5")];

    for (ply, (from, to)) in line.iter().enumerate() {
        let mover = s.side_to_move();
        let applied = s.attempt_move(from, to).expect("legal move");
        assert_eq!(applied.side, mover);
        assert_eq!(s.side_to_move(), mover.opposite());
        assert_eq!(s.history().len(), ply + 1);
        assert_eq!(s.history().last(), Some(s.position()));
    }
}

#[test]
fn first_move_e2e4() {
    let mut s = session(SessionConfig::default());
    let applied = s.attempt_move("e2", "e4").unwrap();

    assert_eq!(applied.uci, "e2e4");
    assert_eq!(applied.san, "e4");
    assert_eq!(s.side_to_move(), Side::Black);
    assert_eq!(s.history().len(), 1);
    assert_eq!(
        s.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn illegal_moves_leave_state_untouched() {
    let mut s = session(SessionConfig::default());
    s.attempt_move("e2", "e4").unwrap();
    let before = s.position().clone();
    let history_before = s.history().clone();

    let cases = [
        ("e4", "e6"), // pawn can't jump
        ("d2", "d4"), // wrong side
        ("e8", "e7"), // own pawn in the way
        ("z9", "e5"), // malformed
        ("e7", ""),   // malformed
        ("e7e5", "x"),
    ];
    for (from, to) in cases {
        let err = s.attempt_move(from, to).unwrap_err();
        assert!(
            matches!(err, GameError::IllegalMove { .. }),
            "{}->{} gave {:?}",
            from,
            to,
            err
        );
        assert_eq!(s.position(), &before);
        assert_eq!(s.history(), &history_before);
    }
}

#[test]
fn fools_mate_is_checkmate_for_black() {
    let mut s = session(SessionConfig::default());
    play_all(&mut s, FOOLS_MATE);

    assert!(s.is_terminal());
    assert!(s.position().is_checkmate());
    assert_eq!(
        s.terminal_reason(),
        Some(TerminalReason::Checkmate {
            winner: Side::Black
        })
    );
    assert_eq!(s.status().to_string(), "Game Over! Black wins by checkmate!");
}

#[test]
fn moves_after_game_over_are_rejected() {
    let mut s = session(SessionConfig::default());
    play_all(&mut s, FOOLS_MATE);
    let before = s.position().clone();

    assert_eq!(s.attempt_move("e1", "f2"), Err(GameError::GameOver));
    assert_eq!(s.random_move(), Err(GameError::GameOver));
    assert_eq!(s.position(), &before);
    assert_eq!(s.history().len(), 4);
}

#[test]
fn reset_from_terminal_state_restarts_game() {
    let mut s = session(SessionConfig::default());
    play_all(&mut s, FOOLS_MATE);
    assert!(s.is_terminal());

    s.reset();
    assert_eq!(s.fen(), START_FEN);
    assert!(s.history().is_empty());
    assert!(!s.is_terminal());
    assert_eq!(s.status().to_string(), "White to move");

    s.attempt_move("d2", "d4").unwrap();
    s.new_game();
    assert_eq!(s.fen(), START_FEN);
    assert!(s.history().is_empty());
}

#[test]
fn promotion_defaults_to_queen() {
    let mut s = session(SessionConfig::default());
    s.load_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();

    let applied = s.attempt_move("a7", "a8").unwrap();
    assert_eq!(applied.promotion, Some(Role::Queen));
    assert!(s.fen().starts_with("Q3k3/"), "got {}", s.fen());
}

#[test]
fn promotion_piece_is_configurable() {
    let config = SessionConfig {
        promotion: PromotionPiece::Knight,
        ..SessionConfig::default()
    };
    let mut s = session(config);
    s.load_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();

    let applied = s.attempt_move("a7", "a8").unwrap();
    assert_eq!(applied.promotion, Some(Role::Knight));
    assert_eq!(applied.uci, "a7a8n");
    assert!(s.fen().starts_with("N3k3/"), "got {}", s.fen());
}

#[test]
fn castling_is_given_as_king_move() {
    let mut s = session(SessionConfig::default());
    s.load_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let applied = s.attempt_move("e1", "g1").unwrap();
    assert_eq!(applied.uci, "e1g1");
    assert_eq!(applied.san, "O-O");
    assert!(
        s.fen().starts_with("r3k2r/8/8/8/8/8/8/R4RK1 b kq"),
        "got {}",
        s.fen()
    );
}

#[test]
fn load_fen_fails_closed() {
    let mut s = session(SessionConfig::default());
    s.attempt_move("e2", "e4").unwrap();
    let before = s.position().clone();

    for bad in ["", "not a fen", "8/8/8/8 w - - 0 1", "4k3/8/8/8/8/8/8/8 w - - 0 1"] {
        let err = s.load_fen(bad).unwrap_err();
        assert!(matches!(err, GameError::InvalidNotation(_)), "{:?}", err);
        assert_eq!(s.position(), &before);
        assert_eq!(s.history().len(), 1);
    }
}

#[test]
fn load_fen_starts_a_fresh_game() {
    let mut s = session(SessionConfig::default());
    s.attempt_move("e2", "e4").unwrap();

    let fen = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 1";
    s.load_fen(fen).unwrap();
    assert_eq!(s.fen(), fen);
    assert_eq!(s.start_position(), &Position::from_fen(fen).unwrap());
    assert!(s.history().is_empty());
    assert_eq!(s.side_to_move(), Side::Black);
}

#[test]
fn random_move_plays_a_legal_move() {
    let mut s = seeded_session(SessionConfig::default(), 7);
    let legal = s.position().legal_moves_uci();

    let applied = s.random_move().unwrap();
    assert!(legal.contains(&applied.uci), "{} not legal", applied.uci);
    assert_eq!(applied.side, Side::White);
    assert_eq!(s.history().len(), 1);
    assert!(!s.opponent_pending());
}

#[test]
fn random_move_refused_by_selector_reports_no_legal_moves() {
    let mut s = chess_master::GameSession::with_selector(
        SessionConfig::default(),
        Box::new(common::Refuse),
    );
    assert_eq!(s.random_move(), Err(GameError::NoLegalMoves(Side::White)));
    assert!(s.history().is_empty());
}

#[test]
fn seeded_random_games_are_reproducible() {
    let mut a = seeded_session(SessionConfig::default(), 42);
    let mut b = seeded_session(SessionConfig::default(), 42);
    for _ in 0..12 {
        if a.is_terminal() {
            break;
        }
        assert_eq!(a.random_move().unwrap(), b.random_move().unwrap());
    }
    assert_eq!(a.fen(), b.fen());
}

#[test]
fn random_games_keep_turn_and_history_invariants() {
    for seed in 0..8 {
        let mut s = seeded_session(SessionConfig::default(), seed);
        let mut plies = 0;
        while !s.is_terminal() && plies < 80 {
            let mover = s.side_to_move();
            let applied = s.random_move().unwrap();
            plies += 1;
            assert_eq!(applied.side, mover);
            assert_eq!(s.side_to_move(), mover.opposite());
            assert_eq!(s.history().len(), plies);
        }
    }
}

#[test]
fn stalemate_by_move_is_a_draw() {
    let mut s = session(SessionConfig::default());
    s.load_fen("k7/8/8/1Q6/8/8/8/1K6 w - - 0 1").unwrap();
    s.attempt_move("b5", "b6").unwrap();

    assert_eq!(
        s.terminal_reason(),
        Some(TerminalReason::Draw(DrawReason::Stalemate))
    );
    assert_eq!(s.status().to_string(), "Game Over! The game is a draw.");
}
