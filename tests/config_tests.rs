//! tests/config_tests.rs
use std::time::Duration;

use chess_master::config::{ConfigError, SessionConfig, UndoPolicy};
use chess_master::position::PromotionPiece;

#[test]
fn empty_document_gives_defaults() {
    let cfg = SessionConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, SessionConfig::default());
    assert!(!cfg.opponent_enabled);
    assert_eq!(cfg.opponent_delay(), Duration::from_millis(500));
    assert_eq!(cfg.promotion, PromotionPiece::Queen);
    assert_eq!(cfg.undo, UndoPolicy::Repeat);
}

#[test]
fn partial_document_fills_in_the_rest() {
    let cfg = SessionConfig::from_toml_str(
        r#"
        opponent_enabled = true
        undo = "takeback"
        "#,
    )
    .unwrap();
    assert!(cfg.opponent_enabled);
    assert_eq!(cfg.undo, UndoPolicy::Takeback);
    assert_eq!(cfg.opponent_delay_ms, 500);
    assert_eq!(cfg.promotion, PromotionPiece::Queen);
}

#[test]
fn written_config_reads_back() {
    let cfg = SessionConfig {
        opponent_enabled: true,
        opponent_delay_ms: 250,
        promotion: PromotionPiece::Rook,
        undo: UndoPolicy::Takeback,
    };
    let text = cfg.to_toml_string().unwrap();
    assert!(text.contains("promotion = \"rook\""), "{}", text);
    assert_eq!(SessionConfig::from_toml_str(&text).unwrap(), cfg);
}

#[test]
fn unknown_values_are_rejected() {
    let err = SessionConfig::from_toml_str(r#"promotion = "king""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = SessionConfig::from_toml_str("opponent_delay_ms = -5").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SessionConfig::load("definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn load_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("chess_master_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.toml");
    std::fs::write(&path, "opponent_delay_ms = 10\npromotion = \"bishop\"\n").unwrap();

    let cfg = SessionConfig::load(&path).unwrap();
    assert_eq!(cfg.opponent_delay_ms, 10);
    assert_eq!(cfg.promotion, PromotionPiece::Bishop);

    let _ = std::fs::remove_dir_all(&dir);
}
