pub mod config;
pub mod error;
pub mod history;
#[cfg(feature = "cli")]
pub mod logger;
pub mod opponent;
pub mod position;
pub mod session;
pub mod status;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

pub use config::{SessionConfig, UndoPolicy};
pub use error::GameError;
pub use history::History;
pub use opponent::{MoveSelector, OpponentScheduler, RandomSelector};
pub use position::{AppliedMove, MoveRequest, Position, PromotionPiece, Side};
pub use session::GameSession;
pub use status::{DrawReason, GameStatus, TerminalReason};
