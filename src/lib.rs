//! Trapper Battle Engine
//!
//! A turn-based creature battle system: a trainer's active combatant against
//! a single wild opponent, with attacks, capture devices, restorative items,
//! escape attempts and party switching. All randomness flows through an
//! explicit `TurnRng` so every battle can be replayed from a seed or a script.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod player;
pub mod species;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{CaptureDevice, ElementType, Move, RestorativeItem};

// --- From this crate's modules (`src/`) ---

// Battle session and its state.
pub use battle::engine::BattleSession;
pub use battle::state::{
    ActionReport, BattleEvent, BattleLog, BattleOutcome, BattleSnapshot, Side, TurnRng,
};

// The probabilistic models.
pub use battle::ai::{Behavior, RandomMoveAI};
pub use battle::catch::{attempt_capture, CaptureOutcome, CaptureResult};
pub use battle::damage::{resolve_move, resolve_move_outcome, MoveOutcome};
pub use battle::escape::attempt_escape;

// Runtime types.
pub use combatant::Combatant;
pub use config::BattleConfig;
pub use player::{Player, Trainer, PARTY_LIMIT};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, PersistenceError,
};
