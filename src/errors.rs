use crate::battle::state::BattleOutcome;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Trapper battle engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleEngineError {
    /// A player action was rejected before it could take effect
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// The engine reached a state its invariants rule out
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Battle configuration could not be read
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Player data could not be saved or restored
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors related to player actions.
///
/// The messages double as the narration appended to the battle log when an
/// action is rejected, so they read as player-facing text.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ActionError {
    /// The battle already reached a terminal outcome
    #[error("The battle is already over ({0}).")]
    BattleOver(BattleOutcome),
    /// Move index is out of bounds
    #[error("Invalid move! (slot {index}, {available} known)")]
    InvalidMoveIndex { index: usize, available: usize },
    /// Party index is out of bounds
    #[error("There is no creature in party slot {0}!")]
    InvalidCombatantIndex(usize),
    /// The requested replacement cannot battle
    #[error("{0} has fainted and can't battle!")]
    CombatantFainted(String),
    /// The name is not in the capture device catalog
    #[error("{0} is not a trap!")]
    UnknownCaptureDevice(String),
    /// The name is not in the restorative item catalog
    #[error("{0} can't be used here!")]
    UnknownRestorative(String),
    /// The trainer holds no units of the named consumable
    #[error("You don't have any {0}!")]
    OutOfStock(String),
}

/// Errors related to battle state validation. These indicate a defect, not a
/// recoverable player mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleStateError {
    /// A capture target with zero max health reached the capture model
    #[error("{0} has zero max health")]
    ZeroMaxHealth(String),
    /// The capture rate came out non-positive
    #[error("Non-positive catch rate: {0}")]
    NonPositiveCatchRate(f64),
    /// The escape model was asked to divide by a zero opponent speed
    #[error("{0} has zero speed")]
    ZeroOpponentSpeed(String),
    /// The trainer has no combatant able to start a battle
    #[error("No usable combatant in the party")]
    NoUsableCombatant,
    /// A combatant was constructed with stats outside their valid ranges
    #[error("Invalid combatant: {0}")]
    InvalidCombatant(String),
}

/// Errors raised while loading a `BattleConfig`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Errors raised while saving or loading player data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize player: {0}")]
    Serialize(String),
    #[error("Failed to deserialize player: {0}")]
    Deserialize(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;
