//! A module for defining AI behaviors for the opposing combatant.

use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use tracing::debug;

/// A trait for any system that can pick the opponent's move.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior {
    /// Returns the index of the move to use, or `None` to forfeit the turn.
    fn choose_move(&self, combatant: &Combatant, rng: &mut TurnRng) -> Option<usize>;
}

/// Picks uniformly among the combatant's moves. A combatant with no moves
/// forfeits silently and consumes no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMoveAI;

impl RandomMoveAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomMoveAI {
    fn choose_move(&self, combatant: &Combatant, rng: &mut TurnRng) -> Option<usize> {
        if combatant.moves.is_empty() {
            debug!(combatant = %combatant.name, "no moves, forfeiting turn");
            return None;
        }
        let count = u32::try_from(combatant.moves.len()).unwrap_or(u32::MAX);
        let index = rng.next_below(count, "opponent move choice") as usize;
        Some(index)
    }
}
