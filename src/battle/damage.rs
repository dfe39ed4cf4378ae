use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use schema::{ElementType, Move};
use tracing::debug;

/// What a single move did to its target.
///
/// Older callers saw a bare integer where 0 meant either "missed" or "no
/// effect"; the two are kept apart here and only collapsed by `damage()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Hit { damage: u32, effectiveness: f32 },
    Missed,
    Immune,
}

impl MoveOutcome {
    /// Damage to apply to the defender; 0 for misses and immunities.
    pub fn damage(&self) -> u32 {
        match self {
            MoveOutcome::Hit { damage, .. } => *damage,
            MoveOutcome::Missed | MoveOutcome::Immune => 0,
        }
    }
}

/// Roll the accuracy check for a move. Returns true if the move hits.
pub fn move_hits(move_: &Move, rng: &mut TurnRng) -> bool {
    let roll = rng.next_fraction("accuracy check");
    roll < move_.accuracy
}

/// Damage before type effectiveness:
/// `((2 * level / 5 + 2) * power * attack / defense) / 50 + 2`, truncated.
pub fn base_damage(move_: &Move, attacker: &Combatant, defender: &Combatant) -> u32 {
    let level = f64::from(attacker.level);
    let power = f64::from(move_.power);
    let attack = f64::from(attacker.attack);
    // A zero-defense defender is treated as defense 1 rather than dividing by zero.
    let defense = f64::from(defender.defense.max(1));

    let damage = ((2.0 * level / 5.0 + 2.0) * power * attack / defense) / 50.0 + 2.0;
    damage as u32
}

/// Resolve a move against a defender without mutating either side.
pub fn resolve_move_outcome(
    move_: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut TurnRng,
) -> MoveOutcome {
    if !move_hits(move_, rng) {
        debug!(attacker = %attacker.name, move_name = %move_.name, "move missed");
        return MoveOutcome::Missed;
    }

    let effectiveness = ElementType::type_effectiveness(move_.element, defender.element);
    if effectiveness == 0.0 {
        debug!(attacker = %attacker.name, move_name = %move_.name, "defender is immune");
        return MoveOutcome::Immune;
    }

    let base = base_damage(move_, attacker, defender);
    let damage = (f64::from(base) * f64::from(effectiveness)) as u32;
    debug!(
        attacker = %attacker.name,
        move_name = %move_.name,
        base,
        effectiveness,
        damage,
        "move hit"
    );
    MoveOutcome::Hit {
        damage,
        effectiveness,
    }
}

/// Legacy-shaped resolution: the damage to apply, with 0 standing for both a
/// miss and an immunity.
pub fn resolve_move(
    move_: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut TurnRng,
) -> u32 {
    resolve_move_outcome(move_, attacker, defender, rng).damage()
}
