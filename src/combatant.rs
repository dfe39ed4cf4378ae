use crate::errors::{BattleEngineError, BattleResult, BattleStateError};
use schema::{ElementType, Move};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One creature's battle-relevant stats and current vitality.
///
/// Identity and stats are plain fields. Health is private so that
/// `0 <= current_health <= max_health` holds for every value reachable through
/// the public API; it only moves through `apply_damage` and `heal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CombatantRecord")]
pub struct Combatant {
    pub name: String,
    pub element: ElementType,
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub moves: Vec<Move>,
    max_health: u32,
    current_health: u32,
}

impl Combatant {
    /// Create a combatant at full health.
    ///
    /// Level and max health must be positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        element: ElementType,
        level: u32,
        max_health: u32,
        attack: u32,
        defense: u32,
        speed: u32,
        moves: Vec<Move>,
    ) -> BattleResult<Self> {
        let name = name.into();
        if level == 0 {
            return Err(BattleStateError::InvalidCombatant(format!("{} has level 0", name)).into());
        }
        if max_health == 0 {
            return Err(BattleStateError::InvalidCombatant(format!(
                "{} has zero max health",
                name
            ))
            .into());
        }

        Ok(Combatant {
            name,
            element,
            level,
            attack,
            defense,
            speed,
            moves,
            max_health,
            current_health: max_health,
        })
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn is_fainted(&self) -> bool {
        self.current_health == 0
    }

    /// Deal damage, clamping at zero. Returns true if this damage caused fainting.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        let was_fainted = self.is_fainted();
        self.current_health = self.current_health.saturating_sub(amount);
        !was_fainted && self.is_fainted()
    }

    /// Restore health, clamping at max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_add(amount).min(self.max_health);
        self.current_health - before
    }

    /// Restore to max health.
    pub fn full_heal(&mut self) {
        self.current_health = self.max_health;
    }

    /// Set HP directly, clamped to the valid range.
    pub fn set_health(&mut self, health: u32) {
        self.current_health = health.min(self.max_health);
    }

    /// Raw health values, bypassing validation. Lets tests reach the
    /// probability models' state-error paths.
    #[cfg(test)]
    pub(crate) fn new_for_test(name: &str, max_health: u32, current_health: u32) -> Self {
        Combatant {
            name: name.to_string(),
            element: ElementType::Normal,
            level: 3,
            attack: 1,
            defense: 1,
            speed: 1,
            moves: Vec::new(),
            max_health,
            current_health,
        }
    }
}

/// Serialized shape of a `Combatant`. Loading goes through `Combatant::new`
/// so saved data is held to the same health bounds as fresh combatants.
#[derive(Deserialize)]
struct CombatantRecord {
    name: String,
    element: ElementType,
    level: u32,
    attack: u32,
    defense: u32,
    speed: u32,
    moves: Vec<Move>,
    max_health: u32,
    current_health: u32,
}

impl TryFrom<CombatantRecord> for Combatant {
    type Error = BattleStateError;

    fn try_from(record: CombatantRecord) -> Result<Self, Self::Error> {
        if record.current_health > record.max_health {
            return Err(BattleStateError::InvalidCombatant(format!(
                "{} has {} health but a maximum of {}",
                record.name, record.current_health, record.max_health
            )));
        }
        let current_health = record.current_health;
        let mut combatant = Combatant::new(
            record.name,
            record.element,
            record.level,
            record.max_health,
            record.attack,
            record.defense,
            record.speed,
            record.moves,
        )
        .map_err(|e| match e {
            BattleEngineError::BattleState(state) => state,
            other => BattleStateError::InvalidCombatant(other.to_string()),
        })?;
        combatant.set_health(current_health);
        Ok(combatant)
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv.{}) - HP: {}/{}",
            self.name, self.level, self.current_health, self.max_health
        )
    }
}
