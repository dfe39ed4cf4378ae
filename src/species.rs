//! Static creature templates and wild-opponent generation.

use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use crate::errors::BattleResult;
use schema::{ElementType, Move};
use std::fmt;
use tracing::debug;

/// Compile-time description of a move; turned into a `Move` on instantiation.
#[derive(Debug, Clone, Copy)]
pub struct MoveTemplate {
    pub name: &'static str,
    pub element: ElementType,
    pub power: u32,
    pub accuracy: f64,
}

impl MoveTemplate {
    pub fn to_move(&self) -> Move {
        Move::new(self.name, self.element, self.power, self.accuracy)
    }
}

/// Base stats for one kind of creature.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesTemplate {
    pub name: &'static str,
    pub element: ElementType,
    pub level: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub moves: &'static [MoveTemplate],
}

/// Levels a wild creature may gain over its template, drawn from `[0, WILD_LEVEL_SPREAD)`.
pub const WILD_LEVEL_SPREAD: u32 = 3;

impl SpeciesTemplate {
    /// A fresh, full-health combatant at the template level.
    pub fn instantiate(&self) -> BattleResult<Combatant> {
        self.instantiate_with_bonus(0)
    }

    /// Each bonus level adds 2 max health and 1 to every other stat.
    pub fn instantiate_with_bonus(&self, bonus_levels: u32) -> BattleResult<Combatant> {
        Combatant::new(
            self.name,
            self.element,
            self.level + bonus_levels,
            self.max_health + 2 * bonus_levels,
            self.attack + bonus_levels,
            self.defense + bonus_levels,
            self.speed + bonus_levels,
            self.moves.iter().map(MoveTemplate::to_move).collect(),
        )
    }
}

impl fmt::Display for SpeciesTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - HP={}, ATK={}, DEF={}, SPD={}",
            self.name, self.element, self.max_health, self.attack, self.defense, self.speed
        )
    }
}

const TACKLE: MoveTemplate = MoveTemplate {
    name: "Tackle",
    element: ElementType::Normal,
    power: 40,
    accuracy: 1.0,
};

const QUICK_STRIKE: MoveTemplate = MoveTemplate {
    name: "Quick Strike",
    element: ElementType::Normal,
    power: 30,
    accuracy: 1.0,
};

pub static STARTERS: [SpeciesTemplate; 3] = [
    SpeciesTemplate {
        name: "Flamepup",
        element: ElementType::Fire,
        level: 5,
        max_health: 40,
        attack: 14,
        defense: 10,
        speed: 13,
        moves: &[
            TACKLE,
            MoveTemplate {
                name: "Ember",
                element: ElementType::Fire,
                power: 50,
                accuracy: 0.95,
            },
        ],
    },
    SpeciesTemplate {
        name: "Leafsprout",
        element: ElementType::Grass,
        level: 5,
        max_health: 45,
        attack: 12,
        defense: 13,
        speed: 10,
        moves: &[
            TACKLE,
            MoveTemplate {
                name: "Vine Whip",
                element: ElementType::Grass,
                power: 45,
                accuracy: 1.0,
            },
        ],
    },
    SpeciesTemplate {
        name: "Aquatail",
        element: ElementType::Water,
        level: 5,
        max_health: 42,
        attack: 12,
        defense: 12,
        speed: 11,
        moves: &[
            TACKLE,
            MoveTemplate {
                name: "Water Gun",
                element: ElementType::Water,
                power: 45,
                accuracy: 1.0,
            },
        ],
    },
];

pub static WILD_POOL: [SpeciesTemplate; 5] = [
    SpeciesTemplate {
        name: "Pebblit",
        element: ElementType::Rock,
        level: 3,
        max_health: 30,
        attack: 10,
        defense: 15,
        speed: 5,
        moves: &[
            TACKLE,
            MoveTemplate {
                name: "Rock Throw",
                element: ElementType::Rock,
                power: 50,
                accuracy: 0.9,
            },
        ],
    },
    SpeciesTemplate {
        name: "Zapling",
        element: ElementType::Electric,
        level: 4,
        max_health: 28,
        attack: 12,
        defense: 8,
        speed: 16,
        moves: &[
            QUICK_STRIKE,
            MoveTemplate {
                name: "Spark",
                element: ElementType::Electric,
                power: 45,
                accuracy: 1.0,
            },
        ],
    },
    SpeciesTemplate {
        name: "Burrowmole",
        element: ElementType::Ground,
        level: 4,
        max_health: 34,
        attack: 13,
        defense: 11,
        speed: 7,
        moves: &[
            TACKLE,
            MoveTemplate {
                name: "Mud Slap",
                element: ElementType::Ground,
                power: 40,
                accuracy: 1.0,
            },
        ],
    },
    SpeciesTemplate {
        name: "Breezling",
        element: ElementType::Flying,
        level: 3,
        max_health: 26,
        attack: 11,
        defense: 9,
        speed: 15,
        moves: &[
            QUICK_STRIKE,
            MoveTemplate {
                name: "Gust",
                element: ElementType::Flying,
                power: 40,
                accuracy: 1.0,
            },
        ],
    },
    SpeciesTemplate {
        name: "Scruffkit",
        element: ElementType::Normal,
        level: 2,
        max_health: 25,
        attack: 9,
        defense: 8,
        speed: 12,
        moves: &[TACKLE, QUICK_STRIKE],
    },
];

/// Look up a starter template by name.
pub fn starter(name: &str) -> Option<&'static SpeciesTemplate> {
    STARTERS.iter().find(|template| template.name == name)
}

/// Generate a wild opponent: a uniformly chosen pool template plus up to
/// `WILD_LEVEL_SPREAD - 1` bonus levels. Consumes two draws.
pub fn random_wild_combatant(rng: &mut TurnRng) -> BattleResult<Combatant> {
    let pool_size = u32::try_from(WILD_POOL.len()).unwrap_or(u32::MAX);
    let template = &WILD_POOL[rng.next_below(pool_size, "wild species") as usize];
    let bonus_levels = rng.next_below(WILD_LEVEL_SPREAD, "wild level bonus");
    debug!(species = template.name, bonus_levels, "wild combatant generated");
    template.instantiate_with_bonus(bonus_levels)
}
