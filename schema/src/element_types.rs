use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The closed set of elemental types a creature or move can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Rock,
    Ground,
    Flying,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// Calculate type effectiveness multiplier for attacking type vs defending type
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: ElementType, defending: ElementType) -> f32 {
        use ElementType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Rock) => 0.5,
            (Normal, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) => 0.5,
            (Fire, Grass) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Grass) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, _) => 1.0,

            // Grass
            (Grass, Fire) | (Grass, Grass) | (Grass, Flying) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, _) => 1.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, _) => 1.0,

            // Rock
            (Rock, Ground) => 0.5,
            (Rock, Fire) | (Rock, Flying) => 2.0,
            (Rock, _) => 1.0,

            // Ground
            (Ground, Grass) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire) | (Ground, Electric) | (Ground, Rock) => 2.0,
            (Ground, _) => 1.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) => 0.5,
            (Flying, Grass) => 2.0,
            (Flying, _) => 1.0,
        }
    }

    pub fn is_immune(attacking: ElementType, defending: ElementType) -> bool {
        Self::type_effectiveness(attacking, defending) == 0.0
    }
}
