use crate::ElementType;
use serde::{Deserialize, Serialize};

/// A single attack a combatant knows. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub element: ElementType,
    pub power: u32,
    /// Hit probability in (0, 1]. 1.0 never misses.
    pub accuracy: f64,
}

impl Move {
    pub fn new(name: impl Into<String>, element: ElementType, power: u32, accuracy: f64) -> Self {
        Move {
            name: name.into(),
            element,
            power,
            accuracy,
        }
    }

    /// A move that always hits.
    pub fn sure_hit(name: impl Into<String>, element: ElementType, power: u32) -> Self {
        Self::new(name, element, power, 1.0)
    }
}
