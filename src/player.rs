use crate::combatant::Combatant;
use crate::errors::PersistenceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum number of combatants carried in the party. Extra captures go to storage.
pub const PARTY_LIMIT: usize = 6;

/// The actor-side collaborator a battle session calls into.
///
/// The session holds the active combatant as an index into `party()`, so an
/// implementation must never remove or reorder party entries mid-battle;
/// appending is fine.
pub trait Trainer {
    fn name(&self) -> &str;

    fn party(&self) -> &[Combatant];

    fn party_mut(&mut self) -> &mut [Combatant];

    /// Take one unit of a named consumable. False if absent or exhausted.
    fn consume_stock(&mut self, item: &str) -> bool;

    /// Party index of the first combatant able to battle.
    fn next_available_combatant(&self) -> Option<usize>;

    /// Receive a captured opponent.
    fn transfer_captured(&mut self, combatant: Combatant);

    /// Credit battle winnings.
    fn credit_reward(&mut self, amount: u32);
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,

    // Up to PARTY_LIMIT combatants that can battle.
    pub party: Vec<Combatant>,

    // Overflow for captures made while the party is full.
    pub storage: Vec<Combatant>,

    // Item name -> units held. Exhausted entries are removed.
    pub inventory: BTreeMap<String, u32>,

    pub money: u32,
}

impl Player {
    /// Create a new player with the starting kit.
    pub fn new(name: impl Into<String>) -> Self {
        let mut inventory = BTreeMap::new();
        inventory.insert("Basic Trap".to_string(), 10);
        inventory.insert("Potion".to_string(), 5);

        Player {
            name: name.into(),
            party: Vec::new(),
            storage: Vec::new(),
            inventory,
            money: 1000,
        }
    }

    /// Add a combatant to the party, or to storage when the party is full.
    /// Returns true if it joined the party.
    pub fn add_combatant(&mut self, combatant: Combatant) -> bool {
        if self.party.len() < PARTY_LIMIT {
            self.party.push(combatant);
            true
        } else {
            self.storage.push(combatant);
            false
        }
    }

    pub fn has_usable_combatants(&self) -> bool {
        self.party.iter().any(|c| !c.is_fainted())
    }

    pub fn add_item(&mut self, item: &str, quantity: u32) {
        *self.inventory.entry(item.to_string()).or_insert(0) += quantity;
    }

    pub fn item_count(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    /// Restore every party member to full health.
    pub fn heal_all(&mut self) {
        for combatant in &mut self.party {
            combatant.full_heal();
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Serialize(e.to_string()))
    }

    pub fn from_json(source: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(source).map_err(|e| PersistenceError::Deserialize(e.to_string()))
    }
}

impl Trainer for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn party(&self) -> &[Combatant] {
        &self.party
    }

    fn party_mut(&mut self) -> &mut [Combatant] {
        &mut self.party
    }

    fn consume_stock(&mut self, item: &str) -> bool {
        let Some(count) = self.inventory.get_mut(item) else {
            return false;
        };
        if *count == 0 {
            self.inventory.remove(item);
            return false;
        }
        *count -= 1;
        if *count == 0 {
            self.inventory.remove(item);
        }
        debug!(item, remaining = self.item_count(item), "consumed stock");
        true
    }

    fn next_available_combatant(&self) -> Option<usize> {
        self.party.iter().position(|c| !c.is_fainted())
    }

    fn transfer_captured(&mut self, combatant: Combatant) {
        let joined_party = self.add_combatant(combatant);
        debug!(joined_party, "captured combatant transferred");
    }

    fn credit_reward(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{ElementType, Move};

    fn creature(name: &str) -> Combatant {
        Combatant::new(
            name,
            ElementType::Normal,
            5,
            30,
            10,
            10,
            10,
            vec![Move::sure_hit("Tackle", ElementType::Normal, 40)],
        )
        .unwrap()
    }

    #[test]
    fn test_starting_kit() {
        let player = Player::new("Ash");
        assert_eq!(player.money, 1000);
        assert_eq!(player.item_count("Basic Trap"), 10);
        assert_eq!(player.item_count("Potion"), 5);
        assert_eq!(player.item_count("Ultra Trap"), 0);
        assert!(!player.has_usable_combatants());
    }

    #[test]
    fn test_consume_stock_removes_exhausted_entries() {
        let mut player = Player::new("Ash");
        player.add_item("Super Potion", 1);

        assert!(player.consume_stock("Super Potion"));
        assert!(!player.inventory.contains_key("Super Potion"));
        assert!(!player.consume_stock("Super Potion"));
        assert!(!player.consume_stock("Master Key"));
        assert_eq!(player.item_count("Potion"), 5);
    }

    #[test]
    fn test_party_overflow_goes_to_storage() {
        let mut player = Player::new("Ash");
        for i in 0..PARTY_LIMIT {
            assert!(player.add_combatant(creature(&format!("Mon{}", i))));
        }
        player.transfer_captured(creature("Extra"));
        assert_eq!(player.party.len(), PARTY_LIMIT);
        assert_eq!(player.storage.len(), 1);
        assert_eq!(player.storage[0].name, "Extra");
    }

    #[test]
    fn test_next_available_skips_fainted() {
        let mut player = Player::new("Ash");
        player.add_combatant(creature("First"));
        player.add_combatant(creature("Second"));
        player.party[0].apply_damage(999);

        assert_eq!(player.next_available_combatant(), Some(1));
        player.party[1].apply_damage(999);
        assert_eq!(player.next_available_combatant(), None);
        assert!(!player.has_usable_combatants());

        player.heal_all();
        assert_eq!(player.next_available_combatant(), Some(0));
    }

    #[test]
    fn test_credit_reward() {
        let mut player = Player::new("Ash");
        player.credit_reward(70);
        assert_eq!(player.money, 1070);
    }

    #[test]
    fn test_json_round_trip_preserves_health() {
        let mut player = Player::new("Ash");
        player.add_combatant(creature("Flamepup"));
        player.party[0].apply_damage(12);

        let json = player.to_json().unwrap();
        let restored = Player::from_json(&json).unwrap();
        assert_eq!(restored, player);
        assert_eq!(restored.party[0].current_health(), 18);
    }

    #[test]
    fn test_from_json_rejects_out_of_range_health() {
        let mut player = Player::new("Ash");
        player.add_combatant(creature("Flamepup"));
        let json = player
            .to_json()
            .unwrap()
            .replace("\"current_health\": 30", "\"current_health\": 500");
        assert!(json.contains("500"));

        assert!(matches!(
            Player::from_json(&json),
            Err(PersistenceError::Deserialize(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_zero_max_health_in_storage() {
        let mut player = Player::new("Ash");
        player.storage.push(creature("Boxed"));
        let json = player
            .to_json()
            .unwrap()
            .replace("\"max_health\": 30", "\"max_health\": 0")
            .replace("\"current_health\": 30", "\"current_health\": 0");

        assert!(matches!(
            Player::from_json(&json),
            Err(PersistenceError::Deserialize(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Player::from_json("{not json"),
            Err(PersistenceError::Deserialize(_))
        ));
    }
}
