use crate::battle::engine::BattleSession;
use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use crate::player::Player;
use schema::{ElementType, Move};

/// A builder for creating test combatants with common defaults.
///
/// Defaults: Normal element, level 10, 100 max health, 20 attack, 20 defense,
/// speed 10, and a single never-missing Tackle (power 40). With those numbers a
/// Tackle between two default combatants deals exactly 6 damage.
///
/// # Example
/// ```ignore
/// let pebblit = TestCombatantBuilder::new("Pebblit")
///     .with_element(ElementType::Rock)
///     .with_hp(5)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    element: ElementType,
    level: u32,
    max_health: u32,
    attack: u32,
    defense: u32,
    speed: u32,
    moves: Option<Vec<Move>>,
    current_health: Option<u32>,
}

/// Damage a default Tackle deals between two default combatants.
pub const DEFAULT_TACKLE_DAMAGE: u32 = 6;

impl TestCombatantBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            element: ElementType::Normal,
            level: 10,
            max_health: 100,
            attack: 20,
            defense: 20,
            speed: 10,
            moves: None,
            current_health: None,
        }
    }

    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Sets current health. If not set, the combatant starts at max health.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_health = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let moves = self
            .moves
            .unwrap_or_else(|| vec![Move::sure_hit("Tackle", ElementType::Normal, 40)]);
        let mut combatant = Combatant::new(
            self.name,
            self.element,
            self.level,
            self.max_health,
            self.attack,
            self.defense,
            self.speed,
            moves,
        )
        .unwrap();
        if let Some(hp) = self.current_health {
            combatant.set_health(hp);
        }
        combatant
    }
}

/// A player named "Ash" holding the given party and the default starting kit.
pub fn create_test_player(party: Vec<Combatant>) -> Player {
    let mut player = Player::new("Ash");
    for combatant in party {
        player.add_combatant(combatant);
    }
    player
}

/// Scripted RNG: integer draws return the values as-is, accuracy draws read
/// them as percentages.
pub fn predictable_rng(outcomes: Vec<u32>) -> TurnRng {
    TurnRng::new_for_test(outcomes)
}

/// Start a battle with the player's first usable combatant.
pub fn create_test_battle(
    player: &mut Player,
    opponent: Combatant,
    outcomes: Vec<u32>,
) -> BattleSession<'_, Player> {
    BattleSession::start(player, opponent, predictable_rng(outcomes)).unwrap()
}
