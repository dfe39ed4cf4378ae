use crate::combatant::Combatant;
use crate::errors::ActionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Classification of a battle session. `Ongoing` transitions exactly once to
/// one of the terminal variants, which are absorbing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Ongoing,
    PlayerWin,
    PlayerLose,
    Caught,
    RanAway,
}

impl BattleOutcome {
    pub fn is_terminal(self) -> bool {
        self != BattleOutcome::Ongoing
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            BattleOutcome::Ongoing => "ongoing",
            BattleOutcome::PlayerWin => "player win",
            BattleOutcome::PlayerLose => "player lose",
            BattleOutcome::Caught => "caught",
            BattleOutcome::RanAway => "ran away",
        };
        write!(f, "{}", display_name)
    }
}

/// Which side of the battle an event concerns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Moves
    MoveHit {
        side: Side,
        attacker: String,
        move_name: String,
        damage: u32,
        effectiveness: f32,
    },
    MoveMissed {
        side: Side,
        attacker: String,
        move_name: String,
    },
    MoveHadNoEffect {
        side: Side,
        attacker: String,
        move_name: String,
    },
    CombatantFainted {
        side: Side,
        name: String,
    },

    // Capture
    CaptureDeviceThrown {
        trainer: String,
        device: String,
    },
    CaptureSucceeded {
        name: String,
    },
    CaptureBrokeFree {
        name: String,
        shakes: u8,
    },

    // Items
    RestorativeUsed {
        item: String,
        target: String,
        restored: u32,
    },

    // Escape
    EscapeSucceeded,
    EscapeFailed,

    // Switching
    CombatantRecalled {
        trainer: String,
        name: String,
    },
    CombatantSentOut {
        name: String,
    },
    ForcedSwitch {
        name: String,
    },

    // Rejections
    ActionRejected {
        reason: ActionError,
    },

    // Battle End
    BattleWon {
        reward: u32,
    },
    BattleLost,
}

impl BattleEvent {
    fn side_label(side: Side, name: &str) -> String {
        match side {
            Side::Player => name.to_string(),
            Side::Opponent => format!("Wild {}", name),
        }
    }

    fn effectiveness_suffix(effectiveness: f32) -> &'static str {
        match effectiveness {
            m if m > 1.0 => " It's super effective!",
            m if m < 1.0 && m > 0.0 => " It's not very effective...",
            _ => "",
        }
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // === Move Events ===
            BattleEvent::MoveHit {
                side,
                attacker,
                move_name,
                damage,
                effectiveness,
            } => write!(
                f,
                "{} used {}! Dealt {} damage.{}",
                Self::side_label(*side, attacker),
                move_name,
                damage,
                Self::effectiveness_suffix(*effectiveness)
            ),
            BattleEvent::MoveMissed {
                side,
                attacker,
                move_name,
            } => write!(f, "{}'s {} missed!", Self::side_label(*side, attacker), move_name),
            BattleEvent::MoveHadNoEffect {
                side,
                attacker,
                move_name,
            } => write!(
                f,
                "{} used {}! It had no effect!",
                Self::side_label(*side, attacker),
                move_name
            ),
            BattleEvent::CombatantFainted { side, name } => {
                write!(f, "{} fainted!", Self::side_label(*side, name))
            }

            // === Capture Events ===
            BattleEvent::CaptureDeviceThrown { trainer, device } => {
                write!(f, "{} threw a {}!", trainer, device)
            }
            BattleEvent::CaptureSucceeded { name } => write!(f, "Gotcha! {} was caught!", name),
            BattleEvent::CaptureBrokeFree { name, shakes } => match shakes {
                0 => write!(f, "{} broke free!", name),
                1 => write!(f, "{} broke free after 1 shake!", name),
                n => write!(f, "{} broke free after {} shakes!", name, n),
            },

            // === Item Events ===
            BattleEvent::RestorativeUsed { item, restored, .. } => {
                write!(f, "Used {}! Restored {} HP.", item, restored)
            }

            // === Escape Events ===
            BattleEvent::EscapeSucceeded => write!(f, "Got away safely!"),
            BattleEvent::EscapeFailed => write!(f, "Can't escape!"),

            // === Switching Events ===
            BattleEvent::CombatantRecalled { trainer, name } => {
                write!(f, "{} called back {}!", trainer, name)
            }
            BattleEvent::CombatantSentOut { name } => write!(f, "Go, {}!", name),
            BattleEvent::ForcedSwitch { name } => write!(f, "Switch to {}!", name),

            // === Rejection Events ===
            BattleEvent::ActionRejected { reason } => write!(f, "{}", reason),

            // === Battle End Events ===
            BattleEvent::BattleWon { reward } => write!(f, "You won! Earned ${}.", reward),
            BattleEvent::BattleLost => {
                write!(f, "All your creatures fainted! You lost the battle.")
            }
        }
    }
}

/// Append-only record of everything narrated in a battle.
///
/// The full history is always retained; display-facing readers take a
/// trailing window with `recent`.
#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Full history, oldest first.
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// The last `count` events, oldest first. Does not modify the log.
    pub fn recent(&self, count: usize) -> &[BattleEvent] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    /// Narration lines for every event from `start` onwards.
    pub fn narrate_from(&self, start: usize) -> Vec<String> {
        self.events
            .get(start..)
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for BattleLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// The random source threaded through every probabilistic model.
///
/// Outcomes come either from a seeded generator or, in tests, from a scripted
/// list consumed in order.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Scripted outcomes for deterministic tests. Integer draws return the
    /// scripted value; fraction draws read it as a percentage (`n / 100`).
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    fn next_scripted(outcomes: &[u32], index: &mut usize, reason: &str) -> u32 {
        if *index >= outcomes.len() {
            // Add the reason to the panic message for better debugging!
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];
        *index += 1;
        outcome
    }

    /// Uniform integer in `[0, upper)`. `upper` must be positive.
    pub fn next_below(&mut self, upper: u32, reason: &str) -> u32 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(0..upper),
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason).min(upper.saturating_sub(1))
            }
        };
        debug!(outcome, upper, reason, "rng draw");
        outcome
    }

    /// Uniform fraction in `[0, 1)`.
    pub fn next_fraction(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random::<f64>(),
            RngSource::Scripted { outcomes, index } => {
                f64::from(Self::next_scripted(outcomes, index, reason)) / 100.0
            }
        };
        debug!(outcome, reason, "rng draw");
        outcome
    }

    /// True once a scripted source has handed out every outcome. Seeded
    /// sources never run out.
    pub fn is_exhausted(&self) -> bool {
        match &self.source {
            RngSource::Seeded(_) => false,
            RngSource::Scripted { outcomes, index } => *index >= outcomes.len(),
        }
    }
}

/// Read-only view of a battle for display.
#[derive(Debug, Clone, Copy)]
pub struct BattleSnapshot<'a> {
    pub active_combatant: &'a Combatant,
    pub opponent_combatant: &'a Combatant,
    /// Trailing window of the log; the full history stays on the session.
    pub recent_log: &'a [BattleEvent],
    pub outcome: BattleOutcome,
}

/// What a successfully dispatched action did.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    /// Capture landed, escape succeeded, or the action otherwise applied.
    pub succeeded: bool,
    /// Narration appended by this action, oldest first.
    pub narration: Vec<String>,
}
