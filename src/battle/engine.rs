use crate::battle::ai::{Behavior, RandomMoveAI};
use crate::battle::catch::{calculate_shake_threshold, roll_shakes, CaptureOutcome};
use crate::battle::damage::{resolve_move_outcome, MoveOutcome};
use crate::battle::escape::attempt_escape;
use crate::battle::state::{
    ActionReport, BattleEvent, BattleLog, BattleOutcome, BattleSnapshot, Side, TurnRng,
};
use crate::catalog;
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleEngineError, BattleResult, BattleStateError};
use crate::player::Trainer;
use tracing::{debug, info, warn};

/// One encounter between a trainer's active combatant and a wild opponent.
///
/// Every action runs to completion before returning. Once the outcome leaves
/// `Ongoing`, all actions are rejected with `ActionError::BattleOver` and
/// neither combatant nor the log changes again.
pub struct BattleSession<'a, T: Trainer> {
    trainer: &'a mut T,
    active_index: usize,
    opponent: Combatant,
    log: BattleLog,
    outcome: BattleOutcome,
    rng: TurnRng,
    config: BattleConfig,
    behavior: Box<dyn Behavior>,
}

impl<'a, T: Trainer> BattleSession<'a, T> {
    /// Start a battle with an explicitly chosen active combatant.
    pub fn new(
        trainer: &'a mut T,
        active_index: usize,
        opponent: Combatant,
        rng: TurnRng,
    ) -> BattleResult<Self> {
        let Some(active) = trainer.party().get(active_index) else {
            return Err(ActionError::InvalidCombatantIndex(active_index).into());
        };
        if active.is_fainted() {
            return Err(ActionError::CombatantFainted(active.name.clone()).into());
        }

        info!(
            trainer = trainer.name(),
            active = %active.name,
            opponent = %opponent.name,
            level = opponent.level,
            "battle started"
        );

        Ok(Self {
            trainer,
            active_index,
            opponent,
            log: BattleLog::new(),
            outcome: BattleOutcome::Ongoing,
            rng,
            config: BattleConfig::default(),
            behavior: Box::new(RandomMoveAI::new()),
        })
    }

    /// Start a battle with the trainer's first combatant able to fight.
    pub fn start(trainer: &'a mut T, opponent: Combatant, rng: TurnRng) -> BattleResult<Self> {
        let active_index = trainer
            .next_available_combatant()
            .ok_or(BattleStateError::NoUsableCombatant)?;
        Self::new(trainer, active_index, opponent, rng)
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    // --- Read access ---

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn active(&self) -> &Combatant {
        &self.trainer.party()[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    /// Full, untruncated battle history.
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn rng(&self) -> &TurnRng {
        &self.rng
    }

    pub fn trainer(&self) -> &T {
        &*self.trainer
    }

    /// Display-facing view: both combatants, the trailing log window, and the outcome.
    pub fn snapshot(&self) -> BattleSnapshot<'_> {
        BattleSnapshot {
            active_combatant: self.active(),
            opponent_combatant: &self.opponent,
            recent_log: self.log.recent(self.config.log_window),
            outcome: self.outcome,
        }
    }

    // --- Actions ---

    /// Use the active combatant's move at `move_index`. The faster side acts
    /// first (ties go to the player); the slower side only acts if still standing.
    pub fn attack(&mut self, move_index: usize) -> BattleResult<ActionReport> {
        self.ensure_ongoing()?;
        let log_start = self.log.len();

        let available = self.active().moves.len();
        if move_index >= available {
            return Err(self.reject(ActionError::InvalidMoveIndex {
                index: move_index,
                available,
            }));
        }

        let player_first = self.active().speed >= self.opponent.speed;
        debug!(player_first, "turn order decided");

        if player_first {
            self.resolve_strike(Side::Player, move_index);
            if !self.opponent.is_fainted() {
                self.opponent_turn();
            }
        } else {
            self.opponent_turn();
            if !self.active().is_fainted() {
                self.resolve_strike(Side::Player, move_index);
            }
        }

        self.end_of_turn();
        Ok(self.report(true, log_start))
    }

    /// Throw a capture device. On a catch the opponent joins the trainer and
    /// the battle ends; otherwise the opponent gets a free turn.
    pub fn attempt_capture(&mut self, device_name: &str) -> BattleResult<ActionReport> {
        self.ensure_ongoing()?;
        let log_start = self.log.len();

        let Some(device) = catalog::capture_device(device_name) else {
            return Err(self.reject(ActionError::UnknownCaptureDevice(device_name.to_string())));
        };
        // Computed before any stock is spent so a state error leaves inventory untouched.
        let shake_threshold = calculate_shake_threshold(device, &self.opponent)?;

        if !self.trainer.consume_stock(device_name) {
            return Err(self.reject(ActionError::OutOfStock(device_name.to_string())));
        }

        self.log.push(BattleEvent::CaptureDeviceThrown {
            trainer: self.trainer.name().to_string(),
            device: device.name.to_string(),
        });

        let result = roll_shakes(shake_threshold, &mut self.rng);
        match result.outcome {
            CaptureOutcome::Caught => {
                self.log.push(BattleEvent::CaptureSucceeded {
                    name: self.opponent.name.clone(),
                });
                self.trainer.transfer_captured(self.opponent.clone());
                self.conclude(BattleOutcome::Caught);
                Ok(self.report(true, log_start))
            }
            CaptureOutcome::BrokeFree => {
                self.log.push(BattleEvent::CaptureBrokeFree {
                    name: self.opponent.name.clone(),
                    shakes: result.shakes_completed,
                });
                self.opponent_turn();
                self.end_of_turn();
                Ok(self.report(false, log_start))
            }
        }
    }

    /// Use a restorative item on the active combatant; the opponent then gets a free turn.
    pub fn use_restorative(&mut self, item_name: &str) -> BattleResult<ActionReport> {
        self.ensure_ongoing()?;
        let log_start = self.log.len();

        let Some(item) = catalog::restorative(item_name) else {
            return Err(self.reject(ActionError::UnknownRestorative(item_name.to_string())));
        };
        if !self.trainer.consume_stock(item_name) {
            return Err(self.reject(ActionError::OutOfStock(item_name.to_string())));
        }

        let active_index = self.active_index;
        let target = &mut self.trainer.party_mut()[active_index];
        let restored = target.heal(item.heal_amount);
        let target_name = target.name.clone();
        self.log.push(BattleEvent::RestorativeUsed {
            item: item.name.to_string(),
            target: target_name,
            restored,
        });

        self.opponent_turn();
        self.end_of_turn();
        Ok(self.report(true, log_start))
    }

    /// Try to run. Success ends the battle at once; failure hands the opponent a free turn.
    pub fn attempt_escape(&mut self) -> BattleResult<ActionReport> {
        self.ensure_ongoing()?;
        let log_start = self.log.len();

        let actor_speed = self.active().speed;
        let escaped = attempt_escape(actor_speed, self.opponent.speed, &mut self.rng).map_err(
            |err| match err {
                BattleStateError::ZeroOpponentSpeed(_) => {
                    BattleStateError::ZeroOpponentSpeed(self.opponent.name.clone())
                }
                other => other,
            },
        )?;

        if escaped {
            self.log.push(BattleEvent::EscapeSucceeded);
            self.conclude(BattleOutcome::RanAway);
            return Ok(self.report(true, log_start));
        }

        self.log.push(BattleEvent::EscapeFailed);
        self.opponent_turn();
        self.end_of_turn();
        Ok(self.report(false, log_start))
    }

    /// Swap in the party member at `party_index`; the opponent then gets a free turn.
    pub fn switch_active(&mut self, party_index: usize) -> BattleResult<ActionReport> {
        self.ensure_ongoing()?;
        let log_start = self.log.len();

        let Some(replacement) = self.trainer.party().get(party_index) else {
            return Err(self.reject(ActionError::InvalidCombatantIndex(party_index)));
        };
        if replacement.is_fainted() {
            let name = replacement.name.clone();
            return Err(self.reject(ActionError::CombatantFainted(name)));
        }
        let replacement_name = replacement.name.clone();

        self.log.push(BattleEvent::CombatantRecalled {
            trainer: self.trainer.name().to_string(),
            name: self.active().name.clone(),
        });
        self.active_index = party_index;
        self.log.push(BattleEvent::CombatantSentOut {
            name: replacement_name,
        });

        self.opponent_turn();
        self.end_of_turn();
        Ok(self.report(true, log_start))
    }

    // --- Turn internals ---

    fn ensure_ongoing(&self) -> Result<(), ActionError> {
        if self.outcome.is_terminal() {
            return Err(ActionError::BattleOver(self.outcome));
        }
        Ok(())
    }

    /// Log a rejected action and hand back the error for the caller.
    fn reject(&mut self, error: ActionError) -> BattleEngineError {
        warn!(%error, "action rejected");
        self.log.push(BattleEvent::ActionRejected {
            reason: error.clone(),
        });
        error.into()
    }

    fn report(&self, succeeded: bool, log_start: usize) -> ActionReport {
        ActionReport {
            succeeded,
            narration: self.log.narrate_from(log_start),
        }
    }

    fn conclude(&mut self, outcome: BattleOutcome) {
        debug_assert!(!self.outcome.is_terminal(), "battle outcome set twice");
        info!(%outcome, "battle concluded");
        self.outcome = outcome;
    }

    fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => self.active(),
            Side::Opponent => &self.opponent,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.trainer.party_mut()[self.active_index],
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Resolve one side's move against the other, apply damage, and narrate it.
    fn resolve_strike(&mut self, side: Side, move_index: usize) {
        let (attacker_name, move_name, outcome) = {
            let (attacker, defender) = match side {
                Side::Player => (&self.trainer.party()[self.active_index], &self.opponent),
                Side::Opponent => (&self.opponent, &self.trainer.party()[self.active_index]),
            };
            let move_ = &attacker.moves[move_index];
            let outcome = resolve_move_outcome(move_, attacker, defender, &mut self.rng);
            (attacker.name.clone(), move_.name.clone(), outcome)
        };

        let event = match outcome {
            MoveOutcome::Hit {
                damage,
                effectiveness,
            } => BattleEvent::MoveHit {
                side,
                attacker: attacker_name,
                move_name,
                damage,
                effectiveness,
            },
            MoveOutcome::Missed => BattleEvent::MoveMissed {
                side,
                attacker: attacker_name,
                move_name,
            },
            MoveOutcome::Immune if self.config.legacy_miss_narration => BattleEvent::MoveMissed {
                side,
                attacker: attacker_name,
                move_name,
            },
            MoveOutcome::Immune => BattleEvent::MoveHadNoEffect {
                side,
                attacker: attacker_name,
                move_name,
            },
        };
        self.log.push(event);

        let target_side = side.other();
        if self.combatant_mut(target_side).apply_damage(outcome.damage()) {
            let name = self.combatant(target_side).name.clone();
            self.log.push(BattleEvent::CombatantFainted {
                side: target_side,
                name,
            });
        }
    }

    /// The opponent picks a move with its behavior and uses it.
    fn opponent_turn(&mut self) {
        match self.behavior.choose_move(&self.opponent, &mut self.rng) {
            Some(move_index) if move_index < self.opponent.moves.len() => {
                self.resolve_strike(Side::Opponent, move_index);
            }
            Some(move_index) => {
                warn!(move_index, "behavior chose a move the opponent does not know");
            }
            None => {}
        }
    }

    fn end_of_turn(&mut self) {
        if self.opponent.is_fainted() {
            let reward = self.opponent.level.saturating_mul(self.config.reward_per_level);
            self.trainer.credit_reward(reward);
            self.log.push(BattleEvent::BattleWon { reward });
            self.conclude(BattleOutcome::PlayerWin);
        } else if self.active().is_fainted() {
            match self.trainer.next_available_combatant() {
                Some(next_index) => {
                    self.active_index = next_index;
                    let name = self.active().name.clone();
                    debug!(%name, "forced switch after faint");
                    self.log.push(BattleEvent::ForcedSwitch { name });
                }
                None => {
                    self.log.push(BattleEvent::BattleLost);
                    self.conclude(BattleOutcome::PlayerLose);
                }
            }
        }
    }
}
