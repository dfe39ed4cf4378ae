use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use crate::errors::BattleStateError;
use schema::CaptureDevice;
use tracing::debug;

/// Consecutive successful shakes needed for a capture.
pub const SHAKES_REQUIRED: u8 = 4;

/// Exclusive upper bound of a single shake draw.
pub const SHAKE_DRAW_RANGE: u32 = 65536;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Caught,
    BrokeFree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureResult {
    pub outcome: CaptureOutcome,
    /// Successful shakes before the target broke free (4 when caught).
    pub shakes_completed: u8,
}

/// HP-based multiplier: (max_hp * 3 - current_hp * 2) / (max_hp * 3)
///
/// Ranges from 1/3 at full health to 1.0 at zero health.
pub fn hp_factor(target: &Combatant) -> Result<f64, BattleStateError> {
    if target.max_health() == 0 {
        return Err(BattleStateError::ZeroMaxHealth(target.name.clone()));
    }
    let max_hp = f64::from(target.max_health());
    let current_hp = f64::from(target.current_health());
    Ok((3.0 * max_hp - 2.0 * current_hp) / (3.0 * max_hp))
}

/// Catch rate before the shake transform: hp_factor * multiplier * 255
pub fn calculate_catch_rate(
    device: &CaptureDevice,
    target: &Combatant,
) -> Result<f64, BattleStateError> {
    let rate = hp_factor(target)? * device.catch_rate_multiplier * 255.0;
    if rate <= 0.0 || rate.is_nan() {
        return Err(BattleStateError::NonPositiveCatchRate(rate));
    }
    Ok(rate)
}

/// Per-shake success threshold: floor((65536 / (255 / rate)) ^ 0.25)
///
/// Not clamped: the catalog keeps rates low enough that the value stays far
/// below the draw range.
pub fn calculate_shake_threshold(
    device: &CaptureDevice,
    target: &Combatant,
) -> Result<u32, BattleStateError> {
    let rate = calculate_catch_rate(device, target)?;
    let threshold = (65536.0 / (255.0 / rate)).powf(0.25).floor() as u32;
    Ok(threshold)
}

/// Run up to four shake trials against a precomputed threshold, stopping at
/// the first failure.
pub fn roll_shakes(shake_threshold: u32, rng: &mut TurnRng) -> CaptureResult {
    let mut shakes_completed = 0;
    while shakes_completed < SHAKES_REQUIRED {
        let roll = rng.next_below(SHAKE_DRAW_RANGE, "shake trial");
        if roll >= shake_threshold {
            break;
        }
        shakes_completed += 1;
    }

    let outcome = if shakes_completed == SHAKES_REQUIRED {
        CaptureOutcome::Caught
    } else {
        CaptureOutcome::BrokeFree
    };
    debug!(shake_threshold, shakes_completed, ?outcome, "capture attempt resolved");

    CaptureResult {
        outcome,
        shakes_completed,
    }
}

/// Full capture check: threshold from the target's health and the device,
/// then the shake trials.
pub fn attempt_capture(
    device: &CaptureDevice,
    target: &Combatant,
    rng: &mut TurnRng,
) -> Result<CaptureResult, BattleStateError> {
    let threshold = calculate_shake_threshold(device, target)?;
    Ok(roll_shakes(threshold, rng))
}

/// Probability that four consecutive shakes all succeed.
pub fn capture_probability(shake_threshold: u32) -> f64 {
    (f64::from(shake_threshold) / f64::from(SHAKE_DRAW_RANGE)).powi(i32::from(SHAKES_REQUIRED))
}

/// Get a descriptive catch chance category for display purposes
pub fn get_shake_threshold_description(shake_threshold: u32) -> &'static str {
    match shake_threshold {
        t if t >= 18 => "Good",
        t if t >= 16 => "Fair",
        t if t >= 14 => "Poor",
        _ => "Very Poor",
    }
}
