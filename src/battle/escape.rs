use crate::battle::state::TurnRng;
use crate::errors::BattleStateError;
use tracing::debug;

/// Exclusive upper bound of the escape draw.
pub const ESCAPE_DRAW_RANGE: u32 = 255;

/// Escape chance: (actor_speed * 128) / opponent_speed + 30
///
/// Deliberately unclamped. Anything at or above `ESCAPE_DRAW_RANGE` is a
/// guaranteed escape.
pub fn calculate_escape_chance(actor_speed: u32, opponent_speed: u32) -> Result<f64, BattleStateError> {
    if opponent_speed == 0 {
        return Err(BattleStateError::ZeroOpponentSpeed("opponent".to_string()));
    }
    Ok(f64::from(actor_speed) * 128.0 / f64::from(opponent_speed) + 30.0)
}

/// Roll for an escape. Returns true if the actor gets away.
pub fn attempt_escape(
    actor_speed: u32,
    opponent_speed: u32,
    rng: &mut TurnRng,
) -> Result<bool, BattleStateError> {
    let escape_chance = calculate_escape_chance(actor_speed, opponent_speed)?;
    let roll = rng.next_below(ESCAPE_DRAW_RANGE, "escape roll");
    let escaped = f64::from(roll) < escape_chance;
    debug!(escape_chance, roll, escaped, "escape attempt");
    Ok(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(100, 50, 286.0)]
    #[case(50, 100, 94.0)]
    #[case(0, 40, 30.0)]
    #[case(10, 30, 10.0 * 128.0 / 30.0 + 30.0)]
    fn test_escape_chance(#[case] actor: u32, #[case] opponent: u32, #[case] expected: f64) {
        let chance = calculate_escape_chance(actor, opponent).unwrap();
        assert!((chance - expected).abs() < 1e-9, "got {}", chance);
    }

    #[test]
    fn test_much_faster_actor_always_escapes() {
        let mut rng = TurnRng::from_seed(3);
        for _ in 0..1_000 {
            assert_eq!(attempt_escape(100, 50, &mut rng), Ok(true));
        }
        // Even the highest possible draw falls short of 286
        let mut rng = TurnRng::new_for_test(vec![254]);
        assert_eq!(attempt_escape(100, 50, &mut rng), Ok(true));
    }

    #[test]
    fn test_escape_roll_boundary() {
        // chance = 50 * 128 / 100 + 30 = 94
        let mut rng = TurnRng::new_for_test(vec![93, 94]);
        assert_eq!(attempt_escape(50, 100, &mut rng), Ok(true));
        assert_eq!(attempt_escape(50, 100, &mut rng), Ok(false));
    }

    #[test]
    fn test_zero_opponent_speed_is_a_state_error() {
        let mut rng = TurnRng::new_for_test(vec![]);
        assert!(matches!(
            attempt_escape(10, 0, &mut rng),
            Err(BattleStateError::ZeroOpponentSpeed(_))
        ));
        // No draw was consumed
        assert!(rng.is_exhausted());
    }
}
