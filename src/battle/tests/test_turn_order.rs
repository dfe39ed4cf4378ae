#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, BattleOutcome, Side};
    use crate::battle::tests::common::{
        create_test_battle, create_test_player, TestCombatantBuilder, DEFAULT_TACKLE_DAMAGE,
    };
    use crate::errors::{ActionError, BattleEngineError};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{ElementType, Move};

    fn striker_sides(events: &[BattleEvent]) -> Vec<Side> {
        events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MoveHit { side, .. } | BattleEvent::MoveMissed { side, .. } => {
                    Some(*side)
                }
                _ => None,
            })
            .collect()
    }

    #[rstest]
    #[case(20, 10, vec![Side::Player, Side::Opponent])]
    #[case(10, 10, vec![Side::Player, Side::Opponent])]
    #[case(9, 10, vec![Side::Opponent, Side::Player])]
    fn test_faster_side_moves_first(
        #[case] player_speed: u32,
        #[case] opponent_speed: u32,
        #[case] expected: Vec<Side>,
    ) {
        // Arrange
        let mut player = create_test_player(vec![TestCombatantBuilder::new("Flamepup")
            .with_speed(player_speed)
            .build()]);
        let opponent = TestCombatantBuilder::new("Pebblit")
            .with_speed(opponent_speed)
            .build();
        // Both orders consume: one accuracy draw, one move choice, one accuracy draw
        let mut battle = create_test_battle(&mut player, opponent, vec![0, 0, 0]);

        // Act
        let report = battle.attack(0).unwrap();

        // Assert
        assert!(report.succeeded);
        assert_eq!(striker_sides(battle.log().events()), expected);
        assert!(battle.rng().is_exhausted());
    }

    #[test]
    fn test_attack_narration_and_damage() {
        let mut player = create_test_player(vec![TestCombatantBuilder::new("Flamepup")
            .with_speed(20)
            .build()]);
        let opponent = TestCombatantBuilder::new("Pebblit").build();
        let mut battle = create_test_battle(&mut player, opponent, vec![0, 0, 0]);

        let report = battle.attack(0).unwrap();

        assert_eq!(
            report.narration,
            vec![
                "Flamepup used Tackle! Dealt 6 damage.".to_string(),
                "Wild Pebblit used Tackle! Dealt 6 damage.".to_string(),
            ]
        );
        assert_eq!(battle.opponent().current_health(), 100 - DEFAULT_TACKLE_DAMAGE);
        assert_eq!(battle.active().current_health(), 100 - DEFAULT_TACKLE_DAMAGE);
        assert_eq!(battle.outcome(), BattleOutcome::Ongoing);
    }

    #[test]
    fn test_missed_move_deals_no_damage() {
        let wild_swing = Move::new("Wild Swing", ElementType::Normal, 80, 0.5);
        let mut player = create_test_player(vec![TestCombatantBuilder::new("Flamepup")
            .with_speed(20)
            .with_moves(vec![wild_swing])
            .build()]);
        let opponent = TestCombatantBuilder::new("Pebblit").build();
        // 60% >= 50% accuracy misses; the opponent then hits
        let mut battle = create_test_battle(&mut player, opponent, vec![60, 0, 0]);

        let report = battle.attack(0).unwrap();

        assert_eq!(report.narration[0], "Flamepup's Wild Swing missed!");
        assert_eq!(battle.opponent().current_health(), 100);
        assert_eq!(battle.active().current_health(), 100 - DEFAULT_TACKLE_DAMAGE);
    }

    #[test]
    fn test_effectiveness_is_narrated() {
        let ember = Move::sure_hit("Ember", ElementType::Fire, 40);
        let mut player = create_test_player(vec![TestCombatantBuilder::new("Flamepup")
            .with_element(ElementType::Fire)
            .with_speed(20)
            .with_moves(vec![ember])
            .build()]);
        let opponent = TestCombatantBuilder::new("Leafling")
            .with_element(ElementType::Grass)
            .build();
        let mut battle = create_test_battle(&mut player, opponent, vec![0, 0, 0]);

        let report = battle.attack(0).unwrap();

        assert_eq!(
            report.narration[0],
            "Flamepup used Ember! Dealt 12 damage. It's super effective!"
        );
        assert_eq!(battle.opponent().current_health(), 88);
    }

    #[test]
    fn test_opponent_without_moves_forfeits() {
        let mut player = create_test_player(vec![TestCombatantBuilder::new("Flamepup").build()]);
        let opponent = TestCombatantBuilder::new("Husk").with_moves(vec![]).build();
        // Only the player's accuracy draw is consumed
        let mut battle = create_test_battle(&mut player, opponent, vec![0]);

        let report = battle.attack(0).unwrap();

        assert_eq!(report.narration.len(), 1);
        assert_eq!(battle.active().current_health(), 100);
        assert!(battle.rng().is_exhausted());
    }

    #[test]
    fn test_invalid_move_index_is_rejected_without_a_turn() {
        let mut player = create_test_player(vec![TestCombatantBuilder::new("Flamepup").build()]);
        let opponent = TestCombatantBuilder::new("Pebblit").build();
        let mut battle = create_test_battle(&mut player, opponent, vec![]);

        let result = battle.attack(3);

        assert_eq!(
            result,
            Err(BattleEngineError::Action(ActionError::InvalidMoveIndex {
                index: 3,
                available: 1
            }))
        );
        assert_eq!(
            battle.log().events(),
            &[BattleEvent::ActionRejected {
                reason: ActionError::InvalidMoveIndex {
                    index: 3,
                    available: 1
                }
            }]
        );
        assert_eq!(battle.log().to_string(), "  Invalid move! (slot 3, 1 known)\n");
        assert_eq!(battle.opponent().current_health(), 100);
        assert_eq!(battle.outcome(), BattleOutcome::Ongoing);
    }
}
