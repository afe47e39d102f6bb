#[cfg(test)]
mod tests {
    use crate::battle::engine::{BattleOutcome, MAX_TICKS};
    use crate::battle::rng::ScriptedRng;
    use crate::battle::scheduler::Side;
    use crate::battle::tests::common::{neutral_rng, run_battle, TestFighterBuilder};
    use pretty_assertions::assert_eq;
    use schema::AttackKind;

    #[test]
    fn test_light_hits_deal_exactly_strength_minus_defense() {
        // Arrange
        let first = TestFighterBuilder::new("Alpha")
            .with_strength(20)
            .with_defense(10)
            .build();
        let second = TestFighterBuilder::new("Beta")
            .with_strength(18)
            .with_defense(12)
            .build();

        // Act
        let report = run_battle(&first, &second, &mut neutral_rng());

        // Assert
        for event in report.moves.iter() {
            assert_eq!(event.attack_type, AttackKind::Light);
            assert!(event.hit);
            assert!(!event.critical);
            assert_eq!(event.stamina_cost, 8);
            let expected = if event.attacker == "Alpha" { 20 - 12 } else { 18 - 10 };
            assert_eq!(event.damage_dealt, expected, "turn {}", event.turn);
            assert_eq!(
                event.defender_health_after,
                event.defender_health_before - expected
            );
        }

        // Alpha lands 13 hits of 8 on turns 1, 3, ..., 25; Beta only gets 12.
        assert_eq!(report.turns, 25);
        assert_eq!(
            report.outcome,
            BattleOutcome::Decided {
                winner: Side::First
            }
        );
        assert_eq!(report.final_health, [100 - 12 * 8, 0]);
        assert_eq!(report.winner_name(), Some("Alpha"));
        assert_eq!(report.loser_name(), Some("Beta"));
    }

    #[test]
    fn test_heavy_hits_scale_by_one_point_six() {
        // Heavy roll, zero jitter, no dodge, zero variance (0.35 over [-3, 5]), no crit.
        let mut rng = ScriptedRng::cycling(vec![0.1, 0.5, 0.9, 0.35, 0.9]);
        let first = TestFighterBuilder::new("Alpha")
            .with_strength(25)
            .with_costs(2, 2)
            .build();
        let second = TestFighterBuilder::new("Beta")
            .with_strength(21)
            .with_costs(2, 2)
            .build();

        let report = run_battle(&first, &second, &mut rng);

        for event in report.moves.iter() {
            assert_eq!(event.attack_type, AttackKind::Heavy);
            // floor((25 - 10) * 1.6) = 24, floor((21 - 10) * 1.6) = 17
            let expected = if event.attacker == "Alpha" { 24 } else { 17 };
            assert_eq!(event.damage_dealt, expected);
        }
        assert_eq!(report.winner_name(), Some("Alpha"));
    }

    #[test]
    fn test_defense_above_strength_deals_zero() {
        let first = TestFighterBuilder::new("Wall")
            .with_strength(5)
            .with_defense(50)
            .build();
        let second = TestFighterBuilder::new("Pebble")
            .with_strength(5)
            .with_defense(50)
            .build();

        let report = run_battle(&first, &second, &mut neutral_rng());

        assert!(report.moves.iter().all(|event| event.damage_dealt == 0));
        assert_eq!(report.turns, MAX_TICKS);
        assert_eq!(report.outcome, BattleOutcome::Inconclusive);
        assert!(report.is_inconclusive());
        assert_eq!(report.winner_name(), None);
    }

    #[test]
    fn test_critical_multiplier_applies_to_rolled_damage() {
        // Light, zero jitter, no dodge, zero variance, crit roll 0.1 < 0.5.
        let mut rng = ScriptedRng::cycling(vec![0.4, 0.4, 0.4, 0.4, 0.1]);
        let first = TestFighterBuilder::new("Striker")
            .with_strength(22)
            .with_crit(0.5, 1.5)
            .with_costs(1, 1)
            .build();
        let second = TestFighterBuilder::new("Target")
            .with_health(500)
            .with_strength(10)
            .with_crit(0.5, 1.5)
            .with_costs(1, 1)
            .build();

        let report = run_battle(&first, &second, &mut rng);

        let striker_hits: Vec<_> = report
            .moves
            .iter()
            .filter(|event| event.attacker == "Striker")
            .collect();
        assert!(!striker_hits.is_empty());
        for event in striker_hits {
            assert!(event.critical);
            // floor((22 - 10) * 1.0 * 1.5)
            assert_eq!(event.damage_dealt, 18);
            assert!(event.message.contains("(CRIT)"));
        }
    }

    #[test]
    fn test_extreme_stats_resolve_without_overflow() {
        let mut giant = TestFighterBuilder::new("Giant")
            .with_strength(i32::MAX)
            .with_stamina(100, i32::MAX)
            .with_costs(8, i32::MAX)
            .build();
        giant.critchance = 0.5;
        giant.critmult = 3.0;
        let target = TestFighterBuilder::new("Target")
            .with_defense(0)
            .build();

        let report = run_battle(&giant, &target, &mut neutral_rng());

        assert_eq!(report.turns, 1);
        assert_eq!(report.winner_name(), Some("Giant"));
        assert_eq!(report.final_health, [100, 0]);
        let blow = report.moves.last().expect("one move");
        assert!(blow.critical);
        assert_eq!(blow.damage_dealt, i32::MAX);
        assert_eq!(blow.attacker_stamina_after, 100);
    }
}
