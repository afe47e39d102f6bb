#[cfg(test)]
mod tests {
    use crate::battle::engine::{BattleOutcome, MAX_TICKS};
    use crate::battle::tests::common::{neutral_rng, run_battle, TestFighterBuilder};
    use pretty_assertions::assert_eq;
    use schema::AttackKind;

    /// A fighter with 10 stamina and no regeneration against a harmless,
    /// bulky opponent: one light attack, one tired strike, then rest forever.
    fn drained_battle() -> crate::battle::engine::BattleReport {
        let tired = TestFighterBuilder::new("Sprinter")
            .with_stamina(10, 0)
            .with_costs(8, 16)
            .build();
        let sponge = TestFighterBuilder::new("Sponge")
            .with_health(1000)
            .with_strength(0)
            .with_costs(1, 1)
            .build();
        run_battle(&tired, &sponge, &mut neutral_rng())
    }

    #[test]
    fn test_attack_downgrades_to_tired_strike_then_rest() {
        let report = drained_battle();
        let events = report.moves.events();

        let opener = &events[0];
        assert_eq!(opener.attacker, "Sprinter");
        assert_eq!(opener.attack_type, AttackKind::Light);
        assert_eq!(opener.stamina_cost, 8);
        assert_eq!(opener.attacker_stamina_after_cost, 2);
        assert_eq!(opener.attacker_stamina_after, 2);
        assert_eq!(opener.damage_dealt, 10);

        let tired = &events[2];
        assert_eq!(tired.attacker, "Sprinter");
        assert_eq!(tired.attack_type, AttackKind::TiredStrike);
        assert_eq!(tired.stamina_cost, 4);
        assert_eq!(tired.attacker_stamina_before, 2);
        assert_eq!(tired.attacker_stamina_after_cost, 0);
        // floor(10 * 0.5)
        assert_eq!(tired.damage_dealt, 5);

        let rest = &events[4];
        assert_eq!(rest.attacker, "Sprinter");
        assert!(rest.is_skip());
        assert!(!rest.hit);
        assert_eq!(rest.stamina_cost, 0);
        assert_eq!(rest.damage_dealt, 0);
        assert_eq!(rest.defender_health_before, rest.defender_health_after);
        assert_eq!(rest.message, "Sprinter is exhausted and rests.");
    }

    #[test]
    fn test_resting_still_advances_the_clock() {
        let report = drained_battle();
        let events = report.moves.events();

        let sprinter_times: Vec<f64> = events
            .iter()
            .filter(|event| event.attacker == "Sprinter")
            .take(5)
            .map(|event| event.time)
            .collect();
        assert_eq!(sprinter_times, vec![0.0, 10.0, 20.0, 30.0, 40.0]);

        // Sponge keeps its own cadence while Sprinter rests.
        assert_eq!(events[5].attacker, "Sponge");
        assert_eq!(events[5].time, 20.0);
    }

    #[test]
    fn test_permanent_exhaustion_runs_to_the_tick_bound() {
        let report = drained_battle();

        assert_eq!(report.outcome, BattleOutcome::Inconclusive);
        assert_eq!(report.turns, MAX_TICKS);
        assert_eq!(report.moves.len(), MAX_TICKS as usize);
        assert_eq!(report.final_health, [100, 1000 - 15]);

        let skips = report.moves.iter().filter(|event| event.is_skip()).count();
        // Sprinter acts on every odd turn; only the first two are swings.
        assert_eq!(skips, (MAX_TICKS as usize) / 2 - 2);
    }
}
