#[cfg(test)]
mod tests {
    use crate::battle::rng::SeededRng;
    use crate::battle::tests::common::{neutral_rng, run_battle, TestFighterBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_twice_as_fast_acts_twice_as_often() {
        // Neither side can hurt the other, so the battle runs the full bound.
        let quick = TestFighterBuilder::new("Quick")
            .with_speed(20)
            .with_strength(0)
            .build();
        let slow = TestFighterBuilder::new("Slow")
            .with_speed(10)
            .with_strength(0)
            .build();
        let mut rng = SeededRng::new(11);

        let report = run_battle(&quick, &slow, &mut rng);

        assert_eq!(report.moves.events()[0].attacker, "Quick");
        let quick_turns = report
            .moves
            .iter()
            .take(300)
            .filter(|event| event.attacker == "Quick")
            .count();
        assert_eq!(quick_turns, 200);
    }

    #[test]
    fn test_equal_speed_alternates_starting_with_first() {
        let first = TestFighterBuilder::new("First").build();
        let second = TestFighterBuilder::new("Second").build();

        let report = run_battle(&first, &second, &mut neutral_rng());

        for (index, event) in report.moves.iter().enumerate() {
            let expected = if index % 2 == 0 { "First" } else { "Second" };
            assert_eq!(event.attacker, expected, "turn {}", event.turn);
        }
    }

    #[test]
    fn test_first_listed_fighter_wins_the_opening_tie() {
        let a = TestFighterBuilder::new("A").with_speed(7).build();
        let b = TestFighterBuilder::new("B").with_speed(7).build();

        let forward = run_battle(&a, &b, &mut neutral_rng());
        let reversed = run_battle(&b, &a, &mut neutral_rng());

        assert_eq!(forward.moves.events()[0].attacker, "A");
        assert_eq!(reversed.moves.events()[0].attacker, "B");
    }

    #[test]
    fn test_event_times_never_decrease() {
        let quick = TestFighterBuilder::new("Quick").with_speed(13).build();
        let slow = TestFighterBuilder::new("Slow").with_speed(9).build();
        let mut rng = SeededRng::new(5);

        let report = run_battle(&quick, &slow, &mut rng);

        let times: Vec<f64> = report.moves.iter().map(|event| event.time).collect();
        assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
