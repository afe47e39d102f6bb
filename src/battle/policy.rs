use crate::battle::rng::BattleRng;
use schema::{AttackKind, FighterClass, FighterTemplate};

pub const HEAVY_MULTIPLIER: f64 = 1.6;
pub const LIGHT_MULTIPLIER: f64 = 1.0;
pub const HEAVY_VARIANCE: (i32, i32) = (-3, 5);
pub const LIGHT_VARIANCE: (i32, i32) = (-1, 2);
pub const COST_JITTER: (i32, i32) = (-2, 2);

/// The attack an attacker intends to make, before affordability is checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackChoice {
    pub kind: AttackKind,
    pub cost: i32,
    pub multiplier: f64,
    /// Inclusive bounds of the damage roll added to `strength - defense`.
    pub variance: (i32, i32),
}

/// Picks light or heavy for the attacker and rolls the stamina cost.
///
/// Consumes two draws: the heavy/light roll, then the cost jitter.
pub fn choose_attack<R: BattleRng + ?Sized>(attacker: &FighterTemplate, rng: &mut R) -> AttackChoice {
    let heavy_chance = FighterClass::heavy_attack_probability(attacker.class);

    let (kind, base_cost, multiplier, variance) = if rng.unit("heavy attack roll") < heavy_chance {
        (
            AttackKind::Heavy,
            attacker.stamina_heavy,
            HEAVY_MULTIPLIER,
            HEAVY_VARIANCE,
        )
    } else {
        (
            AttackKind::Light,
            attacker.stamina_light,
            LIGHT_MULTIPLIER,
            LIGHT_VARIANCE,
        )
    };

    let jitter = rng.int_inclusive(COST_JITTER.0, COST_JITTER.1, "stamina cost jitter");

    AttackChoice {
        kind,
        cost: base_cost.saturating_add(jitter).max(1),
        multiplier,
        variance,
    }
}
