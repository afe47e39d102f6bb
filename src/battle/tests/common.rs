use crate::battle::engine::{simulate_battle, BattleReport};
use crate::battle::rng::{BattleRng, ScriptedRng};
use schema::{FighterClass, FighterTemplate};

/// A builder for creating test fighters with common defaults.
///
/// Defaults describe a plain fighter that never dodges and never crits, so
/// scripted streams only have to account for the draws a test cares about.
///
/// # Example
/// ```ignore
/// let fighter = TestFighterBuilder::new("Cheetah")
///     .with_speed(20)
///     .with_evasion(1.0)
///     .build();
/// ```
pub struct TestFighterBuilder {
    template: FighterTemplate,
}

impl TestFighterBuilder {
    /// Creates a builder with 100 health, 20 strength, 10 defense, 10 speed and
    /// 100 stamina.
    pub fn new(name: &str) -> Self {
        Self {
            template: FighterTemplate::new(name, 100, 20, 10, 10, 100),
        }
    }

    pub fn with_class(mut self, class: FighterClass) -> Self {
        self.template.class = Some(class);
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.template.health = health;
        self
    }

    pub fn with_strength(mut self, strength: i32) -> Self {
        self.template.strength = strength;
        self
    }

    pub fn with_defense(mut self, defense: i32) -> Self {
        self.template.defense = defense;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.template.speed = speed;
        self
    }

    pub fn with_stamina(mut self, stamina: i32, regen: i32) -> Self {
        self.template.stamina = stamina;
        self.template.stamina_regen = regen;
        self
    }

    pub fn with_costs(mut self, light: i32, heavy: i32) -> Self {
        self.template.stamina_light = light;
        self.template.stamina_heavy = heavy;
        self
    }

    pub fn with_evasion(mut self, evasion: f64) -> Self {
        self.template.evasion = evasion;
        self
    }

    pub fn with_crit(mut self, chance: f64, multiplier: f64) -> Self {
        self.template.critchance = chance;
        self.template.critmult = multiplier;
        self
    }

    pub fn build(self) -> FighterTemplate {
        self.template
    }
}

/// A stream that always rolls 0.4.
///
/// For classless fighters that means: light attack, no cost jitter, no dodge
/// (evasion < 0.4), a variance roll of exactly 0 for every band, and no crit
/// (crit chance < 0.4).
pub fn neutral_rng() -> ScriptedRng {
    ScriptedRng::cycling(vec![0.4])
}

/// Runs a battle and fails the test on a validation error.
pub fn run_battle<R: BattleRng + ?Sized>(
    first: &FighterTemplate,
    second: &FighterTemplate,
    rng: &mut R,
) -> BattleReport {
    match simulate_battle(first, second, 1, rng) {
        Ok(report) => report,
        Err(err) => panic!("Expected a battle report but got error: {}", err),
    }
}
