use crate::errors::{FighterDataError, FighterDataResult};
use schema::FighterTemplate;

/// Applies the class modifier block to a base template.
///
/// Health, strength, defense, speed and stamina are summed with the class
/// deltas; evasion, stamina regen and the light/heavy stamina costs are
/// replaced by the class values. A template without a class is returned as is.
pub fn apply_class_modifiers(template: &FighterTemplate) -> FighterTemplate {
    let mut modified = template.clone();
    let Some(class) = template.class else {
        return modified;
    };
    let mods = class.modifiers();

    modified.health = modified.health.saturating_add(mods.health_delta);
    modified.strength = modified.strength.saturating_add(mods.strength_delta);
    modified.defense = modified.defense.saturating_add(mods.defense_delta);
    modified.speed = modified.speed.saturating_add(mods.speed_delta);
    modified.stamina = modified.stamina.saturating_add(mods.stamina_delta);

    modified.evasion = mods.evasion;
    modified.stamina_regen = mods.stamina_regen;
    modified.stamina_light = mods.stamina_light;
    modified.stamina_heavy = mods.stamina_heavy;

    modified
}

/// Checks that a template can be simulated without degenerate arithmetic.
pub fn validate_template(template: &FighterTemplate) -> FighterDataResult<()> {
    if template.name.trim().is_empty() {
        return Err(FighterDataError::EmptyName);
    }
    let name = &template.name;

    let positive = [
        ("health", template.health),
        ("speed", template.speed),
        ("stamina", template.stamina),
        ("stamina_light", template.stamina_light),
        ("stamina_heavy", template.stamina_heavy),
    ];
    for (stat, value) in positive {
        if value <= 0 {
            return Err(FighterDataError::NonPositiveStat {
                fighter: name.clone(),
                stat,
                value,
            });
        }
    }

    let non_negative = [
        ("strength", template.strength),
        ("defense", template.defense),
        ("stamina_regen", template.stamina_regen),
    ];
    for (stat, value) in non_negative {
        if value < 0 {
            return Err(FighterDataError::NegativeStat {
                fighter: name.clone(),
                stat,
                value: value as f64,
            });
        }
    }

    let probabilities = [
        ("critchance", template.critchance),
        ("evasion", template.evasion),
    ];
    for (stat, value) in probabilities {
        if !value.is_finite() {
            return Err(FighterDataError::NonFiniteStat {
                fighter: name.clone(),
                stat,
            });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(FighterDataError::ProbabilityOutOfRange {
                fighter: name.clone(),
                stat,
                value,
            });
        }
    }

    if !template.critmult.is_finite() {
        return Err(FighterDataError::NonFiniteStat {
            fighter: name.clone(),
            stat: "critmult",
        });
    }
    if template.critmult < 0.0 {
        return Err(FighterDataError::NegativeStat {
            fighter: name.clone(),
            stat: "critmult",
            value: template.critmult,
        });
    }

    Ok(())
}

/// A battle-scoped, mutable copy of a fighter.
///
/// Health and stamina never leave `[0, max]`; every mutation goes through the
/// clamping helpers below.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    template: FighterTemplate,
    health: i32,
    stamina: i32,
}

impl Combatant {
    /// Creates a combatant at full health and stamina.
    pub fn clone_for_battle(template: &FighterTemplate) -> Self {
        let mut combatant = Self {
            template: template.clone(),
            health: 0,
            stamina: 0,
        };
        combatant.reset_for_battle();
        combatant
    }

    pub fn reset_for_battle(&mut self) {
        self.health = self.max_health();
        self.stamina = self.max_stamina();
    }

    pub fn template(&self) -> &FighterTemplate {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.template.health
    }

    pub fn stamina(&self) -> i32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> i32 {
        self.template.stamina
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Removes health, never going below zero. Returns the new health.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        self.health = self.health.saturating_sub(damage.max(0)).max(0);
        self.health
    }

    /// Sets stamina to `value + regen`, clamped to `[0, max_stamina]`. The sum
    /// saturates, so any regen that passes validation is safe.
    ///
    /// The attacker regenerates from its post-cost stamina, the defender from
    /// its current stamina; both go through here.
    pub fn regenerate_from(&mut self, value: i32) -> i32 {
        self.stamina = value
            .saturating_add(self.template.stamina_regen)
            .clamp(0, self.max_stamina());
        self.stamina
    }

    pub fn regenerate(&mut self) -> i32 {
        self.regenerate_from(self.stamina)
    }

    #[cfg(test)]
    pub(crate) fn set_stamina_for_test(&mut self, stamina: i32) {
        self.stamina = stamina.clamp(0, self.max_stamina());
    }

    #[cfg(test)]
    pub(crate) fn set_health_for_test(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health());
    }
}
