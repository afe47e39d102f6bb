use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The closed set of fighter classes a roster entry may carry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum FighterClass {
    Tank,
    Warrior,
    Mage,
    Rogue,
    Archer,
    Berserker,
}

impl fmt::Display for FighterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stat adjustments granted by a fighter class.
///
/// The `*_delta` fields are summed with the base stat. The remaining fields
/// replace the base value outright.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassModifiers {
    pub health_delta: i32,
    pub strength_delta: i32,
    pub defense_delta: i32,
    pub speed_delta: i32,
    pub stamina_delta: i32,
    pub evasion: f64,
    pub stamina_regen: i32,
    pub stamina_light: i32,
    pub stamina_heavy: i32,
}

impl FighterClass {
    /// Returns the stat modifier block for this class.
    pub fn modifiers(self) -> ClassModifiers {
        use FighterClass::*;

        match self {
            Tank => ClassModifiers {
                health_delta: 10,
                strength_delta: 0,
                defense_delta: 3,
                speed_delta: -2,
                stamina_delta: 10,
                evasion: 0.04,
                stamina_regen: 2,
                stamina_light: 8,
                stamina_heavy: 16,
            },
            Warrior => ClassModifiers {
                health_delta: 5,
                strength_delta: 2,
                defense_delta: 1,
                speed_delta: 0,
                stamina_delta: 5,
                evasion: 0.06,
                stamina_regen: 2,
                stamina_light: 8,
                stamina_heavy: 16,
            },
            Mage => ClassModifiers {
                health_delta: -5,
                strength_delta: 3,
                defense_delta: -2,
                speed_delta: 2,
                stamina_delta: -5,
                evasion: 0.12,
                stamina_regen: 3,
                stamina_light: 6,
                stamina_heavy: 12,
            },
            Rogue => ClassModifiers {
                health_delta: 0,
                strength_delta: 1,
                defense_delta: 0,
                speed_delta: 5,
                stamina_delta: 0,
                evasion: 0.18,
                stamina_regen: 4,
                stamina_light: 6,
                stamina_heavy: 12,
            },
            Archer => ClassModifiers {
                health_delta: 0,
                strength_delta: 2,
                defense_delta: 0,
                speed_delta: 3,
                stamina_delta: 0,
                evasion: 0.14,
                stamina_regen: 3,
                stamina_light: 7,
                stamina_heavy: 14,
            },
            Berserker => ClassModifiers {
                health_delta: 10,
                strength_delta: 4,
                defense_delta: -1,
                speed_delta: -1,
                stamina_delta: 5,
                evasion: 0.05,
                stamina_regen: 2,
                stamina_light: 10,
                stamina_heavy: 18,
            },
        }
    }

    /// Chance that a fighter of this class opts for a heavy attack.
    pub fn heavy_attack_probability(class: Option<FighterClass>) -> f64 {
        let mut probability = 0.25;
        match class {
            Some(FighterClass::Warrior) | Some(FighterClass::Berserker) => probability += 0.15,
            Some(FighterClass::Rogue) => probability -= 0.10,
            _ => {}
        }
        probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_class_tags_parse_by_variant_name() {
        assert_eq!(FighterClass::from_str("Rogue"), Ok(FighterClass::Rogue));
        assert_eq!(FighterClass::from_str("Berserker"), Ok(FighterClass::Berserker));
        assert!(FighterClass::from_str("Necromancer").is_err());
    }

    #[test]
    fn test_every_class_has_positive_stamina_costs() {
        for class in FighterClass::iter() {
            let mods = class.modifiers();
            assert!(mods.stamina_light > 0, "{} light cost", class);
            assert!(mods.stamina_heavy > mods.stamina_light, "{} heavy cost", class);
            assert!((0.0..=1.0).contains(&mods.evasion), "{} evasion", class);
        }
    }

    #[test]
    fn test_heavy_attack_probability_by_class() {
        let eps = 1e-12;
        assert!((FighterClass::heavy_attack_probability(None) - 0.25).abs() < eps);
        assert!(
            (FighterClass::heavy_attack_probability(Some(FighterClass::Warrior)) - 0.40).abs()
                < eps
        );
        assert!(
            (FighterClass::heavy_attack_probability(Some(FighterClass::Berserker)) - 0.40).abs()
                < eps
        );
        assert!(
            (FighterClass::heavy_attack_probability(Some(FighterClass::Rogue)) - 0.15).abs() < eps
        );
        assert!(
            (FighterClass::heavy_attack_probability(Some(FighterClass::Mage)) - 0.25).abs() < eps
        );
    }
}
