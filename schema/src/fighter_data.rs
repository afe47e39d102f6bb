use crate::FighterClass;
use serde::{Deserialize, Serialize};

/// An immutable roster entry.
///
/// Field names match the roster columns (`critchance`, `critmult`, ...) so a
/// roster file reads the same as the tabular exports downstream tools consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterTemplate {
    pub name: String,
    #[serde(default)]
    pub class: Option<FighterClass>,
    pub health: i32,
    pub strength: i32,
    pub defense: i32,
    pub speed: i32,
    pub stamina: i32,
    #[serde(default)]
    pub critchance: f64,
    #[serde(default = "default_critmult")]
    pub critmult: f64,
    #[serde(default)]
    pub evasion: f64,
    #[serde(default = "default_stamina_regen")]
    pub stamina_regen: i32,
    #[serde(default = "default_stamina_light")]
    pub stamina_light: i32,
    #[serde(default = "default_stamina_heavy")]
    pub stamina_heavy: i32,

    // Cosmetic; never read by the engine.
    #[serde(default)]
    pub sprite: String,
    #[serde(default = "default_sprite_scale")]
    pub sprite_scale: f64,
}

fn default_critmult() -> f64 {
    1.0
}

fn default_stamina_regen() -> i32 {
    2
}

fn default_stamina_light() -> i32 {
    8
}

fn default_stamina_heavy() -> i32 {
    16
}

fn default_sprite_scale() -> f64 {
    1.0
}

impl FighterTemplate {
    /// Creates a classless template with the given core stats and default
    /// values for everything else.
    pub fn new(
        name: impl Into<String>,
        health: i32,
        strength: i32,
        defense: i32,
        speed: i32,
        stamina: i32,
    ) -> Self {
        Self {
            name: name.into(),
            class: None,
            health,
            strength,
            defense,
            speed,
            stamina,
            critchance: 0.0,
            critmult: default_critmult(),
            evasion: 0.0,
            stamina_regen: default_stamina_regen(),
            stamina_light: default_stamina_light(),
            stamina_heavy: default_stamina_heavy(),
            sprite: String::new(),
            sprite_scale: default_sprite_scale(),
        }
    }
}
