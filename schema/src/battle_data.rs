use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of action a combatant took on its turn.
///
/// Serialized names are the labels used in persisted move logs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    #[serde(rename = "light attack")]
    Light,
    #[serde(rename = "heavy attack")]
    Heavy,
    /// Reduced-power strike used when stamina cannot cover the chosen attack.
    #[serde(rename = "tired_strike")]
    TiredStrike,
    /// Fully exhausted; the combatant rests instead of attacking.
    #[serde(rename = "skip")]
    Skip,
}

impl AttackKind {
    pub fn label(self) -> &'static str {
        match self {
            AttackKind::Light => "light attack",
            AttackKind::Heavy => "heavy attack",
            AttackKind::TiredStrike => "tired_strike",
            AttackKind::Skip => "skip",
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
