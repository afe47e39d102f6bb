use crate::battle::scheduler::Side;
use schema::AttackKind;
use serde::{Deserialize, Serialize};

/// One resolved turn.
///
/// Field names double as the column names of the persisted move log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveEvent {
    pub battle_id: u64,
    /// Scheduler time at which the attacker acted.
    pub time: f64,
    pub turn: u32,
    /// Seat of the attacker. Names alone are ambiguous in a mirror match.
    pub actor: Side,
    pub attacker: String,
    pub defender: String,
    pub attack_type: AttackKind,
    pub stamina_cost: i32,
    pub attacker_stamina_before: i32,
    pub attacker_stamina_after_cost: i32,
    pub attacker_stamina_after: i32,
    pub defender_health_before: i32,
    pub defender_health_after: i32,
    pub hit: bool,
    pub damage_dealt: i32,
    pub critical: bool,
    pub message: String,
}

impl MoveEvent {
    /// True when this turn took the defender to zero health.
    pub fn is_knockout(&self) -> bool {
        self.hit && self.defender_health_after == 0 && self.defender_health_before > 0
    }

    pub fn is_skip(&self) -> bool {
        self.attack_type == AttackKind::Skip
    }

    pub fn is_dodge(&self) -> bool {
        !self.hit && !self.is_skip()
    }
}

/// The ordered, append-only sequence of events for one battle.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// let report = simulate_battle(&a, &b, 1, &mut rng)?;
/// println!("{}", report.moves);              // One line per turn
/// let finisher = report.moves.last();        // The knockout, if decided
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct MoveLog {
    events: Vec<MoveEvent>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: MoveEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[MoveEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&MoveEvent> {
        self.events.last()
    }

    /// Return true if the log contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<'a> IntoIterator for &'a MoveLog {
    type Item = &'a MoveEvent;
    type IntoIter = std::slice::Iter<'a, MoveEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl std::fmt::Display for MoveLog {
    /// One line per turn with its human-readable message.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  [{:>3}] {}", event.turn, event.message)?;
        }
        Ok(())
    }
}

pub(crate) fn skip_message(attacker: &str) -> String {
    format!("{} is exhausted and rests.", attacker)
}

pub(crate) fn dodge_message(attacker: &str, defender: &str) -> String {
    format!("{} dodges {}!", defender, attacker)
}

pub(crate) fn hit_message(
    attacker: &str,
    defender: &str,
    kind: AttackKind,
    damage: i32,
    critical: bool,
) -> String {
    format!(
        "{} uses {} on {} for {}{}!",
        attacker,
        kind,
        defender,
        damage,
        if critical { " (CRIT)" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_formats() {
        assert_eq!(skip_message("Blaze"), "Blaze is exhausted and rests.");
        assert_eq!(dodge_message("Blaze", "Cheetah"), "Cheetah dodges Blaze!");
        assert_eq!(
            hit_message("Nova", "Retro", AttackKind::Heavy, 17, false),
            "Nova uses heavy attack on Retro for 17!"
        );
        assert_eq!(
            hit_message("Nova", "Retro", AttackKind::TiredStrike, 4, true),
            "Nova uses tired_strike on Retro for 4 (CRIT)!"
        );
    }

    #[test]
    fn test_attack_kind_serializes_with_log_labels() {
        let json = serde_json::to_string(&AttackKind::Light).expect("serializes");
        assert_eq!(json, "\"light attack\"");
        let back: AttackKind = serde_json::from_str("\"tired_strike\"").expect("deserializes");
        assert_eq!(back, AttackKind::TiredStrike);
    }
}
