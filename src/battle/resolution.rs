use crate::battle::events::{dodge_message, hit_message, skip_message, MoveEvent};
use crate::battle::policy::AttackChoice;
use crate::battle::rng::BattleRng;
use crate::battle::scheduler::{Side, TurnScheduler};
use crate::fighter::Combatant;
use schema::AttackKind;

/// Stamina at or above which an attacker that cannot afford its attack still
/// swings with a tired strike instead of resting.
pub const TIRED_STRIKE_MIN_STAMINA: i32 = 2;
pub const TIRED_STRIKE_MULTIPLIER: f64 = 0.5;
pub const TIRED_STRIKE_VARIANCE: (i32, i32) = (-1, 1);

/// Bookkeeping for the event emitted by one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnContext {
    pub battle_id: u64,
    pub time: f64,
    pub turn: u32,
}

/// Downgrades an unaffordable attack.
///
/// Returns `None` when the attacker is fully exhausted and must rest.
pub fn apply_exhaustion(stamina: i32, choice: AttackChoice) -> Option<AttackChoice> {
    if stamina >= choice.cost {
        return Some(choice);
    }
    if stamina >= TIRED_STRIKE_MIN_STAMINA {
        return Some(AttackChoice {
            kind: AttackKind::TiredStrike,
            cost: (choice.cost / 2).max(1),
            multiplier: TIRED_STRIKE_MULTIPLIER,
            variance: TIRED_STRIKE_VARIANCE,
        });
    }
    None
}

/// Damage before the defender's health is touched.
pub fn compute_damage(
    strength: i32,
    defense: i32,
    roll: i32,
    multiplier: f64,
    crit_multiplier: Option<f64>,
) -> i32 {
    let raw = strength.saturating_sub(defense).saturating_add(roll).max(0);
    let scaled = raw as f64 * multiplier * crit_multiplier.unwrap_or(1.0);
    (scaled.floor() as i32).max(0)
}

/// Resolves the actor's turn against the other combatant and advances the
/// actor's scheduler accumulator.
///
/// Both combatants regenerate stamina every turn, including rest turns.
pub fn resolve_turn<R: BattleRng + ?Sized>(
    combatants: &mut [Combatant; 2],
    scheduler: &mut TurnScheduler,
    actor: Side,
    choice: AttackChoice,
    ctx: TurnContext,
    rng: &mut R,
) -> MoveEvent {
    let [first, second] = combatants;
    let (attacker, defender) = match actor {
        Side::First => (first, second),
        Side::Second => (second, first),
    };

    let stamina_before = attacker.stamina();
    let health_before = defender.health();

    let Some(choice) = apply_exhaustion(stamina_before, choice) else {
        let stamina_after = attacker.regenerate_from(stamina_before);
        defender.regenerate();
        scheduler.advance(actor);

        tracing::trace!(turn = ctx.turn, attacker = attacker.name(), "exhausted, resting");
        return MoveEvent {
            battle_id: ctx.battle_id,
            time: ctx.time,
            turn: ctx.turn,
            actor,
            attacker: attacker.name().to_string(),
            defender: defender.name().to_string(),
            attack_type: AttackKind::Skip,
            stamina_cost: 0,
            attacker_stamina_before: stamina_before,
            attacker_stamina_after_cost: stamina_before,
            attacker_stamina_after: stamina_after,
            defender_health_before: health_before,
            defender_health_after: defender.health(),
            hit: false,
            damage_dealt: 0,
            critical: false,
            message: skip_message(attacker.name()),
        };
    };

    let stamina_after_cost = stamina_before.saturating_sub(choice.cost).max(0);

    let dodged = rng.unit("evasion roll") < defender.template().evasion;

    let (damage, critical, message) = if dodged {
        (0, false, dodge_message(attacker.name(), defender.name()))
    } else {
        let roll = rng.int_inclusive(choice.variance.0, choice.variance.1, "damage variance");
        let critical = rng.unit("critical roll") < attacker.template().critchance;
        let damage = compute_damage(
            attacker.template().strength,
            defender.template().defense,
            roll,
            choice.multiplier,
            critical.then_some(attacker.template().critmult),
        );
        defender.take_damage(damage);
        let message = hit_message(attacker.name(), defender.name(), choice.kind, damage, critical);
        (damage, critical, message)
    };

    let stamina_after = attacker.regenerate_from(stamina_after_cost);
    defender.regenerate();
    scheduler.advance(actor);

    tracing::trace!(
        turn = ctx.turn,
        attacker = attacker.name(),
        kind = %choice.kind,
        damage,
        critical,
        dodged,
        "turn resolved"
    );

    MoveEvent {
        battle_id: ctx.battle_id,
        time: ctx.time,
        turn: ctx.turn,
        actor,
        attacker: attacker.name().to_string(),
        defender: defender.name().to_string(),
        attack_type: choice.kind,
        stamina_cost: choice.cost,
        attacker_stamina_before: stamina_before,
        attacker_stamina_after_cost: stamina_after_cost,
        attacker_stamina_after: stamina_after,
        defender_health_before: health_before,
        defender_health_after: defender.health(),
        hit: !dodged,
        damage_dealt: damage,
        critical,
        message,
    }
}
