use crate::battle::events::MoveLog;
use crate::battle::policy::choose_attack;
use crate::battle::resolution::{resolve_turn, TurnContext};
use crate::battle::rng::BattleRng;
use crate::battle::scheduler::{Side, TurnScheduler};
use crate::errors::FighterDataResult;
use crate::fighter::{validate_template, Combatant};
use schema::FighterTemplate;
use serde::{Deserialize, Serialize};

/// Safety bound on loop iterations. Not a gameplay rule: a battle that reaches
/// it is reported as inconclusive.
pub const MAX_TICKS: u32 = 3000;

/// How a simulated battle ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// One side reached zero health.
    Decided { winner: Side },
    /// The tick bound was hit with both sides still standing.
    Inconclusive,
}

impl BattleOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            BattleOutcome::Decided { winner } => Some(winner),
            BattleOutcome::Inconclusive => None,
        }
    }
}

/// Everything a caller needs from one simulated battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleReport {
    pub battle_id: u64,
    /// Fighter names, indexed by `Side::index`.
    pub fighters: [String; 2],
    pub moves: MoveLog,
    pub turns: u32,
    pub outcome: BattleOutcome,
    pub final_health: [i32; 2],
}

impl BattleReport {
    pub fn fighter(&self, side: Side) -> &str {
        &self.fighters[side.index()]
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.outcome.winner().map(|side| self.fighter(side))
    }

    pub fn loser_name(&self) -> Option<&str> {
        self.outcome
            .winner()
            .map(|side| self.fighter(side.opponent()))
    }

    pub fn is_inconclusive(&self) -> bool {
        self.outcome == BattleOutcome::Inconclusive
    }
}

/// Simulates one battle between two fighters to completion.
///
/// The fighters are validated first; nothing else can fail. The same
/// templates, battle id and random stream always produce the same report.
pub fn simulate_battle<R: BattleRng + ?Sized>(
    first: &FighterTemplate,
    second: &FighterTemplate,
    battle_id: u64,
    rng: &mut R,
) -> FighterDataResult<BattleReport> {
    validate_template(first)?;
    validate_template(second)?;

    let mut combatants = [
        Combatant::clone_for_battle(first),
        Combatant::clone_for_battle(second),
    ];
    for combatant in combatants.iter_mut() {
        combatant.reset_for_battle();
    }
    let mut scheduler = TurnScheduler::new(first.speed, second.speed);

    tracing::debug!(
        battle_id,
        first = %first.name,
        second = %second.name,
        "battle started"
    );

    let mut moves = MoveLog::new();
    let mut turn: u32 = 0;
    let mut tick: u32 = 0;

    while combatants.iter().all(Combatant::is_alive) && tick < MAX_TICKS {
        tick += 1;
        turn += 1;

        let (actor, time) = scheduler.next_actor();
        let choice = choose_attack(combatants[actor.index()].template(), rng);
        let ctx = TurnContext {
            battle_id,
            time,
            turn,
        };
        let event = resolve_turn(&mut combatants, &mut scheduler, actor, choice, ctx, rng);
        moves.push(event);
    }

    let outcome = if !combatants[1].is_alive() {
        BattleOutcome::Decided {
            winner: Side::First,
        }
    } else if !combatants[0].is_alive() {
        BattleOutcome::Decided {
            winner: Side::Second,
        }
    } else {
        tracing::warn!(battle_id, ticks = tick, "battle hit the tick bound without a knockout");
        BattleOutcome::Inconclusive
    };

    tracing::debug!(battle_id, turns = turn, ?outcome, "battle finished");

    Ok(BattleReport {
        battle_id,
        fighters: [first.name.clone(), second.name.clone()],
        moves,
        turns: turn,
        outcome,
        final_health: [combatants[0].health(), combatants[1].health()],
    })
}
