use crate::battle::engine::BattleReport;
use crate::battle::scheduler::Side;
use serde::{Deserialize, Serialize};

/// One row of the results log.
///
/// For an inconclusive battle `winner`, `loser` and `winner_hp` are `None`,
/// and the `*_winner` / `*_loser` totals hold `fighter1` / `fighter2`
/// respectively. `total_misses` counts every turn that did not land, rests
/// included.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSummary {
    pub battle_id: u64,
    pub fighter1: String,
    pub fighter2: String,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub winner_hp: Option<i32>,
    pub turns: u32,
    pub total_damage_winner: i32,
    pub total_damage_loser: i32,
    pub total_misses: u32,
    pub crits_winner: u32,
    pub crits_loser: u32,
}

impl BattleSummary {
    pub fn from_report(report: &BattleReport) -> Self {
        let mut damage = [0i32; 2];
        let mut crits = [0u32; 2];
        let mut misses = 0u32;

        for event in report.moves.iter() {
            let side = event.actor.index();
            damage[side] = damage[side].saturating_add(event.damage_dealt);
            if event.critical {
                crits[side] += 1;
            }
            if !event.hit {
                misses += 1;
            }
        }

        // Order the per-side totals as (winner, loser), or (first, second) when undecided.
        let (lead, trail) = match report.outcome.winner() {
            Some(side) => (side, side.opponent()),
            None => (Side::First, Side::Second),
        };

        Self {
            battle_id: report.battle_id,
            fighter1: report.fighters[0].clone(),
            fighter2: report.fighters[1].clone(),
            winner: report.winner_name().map(str::to_string),
            loser: report.loser_name().map(str::to_string),
            winner_hp: report
                .outcome
                .winner()
                .map(|side| report.final_health[side.index()]),
            turns: report.turns,
            total_damage_winner: damage[lead.index()],
            total_damage_loser: damage[trail.index()],
            total_misses: misses,
            crits_winner: crits[lead.index()],
            crits_loser: crits[trail.index()],
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// True when `name` fought in this battle.
    pub fn involves(&self, name: &str) -> bool {
        self.fighter1 == name || self.fighter2 == name
    }
}
