use crate::battle::engine::{simulate_battle, BattleReport};
use crate::battle::rng::SeededRng;
use crate::battle::scheduler::Side;
use crate::errors::{ArenaError, ArenaResult};
use rayon::prelude::*;
use schema::FighterTemplate;
use serde::{Deserialize, Serialize};

/// Repeated battles between the same two fighters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeriesReport {
    pub fighters: [String; 2],
    pub reports: Vec<BattleReport>,
    /// Wins indexed by `Side::index`.
    pub wins: [u32; 2],
    pub draws: u32,
}

impl SeriesReport {
    /// The side with more wins. A tie goes to the first fighter.
    pub fn leader(&self) -> Side {
        if self.wins[0] >= self.wins[1] {
            Side::First
        } else {
            Side::Second
        }
    }

    pub fn leader_name(&self) -> &str {
        &self.fighters[self.leader().index()]
    }

    /// One past the last battle id used by this series.
    pub fn next_battle_id(&self, first_battle_id: u64) -> u64 {
        first_battle_id + self.reports.len() as u64
    }
}

/// Runs `count` battles with consecutive ids starting at `first_battle_id`.
///
/// Battles run in parallel. Each draws from its own stream derived from `seed`
/// and its battle id, and reports come back in id order, so the result is the
/// same as running them one after another.
pub fn run_series(
    first: &FighterTemplate,
    second: &FighterTemplate,
    count: u32,
    first_battle_id: u64,
    seed: u64,
) -> ArenaResult<SeriesReport> {
    let reports = (0..count as u64)
        .into_par_iter()
        .map(|offset| {
            let battle_id = first_battle_id + offset;
            let mut rng = SeededRng::for_battle(seed, battle_id);
            simulate_battle(first, second, battle_id, &mut rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut wins = [0u32; 2];
    let mut draws = 0u32;
    for report in &reports {
        match report.outcome.winner() {
            Some(side) => wins[side.index()] += 1,
            None => draws += 1,
        }
    }

    tracing::debug!(
        first = %first.name,
        second = %second.name,
        count,
        first_wins = wins[0],
        second_wins = wins[1],
        draws,
        "series finished"
    );

    Ok(SeriesReport {
        fighters: [first.name.clone(), second.name.clone()],
        reports,
        wins,
        draws,
    })
}

/// One pairing inside a bracket round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BracketMatch {
    pub series: SeriesReport,
    pub winner: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BracketRound {
    pub number: u32,
    pub matches: Vec<BracketMatch>,
    /// The odd entrant out, advanced without fighting.
    pub bye: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BracketReport {
    pub rounds: Vec<BracketRound>,
    pub champion: String,
    /// One past the last battle id the bracket used.
    pub next_battle_id: u64,
}

impl BracketReport {
    /// Every battle fought, in battle id order.
    pub fn battles(&self) -> impl Iterator<Item = &BattleReport> {
        self.rounds
            .iter()
            .flat_map(|round| round.matches.iter())
            .flat_map(|m| m.series.reports.iter())
    }
}

/// Single-elimination tournament in entrant order.
///
/// Entrants pair up as (0, 1), (2, 3), ...; an odd one out advances with a
/// bye. Each match is a series of `fights_per_match` battles.
pub fn run_bracket(
    entrants: &[FighterTemplate],
    fights_per_match: u32,
    first_battle_id: u64,
    seed: u64,
) -> ArenaResult<BracketReport> {
    if entrants.len() < 2 {
        return Err(ArenaError::NotEnoughEntrants(entrants.len()));
    }
    if fights_per_match == 0 {
        return Err(ArenaError::NoFightsPerMatch);
    }

    let mut battle_id = first_battle_id;
    let mut remaining: Vec<&FighterTemplate> = entrants.iter().collect();
    let mut rounds = Vec::new();

    while remaining.len() > 1 {
        let number = rounds.len() as u32 + 1;
        let mut advancing = Vec::with_capacity(remaining.len() / 2 + 1);
        let mut matches = Vec::with_capacity(remaining.len() / 2);
        let mut bye = None;

        for pair in remaining.chunks(2) {
            match *pair {
                [first, second] => {
                    let series = run_series(first, second, fights_per_match, battle_id, seed)?;
                    battle_id = series.next_battle_id(battle_id);
                    let winner = match series.leader() {
                        Side::First => first,
                        Side::Second => second,
                    };
                    tracing::debug!(
                        round = number,
                        first = %first.name,
                        second = %second.name,
                        winner = %winner.name,
                        "bracket match decided"
                    );
                    advancing.push(winner);
                    matches.push(BracketMatch {
                        winner: winner.name.clone(),
                        series,
                    });
                }
                ref rest => {
                    for &solo in rest {
                        tracing::debug!(round = number, fighter = %solo.name, "advances with a bye");
                        advancing.push(solo);
                        bye = Some(solo.name.clone());
                    }
                }
            }
        }

        rounds.push(BracketRound {
            number,
            matches,
            bye,
        });
        remaining = advancing;
    }

    let champion = remaining
        .first()
        .map(|fighter| fighter.name.clone())
        .ok_or(ArenaError::NotEnoughEntrants(0))?;

    Ok(BracketReport {
        rounds,
        champion,
        next_battle_id: battle_id,
    })
}
