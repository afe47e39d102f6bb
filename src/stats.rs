//! Balance statistics computed from the persisted move and result logs.

use crate::battle::events::MoveEvent;
use crate::summary::BattleSummary;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_DECIDED_FIGHTS: u32 = 5;
pub const OVERPOWERED_WIN_RATE: f64 = 0.65;
pub const UNDERPOWERED_WIN_RATE: f64 = 0.35;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub fighter: String,
    pub total_moves: usize,
}

/// Total moves recorded per attacker, most active first.
pub fn participation(moves: &[MoveEvent]) -> Vec<Participation> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in moves {
        *counts.entry(event.attacker.as_str()).or_default() += 1;
    }

    let mut rows: Vec<Participation> = counts
        .into_iter()
        .map(|(fighter, total_moves)| Participation {
            fighter: fighter.to_string(),
            total_moves,
        })
        .collect();
    // Stable sort keeps names alphabetical within equal counts.
    rows.sort_by_key(|row| Reverse(row.total_moves));
    rows
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TooFewBattles,
    LikelyOverpowered,
    LikelyUnderpowered,
    Balanced,
}

impl Verdict {
    pub fn from_record(decided: u32, win_rate: f64) -> Self {
        if decided < MIN_DECIDED_FIGHTS {
            Verdict::TooFewBattles
        } else if win_rate > OVERPOWERED_WIN_RATE {
            Verdict::LikelyOverpowered
        } else if win_rate < UNDERPOWERED_WIN_RATE {
            Verdict::LikelyUnderpowered
        } else {
            Verdict::Balanced
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Verdict::TooFewBattles => "too few battles",
            Verdict::LikelyOverpowered => "likely overpowered",
            Verdict::LikelyUnderpowered => "likely underpowered",
            Verdict::Balanced => "balanced",
        };
        write!(f, "{}", text)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WinLossRecord {
    pub fighter: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Decided fights only; draws are tracked separately.
    pub total: u32,
    pub win_rate: f64,
    /// Distance of the win rate from an even 50%.
    pub balance_score: f64,
    pub verdict: Verdict,
}

/// Win/loss table across every recorded battle, best win rate first.
pub fn win_loss_table(results: &[BattleSummary]) -> Vec<WinLossRecord> {
    #[derive(Default)]
    struct Tally {
        wins: u32,
        losses: u32,
        draws: u32,
    }

    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for summary in results {
        match (&summary.winner, &summary.loser) {
            (Some(winner), Some(loser)) => {
                tallies.entry(winner).or_default().wins += 1;
                tallies.entry(loser).or_default().losses += 1;
            }
            _ => {
                tallies.entry(&summary.fighter1).or_default().draws += 1;
                if summary.fighter2 != summary.fighter1 {
                    tallies.entry(&summary.fighter2).or_default().draws += 1;
                }
            }
        }
    }

    let mut rows: Vec<WinLossRecord> = tallies
        .into_iter()
        .map(|(fighter, tally)| {
            let total = tally.wins + tally.losses;
            let win_rate = if total > 0 {
                tally.wins as f64 / total as f64
            } else {
                0.0
            };
            WinLossRecord {
                fighter: fighter.to_string(),
                wins: tally.wins,
                losses: tally.losses,
                draws: tally.draws,
                total,
                win_rate,
                balance_score: (win_rate - 0.5).abs(),
                verdict: Verdict::from_record(total, win_rate),
            }
        })
        .collect();
    rows.sort_by_key(|row| Reverse(OrderedFloat(row.win_rate)));
    rows
}

/// Cumulative win rate for one fighter after each decided fight it took part in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WinRateSeries {
    pub fighter: String,
    pub points: Vec<f64>,
}

/// Win-rate-over-time series for every fighter that has won at least once,
/// in battle id order.
pub fn win_rate_over_time(results: &[BattleSummary]) -> Vec<WinRateSeries> {
    let mut ordered: Vec<&BattleSummary> = results.iter().filter(|s| !s.is_draw()).collect();
    ordered.sort_by_key(|summary| summary.battle_id);

    let mut winners: Vec<&str> = ordered
        .iter()
        .filter_map(|summary| summary.winner.as_deref())
        .collect();
    winners.sort_unstable();
    winners.dedup();

    winners
        .into_iter()
        .map(|fighter| {
            let mut wins = 0u32;
            let points = ordered
                .iter()
                .filter(|summary| summary.involves(fighter))
                .enumerate()
                .map(|(index, summary)| {
                    if summary.winner.as_deref() == Some(fighter) {
                        wins += 1;
                    }
                    wins as f64 / (index + 1) as f64
                })
                .collect();
            WinRateSeries {
                fighter: fighter.to_string(),
                points,
            }
        })
        .collect()
}

/// Everything the balance report prints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub participation: Vec<Participation>,
    pub records: Vec<WinLossRecord>,
    pub win_rate_over_time: Vec<WinRateSeries>,
}

impl BalanceReport {
    pub fn build(moves: &[MoveEvent], results: &[BattleSummary]) -> Self {
        Self {
            participation: participation(moves),
            records: win_loss_table(results),
            win_rate_over_time: win_rate_over_time(results),
        }
    }
}
