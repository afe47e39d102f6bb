//! Text-producing arena commands shared by the CLI and the MCP server.
//!
//! An `ArenaSession` owns the roster, the persisted logs and the battle id
//! counter; each `*_display` method runs one command and returns the text a
//! user or tool client should see.

use crate::arena::{run_bracket, run_series, BracketReport, SeriesReport};
use crate::battle::engine::{simulate_battle, BattleReport};
use crate::battle::rng::SeededRng;
use crate::config::ArenaConfig;
use crate::errors::BattleResult;
use crate::roster::Roster;
use crate::stats::BalanceReport;
use crate::store::{next_battle_id, read_records, ArenaStore};
use crate::summary::BattleSummary;
use rand::Rng;
use schema::FighterTemplate;
use serde_json::{json, Value};
use std::fmt::Write as _;

pub struct ArenaSession {
    roster: Roster,
    config: ArenaConfig,
    store: Option<ArenaStore>,
    seed: u64,
    next_battle_id: u64,
}

impl ArenaSession {
    /// Loads the roster named by the config (or the built-in one) and, when
    /// `persist` is set, opens the move and result logs for appending.
    pub fn open(config: ArenaConfig, persist: bool) -> BattleResult<Self> {
        let roster = match &config.roster_path {
            Some(path) => Roster::load(path)?,
            None => Roster::builtin()?,
        };

        let recorded: Vec<BattleSummary> = read_records(&config.results_log)?;
        let next_battle_id = next_battle_id(&recorded);

        let store = if persist {
            Some(ArenaStore::open_or_create(
                &config.moves_log,
                &config.results_log,
            )?)
        } else {
            None
        };

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!(
            fighters = roster.len(),
            seed,
            next_battle_id,
            persist,
            "arena session opened"
        );

        Ok(Self {
            roster,
            config,
            store,
            seed,
            next_battle_id,
        })
    }

    /// A session over an in-memory roster that never touches the disk.
    pub fn ephemeral(roster: Roster, seed: u64) -> Self {
        Self {
            roster,
            config: ArenaConfig::default(),
            store: None,
            seed,
            next_battle_id: 1,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_battle_id(&self) -> u64 {
        self.next_battle_id
    }

    fn record<'a>(&mut self, reports: impl IntoIterator<Item = &'a BattleReport>) -> BattleResult<()> {
        if let Some(store) = self.store.as_mut() {
            for report in reports {
                store.record(report)?;
            }
            store.flush()?;
        }
        Ok(())
    }

    pub fn list_fighters_display(&self) -> String {
        list_fighters_display(&self.roster)
    }

    /// Runs one battle, persists it, and returns its move-by-move narration.
    pub fn simulate_battle_display(&mut self, first: &str, second: &str) -> BattleResult<String> {
        let first = self.roster.get(first)?.clone();
        let second = self.roster.get(second)?.clone();
        let battle_id = self.next_battle_id;

        let mut rng = SeededRng::for_battle(self.seed, battle_id);
        let report = simulate_battle(&first, &second, battle_id, &mut rng)?;
        self.next_battle_id += 1;
        self.record([&report])?;

        Ok(format_battle_report(&report))
    }

    pub fn run_series_display(
        &mut self,
        first: &str,
        second: &str,
        count: Option<u32>,
    ) -> BattleResult<String> {
        let first = self.roster.get(first)?.clone();
        let second = self.roster.get(second)?.clone();
        let count = count.unwrap_or(self.config.series_battles);

        let series = run_series(&first, &second, count, self.next_battle_id, self.seed)?;
        self.next_battle_id = series.next_battle_id(self.next_battle_id);
        self.record(&series.reports)?;

        Ok(format_series_report(&series))
    }

    pub fn run_bracket_display<S: AsRef<str>>(
        &mut self,
        names: &[S],
        fights_per_match: Option<u32>,
    ) -> BattleResult<String> {
        let entrants: Vec<FighterTemplate> = self.roster.select(names)?;
        let fights = fights_per_match.unwrap_or(self.config.fights_per_match);

        let bracket = run_bracket(&entrants, fights, self.next_battle_id, self.seed)?;
        self.next_battle_id = bracket.next_battle_id;
        let battles: Vec<&BattleReport> = bracket.battles().collect();
        self.record(battles)?;

        Ok(format_bracket_report(&bracket))
    }

    /// Balance statistics over everything recorded in the configured logs.
    pub fn stats_display(&mut self) -> BattleResult<String> {
        if let Some(store) = self.store.as_mut() {
            store.flush()?;
        }
        let moves = read_records(&self.config.moves_log)?;
        let results = read_records(&self.config.results_log)?;
        Ok(stats_display(&BalanceReport::build(&moves, &results)))
    }
}

/// Returns a table of every fighter with its class-adjusted stats.
pub fn list_fighters_display(roster: &Roster) -> String {
    let mut output = String::from("Available Fighters:\n");
    for (i, fighter) in roster.iter().enumerate() {
        let class = fighter
            .class
            .map(|class| class.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            output,
            "  {}. {} [{}] HP {} STR {} DEF {} SPD {} STA {} | crit {:.0}% x{:.1} | evade {:.0}%",
            i + 1,
            fighter.name,
            class,
            fighter.health,
            fighter.strength,
            fighter.defense,
            fighter.speed,
            fighter.stamina,
            fighter.critchance * 100.0,
            fighter.critmult,
            fighter.evasion * 100.0,
        );
    }
    output
}

pub fn format_battle_report(report: &BattleReport) -> String {
    let mut output = format!(
        "Battle #{}: {} vs {}\n",
        report.battle_id, report.fighters[0], report.fighters[1]
    );
    output.push_str(&report.moves.to_string());
    match report.outcome.winner() {
        Some(side) => {
            let _ = writeln!(
                output,
                "WINNER: {} with {} HP left after {} turns",
                report.fighter(side),
                report.final_health[side.index()],
                report.turns
            );
        }
        None => {
            let _ = writeln!(
                output,
                "No knockout after {} turns. The battle is a draw.",
                report.turns
            );
        }
    }
    output
}

pub fn format_series_report(series: &SeriesReport) -> String {
    let mut output = format!(
        "Series: {} vs {} ({} battles)\n",
        series.fighters[0],
        series.fighters[1],
        series.reports.len()
    );
    let _ = writeln!(output, "  {} wins: {}", series.fighters[0], series.wins[0]);
    let _ = writeln!(output, "  {} wins: {}", series.fighters[1], series.wins[1]);
    if series.draws > 0 {
        let _ = writeln!(output, "  draws: {}", series.draws);
    }
    if !series.reports.is_empty() {
        let average_turns = series.reports.iter().map(|r| r.turns as f64).sum::<f64>()
            / series.reports.len() as f64;
        let _ = writeln!(output, "  average turns: {:.1}", average_turns);
    }
    let _ = writeln!(output, "Leader: {}", series.leader_name());
    output
}

pub fn format_bracket_report(bracket: &BracketReport) -> String {
    let mut output = String::from("BRACKET TOURNAMENT\n");
    for round in &bracket.rounds {
        let _ = writeln!(output, "\nROUND {}", round.number);
        for m in &round.matches {
            let series = &m.series;
            let _ = writeln!(
                output,
                "  {} vs {} -> {} wins ({}-{})",
                series.fighters[0], series.fighters[1], m.winner, series.wins[0], series.wins[1]
            );
        }
        if let Some(bye) = &round.bye {
            let _ = writeln!(output, "  {} advances with a BYE", bye);
        }
    }
    let _ = writeln!(output, "\nCHAMPION: {}", bracket.champion);
    output
}

/// Renders participation, the win/loss table with verdicts, and the final
/// point of each win-rate series.
pub fn stats_display(report: &BalanceReport) -> String {
    if report.participation.is_empty() && report.records.is_empty() {
        return "No battles recorded yet. Run some battles first!".to_string();
    }

    let mut output = String::from("--- Fighter Participation ---\n");
    for row in &report.participation {
        let _ = writeln!(output, "  {:<12} {:>6} moves", row.fighter, row.total_moves);
    }

    output.push_str("\n--- Win / Loss ---\n");
    for record in &report.records {
        let _ = writeln!(
            output,
            "  {:<12} W {:>4}  L {:>4}  D {:>4}  win rate {:>5.1}%  balance {:.2}  {}",
            record.fighter,
            record.wins,
            record.losses,
            record.draws,
            record.win_rate * 100.0,
            record.balance_score,
            record.verdict
        );
    }

    if !report.win_rate_over_time.is_empty() {
        output.push_str("\n--- Win Rate Over Time ---\n");
        for series in &report.win_rate_over_time {
            let latest = series.points.last().copied().unwrap_or(0.0);
            let _ = writeln!(
                output,
                "  {:<12} {} fights, now {:.1}%",
                series.fighter,
                series.points.len(),
                latest * 100.0
            );
        }
    }
    output
}

/// Wraps a handler outcome in a JSON-RPC 2.0 envelope.
///
/// Notifications carry no `id` and get no reply, so this returns `None` for them.
pub fn jsonrpc_response(id: &Value, outcome: Result<Value, Value>) -> Option<Value> {
    if id.is_null() {
        return None;
    }
    Some(match outcome {
        Ok(result) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result
        }),
        Err(error) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": error
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ArenaError, BattleEngineError, RosterError};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session() -> ArenaSession {
        ArenaSession::ephemeral(Roster::builtin().unwrap(), 42)
    }

    #[test]
    fn test_list_fighters_shows_every_fighter() {
        let text = session().list_fighters_display();
        assert!(text.starts_with("Available Fighters:"));
        for name in ["Cheetah", "Retro", "Pixel", "Nova", "Blaze"] {
            assert!(text.contains(name), "{} missing from:\n{}", name, text);
        }
        assert!(text.contains("[Rogue]"));
    }

    #[test]
    fn test_battle_ids_advance_across_commands() {
        let mut session = session();

        let battle = session.simulate_battle_display("Cheetah", "Blaze").unwrap();
        assert!(battle.starts_with("Battle #1: Cheetah vs Blaze"));
        assert_eq!(session.next_battle_id(), 2);

        let series = session.run_series_display("Nova", "Pixel", Some(4)).unwrap();
        assert!(series.contains("(4 battles)"));
        assert_eq!(session.next_battle_id(), 6);

        let bracket = session
            .run_bracket_display(&["Cheetah", "Retro", "Pixel"], Some(1))
            .unwrap();
        assert!(bracket.contains("Pixel advances with a BYE"));
        assert!(bracket.contains("CHAMPION:"));
        assert_eq!(session.next_battle_id(), 8);
    }

    #[test]
    fn test_same_seed_same_narration() {
        let one = session().simulate_battle_display("Retro", "Nova").unwrap();
        let two = session().simulate_battle_display("Retro", "Nova").unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_unknown_fighter_and_bad_bracket_are_errors() {
        let mut session = session();
        assert!(matches!(
            session.simulate_battle_display("Cheetah", "Nobody"),
            Err(BattleEngineError::Roster(RosterError::UnknownFighter(_)))
        ));
        assert!(matches!(
            session.run_bracket_display(&["Cheetah"], None),
            Err(BattleEngineError::Arena(ArenaError::NotEnoughEntrants(1)))
        ));
    }

    #[test]
    fn test_persisted_session_feeds_stats_and_resumes_ids() {
        let dir = TempDir::new().unwrap();
        let config = ArenaConfig {
            moves_log: dir.path().join("battle_moves.jsonl"),
            results_log: dir.path().join("results.jsonl"),
            seed: Some(7),
            ..ArenaConfig::default()
        };

        {
            let mut session = ArenaSession::open(config.clone(), true).unwrap();
            assert_eq!(
                session.stats_display().unwrap(),
                "No battles recorded yet. Run some battles first!"
            );
            session.run_series_display("Cheetah", "Retro", Some(6)).unwrap();
            let stats = session.stats_display().unwrap();
            assert!(stats.contains("--- Win / Loss ---"));
            assert!(stats.contains("Cheetah"));
        }

        let reopened = ArenaSession::open(config, false).unwrap();
        assert_eq!(reopened.next_battle_id(), 7);
        assert_eq!(reopened.seed(), 7);
    }

    #[test]
    fn test_jsonrpc_notifications_get_no_reply() {
        let not_found = || Err(json!({"code": -32601, "message": "Method not found"}));

        assert_eq!(jsonrpc_response(&Value::Null, not_found()), None);
        assert_eq!(jsonrpc_response(&Value::Null, Ok(json!({}))), None);

        let reply = jsonrpc_response(&json!(7), not_found()).expect("request gets a reply");
        assert_eq!(reply["id"], json!(7));
        assert_eq!(reply["error"]["code"], json!(-32601));

        let reply = jsonrpc_response(&json!("abc"), Ok(json!({"tools": []}))).expect("reply");
        assert_eq!(reply, json!({"jsonrpc": "2.0", "id": "abc", "result": {"tools": []}}));
    }
}
