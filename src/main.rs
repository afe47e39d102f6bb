//! Fighter Arena command-line runner.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fighter_arena::config::{ArenaConfig, DEFAULT_CONFIG_PATH};
use fighter_arena::mcp_interface::ArenaSession;
use fighter_arena::BattleResult;
use tracing_subscriber::EnvFilter;

/// Fighter Arena - deterministic turn-based fighter battles
#[derive(Parser, Debug)]
#[command(name = "fighter-arena")]
#[command(about = "Simulate fighter battles, series and brackets, and report balance stats")]
struct Args {
    /// Arena config file (RON)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Roster file (RON), overriding the config
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Base random seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Do not append to the move and result logs
    #[arg(long)]
    no_persist: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the fighters in the roster
    Roster,
    /// Run one battle and print every move
    Fight { first: String, second: String },
    /// Run repeated battles between two fighters
    Series {
        first: String,
        second: String,
        /// Number of battles (defaults to the config value)
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
    /// Run a single-elimination bracket in the given order
    Bracket {
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,
        /// Battles per match (defaults to the config value)
        #[arg(long)]
        fights_per_match: Option<u32>,
    },
    /// Print balance statistics from the recorded logs
    Stats,
}

fn run(args: Args) -> BattleResult<String> {
    let mut config = ArenaConfig::load(&args.config)?;
    if let Some(roster) = args.roster {
        config.roster_path = Some(roster);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let persist = !args.no_persist && !matches!(args.command, Command::Roster | Command::Stats);
    let mut session = ArenaSession::open(config, persist)?;

    match args.command {
        Command::Roster => Ok(session.list_fighters_display()),
        Command::Fight { first, second } => session.simulate_battle_display(&first, &second),
        Command::Series {
            first,
            second,
            count,
        } => session.run_series_display(&first, &second, count),
        Command::Bracket {
            names,
            fights_per_match,
        } => session.run_bracket_display(&names, fights_per_match),
        Command::Stats => session.stats_display(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fighter_arena=info")),
        )
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    match run(args) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
