// In: src/lib.rs

//! Fighter Arena Battle Engine
//!
//! A deterministic, turn-based fighter battle simulator: speed-weighted turn
//! order, stamina-driven attack choice, evasion and critical hits, plus
//! series, brackets and balance statistics over persisted battle logs.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod arena;
pub mod battle;
pub mod config;
pub mod errors;
pub mod fighter;
pub mod mcp_interface;
pub mod roster;
pub mod stats;
pub mod store;
pub mod summary;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `fighter-arena` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the static fighter data definitions.
pub use schema::{AttackKind, ClassModifiers, FighterClass, FighterTemplate};

// --- From this crate's modules (`src/`) ---

// Core battle engine entry point and its outputs.
pub use battle::engine::{simulate_battle, BattleOutcome, BattleReport, MAX_TICKS};
pub use battle::events::{MoveEvent, MoveLog};
pub use battle::rng::{BattleRng, ScriptedRng, SeededRng};
pub use battle::scheduler::Side;

// Fighters, rosters and the arena runners built on the engine.
pub use arena::{run_bracket, run_series, BracketReport, SeriesReport};
pub use fighter::{apply_class_modifiers, validate_template, Combatant};
pub use roster::Roster;

// Persistence, statistics and configuration.
pub use config::ArenaConfig;
pub use stats::{BalanceReport, Verdict};
pub use store::{next_battle_id, ArenaStore, JsonLinesLog, MoveStore, ResultStore};
pub use summary::BattleSummary;

// Crate-specific error and result types.
pub use errors::{
    ArenaError, ArenaResult, BattleEngineError, BattleResult, ConfigError, FighterDataError,
    FighterDataResult, RosterError, RosterResult, StoreError, StoreResult,
};
