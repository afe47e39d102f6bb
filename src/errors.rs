use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Fighter Arena engine and its tooling
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// A fighter definition failed validation
    #[error("Fighter data error: {0}")]
    FighterData(#[from] FighterDataError),
    /// Roster loading or lookup failed
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Reading or writing a persisted log failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// A series or bracket could not be run
    #[error("Arena error: {0}")]
    Arena(#[from] ArenaError),
    /// The configuration file could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by fighter template validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FighterDataError {
    #[error("fighter name must not be empty")]
    EmptyName,
    #[error("{fighter}: {stat} must be positive, got {value}")]
    NonPositiveStat {
        fighter: String,
        stat: &'static str,
        value: i32,
    },
    #[error("{fighter}: {stat} must not be negative, got {value}")]
    NegativeStat {
        fighter: String,
        stat: &'static str,
        value: f64,
    },
    #[error("{fighter}: {stat} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange {
        fighter: String,
        stat: &'static str,
        value: f64,
    },
    #[error("{fighter}: {stat} must be finite")]
    NonFiniteStat { fighter: String, stat: &'static str },
}

/// Errors related to roster files and fighter lookup
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed roster data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("fighter '{0}' appears more than once in the roster")]
    DuplicateFighter(String),
    #[error("fighter '{0}' not found in roster")]
    UnknownFighter(String),
    #[error("invalid fighter: {0}")]
    InvalidFighter(#[from] FighterDataError),
}

/// Errors raised by the append-only log stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors related to series and bracket runs
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("a bracket needs at least two entrants, got {0}")]
    NotEnoughEntrants(usize),
    #[error("fights per match must be at least one")]
    NoFightsPerMatch,
    #[error("battle could not be simulated: {0}")]
    Engine(#[from] FighterDataError),
}

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using FighterDataError
pub type FighterDataResult<T> = Result<T, FighterDataError>;

/// Type alias for Results using RosterError
pub type RosterResult<T> = Result<T, RosterError>;

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Type alias for Results using ArenaError
pub type ArenaResult<T> = Result<T, ArenaError>;
