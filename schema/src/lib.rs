// Fighter Arena Schema - Shared type definitions
// This crate contains the core enums and data records that are shared between
// the battle engine, the roster loader and the persistence layer.

// Re-export the main types
pub use battle_data::*;
pub use fighter_data::*;
pub use fighter_types::*;

pub mod battle_data;
pub mod fighter_data;
pub mod fighter_types;
