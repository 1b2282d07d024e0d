//! Action provider implementations for non-player entities.

pub mod ai;

pub use ai::{AiProvider, AiTable, ChaseAi, CreatureAi};
