//! Combat resolution system.
//!
//! Pure functions for resolving melee exchanges. The random roll is supplied
//! by the caller so every outcome is reproducible.
//!
//! - `calculate_damage`: `⌊U × max(atk − def, 0)⌋`
//! - `apply_damage`: hp reduction clamped at zero
//! - `resolve_attack`: both of the above plus the kill check

pub mod damage;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
