//! Item registry and crafting resolver.
//!
//! Recipes are keyed by the ascending, `+`-joined list of the handles that
//! make them (`"1+3+20"`), so any permutation of the same multiset resolves to
//! the same item.

mod registry;
mod resolver;

pub use registry::{ItemRegistry, RecipeKey, RegistryError};
pub use resolver::{CraftError, CraftOutcome, craft, resolve};
