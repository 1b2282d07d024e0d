//! Traits describing read-only session inputs.
//!
//! Oracles expose item definitions, randomness and tunables. The [`Env`]
//! aggregate bundles them so the engine can access everything it needs without
//! hard coupling to concrete implementations.
mod error;
mod items;
mod rng;

pub use error::OracleError;
pub use items::{ItemDefinition, ItemOracle};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the engine and action pipeline.
pub struct Env<'a, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    items: Option<&'a I>,
    rng: Option<&'a R>,
    config: Option<&'a GameConfig>,
}

impl<I, R> Clone for Env<'_, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, R> Copy for Env<'_, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn ItemOracle + 'a, dyn RngOracle + 'a>;

impl<'a, I, R> Env<'a, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(items: Option<&'a I>, rng: Option<&'a R>, config: Option<&'a GameConfig>) -> Self {
        Self { items, rng, config }
    }

    pub fn with_all(items: &'a I, rng: &'a R, config: &'a GameConfig) -> Self {
        Self::new(Some(items), Some(rng), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            items: None,
            rng: None,
            config: None,
        }
    }

    /// Returns the ItemOracle, or an error if not available.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the GameConfig, or an error if not available.
    pub fn config(&self) -> Result<&'a GameConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, I, R> Env<'a, I, R>
where
    I: ItemOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(items, rng, self.config)
    }
}
