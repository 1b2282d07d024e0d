//! Damage calculation and application.

use crate::stats::DerivedStats;
use crate::state::ResourceMeter;

/// Melee damage for a uniform roll `u` in `[0, 1)`.
///
/// ```text
/// span   = max(attacker.attack − defender.defense, 0)
/// damage = ⌊u × span⌋
/// ```
///
/// Damage is never negative and a non-positive span always yields zero.
pub fn calculate_damage(attacker: &DerivedStats, defender: &DerivedStats, u: f64) -> u32 {
    let span = attacker.attack.saturating_sub(defender.defense);
    if span == 0 {
        return 0;
    }
    let u = u.clamp(0.0, 1.0);
    ((u * f64::from(span)).floor() as u32).min(span - 1)
}

/// Subtracts damage from hit points, flooring at zero. Returns the damage applied.
pub fn apply_damage(hp: &mut ResourceMeter, damage: u32) -> u32 {
    hp.deplete(damage)
}
