//! Combat result types and attack resolution.

use crate::state::ActorState;

use super::damage::{apply_damage, calculate_damage};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The roll produced no damage.
    Ineffectual,
    /// Damage was dealt and the defender survived.
    Hit,
    /// Damage was dealt and the defender's hp reached zero.
    Killed,
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    pub damage: u32,
}

/// Resolves one melee blow from `attacker` against `defender` and applies it.
pub fn resolve_attack(attacker: &ActorState, defender: &mut ActorState, roll: f64) -> AttackResult {
    let damage = calculate_damage(&attacker.derived(), &defender.derived(), roll);
    if damage == 0 {
        return AttackResult {
            outcome: AttackOutcome::Ineffectual,
            damage,
        };
    }

    let damage = apply_damage(&mut defender.hp, damage);
    let outcome = if defender.is_alive() {
        AttackOutcome::Hit
    } else {
        AttackOutcome::Killed
    };

    AttackResult { outcome, damage }
}
