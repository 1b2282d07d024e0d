use game_core::{ActorState, CreatureIntent, Direction, GameState, Position, find_path};

use super::CreatureAi;

/// Pursues the player once they come within the archetype's aggro range.
///
/// Walls and blocking creatures are obstacles. An adjacent player is
/// attacked; an unreachable one leaves the creature idle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChaseAi;

impl CreatureAi for ChaseAi {
    fn decide(&self, creature: &ActorState, state: &GameState) -> CreatureIntent {
        let Some(kind) = creature.ai() else {
            return CreatureIntent::Idle;
        };
        let target = state.player.position;
        if creature.position.distance_squared(target) >= kind.aggro_threshold() {
            return CreatureIntent::Idle;
        }
        let Ok(level) = state.current_level() else {
            return CreatureIntent::Idle;
        };

        let passable =
            |position: Position| level.is_passable(position) && level.blocker_at(position).is_none();
        let Some(path) = find_path(creature.position, target, passable) else {
            return CreatureIntent::Idle;
        };

        // The first cell is the creature itself.
        match path.as_slice() {
            [_, _] => CreatureIntent::Attack,
            [from, next, ..] => Direction::between(*from, *next)
                .map_or(CreatureIntent::Idle, CreatureIntent::Step),
            _ => CreatureIntent::Idle,
        }
    }
}
