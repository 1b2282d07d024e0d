//! Grid shortest-path search.
//!
//! A* over the 8-connected grid with unit step cost and a Chebyshev
//! heuristic. The caller decides what is walkable; the start cell is never
//! tested and the goal cell is always enterable.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use arrayvec::ArrayVec;

use crate::action::Direction;
use crate::state::Position;

/// The up to eight walkable neighbours of `position`, in [`Direction::ALL`] order.
fn neighbours<F>(position: Position, goal: Position, passable: &F) -> ArrayVec<Position, 8>
where
    F: Fn(Position) -> bool,
{
    Direction::ALL
        .iter()
        .map(|direction| direction.step(position))
        .filter(|&next| next == goal || passable(next))
        .collect()
}

/// Shortest path from `from` to `to`, both ends included.
///
/// Returns `None` when the goal is unreachable. `from == to` yields a
/// single-cell path.
pub fn find_path<F>(from: Position, to: Position, passable: F) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    if from == to {
        return Some(vec![from]);
    }

    let mut frontier = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut cost_so_far: HashMap<Position, u32> = HashMap::new();

    frontier.push(Reverse((from.chebyshev(to), 0u32, from)));
    cost_so_far.insert(from, 0);

    while let Some(Reverse((_, cost, current))) = frontier.pop() {
        if current == to {
            let mut path = vec![current];
            let mut node = current;
            while let Some(&previous) = came_from.get(&node) {
                path.push(previous);
                node = previous;
            }
            path.reverse();
            return Some(path);
        }

        // Stale frontier entry
        if cost_so_far.get(&current).is_some_and(|&best| best < cost) {
            continue;
        }

        for next in neighbours(current, to, &passable) {
            let new_cost = cost + 1;
            let improves = cost_so_far
                .get(&next)
                .is_none_or(|&known| new_cost < known);
            if improves {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                frontier.push(Reverse((new_cost + next.chebyshev(to), new_cost, next)));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(width: i32, height: i32) -> impl Fn(Position) -> bool {
        move |p: Position| p.x >= 0 && p.y >= 0 && p.x < width && p.y < height
    }

    #[test]
    fn diagonal_moves_are_allowed() {
        let path = find_path(Position::new(0, 0), Position::new(3, 3), open(5, 5)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(3, 3)));
    }

    #[test]
    fn adjacent_goal_is_a_two_cell_path() {
        let path = find_path(Position::new(2, 2), Position::new(3, 1), open(5, 5)).unwrap();
        assert_eq!(path, vec![Position::new(2, 2), Position::new(3, 1)]);
    }

    #[test]
    fn routes_around_walls() {
        // vertical wall at x = 2 with a gap at y = 4
        let passable = |p: Position| {
            p.x >= 0 && p.y >= 0 && p.x < 5 && p.y < 5 && (p.x != 2 || p.y == 4)
        };
        let path = find_path(Position::new(0, 0), Position::new(4, 0), passable).unwrap();
        assert!(path.contains(&Position::new(2, 4)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1);
        }
    }

    #[test]
    fn unreachable_goal_has_no_path() {
        let passable = |p: Position| p.x >= 0 && p.y >= 0 && p.x < 5 && p.y < 5 && p.x != 2;
        assert!(find_path(Position::new(0, 0), Position::new(4, 0), passable).is_none());
    }

    #[test]
    fn goal_is_enterable_even_when_marked_blocked() {
        let goal = Position::new(1, 0);
        let passable = move |p: Position| p != goal;
        let path = find_path(Position::new(0, 0), goal, passable).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn start_equals_goal() {
        let here = Position::new(1, 1);
        assert_eq!(find_path(here, here, |_| false), Some(vec![here]));
    }
}
