//! Level grid, spawned contents and exit links.

use std::fmt;

use super::{ActorState, EntityId, ItemState, Position};
use crate::state::error::LevelError;

/// Depth index of a level. Level 0 is the entrance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId(pub u32);

impl LevelId {
    pub const ENTRANCE: Self = Self(0);

    /// One-based number shown to the player.
    pub const fn number(self) -> u32 {
        self.0 + 1
    }

    pub const fn above(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn below(self) -> Option<Self> {
        match self.0 {
            0 => None,
            depth => Some(Self(depth - 1)),
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Floor,
    Wall,
    ExitUp,
    ExitDown,
}

impl CellKind {
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    pub const fn is_exit(self) -> bool {
        matches!(self, CellKind::ExitUp | CellKind::ExitDown)
    }
}

/// Direction of travel through an exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitDirection {
    Up,
    Down,
}

impl ExitDirection {
    pub const fn cell(self) -> CellKind {
        match self {
            ExitDirection::Up => CellKind::ExitUp,
            ExitDirection::Down => CellKind::ExitDown,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            ExitDirection::Up => ExitDirection::Down,
            ExitDirection::Down => ExitDirection::Up,
        }
    }
}

/// Exit cell on one level leading to an adjacent level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitLink {
    pub cell: Position,
    pub target: LevelId,
}

/// Raw grid produced by a map generator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelLayout {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` entries.
    pub cells: Vec<CellKind>,
    /// Walkable cells available for spawning.
    pub floor_cells: Vec<Position>,
}

/// A generated level together with everything spawned on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: LevelId,
    pub width: u32,
    pub height: u32,
    cells: Vec<CellKind>,
    /// Floor cells not yet handed out to a spawn.
    pub free_cells: Vec<Position>,
    pub items: Vec<ItemState>,
    /// Creatures and inert blockers living on this level.
    pub creatures: Vec<ActorState>,
    pub exit_up: Option<ExitLink>,
    pub exit_down: Option<ExitLink>,
}

impl Level {
    pub fn from_layout(id: LevelId, layout: LevelLayout) -> Result<Self, LevelError> {
        let expected = layout.width as usize * layout.height as usize;
        if layout.cells.len() != expected {
            return Err(LevelError::LayoutSizeMismatch {
                expected,
                actual: layout.cells.len(),
            });
        }

        let mut level = Self {
            id,
            width: layout.width,
            height: layout.height,
            cells: layout.cells,
            free_cells: Vec::with_capacity(layout.floor_cells.len()),
            items: Vec::new(),
            creatures: Vec::new(),
            exit_up: None,
            exit_down: None,
        };

        for position in layout.floor_cells {
            match level.cell(position) {
                Some(CellKind::Floor) => level.free_cells.push(position),
                Some(_) => return Err(LevelError::FreeCellNotFloor { position }),
                None => return Err(LevelError::FreeCellOutOfBounds { position }),
            }
        }

        Ok(level)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Cell at `position`; `None` outside the grid.
    pub fn cell(&self, position: Position) -> Option<CellKind> {
        self.index(position).map(|index| self.cells[index])
    }

    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn set_cell(&mut self, position: Position, kind: CellKind) -> bool {
        match self.index(position) {
            Some(index) => {
                self.cells[index] = kind;
                true
            }
            None => false,
        }
    }

    /// Walls and everything outside the grid block movement.
    pub fn is_passable(&self, position: Position) -> bool {
        self.cell(position).is_some_and(CellKind::is_passable)
    }

    /// Removes and returns a free floor cell. `pick` maps the number of candidates
    /// to the chosen index.
    pub fn take_free_cell(&mut self, pick: impl FnOnce(usize) -> usize) -> Option<Position> {
        if self.free_cells.is_empty() {
            return None;
        }
        let index = pick(self.free_cells.len()).min(self.free_cells.len() - 1);
        Some(self.free_cells.remove(index))
    }

    /// Like [`Level::take_free_cell`] but only hands out cells no blocker
    /// stands on and that differ from `avoid`. Occupied cells stay listed
    /// since their occupant may walk off again.
    pub fn take_vacant_cell(
        &mut self,
        avoid: Position,
        pick: impl FnOnce(usize) -> usize,
    ) -> Option<Position> {
        let vacant: Vec<usize> = self
            .free_cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != avoid && self.blocker_at(cell).is_none())
            .map(|(index, _)| index)
            .collect();
        if vacant.is_empty() {
            return None;
        }
        let chosen = vacant[pick(vacant.len()).min(vacant.len() - 1)];
        Some(self.free_cells.remove(chosen))
    }

    /// Removes a specific cell from the free list, if present.
    pub fn claim_cell(&mut self, position: Position) -> bool {
        match self.free_cells.iter().position(|&cell| cell == position) {
            Some(index) => {
                self.free_cells.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn exit(&self, direction: ExitDirection) -> Option<ExitLink> {
        match direction {
            ExitDirection::Up => self.exit_up,
            ExitDirection::Down => self.exit_down,
        }
    }

    /// Exit the given position sits on, if any.
    pub fn exit_at(&self, position: Position) -> Option<(ExitDirection, ExitLink)> {
        match self.cell(position)? {
            CellKind::ExitUp => self.exit_up.map(|link| (ExitDirection::Up, link)),
            CellKind::ExitDown => self.exit_down.map(|link| (ExitDirection::Down, link)),
            _ => None,
        }
    }

    pub fn creature(&self, id: EntityId) -> Option<&ActorState> {
        self.creatures.iter().find(|actor| actor.id == id)
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.creatures.iter_mut().find(|actor| actor.id == id)
    }

    /// Blocking creature standing on `position`.
    pub fn blocker_at(&self, position: Position) -> Option<&ActorState> {
        self.creatures
            .iter()
            .find(|actor| actor.blocks && actor.position == position)
    }

    pub fn remove_creature(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.creatures.iter().position(|actor| actor.id == id)?;
        Some(self.creatures.remove(index))
    }

    /// Living creatures that count against the level's population cap.
    pub fn hostile_count(&self) -> usize {
        self.creatures
            .iter()
            .filter(|actor| actor.is_hostile() && actor.is_alive())
            .count()
    }

    /// Most recently placed item on `position`.
    pub fn item_at(&self, position: Position) -> Option<&ItemState> {
        self.items.iter().rev().find(|item| item.position == position)
    }

    pub fn take_item_at(&mut self, position: Position) -> Option<ItemState> {
        let index = self.items.iter().rposition(|item| item.position == position)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{AiKind, ItemHandle};

    fn layout() -> LevelLayout {
        // 4x3, walls on the border except the middle row
        let mut cells = vec![CellKind::Wall; 12];
        cells[4] = CellKind::Floor;
        cells[5] = CellKind::Floor;
        cells[6] = CellKind::Floor;
        LevelLayout {
            width: 4,
            height: 3,
            cells,
            floor_cells: vec![Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
        }
    }

    #[test]
    fn rejects_mismatched_layout() {
        let mut bad = layout();
        bad.cells.pop();
        assert_eq!(
            Level::from_layout(LevelId(0), bad),
            Err(LevelError::LayoutSizeMismatch {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn rejects_free_cell_on_wall() {
        let mut bad = layout();
        bad.floor_cells.push(Position::new(3, 0));
        assert!(matches!(
            Level::from_layout(LevelId(0), bad),
            Err(LevelError::FreeCellNotFloor { .. })
        ));
    }

    #[test]
    fn out_of_bounds_is_impassable() {
        let level = Level::from_layout(LevelId(0), layout()).unwrap();
        assert!(level.is_passable(Position::new(1, 1)));
        assert!(!level.is_passable(Position::new(1, 0)));
        assert!(!level.is_passable(Position::new(-1, 1)));
        assert!(!level.is_passable(Position::new(4, 1)));
    }

    #[test]
    fn free_cells_are_handed_out_once() {
        let mut level = Level::from_layout(LevelId(0), layout()).unwrap();
        let first = level.take_free_cell(|_| 1).unwrap();
        assert_eq!(first, Position::new(1, 1));
        assert!(!level.claim_cell(first));
        assert_eq!(level.free_cells.len(), 2);
        // out of range picks clamp to the last candidate
        assert_eq!(level.take_free_cell(|n| n + 10), Some(Position::new(2, 1)));
    }

    #[test]
    fn vacant_cells_skip_occupants_and_stay_listed() {
        let mut level = Level::from_layout(LevelId(0), layout()).unwrap();
        level.creatures.push(ActorState::creature(
            EntityId(5),
            AiKind::Normal,
            Position::new(0, 1),
        ));

        // (0,1) holds a creature and (2,1) is avoided, so only (1,1) remains
        let cell = level.take_vacant_cell(Position::new(2, 1), |_| 0);
        assert_eq!(cell, Some(Position::new(1, 1)));
        assert_eq!(level.take_vacant_cell(Position::new(2, 1), |_| 0), None);
        assert_eq!(level.free_cells, vec![Position::new(0, 1), Position::new(2, 1)]);
    }

    #[test]
    fn item_pickup_takes_the_latest_drop() {
        let mut level = Level::from_layout(LevelId(0), layout()).unwrap();
        let spot = Position::new(1, 1);
        level.items.push(ItemState::new(EntityId(10), spot, ItemHandle(4)));
        level.items.push(ItemState::new(EntityId(11), spot, ItemHandle(5)));

        assert_eq!(level.item_at(spot).map(|item| item.handle), Some(ItemHandle(5)));
        assert_eq!(level.take_item_at(spot).map(|item| item.id), Some(EntityId(11)));
        assert_eq!(level.items.len(), 1);
    }

    #[test]
    fn level_numbers_are_one_based() {
        assert_eq!(LevelId(0).to_string(), "1");
        assert_eq!(LevelId(0).below(), None);
        assert_eq!(LevelId(3).below(), Some(LevelId(2)));
    }
}
