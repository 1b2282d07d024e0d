use async_trait::async_trait;
use game_core::{CellKind, LevelLayout, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{MapGenError, MapGenerator, MapRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Room {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Room {
    fn centre(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Overlap test including a one-cell wall margin.
    fn touches(&self, other: &Room) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

struct Grid {
    width: u32,
    cells: Vec<CellKind>,
}

impl Grid {
    fn dig(&mut self, x: u32, y: u32) {
        self.cells[(y * self.width + x) as usize] = CellKind::Floor;
    }

    fn dig_room(&mut self, room: &Room) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                self.dig(x, y);
            }
        }
    }

    fn dig_horizontal(&mut self, from: u32, to: u32, y: u32) {
        for x in from.min(to)..=from.max(to) {
            self.dig(x, y);
        }
    }

    fn dig_vertical(&mut self, from: u32, to: u32, x: u32) {
        for y in from.min(to)..=from.max(to) {
            self.dig(x, y);
        }
    }
}

/// Rooms joined by L-shaped corridors, carved out of solid rock.
///
/// Each room is connected to the previous one, so every floor cell is
/// reachable from every other.
#[derive(Clone, Copy, Debug)]
pub struct RoomsGenerator {
    pub max_rooms: u32,
    pub min_room: u32,
    pub max_room: u32,
}

impl Default for RoomsGenerator {
    fn default() -> Self {
        Self {
            max_rooms: 24,
            min_room: 4,
            max_room: 12,
        }
    }
}

impl RoomsGenerator {
    pub const MIN_SIDE: u32 = 10;

    pub fn new(max_rooms: u32) -> Self {
        Self {
            max_rooms: max_rooms.max(1),
            ..Self::default()
        }
    }

    fn carve(&self, request: &MapRequest) -> Result<LevelLayout, MapGenError> {
        let (width, height) = (request.width, request.height);
        if width < Self::MIN_SIDE || height < Self::MIN_SIDE {
            return Err(MapGenError::TooSmall {
                width,
                height,
                min: Self::MIN_SIDE,
            });
        }

        let mut rng = StdRng::seed_from_u64(request.seed);
        let mut grid = Grid {
            width,
            cells: vec![CellKind::Wall; width as usize * height as usize],
        };

        // Rooms keep a wall border around the map.
        let max_w = self.max_room.clamp(1, width - 2);
        let max_h = self.max_room.clamp(1, height - 2);
        let min_side = self.min_room.clamp(1, max_w.min(max_h));

        let mut rooms: Vec<Room> = Vec::new();
        for _ in 0..self.max_rooms.saturating_mul(4) {
            if rooms.len() as u32 >= self.max_rooms {
                break;
            }
            let room_w = rng.gen_range(min_side..=max_w);
            let room_h = rng.gen_range(min_side..=max_h);
            let room = Room {
                x: rng.gen_range(1..=width - room_w - 1),
                y: rng.gen_range(1..=height - room_h - 1),
                width: room_w,
                height: room_h,
            };
            if rooms.iter().any(|existing| existing.touches(&room)) {
                continue;
            }

            grid.dig_room(&room);
            if let Some(previous) = rooms.last() {
                let (from_x, from_y) = previous.centre();
                let (to_x, to_y) = room.centre();
                if rng.gen_bool(0.5) {
                    grid.dig_horizontal(from_x, to_x, from_y);
                    grid.dig_vertical(from_y, to_y, to_x);
                } else {
                    grid.dig_vertical(from_y, to_y, from_x);
                    grid.dig_horizontal(from_x, to_x, to_y);
                }
            }
            rooms.push(room);
        }

        let floor_cells: Vec<Position> = grid
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == CellKind::Floor)
            .map(|(index, _)| {
                let index = index as u32;
                Position::new((index % width) as i32, (index / width) as i32)
            })
            .collect();
        if floor_cells.is_empty() {
            return Err(MapGenError::NoFloor);
        }

        Ok(LevelLayout {
            width,
            height,
            cells: grid.cells,
            floor_cells,
        })
    }
}

#[async_trait]
impl MapGenerator for RoomsGenerator {
    async fn generate(&self, request: MapRequest) -> Result<LevelLayout, MapGenError> {
        self.carve(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{LevelId, find_path};

    fn request(seed: u64) -> MapRequest {
        MapRequest {
            level: LevelId::ENTRANCE,
            width: 128,
            height: 110,
            seed,
        }
    }

    #[tokio::test]
    async fn same_seed_same_map() {
        let generator = RoomsGenerator::default();
        let a = generator.generate(request(9)).await.unwrap();
        let b = generator.generate(request(9)).await.unwrap();
        let c = generator.generate(request(10)).await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a.cells, c.cells);
    }

    #[tokio::test]
    async fn border_stays_solid() {
        let layout = RoomsGenerator::default().generate(request(1)).await.unwrap();
        assert_eq!(layout.cells.len(), 128 * 110);
        for x in 0..128 {
            assert_eq!(layout.cells[x], CellKind::Wall);
            assert_eq!(layout.cells[109 * 128 + x], CellKind::Wall);
        }
        for cell in &layout.floor_cells {
            assert!(cell.x > 0 && cell.y > 0 && cell.x < 127 && cell.y < 109);
        }
    }

    #[tokio::test]
    async fn floor_is_connected() {
        let layout = RoomsGenerator::new(8)
            .generate(MapRequest {
                width: 40,
                height: 30,
                ..request(4)
            })
            .await
            .unwrap();
        let width = layout.width as i32;
        let passable = |p: Position| {
            p.x >= 0
                && p.y >= 0
                && p.x < width
                && p.y < layout.height as i32
                && layout.cells[(p.y * width + p.x) as usize] == CellKind::Floor
        };
        let first = layout.floor_cells[0];
        for &cell in layout.floor_cells.iter().step_by(7) {
            assert!(find_path(first, cell, passable).is_some());
        }
    }

    #[tokio::test]
    async fn tiny_maps_are_refused() {
        let error = RoomsGenerator::default()
            .generate(MapRequest {
                width: 5,
                height: 40,
                ..request(0)
            })
            .await
            .unwrap_err();
        assert!(matches!(error, MapGenError::TooSmall { width: 5, .. }));
    }
}
