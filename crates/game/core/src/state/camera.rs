//! Viewport tracking for the active level.

use super::Position;

/// Top-left corner of the visible window onto the level grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub offset: Position,
    pub view_width: u32,
    pub view_height: u32,
}

impl Camera {
    pub fn new(view_width: u32, view_height: u32) -> Self {
        Self {
            offset: Position::ORIGIN,
            view_width,
            view_height,
        }
    }

    /// Centres the view on `target`, clamped so it never leaves the map.
    pub fn follow(&mut self, target: Position, map_width: u32, map_height: u32) {
        self.offset = Position::new(
            Self::clamp_axis(target.x, self.view_width, map_width),
            Self::clamp_axis(target.y, self.view_height, map_height),
        );
    }

    fn clamp_axis(target: i32, view: u32, map: u32) -> i32 {
        let max = map.saturating_sub(view) as i32;
        (target - (view / 2) as i32).clamp(0, max)
    }

    /// Converts a map position to view coordinates, if visible.
    pub fn to_view(&self, position: Position) -> Option<(u32, u32)> {
        let x = position.x - self.offset.x;
        let y = position.y - self.offset.y;
        let visible =
            x >= 0 && y >= 0 && (x as u32) < self.view_width && (y as u32) < self.view_height;
        visible.then_some((x as u32, y as u32))
    }
}
