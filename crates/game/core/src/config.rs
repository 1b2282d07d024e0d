/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of levels. Taking the up-exit of the last one wins the game.
    pub max_levels: u32,
    /// Item population each level is topped up to on entry.
    pub max_items: u32,
    /// Creature population of the entrance level.
    pub min_creatures: u32,
    /// Additional creatures per level of depth.
    pub creatures_per_depth: u32,
    pub map_width: u32,
    pub map_height: u32,
    /// Visible window onto the map.
    pub view_width: u32,
    pub view_height: u32,
    /// Messages retained by the log sink.
    pub log_capacity: usize,
}

impl GameConfig {
    pub const DEFAULT_MAX_LEVELS: u32 = 5;
    pub const DEFAULT_MAX_ITEMS: u32 = 16;
    pub const DEFAULT_MIN_CREATURES: u32 = 4;
    pub const DEFAULT_CREATURES_PER_DEPTH: u32 = 4;
    pub const DEFAULT_MAP_WIDTH: u32 = 128;
    pub const DEFAULT_MAP_HEIGHT: u32 = 110;
    pub const DEFAULT_VIEW_WIDTH: u32 = 64;
    pub const DEFAULT_VIEW_HEIGHT: u32 = 55;
    pub const DEFAULT_LOG_CAPACITY: usize = 6;

    pub fn new() -> Self {
        Self {
            max_levels: Self::DEFAULT_MAX_LEVELS,
            max_items: Self::DEFAULT_MAX_ITEMS,
            min_creatures: Self::DEFAULT_MIN_CREATURES,
            creatures_per_depth: Self::DEFAULT_CREATURES_PER_DEPTH,
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            view_width: Self::DEFAULT_VIEW_WIDTH,
            view_height: Self::DEFAULT_VIEW_HEIGHT,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
        }
    }

    /// Creature population for a level at `depth`.
    pub fn creature_cap(&self, depth: u32) -> u32 {
        self.min_creatures + depth * self.creatures_per_depth
    }

    /// True when `depth` lies beyond the last level.
    pub fn is_beyond_last_level(&self, depth: u32) -> bool {
        depth >= self.max_levels
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
