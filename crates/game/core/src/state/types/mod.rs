pub mod actor;
pub mod common;
pub mod item;
pub mod level;
pub mod turn;

pub use actor::{
    ActorKind, ActorState, AiKind, Equip, InventorySlot, InventoryState,
};
pub use common::{EntityId, Position, ResourceMeter, Tick};
pub use item::{ItemHandle, ItemState};
pub use level::{CellKind, ExitDirection, ExitLink, Level, LevelId, LevelLayout};
pub use turn::TurnState;
