//! Area simulation machinery.

/// Action points every character gets at the start of a turn.
pub const AP_PER_TURN: i32 = 10;

/// Action points don't accumulate past this.
pub const MAX_ACTION_POINTS: i32 = 30;

/// How many previous tasks a monster remembers.
pub const REMEMBERED_TASKS: usize = 10;

/// How close to the alarm point a monster must be to consider the spot
/// investigated.
pub const INVESTIGATE_RADIUS: i32 = 2;

/// Sight range for characters with no explicit sight stat.
pub const DEFAULT_SIGHT: i32 = 10;

pub const DEFAULT_AREA_WIDTH: i32 = 20;
pub const DEFAULT_AREA_HEIGHT: i32 = 20;

/// Largest area that can be created, in cells.
pub const MAX_AREA_CELLS: usize = 1 << 20;

/// How many items a character can carry besides the wielded one.
pub const INVENTORY_SLOTS: usize = 10;

mod action;

mod ai;
pub use ai::{AiKind, Task};

mod area;
pub use area::{Area, Filter};

mod combat;
pub use combat::AttackOutcome;

pub mod ecs;

mod entity;
pub use entity::Entity;

mod fov;

mod item;

mod mob;

mod msg;
pub use msg::{send_msg, Channel, Msg, Receiver};

mod pathing;

pub mod prelude;

mod recipe;
pub use recipe::{
    Bank, DoodadRecipe, DoodadType, ItemRecipe, ItemType, MonsterRecipe,
    MonsterType,
};

mod turn;
pub use turn::PlayerAction;

mod visibility;
pub use visibility::{Glimpse, Levels, VisibilityInfo, VisibilityMatrix};

#[cfg(test)]
mod test_util;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScenarioStatus {
    Ongoing,
    Lost,
}
