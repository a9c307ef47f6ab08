pub use crate::{
    ecs::Kind, msg, send_msg, AiKind, Area, Channel, Entity, Msg,
    PlayerAction, Receiver, ScenarioStatus, Task,
};
pub use glam::{ivec2, IVec2};
pub use util::{GameRng, IndexMap, Odds, VecExt, DIR_8};
