//! Player module - the target entity, its lives and respawns.

mod components;
mod lives;
mod plugin;

pub use components::*;
pub use lives::{spawn_player, LifeLost};
pub use plugin::PlayerPlugin;
