//! Combat module - health, damage application, deaths, and corpse cleanup.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::{CombatPlugin, CombatSet};
