//! Enemies module - agent entities, perception, AI, attacks, and waves.

pub mod ai;
pub mod animation;
pub mod attack;
mod components;
pub mod data;
pub mod perception;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{AgentDefinition, AgentRegistry, DataRoot, SpawnerConfig, StatRange};
pub use plugin::{EnemyPlugin, EnemySet};
pub use spawning::{
    spawn_agent, DeathListener, DeathListeners, Score, SpawnProfile, WaveSpawner,
};
