//! Horde Survival - wave-based melee horde simulation in Bevy.
//!
//! Agents patrol an arena, spot the player through a vision cone with
//! occlusion checks, chase it down, and resolve melee swings as sphere
//! sweeps against the physics world. A wave spawner refills the arena with
//! tougher agents every time the previous wave is wiped out.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, shared RNG, smoothing helpers
//! - **Combat**: Health, damage application, deaths, corpse cleanup
//! - **Navigation**: Destination following inside the walkable area
//! - **Physics**: Collision layers and the spatial query seam
//! - **Enemies**: Perception, behavior state machine, attacks, waves
//! - **Player**: The target entity, lives, and respawns

pub mod combat;
pub mod core;
pub mod enemies;
pub mod navigation;
pub mod physics;
pub mod player;

#[cfg(test)]
mod test_support;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics is not included: add `RapierPhysicsPlugin` alongside it to get
/// perception and attack queries. Without a Rapier context agents still
/// patrol, spawn, and die, but never see or hit anything.
pub struct HordePlugin;

impl Plugin for HordePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            .add_plugins(combat::CombatPlugin)

            .add_plugins(navigation::NavigationPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            .add_plugins(player::PlayerPlugin);
    }
}
