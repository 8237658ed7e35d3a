//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Extra lives left. Dying with zero lives left ends the game.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives(pub u32);

/// Counts down to the player's respawn.
#[derive(Component)]
pub struct RespawnTimer(pub Timer);

/// Player tuning.
#[derive(Resource, Clone, Debug)]
pub struct PlayerConfig {
    pub max_health: f32,
    /// Lives at game start
    pub lives: u32,
    /// Seconds between death and respawn
    pub respawn_delay: f32,
    /// Respawn point is picked within this distance of the death position
    pub respawn_radius: f32,
    /// Capsule collider half height and radius
    pub half_height: f32,
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            lives: 3,
            respawn_delay: 3.0,
            respawn_radius: 30.0,
            half_height: 0.5,
            radius: 0.4,
        }
    }
}
