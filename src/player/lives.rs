//! Player spawning, lives, and respawn.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{Dead, DeathEvent, Health};
use crate::core::{GameState, SimRng};
use crate::navigation::NavArea;
use crate::physics::{member_of, TARGET_LAYER};

/// Spawn the player at `position`.
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: &PlayerConfig) -> Entity {
    commands
        .spawn((
            Player,
            Lives(config.lives),
            Health::new(config.max_health),
            Transform::from_translation(position),
            Collider::capsule_y(config.half_height, config.radius),
            RigidBody::KinematicPositionBased,
            member_of(TARGET_LAYER),
        ))
        .id()
}

/// Outcome of a player death.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLost {
    /// A life was spent; the player comes back.
    Respawn { remaining: u32 },
    GameOver,
}

impl Lives {
    /// Spend a life if one is left.
    pub fn lose(&mut self) -> LifeLost {
        if self.0 == 0 {
            return LifeLost::GameOver;
        }

        self.0 -= 1;
        LifeLost::Respawn { remaining: self.0 }
    }
}

/// Schedule a respawn or end the game when the player dies.
pub fn handle_player_death(
    mut commands: Commands,
    config: Res<PlayerConfig>,
    mut deaths: EventReader<DeathEvent>,
    mut players: Query<&mut Lives, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for death in deaths.read() {
        let Ok(mut lives) = players.get_mut(death.entity) else {
            continue;
        };

        match lives.lose() {
            LifeLost::Respawn { remaining } => {
                info!("Player died, {} lives left", remaining);
                commands.entity(death.entity).insert(RespawnTimer(Timer::from_seconds(
                    config.respawn_delay,
                    TimerMode::Once,
                )));
            }
            LifeLost::GameOver => {
                info!("Player died with no lives left");
                next_state.set(GameState::GameOver);
            }
        }
    }
}

/// Bring the player back at a random point near where they fell.
pub fn respawn_player(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    area: Res<NavArea>,
    mut rng: ResMut<SimRng>,
    mut players: Query<(Entity, &mut Transform, &mut Health, &mut RespawnTimer), With<Player>>,
) {
    for (entity, mut transform, mut health, mut timer) in players.iter_mut() {
        timer.0.tick(time.delta());
        if !timer.0.finished() {
            continue;
        }

        let point = area.random_point(transform.translation, config.respawn_radius, &mut rng.0);
        transform.translation = Vec3::new(point.x, transform.translation.y, point.z);
        health.revive();

        commands.entity(entity).remove::<(Dead, RespawnTimer)>();
        info!("Player respawned at {:?}", transform.translation);
    }
}
