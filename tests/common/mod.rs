//! Shared app setup for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use horde_survival::combat::{DamageEvent, Health};
use horde_survival::core::SimRng;
use horde_survival::enemies::{DataRoot, SpawnerConfig, WaveSpawner};
use horde_survival::player::{Lives, Player};
use horde_survival::HordePlugin;

/// Simulated time per `app.update()`.
pub const STEP: Duration = Duration::from_millis(200);

/// Headless app without physics, data files, or real time.
pub fn test_app(config: SpawnerConfig) -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .insert_resource(DataRoot(PathBuf::from("tests/no-such-data")))
        .insert_resource(config)
        .insert_resource(SimRng::seeded(7))
        .add_plugins(HordePlugin);

    app
}

pub fn single_point_config(point: (f32, f32, f32)) -> SpawnerConfig {
    SpawnerConfig {
        spawn_points: vec![point],
        ..default()
    }
}

pub fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn spawner(app: &App) -> &WaveSpawner {
    app.world().resource::<WaveSpawner>()
}

pub fn roster(app: &App) -> Vec<Entity> {
    spawner(app).roster().iter().copied().collect()
}

pub fn spawn_target(app: &mut App, position: Vec3, lives: u32) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            Lives(lives),
            Health::new(100.0),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn hit(app: &mut App, target: Entity, source: Entity, amount: f32) {
    app.world_mut().send_event(DamageEvent {
        target,
        source,
        amount,
        hit_point: Vec3::ZERO,
        hit_normal: Vec3::Y,
    });
}

pub fn kill(app: &mut App, target: Entity) {
    hit(app, target, Entity::PLACEHOLDER, 10_000.0);
}
