//! Horde Survival - Entry Point
//!
//! Runs the simulation headless in a walled arena and logs waves, kills,
//! and player deaths. Set `RUST_LOG=horde_survival=debug` to follow
//! individual agents.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::hierarchy::HierarchyPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;

use horde_survival::core::GameState;
use horde_survival::navigation::NavArea;
use horde_survival::physics::{member_of, WORLD_LAYER};
use horde_survival::player::{spawn_player, PlayerConfig};

fn main() {
    App::new()
        // Headless: no window, fixed 60 Hz frame loop
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin::default(),
            TransformPlugin,
            HierarchyPlugin,
            StatesPlugin,
        ))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(horde_survival::HordePlugin)

        .add_systems(OnEnter(GameState::InGame), setup_arena)

        .run();
}

/// Floor, boundary walls, a few pillars, and the player.
fn setup_arena(mut commands: Commands, area: Res<NavArea>, config: Res<PlayerConfig>) {
    let size = area.max - area.min;
    let center = (area.min + area.max) * 0.5;
    let wall_height = 3.0;
    let thickness = 0.5;

    // Floor
    commands.spawn((
        Transform::from_xyz(center.x, area.floor_y - thickness, center.y),
        Collider::cuboid(size.x * 0.5, thickness, size.y * 0.5),
        RigidBody::Fixed,
        member_of(WORLD_LAYER),
    ));

    let walls = [
        (Vec3::new(center.x, wall_height, area.min.y - thickness), Vec3::new(size.x * 0.5, wall_height, thickness)),
        (Vec3::new(center.x, wall_height, area.max.y + thickness), Vec3::new(size.x * 0.5, wall_height, thickness)),
        (Vec3::new(area.min.x - thickness, wall_height, center.y), Vec3::new(thickness, wall_height, size.y * 0.5)),
        (Vec3::new(area.max.x + thickness, wall_height, center.y), Vec3::new(thickness, wall_height, size.y * 0.5)),
    ];

    for (position, half_extents) in walls {
        commands.spawn((
            Transform::from_translation(position),
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            RigidBody::Fixed,
            member_of(WORLD_LAYER),
        ));
    }

    // Pillars break line of sight across the arena
    for (x, z) in [(-8.0, 0.0), (8.0, 0.0), (0.0, -8.0), (0.0, 8.0)] {
        commands.spawn((
            Transform::from_xyz(x, wall_height, z),
            Collider::cuboid(1.0, wall_height, 1.0),
            RigidBody::Fixed,
            member_of(WORLD_LAYER),
        ));
    }

    let player = spawn_player(&mut commands, Vec3::new(0.0, 0.9, 0.0), &config);
    info!("Arena ready, player {:?}", player);
}
