//! Spatial queries and combat against a live Rapier world.

mod common;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use approx::assert_relative_eq;
use bevy::hierarchy::HierarchyPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;

use common::{roster, STEP};
use horde_survival::combat::Health;
use horde_survival::core::SimRng;
use horde_survival::enemies::attack::{resolve_strike, Strike};
use horde_survival::enemies::perception::{scan, Eye, VisionCone};
use horde_survival::enemies::{AgentState, DataRoot, SpawnerConfig, StatRange};
use horde_survival::physics::{
    member_of, RapierSpatialQuery, SpatialQuery, AGENT_LAYER, TARGET_LAYER, WORLD_LAYER,
};
use horde_survival::player::{spawn_player, PlayerConfig};
use horde_survival::HordePlugin;

fn physics_app() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    app
}

fn spawn_static(app: &mut App, position: Vec3, collider: Collider, layer: Group) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            collider,
            RigidBody::Fixed,
            member_of(layer),
        ))
        .id()
}

/// Let Rapier pick up freshly spawned colliders.
fn settle(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
}

fn with_queries<R>(app: &mut App, f: impl FnOnce(&RapierSpatialQuery) -> R) -> R {
    let mut contexts = app.world_mut().query::<&RapierContext>();
    let context = contexts.single(app.world());
    f(&RapierSpatialQuery::new(context))
}

#[test]
fn sweep_reports_contact_on_struck_surface() {
    let mut app = physics_app();
    let ball = spawn_static(&mut app, Vec3::new(0.0, 1.0, -3.0), Collider::ball(0.5), TARGET_LAYER);
    settle(&mut app);

    let hits = with_queries(&mut app, |world| {
        world.sweep_sphere(Vec3::new(0.0, 1.0, -1.0), 0.5, Vec3::NEG_Z, 2.0, TARGET_LAYER)
    });

    assert_eq!(hits.len(), 1);
    let hit = hits[0];
    assert_eq!(hit.entity, ball);
    assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-3);
    assert_relative_eq!(hit.point.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(hit.point.y, 1.0, epsilon = 1e-3);
    assert_relative_eq!(hit.point.z, -2.5, epsilon = 1e-3);
    assert_relative_eq!(hit.normal.z, 1.0, epsilon = 1e-3);
    assert_relative_eq!(hit.normal.length(), 1.0, epsilon = 1e-3);
}

#[test]
fn sweep_starting_inside_a_collider_has_unit_normal() {
    let mut app = physics_app();
    let ball = spawn_static(&mut app, Vec3::new(0.0, 1.0, -1.5), Collider::ball(0.5), TARGET_LAYER);
    settle(&mut app);

    let hits = with_queries(&mut app, |world| {
        world.sweep_sphere(Vec3::new(0.0, 1.0, -1.0), 0.5, Vec3::NEG_Z, 0.0, TARGET_LAYER)
    });

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, ball);
    assert_relative_eq!(hits[0].distance, 0.0, epsilon = 1e-4);
    assert_relative_eq!(hits[0].normal.length(), 1.0, epsilon = 1e-3);
}

#[test]
fn sweep_ignores_other_layers() {
    let mut app = physics_app();
    spawn_static(&mut app, Vec3::new(0.0, 1.0, -3.0), Collider::ball(0.5), WORLD_LAYER);
    settle(&mut app);

    let hits = with_queries(&mut app, |world| {
        world.sweep_sphere(Vec3::new(0.0, 1.0, -1.0), 0.5, Vec3::NEG_Z, 2.0, TARGET_LAYER)
    });

    assert!(hits.is_empty());
}

/// Viewer at the origin looking down -Z at a target 8 m away.
fn sight_scene(wall: bool) -> Option<Entity> {
    let mut app = physics_app();
    let eye = Eye {
        position: Vec3::new(0.0, 1.5, 0.0),
        forward: Vec3::NEG_Z,
    };
    let target_position = Vec3::new(0.0, 1.5, -8.0);

    let viewer = spawn_static(&mut app, eye.position, Collider::ball(0.3), AGENT_LAYER);
    let target = spawn_static(&mut app, target_position, Collider::ball(0.5), TARGET_LAYER);
    if wall {
        spawn_static(
            &mut app,
            Vec3::new(0.0, 1.5, -4.0),
            Collider::cuboid(2.0, 2.0, 0.2),
            WORLD_LAYER,
        );
    }
    settle(&mut app);

    let cone = VisionCone {
        field_of_view: 50.0,
        view_distance: 10.0,
    };

    with_queries(&mut app, |world| {
        scan(world, viewer, eye, cone, TARGET_LAYER, |candidate| {
            (candidate == target).then_some(target_position)
        })
    })
}

#[test]
fn wall_blocks_line_of_sight() {
    assert_eq!(sight_scene(true), None);
}

#[test]
fn clear_line_of_sight_acquires_target() {
    assert!(sight_scene(false).is_some());
}

#[test]
fn overlapping_targets_are_struck_nearest_first_one_per_tick() {
    let mut app = physics_app();
    let near = spawn_static(&mut app, Vec3::new(0.0, 1.0, -2.2), Collider::ball(0.5), TARGET_LAYER);
    let far = spawn_static(&mut app, Vec3::new(0.0, 1.0, -2.6), Collider::ball(0.5), TARGET_LAYER);
    settle(&mut app);

    let strike = Strike {
        attacker: Entity::PLACEHOLDER,
        origin: Vec3::new(0.0, 1.0, 0.0),
        direction: Vec3::NEG_Z,
        radius: 0.5,
        distance: 2.0,
        damage: 15.0,
        layers: TARGET_LAYER,
    };

    let mut struck = HashSet::new();
    let mut events = Vec::new();

    let first = with_queries(&mut app, |world| {
        resolve_strike(world, &strike, &mut struck, |_| true, |event| events.push(event))
    });
    assert_eq!(first, Some(near));
    assert_eq!(events.len(), 1);
    assert_relative_eq!(events[0].hit_point.z, -1.7, epsilon = 1e-3);
    assert_relative_eq!(events[0].hit_normal.z, 1.0, epsilon = 1e-3);

    let second = with_queries(&mut app, |world| {
        resolve_strike(world, &strike, &mut struck, |_| true, |event| events.push(event))
    });
    assert_eq!(second, Some(far));
    assert_eq!(events.len(), 2);
    assert_eq!(struck, HashSet::from([near, far]));
}

#[test]
fn attacking_agent_hurts_player_once_per_cycle() {
    let config = SpawnerConfig {
        agents_per_wave: 1.0,
        health: StatRange::new(500.0, 500.0),
        damage: StatRange::new(10.0, 10.0),
        speed: StatRange::new(1.0, 1.0),
        spawn_points: vec![(0.0, 0.0, 2.0)],
        ..default()
    };

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin, StatesPlugin))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .insert_resource(DataRoot(PathBuf::from("tests/no-such-data")))
        .insert_resource(config)
        .insert_resource(SimRng::seeded(7))
        .add_plugins(HordePlugin);

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, Vec3::new(0.0, 0.9, 0.0), &PlayerConfig::default())
    };
    app.world_mut().flush();

    app.update();
    let agent = roster(&app)[0];

    // Player health at the end of each attack cycle
    let mut after_cycle = Vec::new();
    let mut previous = AgentState::Patrol;
    for _ in 0..60 {
        app.update();

        let state = *app.world().get::<AgentState>(agent).unwrap();
        if previous == AgentState::Attacking && state != AgentState::Attacking {
            after_cycle.push(app.world().get::<Health>(player).unwrap().current);
        }
        previous = state;
    }

    assert!(after_cycle.len() >= 2, "cycles: {after_cycle:?}");
    assert_relative_eq!(after_cycle[0], 90.0);
    assert_relative_eq!(after_cycle[1], 80.0);
}
