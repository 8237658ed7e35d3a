mod common;

use bevy::prelude::*;
use common::*;
use horde_survival::combat::{Dead, DeathEvent, DespawnTimer, Health};
use horde_survival::enemies::{
    AgentStats, AgentType, DeathListener, DeathListeners, PerceptionTimer, Score, SkinTint,
    SpawnerConfig,
};
use horde_survival::navigation::NavAgent;

#[test]
fn first_wave_spawns_five_agents() {
    let mut app = test_app(SpawnerConfig::default());
    run(&mut app, 3);

    assert_eq!(spawner(&app).wave(), 1);
    assert_eq!(roster(&app).len(), 5);
}

#[test]
fn spawned_agents_roll_stats_inside_configured_ranges() {
    let config = SpawnerConfig::default();
    let mut app = test_app(config.clone());
    run(&mut app, 2);

    for agent in roster(&app) {
        let entity = app.world().entity(agent);
        let stats = entity.get::<AgentStats>().unwrap();
        let health = entity.get::<Health>().unwrap();

        assert!(health.maximum >= config.health.min && health.maximum <= config.health.max);
        assert!(stats.damage >= config.damage.min && stats.damage <= config.damage.max);
        assert!(stats.run_speed >= config.speed.min && stats.run_speed <= config.speed.max);
        assert!((stats.patrol_speed - stats.run_speed * 0.3).abs() < 1e-4);
        assert!(entity.contains::<SkinTint>());
        assert_eq!(
            entity.get::<DeathListeners>().unwrap().0,
            vec![
                DeathListener::LeaveRoster,
                DeathListener::DespawnAfter(10.0),
                DeathListener::AwardScore(100),
            ]
        );
    }
}

#[test]
fn clearing_a_wave_starts_a_larger_one() {
    let mut app = test_app(SpawnerConfig::default());
    run(&mut app, 2);

    let first = roster(&app);
    for agent in &first {
        kill(&mut app, *agent);
    }
    run(&mut app, 2);

    assert_eq!(spawner(&app).wave(), 2);
    assert_eq!(roster(&app).len(), 10);
    assert!(first.iter().all(|agent| !spawner(&app).roster().contains(agent)));
    assert_eq!(app.world().resource::<Score>().0, 500);
}

#[test]
fn roster_size_is_spawned_minus_retired() {
    let mut app = test_app(SpawnerConfig::default());
    run(&mut app, 2);

    let agents = roster(&app);
    for (i, agent) in agents.iter().take(3).enumerate() {
        kill(&mut app, *agent);
        run(&mut app, 1);

        let spawner = spawner(&app);
        assert_eq!(spawner.retired(), i as u64 + 1);
        assert_eq!(spawner.spawned() - spawner.retired(), spawner.roster().len() as u64);
    }

    // Killing a corpse again changes nothing
    kill(&mut app, agents[0]);
    run(&mut app, 1);
    assert_eq!(spawner(&app).retired(), 3);
    assert_eq!(app.world().resource::<Score>().0, 300);
}

#[test]
fn dead_agent_shuts_down_and_is_removed_later() {
    let mut app = test_app(SpawnerConfig::default());
    run(&mut app, 2);

    let agent = roster(&app)[0];
    kill(&mut app, agent);
    run(&mut app, 1);

    {
        let entity = app.world().entity(agent);
        assert!(entity.contains::<Dead>());
        assert!(entity.contains::<DespawnTimer>());
        assert!(!entity.contains::<PerceptionTimer>());
        let nav = entity.get::<NavAgent>().unwrap();
        assert!(!nav.enabled);
        assert!(nav.is_stopped);
    }

    // Corpse stays for its grace period
    run(&mut app, 40);
    assert!(app.world().entities().contains(agent));

    run(&mut app, 15);
    assert!(!app.world().entities().contains(agent));
}

#[test]
fn death_names_the_killer() {
    let mut app = test_app(SpawnerConfig::default());
    let player = spawn_target(&mut app, Vec3::new(50.0, 0.0, 50.0), 3);
    run(&mut app, 2);

    let agent = roster(&app)[0];
    assert_eq!(app.world().get::<AgentType>(agent).unwrap().0, "ghoul");

    hit(&mut app, agent, player, 10_000.0);
    run(&mut app, 1);

    let events = app.world().resource::<Events<DeathEvent>>();
    let mut cursor = events.get_cursor();
    let deaths: Vec<_> = cursor.read(events).collect();
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].entity, agent);
    assert_eq!(deaths[0].killed_by, Some(player));
}

#[test]
fn wounded_agent_stays_in_roster() {
    let mut app = test_app(SpawnerConfig::default());
    run(&mut app, 2);

    let agent = roster(&app)[0];
    hit(&mut app, agent, Entity::PLACEHOLDER, 1.0);
    run(&mut app, 1);

    assert!(spawner(&app).roster().contains(&agent));
    assert_eq!(app.world().resource::<Score>().0, 0);
}
