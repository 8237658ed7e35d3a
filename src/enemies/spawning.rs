//! Wave spawner.
//!
//! Keeps a roster of live agents. When the roster empties a new wave is
//! spawned, larger and with each agent rolled at a random intensity
//! between the configured weak and strong stats. Every agent carries an
//! ordered list of death listeners that clean it up and award score.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::components::*;
use super::data::{AgentDefinition, AgentRegistry, SpawnerConfig};
use crate::combat::{DeathEvent, DespawnTimer, Health};
use crate::core::SimRng;
use crate::navigation::NavAgent;
use crate::physics::{member_of, AGENT_LAYER};

/// Wave counter and live agent roster.
///
/// Roster membership changes only when an agent is spawned and when its
/// `LeaveRoster` listener fires.
#[derive(Resource, Default, Debug)]
pub struct WaveSpawner {
    wave: u32,
    roster: HashSet<Entity>,
    spawned: u64,
    retired: u64,
}

impl WaveSpawner {
    /// Current wave number, 0 before the first wave.
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn roster(&self) -> &HashSet<Entity> {
        &self.roster
    }

    /// Agents spawned since startup.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Roster departures since startup.
    pub fn retired(&self) -> u64 {
        self.retired
    }

    fn enlist(&mut self, agent: Entity) {
        if self.roster.insert(agent) {
            self.spawned += 1;
        }
    }

    fn retire(&mut self, agent: Entity) -> bool {
        let removed = self.roster.remove(&agent);
        if removed {
            self.retired += 1;
        }
        removed
    }
}

/// Points awarded for kills.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub u32);

/// Something to do when an agent dies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathListener {
    LeaveRoster,
    /// Remove the corpse after this many seconds
    DespawnAfter(f32),
    AwardScore(u32),
}

/// Death listeners of an agent, invoked in order.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DeathListeners(pub Vec<DeathListener>);

/// Per-agent stats derived from a spawn intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnProfile {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    pub patrol_speed: f32,
    pub tint: Srgba,
}

impl SpawnProfile {
    /// Interpolate between the weak (0.0) and strong (1.0) ends of the config.
    pub fn from_intensity(config: &SpawnerConfig, intensity: f32) -> Self {
        let t = intensity.clamp(0.0, 1.0);
        let speed = config.speed.lerp(t);

        let (wr, wg, wb) = config.weak_tint;
        let (sr, sg, sb) = config.strong_tint;

        Self {
            health: config.health.lerp(t),
            damage: config.damage.lerp(t),
            speed,
            patrol_speed: speed * config.patrol_speed_factor,
            tint: Srgba::rgb(wr + (sr - wr) * t, wg + (sg - wg) * t, wb + (sb - wb) * t),
        }
    }
}

/// Spawn a fully equipped agent.
pub fn spawn_agent(
    commands: &mut Commands,
    agent_type: &str,
    definition: &AgentDefinition,
    profile: &SpawnProfile,
    position: Vec3,
    listeners: Vec<DeathListener>,
) -> Entity {
    let attack = definition.attack_profile();
    let collider = &definition.collider;

    commands
        .spawn((
            (
                Agent,
                AgentType(agent_type.to_string()),
                AgentState::default(),
                AgentTarget::default(),
                AgentStats {
                    damage: profile.damage,
                    run_speed: profile.speed,
                    patrol_speed: profile.patrol_speed,
                    patrol_radius: definition.patrol_radius,
                },
                Health::new(profile.health),
            ),
            (
                definition.senses(),
                definition.attack_timing(),
                AttackCycle::default(),
                definition.turn_smoothing(),
                PerceptionTimer::every(definition.perception_interval),
            ),
            NavAgent::new(profile.patrol_speed, attack.reach),
            attack,
            SkinTint(profile.tint),
            Transform::from_translation(position),
            (
                Collider::capsule_y(collider.half_height, collider.radius),
                RigidBody::KinematicPositionBased,
                member_of(AGENT_LAYER),
            ),
            DeathListeners(listeners),
        ))
        .id()
}

/// Spawn the next wave once the roster is empty.
pub fn tick_spawner(
    mut commands: Commands,
    config: Res<SpawnerConfig>,
    registry: Res<AgentRegistry>,
    mut spawner: ResMut<WaveSpawner>,
    mut rng: ResMut<SimRng>,
) {
    if !spawner.roster.is_empty() {
        return;
    }

    let spawn_points = config.spawn_positions();
    if spawn_points.is_empty() {
        return;
    }

    let definition = match registry.get(&config.agent_type) {
        Some(definition) => definition.clone(),
        None => {
            warn!("Unknown agent type '{}', using defaults", config.agent_type);
            AgentDefinition::default()
        }
    };

    spawner.wave += 1;
    let count = config.spawn_count(spawner.wave);

    for _ in 0..count {
        let intensity = rng.0.gen_range(0.0..=1.0);
        let profile = SpawnProfile::from_intensity(&config, intensity);
        let Some(&position) = spawn_points.choose(&mut rng.0) else {
            continue;
        };

        let agent = spawn_agent(
            &mut commands,
            &config.agent_type,
            &definition,
            &profile,
            position,
            vec![
                DeathListener::LeaveRoster,
                DeathListener::DespawnAfter(config.corpse_lifetime),
                DeathListener::AwardScore(config.score_per_kill),
            ],
        );
        spawner.enlist(agent);
    }

    info!("Wave {} started: {} agents", spawner.wave, count);
}

/// Run each dying agent's listeners in registration order.
pub fn dispatch_death_listeners(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    query: Query<&DeathListeners>,
    mut spawner: ResMut<WaveSpawner>,
    mut score: ResMut<Score>,
) {
    for death in deaths.read() {
        let Ok(listeners) = query.get(death.entity) else {
            continue;
        };

        for listener in &listeners.0 {
            match *listener {
                DeathListener::LeaveRoster => {
                    if spawner.retire(death.entity) {
                        info!(
                            "Wave {}: {} agents remaining",
                            spawner.wave,
                            spawner.roster.len()
                        );
                    }
                }
                DeathListener::DespawnAfter(seconds) => {
                    commands.entity(death.entity).insert(DespawnTimer::after(seconds));
                }
                DeathListener::AwardScore(points) => {
                    score.0 += points;
                    debug!("Score: {}", score.0);
                }
            }
        }
    }
}
