//! Agent and spawner data loading from RON files.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::components::{AttackProfile, AttackTiming, Senses, TurnSmoothing};
use crate::core::DataLoadError;

/// Root directory of the data files.
#[derive(Resource, Clone, Debug)]
pub struct DataRoot(pub PathBuf);

impl Default for DataRoot {
    fn default() -> Self {
        Self(PathBuf::from("assets/data"))
    }
}

/// Collider configuration for an agent type.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.6,
            radius: 0.4,
        }
    }
}

/// Agent type definition loaded from a RON file.
///
/// Only the per-type constants live here. Health, damage and speed are
/// rolled per agent by the spawner.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AgentDefinition {
    pub name: String,
    pub field_of_view: f32,
    pub view_distance: f32,
    pub eye_height: f32,
    pub attack_radius: f32,
    pub attack_reach: f32,
    pub attack_height: f32,
    pub wind_up: f32,
    pub strike: f32,
    /// Seconds to settle on a new facing while engaged
    pub turn_smooth_time: f32,
    pub patrol_radius: f32,
    /// Seconds between perception scans
    pub perception_interval: f32,
    pub collider: ColliderConfig,
}

impl Default for AgentDefinition {
    fn default() -> Self {
        let senses = Senses::default();
        let attack = AttackProfile::default();
        let timing = AttackTiming::default();

        Self {
            name: "Agent".to_string(),
            field_of_view: senses.field_of_view,
            view_distance: senses.view_distance,
            eye_height: senses.eye_height,
            attack_radius: attack.radius,
            attack_reach: attack.reach,
            attack_height: attack.height,
            wind_up: timing.wind_up,
            strike: timing.strike,
            turn_smooth_time: TurnSmoothing::default().smooth_time,
            patrol_radius: 20.0,
            perception_interval: 0.05,
            collider: ColliderConfig::default(),
        }
    }
}

impl AgentDefinition {
    pub fn senses(&self) -> Senses {
        Senses {
            field_of_view: self.field_of_view,
            view_distance: self.view_distance,
            eye_height: self.eye_height,
        }
    }

    pub fn attack_profile(&self) -> AttackProfile {
        AttackProfile {
            radius: self.attack_radius,
            reach: self.attack_reach,
            height: self.attack_height,
        }
    }

    pub fn turn_smoothing(&self) -> TurnSmoothing {
        TurnSmoothing {
            smooth_time: self.turn_smooth_time,
            velocity: 0.0,
        }
    }

    pub fn attack_timing(&self) -> AttackTiming {
        AttackTiming {
            wind_up: self.wind_up,
            strike: self.strike,
        }
    }
}

/// Resource holding all loaded agent definitions, keyed by file stem.
#[derive(Resource, Default)]
pub struct AgentRegistry {
    pub definitions: HashMap<String, AgentDefinition>,
}

impl AgentRegistry {
    /// Get an agent definition by type name.
    pub fn get(&self, agent_type: &str) -> Option<&AgentDefinition> {
        self.definitions.get(agent_type)
    }
}

/// Inclusive min/max pair interpolated by spawn intensity.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StatRange {
    pub min: f32,
    pub max: f32,
}

impl StatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }
}

/// Wave spawner tuning.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Agent definition used for every spawned agent
    pub agent_type: String,
    /// Agents spawned per wave number
    pub agents_per_wave: f32,
    pub health: StatRange,
    pub damage: StatRange,
    pub speed: StatRange,
    /// Patrol speed as a fraction of the rolled speed
    pub patrol_speed_factor: f32,
    pub weak_tint: (f32, f32, f32),
    pub strong_tint: (f32, f32, f32),
    pub spawn_points: Vec<(f32, f32, f32)>,
    pub score_per_kill: u32,
    /// Seconds a corpse stays before it is removed
    pub corpse_lifetime: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            agent_type: "ghoul".to_string(),
            agents_per_wave: 5.0,
            health: StatRange::new(100.0, 200.0),
            damage: StatRange::new(20.0, 40.0),
            speed: StatRange::new(3.0, 12.0),
            patrol_speed_factor: 0.3,
            weak_tint: (1.0, 1.0, 1.0),
            strong_tint: (0.8, 0.1, 0.1),
            spawn_points: vec![
                (-15.0, 0.0, -15.0),
                (15.0, 0.0, -15.0),
                (-15.0, 0.0, 15.0),
                (15.0, 0.0, 15.0),
            ],
            score_per_kill: 100,
            corpse_lifetime: 10.0,
        }
    }
}

impl SpawnerConfig {
    /// Number of agents in the given wave.
    pub fn spawn_count(&self, wave: u32) -> usize {
        (wave as f32 * self.agents_per_wave).round().max(0.0) as usize
    }

    pub fn spawn_positions(&self) -> Vec<Vec3> {
        self.spawn_points
            .iter()
            .map(|&(x, y, z)| Vec3::new(x, y, z))
            .collect()
    }
}

/// Read and deserialize a RON file.
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Load and validate a spawner configuration.
pub fn load_spawner_file(path: &Path) -> Result<SpawnerConfig, DataLoadError> {
    let config: SpawnerConfig = load_ron(path)?;

    if config.spawn_points.is_empty() {
        return Err(DataLoadError::NoSpawnPoints(path.display().to_string()));
    }

    Ok(config)
}

/// Load every agent definition under `<root>/agents/`.
pub fn load_agent_definitions(root: Res<DataRoot>, mut registry: ResMut<AgentRegistry>) {
    let agents_dir = root.0.join("agents");

    let Ok(entries) = fs::read_dir(&agents_dir) else {
        warn!("Agent definitions directory not found: {:?}", agents_dir);
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let Some(agent_type) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        match load_ron::<AgentDefinition>(&path) {
            Ok(definition) => {
                info!("Loaded agent definition: {} ({})", definition.name, agent_type);
                registry.definitions.insert(agent_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} agent definitions", registry.definitions.len());
}

/// Load `<root>/spawner.ron`, keeping the current configuration on failure.
pub fn load_spawner_config(root: Res<DataRoot>, mut config: ResMut<SpawnerConfig>) {
    let path = root.0.join("spawner.ron");

    match load_spawner_file(&path) {
        Ok(loaded) => {
            info!(
                "Loaded spawner config: {} agents per wave, {} spawn points",
                loaded.agents_per_wave,
                loaded.spawn_points.len()
            );
            *config = loaded;
        }
        Err(DataLoadError::FileNotFound(path)) => {
            warn!("Spawner config not found at {}, using defaults", path);
        }
        Err(e) => error!("{}, using defaults", e),
    }
}
