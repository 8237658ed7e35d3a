//! Enemy plugin - registers all agent systems.

use bevy::prelude::*;

use super::ai;
use super::animation;
use super::data::{load_agent_definitions, load_spawner_config, AgentRegistry, DataRoot, SpawnerConfig};
use super::spawning::{dispatch_death_listeners, tick_spawner, Score, WaveSpawner};
use crate::combat::CombatSet;
use crate::core::{enter_game, GameState};
use crate::navigation::NavigationSet;

/// System set ordering for agents within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnemySet {
    /// Wave spawning
    Spawn,
    /// Perception, state transitions and animation cues
    Think,
}

/// Enemy plugin - handles spawning, AI, death, and animation cues.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<DataRoot>()
            .init_resource::<AgentRegistry>()
            .init_resource::<SpawnerConfig>()
            .init_resource::<WaveSpawner>()
            .init_resource::<Score>()

            // Animation cue events
            .add_event::<animation::AttackCue>()
            .add_event::<animation::DeathCue>()
            .add_event::<animation::WindUpComplete>()
            .add_event::<animation::AttackComplete>()

            // Data is loaded before the game starts
            .add_systems(
                OnEnter(GameState::Loading),
                (load_agent_definitions, load_spawner_config).before(enter_game),
            )

            .configure_sets(
                Update,
                (EnemySet::Spawn, EnemySet::Think)
                    .chain()
                    .before(NavigationSet)
                    .before(CombatSet::Damage),
            )

            // No new waves once the game is over
            .add_systems(
                Update,
                tick_spawner
                    .in_set(EnemySet::Spawn)
                    .run_if(in_state(GameState::InGame)),
            )

            .add_systems(
                Update,
                (
                    ai::perception_cycle,
                    ai::check_attack_range,
                    animation::start_attack_animations,
                    animation::advance_attack_animations,
                    ai::on_wind_up_complete,
                    ai::on_attack_complete,
                )
                    .chain()
                    .in_set(EnemySet::Think),
            )

            // Reactions to this frame's damage and deaths
            .add_systems(
                Update,
                (
                    ai::retaliate,
                    ai::handle_agent_death,
                    animation::play_death_animations,
                    dispatch_death_listeners,
                )
                    .chain()
                    .in_set(CombatSet::Reactions),
            )

            // Facing and the attack sweep step with the fixed clock
            .add_systems(FixedUpdate, (ai::face_target, ai::resolve_attacks).chain());
    }
}
