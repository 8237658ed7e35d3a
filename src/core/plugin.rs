//! Core plugin that sets up game states, events, and the shared RNG.

use bevy::prelude::*;

use super::events::*;
use super::rng::SimRng;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver)
/// - Global events (DamageEvent, DeathEvent, etc.)
/// - The simulation RNG (kept if one was inserted beforehand)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DamageTaken>()
            .add_event::<DeathEvent>()
            .add_event::<EffectCue>()

            .init_resource::<SimRng>()

            // Loading state - data loaders run on OnEnter(Loading), then we move on
            .add_systems(OnEnter(GameState::Loading), enter_game)

            .add_systems(OnEnter(GameState::GameOver), announce_game_over);
    }
}

/// Transition from Loading to InGame.
/// Data loaders are ordered before this system by their plugins.
pub fn enter_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

fn announce_game_over() {
    info!("Game over");
}
