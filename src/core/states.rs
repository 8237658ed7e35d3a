//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! the wave spawner only runs in the InGame state, so reaching GameOver
//! stops new waves from appearing.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read agent and spawner data files
/// - Enter `InGame` once data is in place
/// - `GameOver` when the player runs out of lives
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active simulation
    InGame,
    /// Player is out of lives
    GameOver,
}
